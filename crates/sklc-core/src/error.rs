//! Definition loading error types.
//!
//! These are the only errors the engine surfaces. Scoring and aggregation are
//! total functions; a defective definition is rejected as a whole when it is
//! loaded, before any learner is scored against it.

use thiserror::Error;

/// Defects found while turning a definition document into an
/// [`AssessmentDefinition`](crate::model::AssessmentDefinition).
#[derive(Debug, Error)]
pub enum DefinitionError {
    /// Two items share the same id.
    #[error("duplicate item id: {0}")]
    DuplicateItem(String),

    /// A domain name is declared more than once.
    #[error("duplicate domain: {0}")]
    DuplicateDomain(String),

    /// A single-choice rule has no condition key, or more than one.
    #[error("item {item_id}: rule {rule_index} must have exactly one condition, found {found}")]
    MalformedCondition {
        item_id: String,
        rule_index: usize,
        found: usize,
    },

    /// A heuristic's `params` could not be parsed into its parameter shape.
    #[error("item {item_id}: invalid params for {method}: {message}")]
    InvalidParams {
        item_id: String,
        method: String,
        message: String,
    },

    /// An item declares a negative domain weight.
    #[error("item {item_id}: negative weight {weight} for domain {domain}")]
    NegativeWeight {
        item_id: String,
        domain: String,
        weight: f64,
    },

    /// A configured number is NaN or infinite.
    #[error("{location}: {field} must be a finite number, found {value}")]
    NonFiniteNumber {
        location: String,
        field: String,
        value: f64,
    },

    /// The global stage range is inverted.
    #[error("global stage range is inverted: min_stage {min} > max_stage {max}")]
    InvertedStageRange { min: u8, max: u8 },

    /// The definition file has an extension we do not read.
    #[error("unsupported definition format: {0} (expected .json or .toml)")]
    UnsupportedFormat(String),
}
