//! sklc-core: scoring engine for the SKLC Korean speaking diagnostic.
//!
//! This crate defines the assessment data model, the definition loader,
//! per-item scoring heuristics, domain aggregation, banding, and the SKLC
//! level descriptors that the `sklc` CLI builds on.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod levels;
pub mod model;
pub mod parser;
pub mod report;
pub mod scoring;

pub use engine::{compute_results, AssessmentEngine};
pub use error::DefinitionError;
pub use levels::{describe, Language, LevelDescription};
pub use model::{AssessmentDefinition, AssessmentResult, Responses};
pub use parser::{load_definition, load_responses, validate_definition, ValidationWarning};
pub use report::ScoreReport;
