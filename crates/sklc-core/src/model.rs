//! Core data model types for sklc.
//!
//! An [`AssessmentDefinition`] is read-only configuration, loaded once and
//! shared freely. [`Responses`] and [`AssessmentResult`] are per-learner
//! values owned by the caller.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::heuristics::ScoringMethod;

/// A complete assessment: items, the domains they feed, and how domain
/// scores become bands and a global stage.
#[derive(Debug, Clone)]
pub struct AssessmentDefinition {
    /// Human-readable title.
    pub title: String,
    /// Domain names in declaration order. Unique.
    pub domains: Vec<String>,
    /// Items in declaration order. Ids are unique.
    pub items: Vec<Item>,
    /// Banding and global stage rules.
    pub aggregation: AggregationConfig,
}

impl AssessmentDefinition {
    /// Look up an item by id.
    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// The domains that feed the global stage.
    pub fn included_domains(&self) -> &[String] {
        self.aggregation.global_stage.included(&self.domains)
    }
}

/// One question or prompt in the assessment.
#[derive(Debug, Clone)]
pub struct Item {
    /// Unique identifier within the assessment.
    pub id: String,
    /// How the response is collected upstream. Does not drive scoring.
    pub item_type: ItemType,
    /// Domain name to non-negative contribution weight.
    pub domains: BTreeMap<String, f64>,
    /// How a response to this item is scored.
    pub scoring: ScoringSpec,
}

impl Item {
    /// Weight this item contributes to `domain`, or 0.0 if it does not.
    pub fn weight_for(&self, domain: &str) -> f64 {
        self.domains.get(domain).copied().unwrap_or(0.0)
    }
}

/// Presentation kind of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    McqSingle,
    TextShort,
    AudioRead,
    #[serde(other)]
    Other,
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::McqSingle => write!(f, "mcq_single"),
            ItemType::TextShort => write!(f, "text_short"),
            ItemType::AudioRead => write!(f, "audio_read"),
            ItemType::Other => write!(f, "other"),
        }
    }
}

/// Scoring strategy for one item, keyed by the response type it consumes.
#[derive(Debug, Clone)]
pub enum ScoringSpec {
    /// First matching rule wins; no match scores 0.0.
    SingleChoice { rules: Vec<ChoiceRule> },
    /// A text heuristic over free text.
    Text(ScoringMethod),
    /// A transcript heuristic. The transcript may be absent.
    Audio(ScoringMethod),
    /// No or unrecognised `response_type`. Always scores 0.0.
    Unscored,
}

/// A single-choice rule: if `condition` matches the response, the item
/// scores `score`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceRule {
    pub condition: Condition,
    pub score: f64,
}

/// What a single-choice rule matches on.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// Exact equality with the selected option id.
    SelectedOptionId(String),
    /// Any non-empty selection when `true`; never matches when `false`.
    SelectedOptionIdAny(bool),
    /// Membership in a set of option ids.
    SelectedOptionIdIn(BTreeSet<String>),
}

impl Condition {
    /// Whether `response` satisfies this condition.
    pub fn matches(&self, response: &str) -> bool {
        match self {
            Condition::SelectedOptionId(expected) => response == expected,
            Condition::SelectedOptionIdAny(enabled) => *enabled && !response.is_empty(),
            Condition::SelectedOptionIdIn(options) => options.contains(response),
        }
    }
}

/// Banding and global stage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationConfig {
    #[serde(default)]
    pub banding: Banding,
    #[serde(default)]
    pub global_stage: GlobalStageConfig,
}

/// Ordered band table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Banding {
    #[serde(default)]
    pub bands: Vec<BandDef>,
}

/// One band: scores in `[min_score, max_score]` (both inclusive) map to
/// `band`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandDef {
    pub band: u8,
    pub min_score: f64,
    pub max_score: f64,
}

impl BandDef {
    pub fn contains(&self, score: f64) -> bool {
        self.min_score <= score && score <= self.max_score
    }
}

/// How the averaged band is turned into an integer stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Ties go up: 2.5 becomes 3.
    #[default]
    HalfUp,
    /// Ties go to the even neighbour: 2.5 becomes 2, 3.5 becomes 4.
    HalfEven,
}

impl RoundingPolicy {
    /// Round a non-negative average band.
    pub fn round(self, value: f64) -> f64 {
        match self {
            // Averages of non-negative bands are never negative, so rounding
            // half away from zero is rounding half up.
            RoundingPolicy::HalfUp => value.round(),
            RoundingPolicy::HalfEven => value.round_ties_even(),
        }
    }
}

/// Global stage rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalStageConfig {
    /// Domains averaged into the stage. `None` means all domains.
    #[serde(default)]
    pub included_domains: Option<Vec<String>>,
    #[serde(default)]
    pub min_stage: u8,
    #[serde(default = "default_max_stage")]
    pub max_stage: u8,
    #[serde(default)]
    pub rounding: RoundingPolicy,
}

fn default_max_stage() -> u8 {
    5
}

impl Default for GlobalStageConfig {
    fn default() -> Self {
        Self {
            included_domains: None,
            min_stage: 0,
            max_stage: default_max_stage(),
            rounding: RoundingPolicy::default(),
        }
    }
}

impl GlobalStageConfig {
    /// Resolve the included domains against the full domain list.
    pub fn included<'a>(&'a self, all_domains: &'a [String]) -> &'a [String] {
        self.included_domains.as_deref().unwrap_or(all_domains)
    }
}

/// A learner's answers: item id to response.
///
/// A response is a selected option id, free text, or a transcript. `None`
/// (JSON `null`) and a missing key both mean "no response".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Responses(BTreeMap<String, Option<String>>);

impl Responses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a response, replacing any earlier one for the same item.
    pub fn insert(&mut self, item_id: impl Into<String>, response: impl Into<String>) {
        self.0.insert(item_id.into(), Some(response.into()));
    }

    /// Record an explicitly absent response (e.g. no transcript available).
    pub fn insert_absent(&mut self, item_id: impl Into<String>) {
        self.0.insert(item_id.into(), None);
    }

    /// The response for `item_id`, if one was given.
    pub fn get(&self, item_id: &str) -> Option<&str> {
        self.0.get(item_id).and_then(|r| r.as_deref())
    }

    /// Ids of every item with an entry, answered or not.
    pub fn item_ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Responses {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Some(v.into())))
                .collect(),
        )
    }
}

/// Engine output. Recomputed from scratch for every scoring call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    /// Weighted domain score in [0, 1], one entry per declared domain.
    pub domain_raw_scores: BTreeMap<String, f64>,
    /// Band per declared domain.
    pub domain_bands: BTreeMap<String, u8>,
    /// Overall stage, clamped to the configured range.
    pub global_stage: u8,
    /// Score in [0, 1] per item.
    #[serde(default)]
    pub item_scores: BTreeMap<String, f64>,
}
