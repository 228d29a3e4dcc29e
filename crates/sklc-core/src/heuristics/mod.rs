//! Named heuristic scorers for text and transcript responses.
//!
//! The definition document refers to a scorer by method name and hands it a
//! free-form `params` bag. Both are resolved once, at load time, into a
//! [`ScoringMethod`]: a closed set of strategies each carrying its own typed
//! parameters. Names we do not recognise become [`ScoringMethod::Unknown`],
//! which always scores 0.0.

pub mod audio;
pub mod text;

use std::fmt;
use std::ops::Deref;

use regex::Regex;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use audio::{PronSentenceParams, PronWordlistParams, Step};
pub use text::{PastRoutineParams, PoliteRewriteParams, SelfIntroParams};

pub const SELF_INTRO_V1: &str = "heuristic_self_intro_v1";
pub const PAST_ROUTINE_V1: &str = "heuristic_past_routine_v1";
pub const POLITE_REWRITE_V1: &str = "heuristic_professor_polite_rewrite_v1";
pub const PRON_WORDLIST_V1: &str = "asr_pron_wordlist_v1";
pub const PRON_SENTENCE_V1: &str = "asr_pron_sentence_v1";

/// Every method name the engine knows how to score.
pub const KNOWN_METHODS: &[&str] = &[
    SELF_INTRO_V1,
    PAST_ROUTINE_V1,
    POLITE_REWRITE_V1,
    PRON_WORDLIST_V1,
    PRON_SENTENCE_V1,
];

/// A scoring strategy together with its parsed parameters.
#[derive(Debug, Clone)]
pub enum ScoringMethod {
    SelfIntro(SelfIntroParams),
    PastRoutine(PastRoutineParams),
    PoliteRewrite(PoliteRewriteParams),
    PronWordlist(PronWordlistParams),
    PronSentence(PronSentenceParams),
    /// Unrecognised or missing method name. Scores 0.0.
    Unknown(String),
}

impl ScoringMethod {
    /// Resolve a method name and its `params` bag.
    ///
    /// Missing `params` (or JSON `null`) means "all defaults". Params of the
    /// wrong shape, or regex patterns that do not compile, are an error.
    pub fn from_config(name: Option<&str>, params: Value) -> Result<Self, serde_json::Error> {
        let params = match params {
            Value::Null => Value::Object(Default::default()),
            other => other,
        };

        let method = match name {
            Some(SELF_INTRO_V1) => ScoringMethod::SelfIntro(serde_json::from_value(params)?),
            Some(PAST_ROUTINE_V1) => ScoringMethod::PastRoutine(serde_json::from_value(params)?),
            Some(POLITE_REWRITE_V1) => {
                ScoringMethod::PoliteRewrite(serde_json::from_value(params)?)
            }
            Some(PRON_WORDLIST_V1) => ScoringMethod::PronWordlist(serde_json::from_value(params)?),
            Some(PRON_SENTENCE_V1) => ScoringMethod::PronSentence(serde_json::from_value(params)?),
            Some(other) => ScoringMethod::Unknown(other.to_string()),
            None => ScoringMethod::Unknown(String::new()),
        };
        Ok(method)
    }

    /// The configured method name.
    pub fn name(&self) -> &str {
        match self {
            ScoringMethod::SelfIntro(_) => SELF_INTRO_V1,
            ScoringMethod::PastRoutine(_) => PAST_ROUTINE_V1,
            ScoringMethod::PoliteRewrite(_) => POLITE_REWRITE_V1,
            ScoringMethod::PronWordlist(_) => PRON_WORDLIST_V1,
            ScoringMethod::PronSentence(_) => PRON_SENTENCE_V1,
            ScoringMethod::Unknown(name) => name,
        }
    }

    /// Every configured number, labelled with its path under `params`.
    pub fn numeric_params(&self) -> Vec<(String, f64)> {
        match self {
            ScoringMethod::SelfIntro(p) => labelled(&[
                ("weights.sentences", p.weights.sentences),
                ("weights.basic_verbs", p.weights.basic_verbs),
                ("weights.topic_or_hobby", p.weights.topic_or_hobby),
                ("partial_credit", p.partial_credit),
                ("length_bonus", p.length_bonus),
            ]),
            ScoringMethod::PastRoutine(p) => labelled(&[
                ("weights.sentences", p.weights.sentences),
                ("weights.past_tense", p.weights.past_tense),
                ("weights.content_words", p.weights.content_words),
                ("sentence_partial_credit", p.sentence_partial_credit),
                ("past_tense_partial_credit", p.past_tense_partial_credit),
            ]),
            ScoringMethod::PoliteRewrite(p) => labelled(&[
                ("weights.address_professor", p.weights.address_professor),
                ("weights.apology", p.weights.apology),
                ("weights.polite_endings", p.weights.polite_endings),
                ("weights.request_content", p.weights.request_content),
                ("weights.penalty_casual", p.weights.penalty_casual),
            ]),
            ScoringMethod::PronWordlist(p) => ladder(&p.steps, p.floor_score),
            ScoringMethod::PronSentence(p) => ladder(&p.steps, p.floor_score),
            ScoringMethod::Unknown(_) => Vec::new(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ScoringMethod::Unknown(_))
    }

    /// Score a response in [0, 1].
    ///
    /// Text heuristics read an absent response as empty text (score 0.0).
    /// Transcript heuristics give an absent or empty transcript the
    /// ungraded score [`audio::UNGRADED_SCORE`].
    pub fn score(&self, response: Option<&str>) -> f64 {
        let text = response.unwrap_or("");
        match self {
            ScoringMethod::SelfIntro(p) => text::self_intro(text, p),
            ScoringMethod::PastRoutine(p) => text::past_routine(text, p),
            ScoringMethod::PoliteRewrite(p) => text::polite_rewrite(text, p),
            ScoringMethod::PronWordlist(p) => audio::pron_wordlist(response, p),
            ScoringMethod::PronSentence(p) => audio::pron_sentence(response, p),
            ScoringMethod::Unknown(_) => 0.0,
        }
    }
}

/// Count sentences by sentence-final punctuation, including the full-width
/// period. Any non-blank text has at least one sentence.
pub fn count_sentences(text: &str) -> usize {
    if text.trim().is_empty() {
        return 0;
    }
    let endings = text
        .chars()
        .filter(|c| matches!(c, '.' | '?' | '!' | '。'))
        .count();
    endings.max(1)
}

/// Number of distinct lexicon entries that occur in `text`.
pub fn count_present(lexicon: &[String], text: &str) -> usize {
    lexicon.iter().filter(|entry| text.contains(entry.as_str())).count()
}

/// A regex compiled when the definition is loaded.
#[derive(Debug, Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(re: &str) -> Result<Self, regex::Error> {
        Regex::new(re).map(Pattern)
    }
}

impl From<Regex> for Pattern {
    fn from(re: Regex) -> Self {
        Pattern(re)
    }
}

impl Deref for Pattern {
    type Target = Regex;

    fn deref(&self) -> &Regex {
        &self.0
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Pattern::new(&raw).map_err(serde::de::Error::custom)
    }
}

fn labelled(fields: &[(&str, f64)]) -> Vec<(String, f64)> {
    fields
        .iter()
        .map(|(name, value)| (name.to_string(), *value))
        .collect()
}

fn ladder(steps: &[Step], floor_score: f64) -> Vec<(String, f64)> {
    let mut fields: Vec<(String, f64)> = steps
        .iter()
        .enumerate()
        .flat_map(|(i, step)| {
            [
                (format!("steps[{i}].min_ratio"), step.min_ratio),
                (format!("steps[{i}].score"), step.score),
            ]
        })
        .collect();
    fields.push(("floor_score".to_string(), floor_score));
    fields
}

/// Full `weight` at `full_at` hits or more, `partial` of it from one hit.
fn tiered_credit(hits: usize, full_at: usize, weight: f64, partial: f64) -> f64 {
    if hits >= full_at {
        weight
    } else if hits >= 1 {
        weight * partial
    } else {
        0.0
    }
}
