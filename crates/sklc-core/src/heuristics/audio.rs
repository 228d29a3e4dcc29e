//! Pronunciation scoring over speech-to-text transcripts.
//!
//! PLACEHOLDER: these are not pronunciation measures. A real scorer would
//! align phonemes or words against the targets and compute an error rate.
//! Until that exists we compare the transcript to the targets lexically
//! and map the overlap ratio onto a coarse step ladder. Treat the results
//! as indicative only.

use serde::Deserialize;

/// Score for an item whose transcript is absent or empty.
///
/// A missing transcript usually means no speech-to-text service was wired
/// in, not that the learner failed, so the item is neither rewarded nor
/// zeroed.
pub const UNGRADED_SCORE: f64 = 0.5;

/// One rung of the ratio-to-score ladder.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Step {
    pub min_ratio: f64,
    pub score: f64,
}

fn default_steps() -> Vec<Step> {
    vec![
        Step {
            min_ratio: 0.85,
            score: 1.0,
        },
        Step {
            min_ratio: 0.70,
            score: 0.7,
        },
        Step {
            min_ratio: 0.50,
            score: 0.4,
        },
    ]
}

fn default_floor() -> f64 {
    0.2
}

/// Parameters for `asr_pron_wordlist_v1`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PronWordlistParams {
    pub target_words: Vec<String>,
    /// Checked in order; the first rung the ratio reaches wins.
    pub steps: Vec<Step>,
    /// Score when no rung is reached.
    pub floor_score: f64,
}

impl Default for PronWordlistParams {
    fn default() -> Self {
        Self {
            target_words: Vec::new(),
            steps: default_steps(),
            floor_score: default_floor(),
        }
    }
}

/// Parameters for `asr_pron_sentence_v1`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PronSentenceParams {
    pub target_sentences: Vec<String>,
    pub steps: Vec<Step>,
    pub floor_score: f64,
}

impl Default for PronSentenceParams {
    fn default() -> Self {
        Self {
            target_sentences: Vec::new(),
            steps: default_steps(),
            floor_score: default_floor(),
        }
    }
}

/// Map an overlap ratio through the ladder.
pub fn step_score(ratio: f64, steps: &[Step], floor_score: f64) -> f64 {
    steps
        .iter()
        .find(|step| ratio >= step.min_ratio)
        .map_or(floor_score, |step| step.score)
        .clamp(0.0, 1.0)
}

/// Fraction of target words that appear in the transcript.
pub fn wordlist_ratio(transcript: &str, target_words: &[String]) -> f64 {
    if target_words.is_empty() {
        return 0.0;
    }
    let found = target_words
        .iter()
        .filter(|word| transcript.contains(word.as_str()))
        .count();
    found as f64 / target_words.len() as f64
}

/// Transcript characters (spaces ignored) that occur in any target
/// sentence, over the total target characters (spaces ignored).
///
/// The ratio can exceed 1.0 for a transcript longer than its targets.
pub fn sentence_overlap_ratio(transcript: &str, target_sentences: &[String]) -> f64 {
    let total: usize = target_sentences
        .iter()
        .map(|s| s.chars().filter(|c| *c != ' ').count())
        .sum();
    if total == 0 {
        return 0.0;
    }
    let overlap = transcript
        .chars()
        .filter(|c| *c != ' ')
        .filter(|c| target_sentences.iter().any(|s| s.contains(*c)))
        .count();
    overlap as f64 / total as f64
}

pub fn pron_wordlist(transcript: Option<&str>, params: &PronWordlistParams) -> f64 {
    match transcript {
        Some(t) if !t.is_empty() => step_score(
            wordlist_ratio(t, &params.target_words),
            &params.steps,
            params.floor_score,
        ),
        _ => UNGRADED_SCORE,
    }
}

pub fn pron_sentence(transcript: Option<&str>, params: &PronSentenceParams) -> f64 {
    match transcript {
        Some(t) if !t.is_empty() => step_score(
            sentence_overlap_ratio(t, &params.target_sentences),
            &params.steps,
            params.floor_score,
        ),
        _ => UNGRADED_SCORE,
    }
}
