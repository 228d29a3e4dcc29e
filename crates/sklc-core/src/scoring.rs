//! Per-item scoring.
//!
//! [`score_item`] is a pure function of an item definition and a learner
//! response. It never fails: unanswered items, unmatched choices, unknown
//! methods and unscored items all produce a score, and every score lies in
//! [0, 1].

use crate::model::{ChoiceRule, Item, ScoringSpec};

/// Score one item against a response. `None` means the item was not
/// answered.
pub fn score_item(item: &Item, response: Option<&str>) -> f64 {
    let score = match &item.scoring {
        ScoringSpec::SingleChoice { rules } => score_single_choice(response.unwrap_or(""), rules),
        ScoringSpec::Text(method) | ScoringSpec::Audio(method) => {
            if !method.is_known() {
                tracing::warn!(
                    item = %item.id,
                    method = method.name(),
                    "unknown scoring method, scoring 0.0"
                );
            }
            method.score(response)
        }
        ScoringSpec::Unscored => {
            tracing::warn!(item = %item.id, "item has no response type, scoring 0.0");
            0.0
        }
    };
    let score = score.clamp(0.0, 1.0);
    tracing::debug!(item = %item.id, score, "scored item");
    score
}

/// First-match rule evaluation. The first rule whose condition holds
/// decides the score, even if a later rule would score higher. No match
/// scores 0.0.
pub fn score_single_choice(response: &str, rules: &[ChoiceRule]) -> f64 {
    rules
        .iter()
        .find(|rule| rule.condition.matches(response))
        .map_or(0.0, |rule| rule.score)
}
