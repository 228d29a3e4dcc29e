//! Domain aggregation, banding and the global stage.
//!
//! Item scores are rolled into weighted domain scores, each domain score is
//! mapped to a band through the band table, and the bands of the included
//! domains are averaged into one global stage.

use std::collections::BTreeMap;

use crate::model::{BandDef, Item, Responses, RoundingPolicy};
use crate::scoring::score_item;

/// Score every item. Items missing from `responses` are scored as
/// unanswered rather than skipped.
pub fn compute_item_scores(items: &[Item], responses: &Responses) -> BTreeMap<String, f64> {
    items
        .iter()
        .map(|item| (item.id.clone(), score_item(item, responses.get(&item.id))))
        .collect()
}

/// Weighted mean item score per domain.
///
/// Each item contributes `score * weight` to every domain it declares a
/// positive weight for. A domain with no positive weight scores 0.0. The
/// result has exactly one entry per name in `domains`.
pub fn compute_domain_scores(
    items: &[Item],
    responses: &Responses,
    domains: &[String],
) -> BTreeMap<String, f64> {
    let item_scores = compute_item_scores(items, responses);
    aggregate_domain_scores(items, &item_scores, domains)
}

/// [`compute_domain_scores`] over item scores that were already computed.
/// Items absent from `item_scores` count as 0.0.
pub fn aggregate_domain_scores(
    items: &[Item],
    item_scores: &BTreeMap<String, f64>,
    domains: &[String],
) -> BTreeMap<String, f64> {
    domains
        .iter()
        .map(|domain| {
            let (weighted_sum, weight_total) = items
                .iter()
                .map(|item| (item, item.weight_for(domain)))
                .filter(|(_, weight)| *weight > 0.0)
                .fold((0.0, 0.0), |(sum, total), (item, weight)| {
                    let score = item_scores.get(&item.id).copied().unwrap_or(0.0);
                    (sum + score * weight, total + weight)
                });

            let score = if weight_total > 0.0 {
                weighted_sum / weight_total
            } else {
                0.0
            };
            (domain.clone(), score)
        })
        .collect()
}

/// Band of the first interval (both ends inclusive) containing `score`.
///
/// A score that falls in no band, because of a gap or an incomplete table,
/// maps to band 0. That is a configuration problem, so it is logged, but
/// it never stops a learner from getting a result.
pub fn score_to_band(score: f64, bands: &[BandDef]) -> u8 {
    match bands.iter().find(|b| b.contains(score)) {
        Some(b) => b.band,
        None => {
            tracing::warn!(score, "score matched no band, falling back to band 0");
            0
        }
    }
}

/// Band per domain.
pub fn compute_domain_bands(
    domain_scores: &BTreeMap<String, f64>,
    bands: &[BandDef],
) -> BTreeMap<String, u8> {
    domain_scores
        .iter()
        .map(|(domain, score)| (domain.clone(), score_to_band(*score, bands)))
        .collect()
}

/// Average the bands of the included domains into one stage.
///
/// Included domains without a band are skipped, not counted as zero. With
/// nothing to average the stage is `min_stage`. The average is rounded with
/// `rounding` and then clamped to `[min_stage, max_stage]`.
pub fn compute_global_stage(
    domain_bands: &BTreeMap<String, u8>,
    included_domains: &[String],
    min_stage: u8,
    max_stage: u8,
    rounding: RoundingPolicy,
) -> u8 {
    let included: Vec<u8> = included_domains
        .iter()
        .filter_map(|d| domain_bands.get(d).copied())
        .collect();

    if included.is_empty() {
        return min_stage;
    }

    let average = included.iter().map(|b| f64::from(*b)).sum::<f64>() / included.len() as f64;
    let stage = rounding
        .round(average)
        .max(f64::from(min_stage))
        .min(f64::from(max_stage));
    stage as u8
}
