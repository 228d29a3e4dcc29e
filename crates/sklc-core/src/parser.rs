//! Assessment definition and response document loading.
//!
//! Definitions are JSON or TOML documents of the same shape. Loading is all
//! or nothing: any defect fails the load, and no partially built definition
//! is ever returned. [`validate_definition`] reports softer problems that
//! the engine tolerates at scoring time.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;

use crate::error::DefinitionError;
use crate::heuristics::ScoringMethod;
use crate::model::{
    AggregationConfig, AssessmentDefinition, ChoiceRule, Condition, Item, ItemType, Responses,
    ScoringSpec,
};

/// Intermediate structure for parsing definition documents.
#[derive(Debug, Deserialize)]
struct RawDefinition {
    #[serde(default)]
    title: String,
    #[serde(default)]
    domains: Vec<String>,
    #[serde(default)]
    items: Vec<RawItem>,
    #[serde(default)]
    aggregation: AggregationConfig,
}

#[derive(Debug, Deserialize)]
struct RawItem {
    id: String,
    #[serde(default = "default_item_type", alias = "type")]
    item_type: ItemType,
    #[serde(default)]
    domains: BTreeMap<String, f64>,
    #[serde(default)]
    scoring: RawScoring,
}

fn default_item_type() -> ItemType {
    ItemType::Other
}

#[derive(Debug, Default, Deserialize)]
struct RawScoring {
    #[serde(default)]
    response_type: Option<String>,
    #[serde(default)]
    rules: Vec<RawRule>,
    #[serde(default)]
    method: Option<String>,
    #[serde(default)]
    params: Value,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    #[serde(default)]
    condition: RawCondition,
    score: f64,
}

#[derive(Debug, Default, Deserialize)]
struct RawCondition {
    #[serde(default)]
    selected_option_id: Option<String>,
    #[serde(default)]
    selected_option_id_any: Option<bool>,
    #[serde(default)]
    selected_option_id_in: Option<Vec<String>>,
}

/// Document formats a definition can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Result<Self, DefinitionError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(DocumentFormat::Json),
            Some("toml") => Ok(DocumentFormat::Toml),
            other => Err(DefinitionError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

/// Load a definition file. The format follows the file extension.
pub fn load_definition(path: &Path) -> Result<AssessmentDefinition> {
    let format = DocumentFormat::from_path(path)
        .with_context(|| format!("cannot load definition: {}", path.display()))?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read definition file: {}", path.display()))?;

    let definition = parse_definition_str(&content, format)
        .with_context(|| format!("invalid definition: {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        items = definition.items.len(),
        domains = definition.domains.len(),
        "loaded assessment definition"
    );
    Ok(definition)
}

/// Parse a definition document from a string (useful for testing).
pub fn parse_definition_str(content: &str, format: DocumentFormat) -> Result<AssessmentDefinition> {
    let raw: RawDefinition = match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).context("failed to parse definition JSON")?
        }
        DocumentFormat::Toml => toml::from_str(content).context("failed to parse definition TOML")?,
    };
    Ok(build_definition(raw)?)
}

fn build_definition(raw: RawDefinition) -> Result<AssessmentDefinition, DefinitionError> {
    {
        let mut seen = HashSet::new();
        if let Some(dup) = raw.domains.iter().find(|d| !seen.insert(d.as_str())) {
            return Err(DefinitionError::DuplicateDomain(dup.clone()));
        }
    }

    for band in &raw.aggregation.banding.bands {
        let location = format!("band {}", band.band);
        ensure_finite(&location, "min_score", band.min_score)?;
        ensure_finite(&location, "max_score", band.max_score)?;
    }

    let stage = &raw.aggregation.global_stage;
    if stage.min_stage > stage.max_stage {
        return Err(DefinitionError::InvertedStageRange {
            min: stage.min_stage,
            max: stage.max_stage,
        });
    }

    let mut seen_items = HashSet::new();
    let mut items = Vec::with_capacity(raw.items.len());
    for raw_item in raw.items {
        if !seen_items.insert(raw_item.id.clone()) {
            return Err(DefinitionError::DuplicateItem(raw_item.id));
        }
        items.push(build_item(raw_item)?);
    }

    Ok(AssessmentDefinition {
        title: raw.title,
        domains: raw.domains,
        items,
        aggregation: raw.aggregation,
    })
}

fn build_item(raw: RawItem) -> Result<Item, DefinitionError> {
    for (domain, weight) in &raw.domains {
        ensure_finite(
            &format!("item {}", raw.id),
            &format!("domains.{domain}"),
            *weight,
        )?;
        if *weight < 0.0 {
            return Err(DefinitionError::NegativeWeight {
                item_id: raw.id.clone(),
                domain: domain.clone(),
                weight: *weight,
            });
        }
    }

    let scoring = build_scoring(&raw.id, raw.scoring)?;
    Ok(Item {
        id: raw.id,
        item_type: raw.item_type,
        domains: raw.domains,
        scoring,
    })
}

fn build_scoring(item_id: &str, mut raw: RawScoring) -> Result<ScoringSpec, DefinitionError> {
    let method = |raw: RawScoring| {
        ScoringMethod::from_config(raw.method.as_deref(), raw.params).map_err(|e| {
            DefinitionError::InvalidParams {
                item_id: item_id.to_string(),
                method: raw.method.clone().unwrap_or_default(),
                message: e.to_string(),
            }
        })
    };

    match raw.response_type.take().as_deref() {
        Some("single_choice") => {
            let rules = raw
                .rules
                .into_iter()
                .enumerate()
                .map(|(index, rule)| build_rule(item_id, index, rule))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(ScoringSpec::SingleChoice { rules })
        }
        Some("text") => Ok(ScoringSpec::Text(checked_method(item_id, method(raw)?)?)),
        Some("audio") => Ok(ScoringSpec::Audio(checked_method(item_id, method(raw)?)?)),
        _ => Ok(ScoringSpec::Unscored),
    }
}

fn checked_method(item_id: &str, method: ScoringMethod) -> Result<ScoringMethod, DefinitionError> {
    let location = format!("item {item_id}");
    for (field, value) in method.numeric_params() {
        ensure_finite(&location, &format!("params.{field}"), value)?;
    }
    Ok(method)
}

/// NaN and infinities parse from TOML but would poison every mean they
/// reach.
fn ensure_finite(location: &str, field: &str, value: f64) -> Result<(), DefinitionError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DefinitionError::NonFiniteNumber {
            location: location.to_string(),
            field: field.to_string(),
            value,
        })
    }
}

fn build_rule(item_id: &str, index: usize, raw: RawRule) -> Result<ChoiceRule, DefinitionError> {
    ensure_finite(
        &format!("item {item_id}"),
        &format!("rules[{index}].score"),
        raw.score,
    )?;

    let RawCondition {
        selected_option_id,
        selected_option_id_any,
        selected_option_id_in,
    } = raw.condition;

    let mut conditions: Vec<Condition> = Vec::new();
    if let Some(id) = selected_option_id {
        conditions.push(Condition::SelectedOptionId(id));
    }
    if let Some(any) = selected_option_id_any {
        conditions.push(Condition::SelectedOptionIdAny(any));
    }
    if let Some(options) = selected_option_id_in {
        conditions.push(Condition::SelectedOptionIdIn(options.into_iter().collect()));
    }

    if conditions.len() != 1 {
        return Err(DefinitionError::MalformedCondition {
            item_id: item_id.to_string(),
            rule_index: index,
            found: conditions.len(),
        });
    }

    Ok(ChoiceRule {
        condition: conditions.remove(0),
        score: raw.score,
    })
}

/// Load a learner's responses from a JSON object of item id to response.
pub fn load_responses(path: &Path) -> Result<Responses> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read responses file: {}", path.display()))?;
    parse_responses_str(&content)
        .with_context(|| format!("invalid responses: {}", path.display()))
}

/// Parse responses from a JSON string.
pub fn parse_responses_str(content: &str) -> Result<Responses> {
    serde_json::from_str(content).context("failed to parse responses JSON")
}

/// A warning from definition validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    /// The item ID (if applicable).
    pub item_id: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn item(item_id: &str, message: impl Into<String>) -> Self {
        Self {
            item_id: Some(item_id.to_string()),
            message: message.into(),
        }
    }

    fn global(message: impl Into<String>) -> Self {
        Self {
            item_id: None,
            message: message.into(),
        }
    }
}

/// Validate a loaded definition for problems the engine tolerates but an
/// operator should fix.
pub fn validate_definition(def: &AssessmentDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let declared: HashSet<&str> = def.domains.iter().map(String::as_str).collect();

    for item in &def.items {
        for domain in item.domains.keys() {
            if !declared.contains(domain.as_str()) {
                warnings.push(ValidationWarning::item(
                    &item.id,
                    format!("weight for undeclared domain: {domain}"),
                ));
            }
        }

        let contributes = item
            .domains
            .iter()
            .any(|(d, w)| *w > 0.0 && declared.contains(d.as_str()));
        if !contributes {
            warnings.push(ValidationWarning::item(
                &item.id,
                "item contributes to no declared domain",
            ));
        }

        match &item.scoring {
            ScoringSpec::SingleChoice { rules } if rules.is_empty() => {
                warnings.push(ValidationWarning::item(
                    &item.id,
                    "single_choice item has no rules and always scores 0.0",
                ));
            }
            ScoringSpec::Text(method) | ScoringSpec::Audio(method) if !method.is_known() => {
                let name = if method.name().is_empty() {
                    "<missing>"
                } else {
                    method.name()
                };
                warnings.push(ValidationWarning::item(
                    &item.id,
                    format!("unknown scoring method {name}, item always scores 0.0"),
                ));
            }
            ScoringSpec::Unscored => {
                warnings.push(ValidationWarning::item(
                    &item.id,
                    "missing or unknown response_type, item always scores 0.0",
                ));
            }
            _ => {}
        }
    }

    for domain in &def.domains {
        if !def.items.iter().any(|item| item.weight_for(domain) > 0.0) {
            warnings.push(ValidationWarning::global(format!(
                "domain {domain} has no contributing items and always scores 0.0"
            )));
        }
    }

    let stage = &def.aggregation.global_stage;
    if let Some(included) = &stage.included_domains {
        for domain in included {
            if !declared.contains(domain.as_str()) {
                warnings.push(ValidationWarning::global(format!(
                    "global stage includes undeclared domain: {domain}"
                )));
            }
        }
    }

    warnings.extend(validate_bands(def));
    warnings
}

fn validate_bands(def: &AssessmentDefinition) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let bands = &def.aggregation.banding.bands;
    let stage = &def.aggregation.global_stage;

    if bands.is_empty() {
        warnings.push(ValidationWarning::global(
            "band table is empty, every domain falls back to band 0",
        ));
        return warnings;
    }

    for b in bands {
        if b.min_score > b.max_score {
            warnings.push(ValidationWarning::global(format!(
                "band {} has min_score {} above max_score {}",
                b.band, b.min_score, b.max_score
            )));
        }
        if b.band < stage.min_stage || b.band > stage.max_stage {
            warnings.push(ValidationWarning::global(format!(
                "band {} lies outside the stage range [{}, {}]",
                b.band, stage.min_stage, stage.max_stage
            )));
        }
    }

    let mut sorted: Vec<_> = bands.iter().filter(|b| b.min_score <= b.max_score).collect();
    sorted.sort_by(|a, b| a.min_score.total_cmp(&b.min_score));

    if let Some(first) = sorted.first() {
        if first.min_score > 0.0 {
            warnings.push(ValidationWarning::global(format!(
                "scores below {} match no band",
                first.min_score
            )));
        }
    }
    if let Some(last) = sorted.iter().map(|b| b.max_score).reduce(f64::max) {
        if last < 1.0 {
            warnings.push(ValidationWarning::global(format!(
                "scores above {last} match no band"
            )));
        }
    }

    let mut covered_to = f64::NEG_INFINITY;
    for (prev, next) in sorted.iter().zip(sorted.iter().skip(1)) {
        covered_to = covered_to.max(prev.max_score);
        if next.min_score > covered_to {
            warnings.push(ValidationWarning::global(format!(
                "scores between {} and {} match no band",
                covered_to, next.min_score
            )));
        } else if next.min_score < covered_to {
            warnings.push(ValidationWarning::global(format!(
                "band {} overlaps band {}; the first listed wins",
                next.band, prev.band
            )));
        }
    }

    warnings
}
