//! Score report envelope with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::levels::{self, Language};
use crate::model::{AssessmentDefinition, AssessmentResult};

/// A scored result together with what it was scored against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the assessment definition.
    pub assessment: AssessmentSummary,
    pub result: AssessmentResult,
    /// Descriptor for `result.global_stage`.
    pub level: ReportLevel,
}

/// Summary of an assessment (without the item definitions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSummary {
    pub title: String,
    pub item_count: usize,
    pub domain_count: usize,
}

impl From<&AssessmentDefinition> for AssessmentSummary {
    fn from(def: &AssessmentDefinition) -> Self {
        Self {
            title: def.title.clone(),
            item_count: def.items.len(),
            domain_count: def.domains.len(),
        }
    }
}

/// Level descriptor as stored in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportLevel {
    pub stage: u8,
    pub language: Language,
    pub level: String,
    pub description: String,
}

impl ReportLevel {
    pub fn new(stage: u8, language: Language) -> Self {
        let described = levels::describe(stage, language);
        Self {
            stage,
            language,
            level: described.level.to_string(),
            description: described.description.to_string(),
        }
    }
}

impl ScoreReport {
    pub fn new(def: &AssessmentDefinition, result: AssessmentResult, language: Language) -> Self {
        let level = ReportLevel::new(result.global_stage, language);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            assessment: def.into(),
            result,
            level,
        }
    }

    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: ScoreReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("## {}\n\n", self.assessment.title));
        md.push_str(&format!(
            "**Global stage:** {} ({})\n\n{}\n\n",
            self.result.global_stage, self.level.level, self.level.description
        ));

        md.push_str("| Domain | Raw score | Band |\n");
        md.push_str("|--------|-----------|------|\n");
        for (domain, score) in &self.result.domain_raw_scores {
            let band = self.result.domain_bands.get(domain).copied().unwrap_or(0);
            md.push_str(&format!("| {domain} | {score:.3} | {band} |\n"));
        }

        md
    }
}
