//! The `sklc score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use sklc_core::engine::AssessmentEngine;
use sklc_core::model::AssessmentResult;
use sklc_core::parser::{load_definition, load_responses};
use sklc_core::{Language, ScoreReport};

use crate::config::load_config_from;

pub fn execute(
    definition_path: Option<PathBuf>,
    responses_path: PathBuf,
    language: Option<Language>,
    format: String,
    output: Option<Option<PathBuf>>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let definition_path = definition_path
        .or(config.default_definition)
        .context("no definition given: pass --definition or set default_definition in sklc.toml")?;
    let language = language.unwrap_or(config.default_language);

    let definition = load_definition(&definition_path)?;
    let responses = load_responses(&responses_path)?;

    let unknown: Vec<&str> = responses
        .item_ids()
        .filter(|id| definition.item(id).is_none())
        .collect();
    if !unknown.is_empty() {
        tracing::warn!(items = ?unknown, "responses for unknown items are ignored");
    }

    let engine = AssessmentEngine::new(definition);
    let result = engine.score(&responses);
    let report = ScoreReport::new(engine.definition(), result, language);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&report.result)?);
        }
        "markdown" | "md" => {
            println!("{}", report.to_markdown());
        }
        "table" => print_table(engine.definition().included_domains(), &report),
        other => anyhow::bail!("unknown format: {other} (expected table, json or markdown)"),
    }

    if let Some(dir) = output {
        let dir = dir.unwrap_or(config.output_dir);
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
        let path = dir.join(format!("score-{timestamp}.json"));
        report.save_json(&path)?;
        eprintln!("Report saved to: {}", path.display());
    }

    Ok(())
}

fn print_table(included: &[String], report: &ScoreReport) {
    use comfy_table::{Cell, Table};

    let result: &AssessmentResult = &report.result;

    let mut table = Table::new();
    table.set_header(vec!["Domain", "Raw score", "Band", "In stage"]);

    for (domain, score) in &result.domain_raw_scores {
        let band = result.domain_bands.get(domain).copied().unwrap_or(0);
        let in_stage = if included.contains(domain) { "yes" } else { "no" };
        table.add_row(vec![
            Cell::new(domain),
            Cell::new(format!("{score:.3}")),
            Cell::new(band),
            Cell::new(in_stage),
        ]);
    }

    println!("{}", report.assessment.title);
    println!("{table}");
    println!(
        "\nGlobal stage: {} ({})",
        result.global_stage, report.level.level
    );
    println!("{}", report.level.description);
}
