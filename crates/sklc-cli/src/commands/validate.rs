//! The `sklc validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(definition_path: PathBuf) -> Result<()> {
    let def = sklc_core::parser::load_definition(&definition_path)?;

    println!(
        "Assessment: {} ({} items, {} domains)",
        def.title,
        def.items.len(),
        def.domains.len()
    );

    let warnings = sklc_core::parser::validate_definition(&def);
    for w in &warnings {
        let prefix = w
            .item_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Definition is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
