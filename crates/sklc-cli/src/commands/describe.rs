//! The `sklc describe` command.

use anyhow::Result;

use sklc_core::levels::{self, Language, MAX_DESCRIBED_STAGE};

pub fn execute(stage: u8, language: Language, format: String) -> Result<()> {
    if stage > MAX_DESCRIBED_STAGE {
        tracing::warn!(stage, "no descriptor for stage, showing stage 0");
    }
    let level = levels::describe(stage, language);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&level)?),
        _ => {
            println!("{}", level.level);
            println!("{}", level.description);
        }
    }

    Ok(())
}
