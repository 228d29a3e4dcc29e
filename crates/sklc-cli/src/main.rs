//! sklc CLI: score Korean speaking diagnostics from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use sklc_core::Language;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "sklc", version, about = "Korean speaking diagnostic scoring engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a learner's responses
    Score {
        /// Assessment definition (.json or .toml); defaults to the config's
        #[arg(long)]
        definition: Option<PathBuf>,

        /// Learner responses JSON (item id -> response)
        #[arg(long)]
        responses: PathBuf,

        /// Level descriptor language: en, ko
        #[arg(long)]
        lang: Option<Language>,

        /// Output format: table, json, markdown
        #[arg(long, default_value = "table")]
        format: String,

        /// Write a JSON score report to this directory (config output_dir if omitted)
        #[arg(long, num_args = 0..=1, value_name = "DIR")]
        output: Option<Option<PathBuf>>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate an assessment definition
    Validate {
        /// Path to the definition file
        #[arg(long)]
        definition: PathBuf,
    },

    /// Show the SKLC level descriptor for a stage
    Describe {
        /// Global stage (0-5)
        #[arg(long)]
        stage: u8,

        /// Descriptor language: en, ko
        #[arg(long, default_value = "en")]
        lang: Language,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Create starter config and example assessment
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            // "sklc" is a target prefix, so it also covers sklc_core events.
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("sklc=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            definition,
            responses,
            lang,
            format,
            output,
            config,
        } => commands::score::execute(definition, responses, lang, format, output, config),
        Commands::Validate { definition } => commands::validate::execute(definition),
        Commands::Describe {
            stage,
            lang,
            format,
        } => commands::describe::execute(stage, lang, format),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
