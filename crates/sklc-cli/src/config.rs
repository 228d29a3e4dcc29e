//! `sklc` CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use sklc_core::Language;

/// Top-level sklc configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SklcConfig {
    /// Definition scored when `--definition` is not given.
    #[serde(default)]
    pub default_definition: Option<PathBuf>,
    /// Language for level descriptors.
    #[serde(default)]
    pub default_language: Language,
    /// Where `score --output` writes reports when no directory is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./sklc-results")
}

impl Default for SklcConfig {
    fn default() -> Self {
        Self {
            default_definition: None,
            default_language: Language::default(),
            output_dir: default_output_dir(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result.replace_range(start..start + end + 1, &value);
        from = start + value.len();
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `sklc.toml` in the current directory
/// 2. `~/.config/sklc/config.toml`
///
/// `SKLC_DEFINITION` overrides `default_definition`.
pub fn load_config_from(path: Option<&Path>) -> Result<SklcConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("sklc.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<SklcConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => SklcConfig::default(),
    };

    if let Ok(definition) = std::env::var("SKLC_DEFINITION") {
        if !definition.is_empty() {
            config.default_definition = Some(PathBuf::from(definition));
        }
    }

    config.default_definition = config.default_definition.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("sklc"))
}
