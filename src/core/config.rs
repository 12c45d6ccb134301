//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.element-explorer/config.toml`. If missing on first
//! run, a commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::View;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub dataset_file: Option<String>,
    pub log_level: Option<String>,
    pub start_view: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub dataset_file: Option<PathBuf>,
    pub log_level: LevelFilter,
    pub start_view: View,
    pub offline: bool,
    pub gemini_api_key: Option<String>,
    pub gemini_base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout: Duration,
}

/// Values given on the command line. `None`/`false` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub dataset: Option<PathBuf>,
    pub view: Option<View>,
    pub offline: bool,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.element-explorer/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".element-explorer").join("config.toml"))
}

/// Load config from `~/.element-explorer/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ExplorerConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ExplorerConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ExplorerConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ExplorerConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ExplorerConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ExplorerConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", redacted(&config));
    Ok(config)
}

/// Debug view of the config with the API key masked.
fn redacted(config: &ExplorerConfig) -> String {
    format!(
        "general={:?}, gemini.api_key={}, gemini.base_url={:?}, gemini.text_model={:?}, gemini.image_model={:?}",
        config.general,
        if config.gemini.api_key.is_some() { "<set>" } else { "<unset>" },
        config.gemini.base_url,
        config.gemini.text_model,
        config.gemini.image_model,
    )
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Element Explorer Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# dataset_file = "/path/to/elements.json"   # Or ELEMENT_EXPLORER_DATASET / --dataset
# log_level = "debug"                       # "off", "error", "warn", "info", "debug", "trace"
# start_view = "table"                      # "table" or "quiz"

# [gemini]
# api_key = "..."                           # Or set GEMINI_API_KEY env var
# base_url = "https://generativelanguage.googleapis.com/v1beta"
# text_model = "gemini-2.5-flash"
# image_model = "gemini-2.5-flash-image"
# timeout_secs = 30
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &ExplorerConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// `resolve` with an injectable environment lookup.
pub fn resolve_with_env<F>(config: &ExplorerConfig, cli: &CliOverrides, env: F) -> ResolvedConfig
where
    F: Fn(&str) -> Option<String>,
{
    // Dataset: CLI → env → config → bundled
    let dataset_file = cli
        .dataset
        .clone()
        .or_else(|| env("ELEMENT_EXPLORER_DATASET").map(PathBuf::from))
        .or_else(|| config.general.dataset_file.as_ref().map(PathBuf::from));

    let log_level = config
        .general
        .log_level
        .as_deref()
        .and_then(|s| match s.parse::<LevelFilter>() {
            Ok(level) => Some(level),
            Err(_) => {
                warn!("Unknown log_level {:?}, using {}", s, DEFAULT_LOG_LEVEL);
                None
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Start view: CLI → config → table
    let start_view = cli
        .view
        .or_else(|| config.general.start_view.as_deref().and_then(View::parse))
        .unwrap_or_default();

    // API key: env → config. Blank keys count as missing.
    let gemini_api_key = env("GEMINI_API_KEY")
        .or_else(|| config.gemini.api_key.clone())
        .filter(|k| !k.trim().is_empty());

    // Base URL: env → config → default
    let gemini_base_url = env("GEMINI_BASE_URL")
        .or_else(|| config.gemini.base_url.clone())
        .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

    ResolvedConfig {
        dataset_file,
        log_level,
        start_view,
        offline: cli.offline,
        gemini_api_key,
        gemini_base_url,
        text_model: config
            .gemini
            .text_model
            .clone()
            .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
        image_model: config
            .gemini
            .image_model
            .clone()
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
        request_timeout: Duration::from_secs(
            config.gemini.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
    }
}
