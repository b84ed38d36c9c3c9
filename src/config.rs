//! Configuration loading and validation.
//!
//! Weft reads an optional `~/.weft/config.toml`; every field has a
//! default, so running without any config file works out of the box.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model selection.
    pub models: ModelsConfig,

    /// Pattern library location.
    pub patterns: PatternsConfig,

    /// Outbound HTTP behavior for content loaders.
    pub http: HttpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            models: ModelsConfig::default(),
            patterns: PatternsConfig::default(),
            http: HttpConfig::default(),
        }
    }
}

/// Model selection: the default `provider/model` spec.
#[derive(Debug, Deserialize)]
pub struct ModelsConfig {
    /// Default model identifier (e.g. "anthropic/claude-sonnet-4-5").
    #[serde(default = "default_model")]
    pub default: String,
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            default: default_model(),
        }
    }
}

/// Pattern library location.
#[derive(Debug, Deserialize)]
pub struct PatternsConfig {
    /// Directory holding one subdirectory per pattern. A leading `~`
    /// is expanded at use.
    #[serde(default = "default_patterns_dir")]
    pub dir: String,
}

impl Default for PatternsConfig {
    fn default() -> Self {
        Self {
            dir: default_patterns_dir(),
        }
    }
}

/// Outbound HTTP behavior for content loaders.
#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent by content loaders. Several sites answer
    /// plain library agents with interstitials, so a browser string is
    /// the default.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// Default value functions for serde

fn default_model() -> String {
    "anthropic/claude-sonnet-4-5".to_owned()
}

fn default_patterns_dir() -> String {
    "~/.config/fabric/patterns".to_owned()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
        .to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}

/// Filesystem locations under the weft home directory.
#[derive(Debug, Clone)]
pub struct RuntimePaths {
    /// The `~/.weft` directory itself.
    pub base_dir: PathBuf,
    /// `~/.weft/config.toml`.
    pub config_file: PathBuf,
    /// `~/.weft/.env` credentials file.
    pub env_file: PathBuf,
    /// `~/.weft/logs` directory for file logging.
    pub log_dir: PathBuf,
}

/// Resolve the runtime paths under `~/.weft`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn runtime_paths() -> anyhow::Result<RuntimePaths> {
    let home = directories::BaseDirs::new()
        .ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    let base_dir = home.home_dir().join(".weft");
    Ok(RuntimePaths {
        config_file: base_dir.join("config.toml"),
        env_file: base_dir.join(".env"),
        log_dir: base_dir.join("logs"),
        base_dir,
    })
}

/// Load config from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read config at {}: {e}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("failed to parse config at {}: {e}", path.display()))?;
    Ok(config)
}

/// Load config from `~/.weft/config.toml`, falling back to defaults
/// when the file does not exist.
///
/// # Errors
///
/// Returns an error when the home directory cannot be resolved or an
/// existing config file is malformed.
pub fn load_default_config() -> anyhow::Result<Config> {
    let paths = runtime_paths()?;
    if !paths.config_file.exists() {
        return Ok(Config::default());
    }
    load_config(&paths.config_file)
}
