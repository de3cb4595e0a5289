//! Configuration file loading with precedence handling.
//!
//! Precedence, lowest to highest: hardcoded defaults, TOML config file,
//! environment variables, CLI flags. Missing config files are not errors.

use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Errors during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Config file exists but could not be read.
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A setting failed validation after merging.
    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

/// TOML configuration file structure.
///
/// All fields optional; unset fields fall back to defaults. Lives at
/// `~/.config/scanview/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Base URL of the search API.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Module whose search endpoints to query (e.g. "nmap").
    #[serde(default)]
    pub module: Option<String>,

    /// Results per page.
    #[serde(default)]
    pub page_size: Option<u32>,

    /// Path to the tracing log file.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,
}

/// Resolved configuration after applying precedence rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Base URL of the search API.
    pub api_base_url: String,
    /// Module whose search endpoints to query.
    pub module: String,
    /// Results per page. Fixed for the life of the view.
    pub page_size: u32,
    /// Path to the tracing log file.
    pub log_file_path: PathBuf,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8080/api".to_string(),
            module: "nmap".to_string(),
            page_size: 10,
            log_file_path: default_log_path(),
        }
    }
}

/// Default log file location, platform state dir or the current directory as
/// a fallback.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("scanview").join("scanview.log")
    } else {
        PathBuf::from("scanview.log")
    }
}

/// Default config file location. `None` when the home directory cannot be
/// determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("scanview").join("config.toml"))
}

/// Load a config file from a specific path.
///
/// `Ok(None)` when the file does not exist; `Err` when it exists but cannot
/// be read or parsed.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    Ok(Some(config))
}

/// Locate and load the config file.
///
/// Precedence: explicit path (CLI `--config`), then the `SCANVIEW_CONFIG`
/// environment variable, then the default path.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var("SCANVIEW_CONFIG") {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge a loaded config file over the defaults.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    ResolvedConfig {
        api_base_url: config.api_base_url.unwrap_or(defaults.api_base_url),
        module: config.module.unwrap_or(defaults.module),
        page_size: config.page_size.unwrap_or(defaults.page_size),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
    }
}

/// Apply environment variable overrides (`SCANVIEW_API_URL`).
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Ok(url) = std::env::var("SCANVIEW_API_URL") {
        config.api_base_url = url;
    }
    config
}

/// Apply CLI flag overrides, the highest-precedence source, then validate
/// the result. The page size must be positive; it is immutable for the whole
/// session, so a bad value is a startup error rather than a runtime one.
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    url_override: Option<String>,
    module_override: Option<String>,
    page_size_override: Option<u32>,
) -> Result<ResolvedConfig, ConfigError> {
    if let Some(url) = url_override {
        config.api_base_url = url;
    }
    if let Some(module) = module_override {
        config.module = module;
    }
    if let Some(page_size) = page_size_override {
        config.page_size = page_size;
    }

    if config.page_size == 0 {
        return Err(ConfigError::InvalidValue(
            "page_size must be greater than zero".to_string(),
        ));
    }

    Ok(config)
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
