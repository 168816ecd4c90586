//! Configuration loading and resolution
//!
//! Every setting resolves with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! The API credential has no compiled default and must come from one of the
//! first three tiers.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.rawg.io/api";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5780";
pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const ENV_API_KEY: &str = "GAMEWIRE_API_KEY";
pub const ENV_BASE_URL: &str = "GAMEWIRE_BASE_URL";
pub const ENV_BIND_ADDRESS: &str = "GAMEWIRE_BIND";
pub const ENV_LOG_LEVEL: &str = "GAMEWIRE_LOG";
pub const ENV_CONFIG_PATH: &str = "GAMEWIRE_CONFIG";

/// Logging section of the TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter level (trace, debug, info, warn, error)
    pub level: Option<String>,
}

/// On-disk configuration (`config.toml`)
///
/// Every field is optional; a missing file behaves like an empty one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub bind_address: Option<String>,
    /// Per-request timeout; absent means requests never time out
    pub request_timeout_secs: Option<u64>,
    pub logging: LoggingConfig,
}

/// Values used when no tier supplies a setting
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub base_url: String,
    pub bind_address: String,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Settings supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub bind_address: Option<String>,
    pub config_path: Option<PathBuf>,
}

/// Fully resolved, immutable configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub api_key: String,
    pub base_url: String,
    pub bind_address: String,
    pub log_level: String,
    pub request_timeout: Option<Duration>,
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

/// Platform default location of `config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("gamewire").join("config.toml"))
}

/// Load the TOML file at `path`
///
/// A missing file yields an empty config with a warning; an unreadable or
/// malformed file is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        warn!(
            "Config file {} not found, using defaults",
            path.display()
        );
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: TomlConfig = toml::from_str(&content)?;
    info!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Resolves [`CatalogConfig`] from CLI, environment, TOML and defaults
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    overrides: ConfigOverrides,
    defaults: CompiledDefaults,
}

impl ConfigResolver {
    pub fn new(overrides: ConfigOverrides) -> Self {
        Self {
            overrides,
            defaults: CompiledDefaults::default(),
        }
    }

    /// TOML path: `--config`, then `GAMEWIRE_CONFIG`, then the platform default
    pub fn config_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.overrides.config_path {
            return Some(path.clone());
        }
        if let Some(path) = env_value(ENV_CONFIG_PATH) {
            return Some(PathBuf::from(path));
        }
        default_config_path()
    }

    /// Load the TOML tier and resolve every setting
    pub fn resolve(&self) -> Result<CatalogConfig> {
        let toml_config = match self.config_path() {
            Some(path) => load_toml_config(&path)?,
            None => TomlConfig::default(),
        };
        self.resolve_with(&toml_config)
    }

    /// Resolve every setting against an already loaded TOML tier
    pub fn resolve_with(&self, toml_config: &TomlConfig) -> Result<CatalogConfig> {
        let api_key = self.resolve_api_key(toml_config)?;

        let base_url = first_present([
            self.overrides.base_url.clone(),
            env_value(ENV_BASE_URL),
            toml_config.base_url.clone(),
        ])
        .unwrap_or_else(|| self.defaults.base_url.clone());

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(Error::Config(format!(
                "Base URL must start with http:// or https://, got {:?}",
                base_url
            )));
        }

        let bind_address = first_present([
            self.overrides.bind_address.clone(),
            env_value(ENV_BIND_ADDRESS),
            toml_config.bind_address.clone(),
        ])
        .unwrap_or_else(|| self.defaults.bind_address.clone());

        let log_level = first_present([
            env_value(ENV_LOG_LEVEL),
            toml_config.logging.level.clone(),
        ])
        .unwrap_or_else(|| self.defaults.log_level.clone());

        Ok(CatalogConfig {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            bind_address,
            log_level,
            request_timeout: toml_config
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        })
    }

    fn resolve_api_key(&self, toml_config: &TomlConfig) -> Result<String> {
        let candidates = [
            ("command line", self.overrides.api_key.clone()),
            ("environment", env_value(ENV_API_KEY)),
            ("TOML", toml_config.api_key.clone()),
        ];

        let valid: Vec<(&str, String)> = candidates
            .into_iter()
            .filter_map(|(source, key)| key.filter(|k| is_valid_key(k)).map(|k| (source, k)))
            .collect();

        // Warn if multiple sources (potential misconfiguration)
        if valid.len() > 1 {
            let sources: Vec<&str> = valid.iter().map(|(source, _)| *source).collect();
            warn!(
                "API key found in multiple sources: {}. Using {} (highest priority).",
                sources.join(", "),
                sources[0]
            );
        }

        match valid.into_iter().next() {
            Some((source, key)) => {
                info!("API key loaded from {}", source);
                Ok(key.trim().to_string())
            }
            None => Err(Error::Config(format!(
                "Catalog API key not configured. Please configure using one of:\n\
                 1. Command line: --api-key your-key-here\n\
                 2. Environment: {}=your-key-here\n\
                 3. TOML config: ~/.config/gamewire/config.toml (api_key = \"your-key\")\n\
                 \n\
                 Obtain an API key at: https://rawg.io/apidocs",
                ENV_API_KEY
            ))),
        }
    }
}

/// Non-empty environment variable value
fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn first_present<const N: usize>(values: [Option<String>; N]) -> Option<String> {
    values
        .into_iter()
        .flatten()
        .find(|v| !v.trim().is_empty())
}
