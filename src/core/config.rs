//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parley/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::localize::TableLocalizer;
use crate::core::message::Auth;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParleyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Inline translations, keyed by English title.
    #[serde(default)]
    pub strings: HashMap<String, String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub locale_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub realm: Option<String>,
    pub email: Option<String>,
    pub api_key: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: &str = "debug";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: String,
    pub realm: Option<String>,
    pub email: Option<String>,
    pub api_key: Option<String>,
    pub strings: HashMap<String, String>,
}

impl ResolvedConfig {
    /// Credentials, if all three parts are known.
    pub fn auth(&self) -> Option<Auth> {
        Some(Auth {
            realm: self.realm.clone()?,
            email: self.email.clone()?,
            api_key: self.api_key.clone()?,
        })
    }

    pub fn localizer(&self) -> TableLocalizer {
        TableLocalizer::new(self.strings.clone())
    }
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default)]
pub struct CliOverrides<'a> {
    pub realm: Option<&'a str>,
    pub email: Option<&'a str>,
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

/// Returns `~/.parley/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parley"))
}

/// Returns the path to `~/.parley/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.parley/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParleyConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ParleyConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParleyConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ParleyConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<ParleyConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: ParleyConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: server={:?}, {} strings", config.server.realm, config.strings.len());
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Parley Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # "error", "warn", "info", "debug", "trace"
# locale_file = "de.toml"            # Translations, path relative to ~/.parley/

# [server]
# realm = "https://chat.example.com" # Or set PARLEY_REALM env var
# email = "you@example.com"          # Or set PARLEY_EMAIL env var
# api_key = "..."                    # Or set PARLEY_API_KEY env var

# [strings]
# "Reply" = "Antworten"
# "Cancel" = "Abbrechen"
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
pub fn resolve(config: &ParleyConfig, cli: &CliOverrides<'_>) -> ResolvedConfig {
    // Realm: CLI → env → config
    let realm = cli
        .realm
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PARLEY_REALM").ok())
        .or_else(|| config.server.realm.clone());

    // Email: CLI → env → config
    let email = cli
        .email
        .map(|s| s.to_string())
        .or_else(|| std::env::var("PARLEY_EMAIL").ok())
        .or_else(|| config.server.email.clone());

    // API key: env → config
    let api_key = std::env::var("PARLEY_API_KEY")
        .ok()
        .or_else(|| config.server.api_key.clone());

    ResolvedConfig {
        log_level: config
            .general
            .log_level
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        realm,
        email,
        api_key,
        strings: resolve_strings(config),
    }
}

/// Merges translations: inline `[strings]` win over the locale file.
fn resolve_strings(config: &ParleyConfig) -> HashMap<String, String> {
    let mut strings = HashMap::new();

    if let Some(ref file) = config.general.locale_file
        && let Some(dir) = config_dir()
    {
        let locale_path = dir.join(file);
        match fs::read_to_string(&locale_path) {
            Ok(contents) => match toml::from_str::<HashMap<String, String>>(&contents) {
                Ok(table) => {
                    info!("Loaded {} translations from {}", table.len(), locale_path.display());
                    strings.extend(table);
                }
                Err(e) => warn!("Failed to parse locale file {}: {}", locale_path.display(), e),
            },
            Err(e) => {
                warn!(
                    "Failed to read locale file {}: {}",
                    locale_path.display(),
                    e
                );
            }
        }
    }

    strings.extend(config.strings.clone());
    strings
}
