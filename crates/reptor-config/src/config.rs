// crates/reptor-config/src/config.rs
// ============================================================================
// Module: Reptor Configuration
// Description: Configuration loading and validation for reptor clients.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: reptor-models, dirs, serde, serde_yaml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a YAML file with strict size and path limits,
//! then overlaid with `REPTOR_*` environment variables. Only the default
//! location may be absent; an explicitly requested file must exist.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use reptor_models::BindMode;
use reptor_models::ProjectId;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Directory below the home directory holding the config file.
const DEFAULT_CONFIG_DIR: &str = ".sysreptor";
/// Default configuration filename.
const DEFAULT_CONFIG_NAME: &str = "config.yaml";
/// Environment variable naming an explicit config path.
pub const CONFIG_ENV_VAR: &str = "REPTOR_CONFIG";
/// Environment variable overriding the server URL.
pub const SERVER_ENV_VAR: &str = "REPTOR_SERVER";
/// Environment variable overriding the API token.
pub const TOKEN_ENV_VAR: &str = "REPTOR_TOKEN";
/// Environment variable overriding the project id.
pub const PROJECT_ID_ENV_VAR: &str = "REPTOR_PROJECT_ID";
/// Maximum config file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of one path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum length of the whole config path.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum length of an API token.
pub(crate) const MAX_TOKEN_LENGTH: usize = 1024;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Reptor client configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReptorConfig {
    /// Base URL of the SysReptor server.
    #[serde(default)]
    pub server: Option<String>,
    /// API token.
    #[serde(default)]
    pub token: Option<String>,
    /// Project addressed by default.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    /// Skip TLS certificate verification.
    #[serde(default)]
    pub insecure: bool,
    /// Binding behavior for findings and sections.
    #[serde(default)]
    pub binding: BindingConfig,
}

/// Binding configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BindingConfig {
    /// Strictness applied when binding server data.
    #[serde(default)]
    pub mode: BindMode,
}

impl ReptorConfig {
    /// Loads configuration from disk, applies environment overrides, and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::load_file(path)?;
        config.apply_overrides(|name| env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates configuration from disk without environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load_file(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (resolved, explicit) = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = match fs::read(&resolved) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound && !explicit => return Ok(Self::default()),
            Err(err) => return Err(ConfigError::Io(err.to_string())),
        };
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config = Self::from_yaml(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses configuration from YAML text without validating it.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    /// Overlays values found through `lookup` onto the configuration.
    ///
    /// `lookup` maps an environment variable name to its value; [`Self::load`]
    /// passes the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `REPTOR_PROJECT_ID` is not a UUID.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup(SERVER_ENV_VAR) {
            self.server = Some(server);
        }
        if let Some(token) = lookup(TOKEN_ENV_VAR) {
            self.token = Some(token);
        }
        if let Some(project_id) = lookup(PROJECT_ID_ENV_VAR) {
            let parsed = project_id.trim().parse::<ProjectId>().map_err(|_| {
                ConfigError::Invalid(format!("{PROJECT_ID_ENV_VAR} must be a uuid"))
            })?;
            self.project_id = Some(parsed);
        }
        Ok(())
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let server = self.server.as_deref().map(parse_server).transpose()?;
        if let Some(token) = &self.token {
            validate_token(token)?;
        }
        if self.insecure && server.as_ref().is_none_or(|url| url.scheme() != "https") {
            return Err(ConfigError::Invalid("insecure requires an https server".to_string()));
        }
        Ok(())
    }

    /// Parsed server URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when no server is configured or the
    /// URL is invalid.
    pub fn server_url(&self) -> Result<Url, ConfigError> {
        let server = self
            .server
            .as_deref()
            .ok_or_else(|| ConfigError::Invalid("server must be set".to_string()))?;
        parse_server(server)
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// YAML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path; the flag reports whether it was requested.
fn resolve_path(path: Option<&Path>) -> Result<(PathBuf, bool), ConfigError> {
    if let Some(path) = path {
        return Ok((path.to_path_buf(), true));
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok((PathBuf::from(env_path), true));
    }
    let home = dirs::home_dir()
        .ok_or_else(|| ConfigError::Io("home directory not found".to_string()))?;
    Ok((home.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_NAME), false))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Parses the server URL and checks its scheme.
fn parse_server(server: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(server.trim())
        .map_err(|err| ConfigError::Invalid(format!("server is not a valid url: {err}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ConfigError::Invalid(format!("server scheme must be http or https: {other}")));
        }
    }
    if url.host_str().is_none() {
        return Err(ConfigError::Invalid("server url must include a host".to_string()));
    }
    Ok(url)
}

/// Validates the API token.
fn validate_token(token: &str) -> Result<(), ConfigError> {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid("token must be non-empty".to_string()));
    }
    if trimmed.len() != token.len() {
        return Err(ConfigError::Invalid("token must be trimmed".to_string()));
    }
    if token.len() > MAX_TOKEN_LENGTH {
        return Err(ConfigError::Invalid("token exceeds max length".to_string()));
    }
    Ok(())
}
