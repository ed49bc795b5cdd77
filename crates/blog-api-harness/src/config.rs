// crates/blog-api-harness/src/config.rs
// ============================================================================
// Module: Harness Configuration
// Description: Configuration loading and validation for the API harness.
// Purpose: Provide strict, fail-closed config parsing with sane defaults.
// Dependencies: serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from an optional TOML file. When no file is given
//! and `BLOG_API_HARNESS_CONFIG` is unset, defaults target a local API on
//! port 3000. Invalid configuration fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::log::FileRequestLog;
use crate::log::NoopRequestLog;
use crate::log::RequestLogSink;
use crate::log::StderrRequestLog;
use crate::models::NewUser;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable used to point at a harness config file.
pub const CONFIG_ENV_VAR: &str = "BLOG_API_HARNESS_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default API base URL.
pub(crate) const DEFAULT_BASE_URL: &str = "http://localhost:3000";
/// Default request timeout in milliseconds.
pub(crate) const DEFAULT_TIMEOUT_MS: u64 = 30_000;
/// Minimum request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 100;
/// Maximum request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 120_000;
/// Default fixture directory.
pub(crate) const DEFAULT_FIXTURE_DIR: &str = "target/blog-api-fixtures";

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Harness configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Remote API target settings.
    #[serde(default)]
    pub target: TargetConfig,
    /// Fixture persistence and generation settings.
    #[serde(default)]
    pub fixtures: FixtureConfig,
    /// Credential set registered by `login`.
    #[serde(default)]
    pub user: NewUser,
    /// Request log settings.
    #[serde(default)]
    pub log: LogConfig,
}

impl HarnessConfig {
    /// Loads configuration from an explicit path, the env override, or defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or validated.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_path(path)? {
            Some(resolved) => Self::load_file(&resolved),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, parsed, or validated.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml_str(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.target.validate()?;
        self.fixtures.validate()?;
        validate_user(&self.user)?;
        self.log.validate()
    }

    /// Builds the request log sink described by the `[log]` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the log file cannot be opened.
    pub fn request_log(&self) -> Result<Arc<dyn RequestLogSink>, ConfigError> {
        match self.log.sink {
            LogSinkKind::Stderr => Ok(Arc::new(StderrRequestLog)),
            LogSinkKind::None => Ok(Arc::new(NoopRequestLog)),
            LogSinkKind::File => {
                let path = self.log.path.as_deref().ok_or_else(|| {
                    ConfigError::Invalid("log.path is required for file sink".to_string())
                })?;
                let sink = FileRequestLog::new(path)
                    .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

/// Remote API target settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    /// Base URL of the API under test.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl TargetConfig {
    /// Parses the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the URL is malformed or not http(s).
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url)
            .map_err(|err| ConfigError::Invalid(format!("target.base_url: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(
                "target.base_url must use http or https".to_string(),
            ));
        }
        if url.host_str().is_none() {
            return Err(ConfigError::Invalid("target.base_url must include a host".to_string()));
        }
        Ok(url)
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Validates the target settings.
    fn validate(&self) -> Result<(), ConfigError> {
        self.parsed_base_url()?;
        if !(MIN_TIMEOUT_MS..=MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid(format!(
                "target.timeout_ms must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS}"
            )));
        }
        Ok(())
    }
}

/// Fixture persistence and generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FixtureConfig {
    /// Directory holding `posts.json` and `comments.json`.
    #[serde(default = "default_fixture_dir")]
    pub dir: PathBuf,
    /// Optional RNG seed for reproducible fixture data.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            dir: default_fixture_dir(),
            seed: None,
        }
    }
}

impl FixtureConfig {
    /// Validates the fixture settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("fixtures.dir must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Request log destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogSinkKind {
    /// JSON lines on stderr.
    #[default]
    Stderr,
    /// JSON lines appended to `log.path`.
    File,
    /// Discard request events.
    None,
}

/// Request log settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Log destination.
    #[serde(default)]
    pub sink: LogSinkKind,
    /// File path for the `file` sink.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl LogConfig {
    /// Validates the log settings.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.sink == LogSinkKind::File && self.path.is_none() {
            return Err(ConfigError::Invalid("log.path is required for file sink".to_string()));
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Default base URL for serde.
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Default timeout for serde.
const fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// Default fixture directory for serde.
fn default_fixture_dir() -> PathBuf {
    PathBuf::from(DEFAULT_FIXTURE_DIR)
}

/// Resolves the config path from the caller or the environment.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    match std::env::var_os(CONFIG_ENV_VAR) {
        None => Ok(None),
        Some(raw) => {
            let value = raw.into_string().map_err(|_| {
                ConfigError::Invalid(format!("{CONFIG_ENV_VAR} must be valid UTF-8"))
            })?;
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{CONFIG_ENV_VAR} must not be empty")));
            }
            Ok(Some(PathBuf::from(value)))
        }
    }
}

/// Rejects empty registration fields.
fn validate_user(user: &NewUser) -> Result<(), ConfigError> {
    let fields = [("name", &user.name), ("email", &user.email), ("password", &user.password)];
    for (field, value) in fields {
        if value.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("user.{field} must not be empty")));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
