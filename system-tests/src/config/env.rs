// system-tests/src/config/env.rs
// ============================================================================
// Module: System Test Environment
// Description: Environment-backed configuration for system tests.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: blog-api-harness
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 fails closed. Values set here override the
//! harness TOML configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use blog_api_harness::HarnessConfig;
use blog_api_harness::config::CONFIG_ENV_VAR;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for system test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemTestEnv {
    /// Optional run root override.
    RunRoot,
    /// Optional external API base URL; the in-process stub is used otherwise.
    BaseUrl,
    /// Optional timeout override in seconds (positive integer).
    TimeoutSeconds,
    /// Optional fixture seed for replaying a run.
    Seed,
    /// Optional harness TOML configuration path; falls back to the harness
    /// library's own config variable.
    Config,
}

impl SystemTestEnv {
    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RunRoot => "BLOG_API_SYSTEM_TEST_RUN_ROOT",
            Self::BaseUrl => "BLOG_API_SYSTEM_TEST_BASE_URL",
            Self::TimeoutSeconds => "BLOG_API_SYSTEM_TEST_TIMEOUT_SEC",
            Self::Seed => "BLOG_API_SYSTEM_TEST_SEED",
            Self::Config => "BLOG_API_SYSTEM_TEST_CONFIG",
        }
    }
}

// ============================================================================
// SECTION: Config Types
// ============================================================================

/// Typed system test configuration derived from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemTestConfig {
    /// Optional run root override.
    pub run_root: Option<PathBuf>,
    /// Optional external API base URL.
    pub base_url: Option<String>,
    /// Optional timeout override in seconds (positive integer).
    pub timeout: Option<Duration>,
    /// Optional fixture seed.
    pub seed: Option<u64>,
    /// Optional harness configuration file, from either config variable.
    pub config_path: Option<PathBuf>,
}

impl SystemTestConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when an environment value is not valid UTF-8, is empty,
    /// or fails validation (for example, an invalid timeout or seed).
    pub fn load() -> Result<Self, String> {
        let run_root = read_env_nonempty(SystemTestEnv::RunRoot.as_str())?.map(PathBuf::from);
        let base_url = read_env_nonempty(SystemTestEnv::BaseUrl.as_str())?;
        let timeout = read_env_nonempty(SystemTestEnv::TimeoutSeconds.as_str())?
            .map(|value| parse_timeout_seconds(SystemTestEnv::TimeoutSeconds.as_str(), &value))
            .transpose()?;
        let seed = read_env_nonempty(SystemTestEnv::Seed.as_str())?
            .map(|value| parse_seed(SystemTestEnv::Seed.as_str(), &value))
            .transpose()?;
        let config_path = match read_env_nonempty(SystemTestEnv::Config.as_str())? {
            Some(path) => Some(path),
            None => read_env_nonempty(CONFIG_ENV_VAR)?,
        }
        .map(PathBuf::from);
        Ok(Self {
            run_root,
            base_url,
            timeout,
            seed,
            config_path,
        })
    }

    /// Returns true when the suites should target an externally running API.
    ///
    /// Any configured base URL or harness config file selects the external
    /// target, so a file's `base_url` is never replaced by the stub.
    #[must_use]
    pub const fn targets_external(&self) -> bool {
        self.base_url.is_some() || self.config_path.is_some()
    }

    /// Loads the harness configuration and applies environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration file is unreadable or the
    /// merged configuration fails validation.
    pub fn harness_config(&self) -> Result<HarnessConfig, String> {
        let mut config =
            HarnessConfig::load(self.config_path.as_deref()).map_err(|err| err.to_string())?;
        if let Some(base_url) = &self.base_url {
            config.target.base_url.clone_from(base_url);
        }
        if let Some(timeout) = self.timeout {
            config.target.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        }
        if self.seed.is_some() {
            config.fixtures.seed = self.seed;
        }
        config.validate().map_err(|err| err.to_string())?;
        Ok(config)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
pub fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
///
/// # Errors
///
/// Returns an error when the variable is set but empty or whitespace.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive timeout value from an environment variable string.
///
/// # Errors
///
/// Returns an error when the value is missing, non-numeric, or zero.
fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}

/// Parses an unsigned 64-bit fixture seed.
///
/// # Errors
///
/// Returns an error when the value is not an unsigned integer.
fn parse_seed(name: &str, raw: &str) -> Result<u64, String> {
    raw.trim().parse().map_err(|_| format!("{name} must be an unsigned 64-bit integer"))
}
