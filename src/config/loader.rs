//! Configuration loading from disk and environment.
//!
//! Precedence, lowest first: built-in defaults, TOML file, environment
//! variables, command-line overrides.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const ENV_PROVIDERS: &str = "RPC_PROVIDERS_HTTP";
pub const ENV_TIMEOUT: &str = "TIMEOUT_SECONDS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "LOG_FILE";
pub const ENV_LOG_FORMAT: &str = "LOG_FORMAT";
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";
pub const ENV_METRICS_ADDRESS: &str = "METRICS_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value '{value}' for {var}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values given on the command line. `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind_address: Option<String>,
    pub providers: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Split a comma-separated provider list, dropping blank entries.
pub fn parse_provider_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Read a TOML file without validating it.
pub fn read_config_file(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Overlay environment variables onto `config`.
///
/// `lookup` abstracts `std::env::var` so tests can supply a fixed environment.
pub fn apply_env<F>(config: &mut ProxyConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(raw) = lookup(ENV_PROVIDERS) {
        config.upstream.providers = parse_provider_list(&raw);
    }

    if let Some(raw) = lookup(ENV_TIMEOUT) {
        config.upstream.timeout_secs =
            raw.trim().parse::<u64>().map_err(|e| ConfigError::Env {
                var: ENV_TIMEOUT,
                value: raw.clone(),
                reason: e.to_string(),
            })?;
    }

    if let Some(level) = lookup(ENV_LOG_LEVEL) {
        config.observability.log_level = level.trim().to_lowercase();
    }

    if let Some(path) = lookup(ENV_LOG_FILE) {
        let path = path.trim();
        config.observability.log_file = (!path.is_empty()).then(|| path.to_string());
    }

    if let Some(raw) = lookup(ENV_LOG_FORMAT) {
        config.observability.log_format = raw.parse().map_err(|reason| ConfigError::Env {
            var: ENV_LOG_FORMAT,
            value: raw.clone(),
            reason,
        })?;
    }

    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr.trim().to_string();
    }

    if let Some(addr) = lookup(ENV_METRICS_ADDRESS) {
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = addr.trim().to_string();
    }

    Ok(())
}

/// Apply command-line overrides onto `config`.
pub fn apply_overrides(config: &mut ProxyConfig, overrides: &ConfigOverrides) {
    if let Some(addr) = &overrides.bind_address {
        config.listener.bind_address = addr.clone();
    }
    if let Some(raw) = &overrides.providers {
        config.upstream.providers = parse_provider_list(raw);
    }
    if let Some(secs) = overrides.timeout_secs {
        config.upstream.timeout_secs = secs;
    }
}

/// Build the effective configuration and validate it.
pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => ProxyConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok())?;
    apply_overrides(&mut config, overrides);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
