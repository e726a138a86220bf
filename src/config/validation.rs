//! Configuration validation.
//!
//! Semantic checks that serde cannot express. All problems are collected,
//! not just the first, so a broken deployment is fixed in one pass.

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no RPC providers configured")]
    NoProviders,

    #[error("invalid provider URL '{url}': {reason}")]
    InvalidProvider { url: String, reason: String },

    #[error("upstream timeout must be greater than zero")]
    ZeroTimeout,

    #[error("invalid bind address '{0}'")]
    InvalidBindAddress(String),

    #[error("max body size must be greater than zero")]
    ZeroBodyLimit,

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, returning every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.upstream.providers.is_empty() {
        errors.push(ValidationError::NoProviders);
    }

    for provider in &config.upstream.providers {
        if let Err(reason) = check_provider_url(provider) {
            errors.push(ValidationError::InvalidProvider {
                url: provider.clone(),
                reason,
            });
        }
    }

    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_provider_url(raw: &str) -> Result<(), String> {
    let url = Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ProxyConfig {
        let mut config = ProxyConfig::default();
        config.upstream.providers = vec![
            "http://127.0.0.1:8545".to_string(),
            "https://mainnet.example.org/v3/key".to_string(),
        ];
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_empty_provider_list_rejected() {
        let mut config = valid_config();
        config.upstream.providers.clear();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoProviders]);
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.upstream.providers.push("ws://node:8546".to_string());
        config.upstream.providers.push("not a url".to_string());
        config.upstream.timeout_secs = 0;
        config.listener.bind_address = "localhost".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroTimeout));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidProvider { url, .. } if url == "ws://node:8546")));
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = valid_config();
        config.observability.metrics_address = "nowhere".to_string();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::InvalidMetricsAddress("nowhere".to_string())]
        );
    }
}
