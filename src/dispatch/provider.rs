//! Upstream provider endpoints.
//!
//! # Responsibilities
//! - Represent a single configured JSON-RPC provider
//! - Hold the immutable, non-empty provider list shared by all dispatches

use std::fmt;
use std::ops::Index;
use std::sync::Arc;
use url::Url;

use crate::dispatch::error::SetupError;

/// `host:port` of `url`, without path, query or credentials.
pub fn endpoint_label(url: &Url) -> String {
    match (url.host_str(), url.port_or_known_default()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_string(),
        _ => url.scheme().to_string(),
    }
}

/// A single upstream provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Position in the configured list.
    index: usize,
    /// Endpoint the request is POSTed to.
    url: Url,
    /// `host:port`, safe to log (paths often carry API keys).
    label: String,
}

impl Provider {
    pub fn new(index: usize, url: Url) -> Self {
        let label = endpoint_label(&url);
        Self { index, url, label }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ({})", self.index, self.label)
    }
}

/// Ordered, non-empty list of providers. Cheap to clone; never mutated.
#[derive(Debug, Clone)]
pub struct ProviderList {
    providers: Arc<[Provider]>,
}

impl ProviderList {
    /// Parse configured URLs. Fails on an empty list or any malformed URL.
    pub fn from_urls<S: AsRef<str>>(urls: &[S]) -> Result<Self, SetupError> {
        if urls.is_empty() {
            return Err(SetupError::NoProviders);
        }

        let providers = urls
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                let raw = raw.as_ref();
                Url::parse(raw)
                    .map(|url| Provider::new(index, url))
                    .map_err(|source| SetupError::InvalidProvider {
                        url: raw.to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            providers: providers.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Always false for a constructed list; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Index<usize> for ProviderList {
    type Output = Provider;

    fn index(&self, index: usize) -> &Self::Output {
        &self.providers[index]
    }
}
