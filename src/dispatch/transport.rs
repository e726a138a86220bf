//! Upstream transport.
//!
//! # Responsibilities
//! - POST one serialized request to one provider
//! - Enforce the per-attempt timeout
//! - Classify the result into an [`AttemptOutcome`]
//!
//! # Design Decisions
//! - The transport never retries; the dispatcher owns that loop
//! - Status is checked before the body is decoded, so a 5xx with an HTML page
//!   is reported as an HTTP failure, not a decode failure
//! - Failure reasons name the provider by `host:port` only; they are logged
//!   and returned to callers, and provider paths often embed API keys

use std::error::Error as StdError;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use serde_json::Value;
use url::Url;

use crate::dispatch::error::SetupError;
use crate::dispatch::outcome::AttemptOutcome;
use crate::dispatch::provider::endpoint_label;

/// Sends one JSON body to one provider.
#[async_trait]
pub trait UpstreamTransport: Send + Sync {
    async fn post_json(&self, url: &Url, body: &[u8]) -> AttemptOutcome;
}

/// `reqwest`-backed transport with a fixed per-attempt timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Result<Self, SetupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("eth-failover-proxy/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamTransport for HttpTransport {
    async fn post_json(&self, url: &Url, body: &[u8]) -> AttemptOutcome {
        let result = self
            .client
            .post(url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body.to_vec())
            .send()
            .await;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                return AttemptOutcome::Transport {
                    reason: transport_reason(e, url),
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            return AttemptOutcome::Http {
                status: status.as_u16(),
                reason: format!("{} from {}", status, endpoint_label(url)),
            };
        }

        match response.json::<Value>().await {
            Ok(payload) => {
                tracing::debug!(body = %payload, "Received response from provider");
                AttemptOutcome::from_body(payload)
            }
            Err(e) => AttemptOutcome::Transport {
                reason: transport_reason(e, url),
            },
        }
    }
}

fn transport_reason(err: reqwest::Error, url: &Url) -> String {
    format!("{} from {}", error_chain(&err.without_url()), endpoint_label(url))
}

/// Render an error together with its sources; reqwest keeps the interesting
/// part ("operation timed out", "Connection refused") in the chain.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Layer(&'static str, Option<Box<Layer>>);

    impl fmt::Display for Layer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.0)
        }
    }

    impl StdError for Layer {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            self.1.as_deref().map(|l| l as &(dyn StdError + 'static))
        }
    }

    #[test]
    fn test_error_chain_joins_sources() {
        let err = Layer(
            "error sending request",
            Some(Box::new(Layer("operation timed out", None))),
        );
        assert_eq!(error_chain(&err), "error sending request: operation timed out");
    }

    #[test]
    fn test_error_chain_skips_repeated_text() {
        let err = Layer("connect failed: refused", Some(Box::new(Layer("refused", None))));
        assert_eq!(error_chain(&err), "connect failed: refused");
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_failure() {
        let transport = HttpTransport::new(Duration::from_secs(1)).unwrap();
        let closed = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };
        let url = Url::parse(&format!("http://{}/v3/secret-key", closed)).unwrap();

        match transport.post_json(&url, b"{}").await {
            AttemptOutcome::Transport { reason } => {
                assert!(reason.ends_with(&format!("from {}", closed)), "{}", reason);
                assert!(!reason.contains("secret-key"), "{}", reason);
            }
            other => panic!("expected transport failure, got {:?}", other),
        }
    }
}
