//! Classification of a single upstream attempt.

use serde_json::Value;

/// Result of POSTing one request to one provider.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    /// 2xx with a JSON object body that carries no `error` member.
    Success(Value),
    /// Timeout, connection failure, DNS failure, or a body that is not a
    /// JSON-RPC envelope.
    Transport { reason: String },
    /// Non-2xx status.
    Http { status: u16, reason: String },
    /// 2xx whose JSON-RPC envelope carries an `error` member.
    Application { error: Value },
}

impl AttemptOutcome {
    /// Classify a decoded 2xx body. Only an object can be a JSON-RPC
    /// envelope; arrays and scalars are malformed.
    pub fn from_body(body: Value) -> Self {
        let Some(envelope) = body.as_object() else {
            return AttemptOutcome::Transport {
                reason: format!("malformed response body: {}", body),
            };
        };

        match envelope.get("error") {
            Some(error) => AttemptOutcome::Application {
                error: error.clone(),
            },
            None => AttemptOutcome::Success(body),
        }
    }

    /// Static tag for logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            AttemptOutcome::Success(_) => "success",
            AttemptOutcome::Transport { .. } => "transport",
            AttemptOutcome::Http { .. } => "http",
            AttemptOutcome::Application { .. } => "application",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AttemptOutcome::Success(_))
    }
}
