// ── Core error types ──
//
// Domain-facing errors from gatehouse-core. Consumers never handle raw
// reqwest errors; the `From<gatehouse_api::Error>` impl splits the wire
// taxonomy into transport failures and server-reported errors. Nothing
// here is retried inside this layer -- the poller's cadence-based
// re-issue is the only retry, one layer up.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required link relation is absent from a resource. Indicates a
    /// server contract mismatch or a mid-sequence state change.
    #[error("resource declares no '{rel}' link")]
    MissingLink { rel: String },

    /// Transport-level failure: connection refused, DNS, timeout, TLS,
    /// malformed URL, or an undecodable body.
    #[error("transport error: {0}")]
    Transport(#[source] gatehouse_api::Error),

    /// The server answered with an error payload.
    #[error("controller error (HTTP {status}): {message}")]
    Remote { status: u16, message: String },

    /// Cache logically inconsistent after discovery.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// Invalid runtime configuration.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    pub(crate) fn missing_link(rel: &str) -> Self {
        Self::MissingLink { rel: rel.to_owned() }
    }
}

impl From<gatehouse_api::Error> for CoreError {
    fn from(err: gatehouse_api::Error) -> Self {
        match err {
            gatehouse_api::Error::Remote { status, body } => Self::Remote {
                status,
                message: body,
            },
            other => Self::Transport(other),
        }
    }
}
