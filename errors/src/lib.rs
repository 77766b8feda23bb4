//! # Connector Errors
//!
//! Shared error taxonomy for the Faultline governance connector.
//!
//! Everything here stops the current operation and carries enough context
//! (operation name, container identifier) for the caller to log and retry
//! at a higher level. Idempotency outcomes ("already granted" / "already
//! revoked") are deliberately *not* represented here; they are ordinary
//! success values, see `fl_core::ProvisionOutcome`.

use thiserror::Error;

pub type ConnectorResult<T> = Result<T, ConnectorError>;

#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Network-level failure issuing a request. Never retried by the core;
    /// an outer retry/backoff layer owns that decision. The target URL
    /// carries the collection and parent identifier the request was
    /// scoped to.
    #[error("{operation} ({url}): request failed: {source}")]
    Transport {
        operation: &'static str,
        url: String,
        #[source]
        source: reqwest::Error
    },

    /// Non-2xx response. The body is captured (truncated) for diagnostics;
    /// the URL identifies which container's walk failed.
    #[error("{operation} ({url}): unexpected status {status}: {body}")]
    Status {
        operation: &'static str,
        url: String,
        status: u16,
        body: String
    },

    /// A remote object is missing a required identifying field. Fatal to
    /// the page containing it; no partial page is ever emitted.
    #[error("failed to map {resource_type} object: {reason}")]
    Mapping {
        resource_type: String,
        reason: String
    },

    /// A cross-referencing lookup exhausted all candidates. Distinct from
    /// transient failure so callers can tell "doesn't exist" apart from
    /// "try again".
    #[error("{what} not found: {id}")]
    NotFound { what: &'static str, id: String },

    /// A composite `<parent>/<child>` identifier did not split into exactly
    /// two segments.
    #[error("invalid composite identifier: {id}")]
    InvalidCompositeId { id: String },

    #[error("unexpected principal type: expected {expected}, got {actual}")]
    UnexpectedPrincipalType {
        expected: String,
        actual: String
    },

    /// The flat account-creation profile is missing a required field.
    #[error("account profile missing required field: {field}")]
    MissingProfileField { field: &'static str },

    #[error("configuration error: {message}")]
    Config { message: String }
}

impl ConnectorError {
    pub fn mapping(resource_type: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Mapping {
            resource_type: resource_type.into(),
            reason: reason.into()
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into()
        }
    }

    /// Transport failures and 5xx / 429 statuses are worth retrying from
    /// an outer layer; everything else is a caller bug or missing data.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false
        }
    }

    /// Status code of the remote response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None
        }
    }
}
