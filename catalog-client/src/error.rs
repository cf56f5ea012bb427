//! Client error types

use shared::NormalizeError;
use std::fmt;
use thiserror::Error;

/// What went wrong with a remote call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// No connectivity detected
    Offline,
    /// Request could not reach the server
    Network,
    /// Server answered with a failure status
    ServerStatus(u16),
    /// Response could not be parsed into the expected shape
    Malformed,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Offline => f.write_str("offline"),
            Self::Network => f.write_str("network error"),
            Self::ServerStatus(code) => write!(f, "HTTP status {}", code),
            Self::Malformed => f.write_str("malformed response"),
        }
    }
}

/// Client error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {detail}")]
pub struct ClientError {
    pub kind: FailureKind,
    /// Human-readable detail, not meant for end users as-is
    pub detail: String,
}

impl ClientError {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn offline(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Offline, detail)
    }

    pub fn network(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Network, detail)
    }

    pub fn server_status(code: u16, detail: impl Into<String>) -> Self {
        Self::new(FailureKind::ServerStatus(code), detail)
    }

    pub fn malformed(detail: impl Into<String>) -> Self {
        Self::new(FailureKind::Malformed, detail)
    }

    /// Classify a reqwest failure
    ///
    /// Connectivity is consulted first: a lost link surfaces as `Offline`
    /// whatever reqwest reports.
    pub fn from_transport(err: reqwest::Error, online: bool) -> Self {
        if !online {
            return Self::offline(err.to_string());
        }
        if err.is_decode() {
            return Self::malformed(err.to_string());
        }
        Self::network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}

impl From<NormalizeError> for ClientError {
    fn from(err: NormalizeError) -> Self {
        Self::malformed(err.to_string())
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
