use std::fmt;

use crate::{JobKind, SessionId};

/// Failure reported by any backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self.kind {
            FailureKind::Network | FailureKind::Timeout => ErrorCategory::NetworkError,
            FailureKind::HttpStatus(_)
            | FailureKind::MalformedJson
            | FailureKind::AlreadyRunning => ErrorCategory::ProtocolError,
            FailureKind::Stream | FailureKind::Decode => ErrorCategory::StreamError,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The request never completed.
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedJson,
    /// The backend refused to start a job because one is already running.
    AlreadyRunning,
    /// The connection failed after the job stream had opened.
    Stream,
    /// The job stream carried bytes that are not valid UTF-8.
    Decode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedJson => write!(f, "malformed json"),
            FailureKind::AlreadyRunning => write!(f, "server reports a job already running"),
            FailureKind::Stream => write!(f, "stream interrupted"),
            FailureKind::Decode => write!(f, "undecodable output"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NetworkError,
    ProtocolError,
    StreamError,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::NetworkError => "NetworkError",
            ErrorCategory::ProtocolError => "ProtocolError",
            ErrorCategory::StreamError => "StreamError",
        };
        f.write_str(name)
    }
}

/// Action attempted in a session state that does not allow it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("cannot start {requested:?}: session {active} ({active_kind:?}) is still running")]
    AlreadyRunning {
        requested: JobKind,
        active: SessionId,
        active_kind: JobKind,
    },
}
