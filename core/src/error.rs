//! The single error type returned by every `ApiClient` operation.
//!
//! # Design
//! Callers branch on `ErrorKind` and never need to know which verb template
//! failed or what the transport looked like. The rendered message always
//! names the action (`"GET /api/drinks/7"`), and carries the status and the
//! raw response body whenever a response was received. The body is kept
//! verbatim: there is no structured server-error schema, so it is often the
//! only diagnostic available.

use std::fmt;

use thiserror::Error;

use crate::codec::CodecError;
use crate::http::TransportError;
use crate::policy;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request never completed: resolution, refusal, timeout.
    Transport,
    /// The calling thread was interrupted while blocked on the exchange.
    Interrupted,
    /// The server answered with a status outside 200..300.
    ServerStatus,
    /// A 2xx response body (or an outgoing payload) failed to (de)serialize.
    Parse,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Transport => "transport",
            ErrorKind::Interrupted => "interrupted",
            ErrorKind::ServerStatus => "server status",
            ErrorKind::Parse => "parse",
        };
        f.write_str(name)
    }
}

/// Failure of a single client call.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ClientError {
    kind: ErrorKind,
    action: String,
    path: String,
    status: Option<u16>,
    body: Option<String>,
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl ClientError {
    pub(crate) fn transport(action: &str, path: &str, cause: TransportError) -> Self {
        match cause {
            TransportError::Interrupted(io) => Self {
                kind: ErrorKind::Interrupted,
                action: action.to_string(),
                path: path.to_string(),
                status: None,
                body: None,
                message: format!("thread interrupted during {action}"),
                source: Some(Box::new(io)),
            },
            TransportError::Connection(cause) => Self {
                kind: ErrorKind::Transport,
                action: action.to_string(),
                path: path.to_string(),
                status: None,
                body: None,
                message: format!("I/O error during {action}"),
                source: Some(cause),
            },
            TransportError::BodyTooLarge { status, limit } => {
                let kind = if policy::is_success(status) {
                    ErrorKind::Parse
                } else {
                    ErrorKind::ServerStatus
                };
                Self {
                    kind,
                    action: action.to_string(),
                    path: path.to_string(),
                    status: Some(status),
                    body: None,
                    message: format!(
                        "response to {action} (status: {status}) exceeds {limit} bytes"
                    ),
                    source: Some(Box::new(TransportError::BodyTooLarge { status, limit })),
                }
            }
        }
    }

    pub(crate) fn server_status(action: &str, path: &str, status: u16, body: &str) -> Self {
        Self {
            kind: ErrorKind::ServerStatus,
            action: action.to_string(),
            path: path.to_string(),
            status: Some(status),
            body: Some(body.to_string()),
            message: format!("{action} failed with HTTP {status} body: {body}"),
            source: None,
        }
    }

    pub(crate) fn decode(
        action: &str,
        path: &str,
        status: u16,
        body: &str,
        cause: CodecError,
    ) -> Self {
        Self {
            kind: ErrorKind::Parse,
            action: action.to_string(),
            path: path.to_string(),
            status: Some(status),
            body: Some(body.to_string()),
            message: format!(
                "could not decode response to {action} (status: {status}) body: {body}"
            ),
            source: Some(Box::new(cause)),
        }
    }

    /// The request payload could not be encoded, so nothing was sent.
    pub(crate) fn encode(action: &str, path: &str, cause: CodecError) -> Self {
        Self {
            kind: ErrorKind::Parse,
            action: action.to_string(),
            path: path.to_string(),
            status: None,
            body: None,
            message: format!("could not encode request body for {action}: {cause}"),
            source: Some(Box::new(cause)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// `"<METHOD> <path>"` of the failed call.
    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// True when the call was cut short by an interruption. The original
    /// `io::Error` stays reachable through `source()`.
    pub fn is_interrupted(&self) -> bool {
        self.kind == ErrorKind::Interrupted
    }
}
