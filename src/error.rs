//! Client error types.

use derive_more::{Display, Error};
use gotak_board::BoardError;
use tracing::instrument;

/// Classified failure of a client operation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ClientErrorKind {
    /// The request failed before any response arrived.
    #[display("service unreachable: {_0}")]
    Unreachable(String),
    /// The request exceeded the configured bound.
    #[display("request timed out after {limit_ms} ms")]
    Timeout {
        /// Configured bound in milliseconds.
        limit_ms: u64,
    },
    /// The service has no such game.
    #[display("game not found: {_0}")]
    NotFound(String),
    /// The service failed with a 5xx status.
    #[display("server error {status}: {body}")]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },
    /// The payload is missing required fields or its history cannot be
    /// applied to its board.
    #[display("malformed game history: {_0}")]
    MalformedHistory(String),
    /// The service refused the request, e.g. an illegal move.
    #[display("rejected by server: {reason}")]
    Rejected {
        /// HTTP status code, if the refusal was not a 2xx body.
        status: Option<u16>,
        /// Reason reported by the service.
        reason: String,
    },
    /// A move is already being submitted for this game.
    #[display("a move is already in flight for game {_0}")]
    Busy(String),
}

/// Client error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Client error: {} at {}:{}", kind, file, line)]
pub struct ClientError {
    /// Classified cause.
    pub kind: ClientErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ClientError {
    /// Creates a new client error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: ClientErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Whether a caller may sensibly retry the same request.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind,
            ClientErrorKind::Unreachable(_)
                | ClientErrorKind::Timeout { .. }
                | ClientErrorKind::ServerError { .. }
        )
    }
}

impl From<ClientErrorKind> for ClientError {
    #[track_caller]
    fn from(kind: ClientErrorKind) -> Self {
        Self::new(kind)
    }
}

// Anything the board model refuses while normalizing a payload is a history
// the client cannot trust.
impl From<BoardError> for ClientError {
    #[track_caller]
    fn from(err: BoardError) -> Self {
        Self::new(ClientErrorKind::MalformedHistory(err.kind.to_string()))
    }
}
