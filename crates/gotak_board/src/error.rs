//! Board model error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// What went wrong while building or reading the board model.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum BoardErrorKind {
    /// A square lies outside the board it was applied to.
    #[display("square {label} is outside a {size}x{size} board")]
    SquareOutOfRange {
        /// Offending square label.
        label: String,
        /// Board size the square was checked against.
        size: u8,
    },
    /// Text that is not an `a1`-style square label.
    #[display("invalid square label '{_0}'")]
    InvalidSquareLabel(String),
    /// Board size outside the supported range.
    #[display("board size {_0} is not supported")]
    InvalidBoardSize(u8),
    /// Stone-kind code other than `F`, `S` or `C`.
    #[display("unknown stone kind code '{_0}'")]
    UnknownStoneKind(String),
    /// Spread direction code other than `+`, `-`, `<` or `>`.
    #[display("unknown spread direction '{_0}'")]
    UnknownDirection(String),
    /// A move kind the replay does not model.
    #[display("turn {turn} spreads a stack from {square}; spreads cannot be replayed")]
    UnsupportedMove {
        /// Turn number carrying the move.
        turn: u32,
        /// Source square of the spread.
        square: String,
    },
}

/// Board model error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Board error: {} at {}:{}", kind, file, line)]
pub struct BoardError {
    /// Classified cause.
    pub kind: BoardErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardError {
    /// Creates a new board error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: BoardErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<BoardErrorKind> for BoardError {
    #[track_caller]
    fn from(kind: BoardErrorKind) -> Self {
        Self::new(kind)
    }
}
