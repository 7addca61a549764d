//! The move log: turns and the moves inside them.

use crate::error::{BoardError, BoardErrorKind};
use crate::square::Square;
use crate::stone::StoneKind;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Direction a stack is spread in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards higher ranks (`+`).
    Up,
    /// Towards lower ranks (`-`).
    Down,
    /// Towards file `a` (`<`).
    Left,
    /// Away from file `a` (`>`).
    Right,
}

impl Direction {
    /// Decodes a direction symbol.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::UnknownDirection`] for anything other than
    /// `+`, `-`, `<` or `>`.
    #[instrument]
    pub fn from_code(code: &str) -> Result<Self, BoardError> {
        match code {
            "+" => Ok(Direction::Up),
            "-" => Ok(Direction::Down),
            "<" => Ok(Direction::Left),
            ">" => Ok(Direction::Right),
            other => Err(BoardError::new(BoardErrorKind::UnknownDirection(
                other.to_string(),
            ))),
        }
    }

    /// Direction symbol.
    pub fn code(self) -> char {
        match self {
            Direction::Up => '+',
            Direction::Down => '-',
            Direction::Left => '<',
            Direction::Right => '>',
        }
    }
}

/// What a move does.
///
/// The client only ever places stones, but the log can also carry spreads
/// made elsewhere, so the kind is tagged rather than assumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MoveAction {
    /// Place a new stone of the given kind.
    Place {
        /// Kind of the placed stone.
        stone: StoneKind,
    },
    /// Spread the stack on the move's square.
    Spread {
        /// Direction of travel.
        direction: Direction,
        /// Stones dropped on each successive square.
        drops: Vec<u8>,
    },
}

/// A single move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Move {
    /// Target square for a placement, source square for a spread.
    square: Square,
    /// What the move does.
    action: MoveAction,
    /// Free-text notation as sent by the server.
    text: String,
}

impl Move {
    /// Shorthand for a placement.
    pub fn place(square: Square, stone: StoneKind) -> Self {
        let text = match stone {
            StoneKind::Flat => square.label(),
            other => format!("{}{}", other.code(), square),
        };
        Self::new(square, MoveAction::Place { stone }, text)
    }

    /// Kind of the stone placed, if this is a placement.
    pub fn placed_stone(&self) -> Option<StoneKind> {
        match self.action {
            MoveAction::Place { stone } => Some(stone),
            MoveAction::Spread { .. } => None,
        }
    }
}

/// One numbered turn of the log.
///
/// A turn holds player one's move and, once made, player two's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct Turn {
    /// 1-based turn number.
    number: u32,
    /// Player one's move.
    first: Move,
    /// Player two's move, if made.
    second: Option<Move>,
    /// Result tag recorded on the turn that ended the game (e.g. `R-0`).
    result: Option<String>,
}

impl Turn {
    /// Moves of this turn in play order.
    pub fn moves(&self) -> impl Iterator<Item = &Move> {
        std::iter::once(&self.first).chain(self.second.iter())
    }

    /// Whether the turn carries a non-empty result tag.
    pub fn has_result(&self) -> bool {
        self.result.as_deref().is_some_and(|tag| !tag.trim().is_empty())
    }
}
