//! Board cell coordinates and their `a1`-style labels.

use crate::error::{BoardError, BoardErrorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::instrument;

/// Largest board whose squares can be labelled with a single file letter.
pub const MAX_BOARD_SIZE: u8 = 26;

/// A board cell.
///
/// `x` is the file (the lettered axis, `a` = 0) and `y` is the rank
/// (the numbered axis, rank 1 = 0). Every square converts losslessly to and
/// from its label, so `(0, 0)` is `a1` and `(2, 2)` is `c3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square {
    x: u8,
    y: u8,
}

impl Square {
    /// Creates a square from zero-based coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::SquareOutOfRange`] if either coordinate
    /// cannot be expressed as a label.
    pub fn new(x: u8, y: u8) -> Result<Self, BoardError> {
        if x >= MAX_BOARD_SIZE || y >= MAX_BOARD_SIZE {
            return Err(BoardError::new(BoardErrorKind::SquareOutOfRange {
                label: format!("({}, {})", x, y),
                size: MAX_BOARD_SIZE,
            }));
        }
        Ok(Self { x, y })
    }

    /// File index, `a` = 0.
    pub fn x(self) -> u8 {
        self.x
    }

    /// Rank index, rank 1 = 0.
    pub fn y(self) -> u8 {
        self.y
    }

    /// Textual label, e.g. `c3`.
    pub fn label(self) -> String {
        self.to_string()
    }

    /// Whether the square lies on a board of the given size.
    pub fn within(self, size: u8) -> bool {
        self.x < size && self.y < size
    }

    /// Returns `self` if it lies on a board of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::SquareOutOfRange`] otherwise.
    #[track_caller]
    pub fn check_within(self, size: u8) -> Result<Self, BoardError> {
        if self.within(size) {
            Ok(self)
        } else {
            Err(BoardError::new(BoardErrorKind::SquareOutOfRange {
                label: self.label(),
                size,
            }))
        }
    }

    /// All squares of a board, rank by rank starting at `a1`.
    #[instrument]
    pub fn all(size: u8) -> impl Iterator<Item = Square> {
        let size = size.min(MAX_BOARD_SIZE);
        (0..size).flat_map(move |y| (0..size).map(move |x| Square { x, y }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", char::from(b'a' + self.x), self.y + 1)
    }
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BoardError::new(BoardErrorKind::InvalidSquareLabel(s.to_string()));

        let mut chars = s.chars();
        let file = chars.next().ok_or_else(invalid)?;
        if !file.is_ascii_lowercase() {
            return Err(invalid());
        }
        let rank_text = chars.as_str();
        if rank_text.is_empty()
            || rank_text.starts_with('0')
            || !rank_text.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let rank: u8 = rank_text.parse().map_err(|_| invalid())?;
        if rank == 0 || rank > MAX_BOARD_SIZE {
            return Err(invalid());
        }

        Ok(Self {
            x: file as u8 - b'a',
            y: rank - 1,
        })
    }
}

impl TryFrom<String> for Square {
    type Error = BoardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.label()
    }
}
