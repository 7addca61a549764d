//! Players and stones.

use crate::error::{BoardError, BoardErrorKind};
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the two players.
///
/// Player one always opens a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    /// Player one (white).
    One,
    /// Player two (black).
    Two,
}

impl Player {
    /// Returns the player for a 1-based wire index.
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    /// 1-based index used on the wire.
    pub fn index(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "player {}", self.index())
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Player::from_index(value)
            .ok_or_else(|| format!("player index must be 1 or 2, got {}", value))
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.index()
    }
}

/// The three stone kinds.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StoneKind {
    /// Flat stone; counts toward roads.
    Flat,
    /// Standing stone (wall); blocks roads.
    Standing,
    /// Capstone; counts toward roads.
    Capstone,
}

impl StoneKind {
    /// Decodes a wire stone-kind code.
    ///
    /// `F`, `S` and `C` map to the three kinds. An empty code is a placement
    /// written without a prefix, which is a flat stone.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::UnknownStoneKind`] for any other code.
    #[instrument]
    pub fn from_code(code: &str) -> Result<Self, BoardError> {
        match code {
            "F" | "" => Ok(StoneKind::Flat),
            "S" => Ok(StoneKind::Standing),
            "C" => Ok(StoneKind::Capstone),
            other => Err(BoardError::new(BoardErrorKind::UnknownStoneKind(
                other.to_string(),
            ))),
        }
    }

    /// Wire code for this kind.
    pub fn code(self) -> char {
        match self {
            StoneKind::Flat => 'F',
            StoneKind::Standing => 'S',
            StoneKind::Capstone => 'C',
        }
    }
}

/// A stone on the board.
///
/// Stones are never changed once placed; a stack only grows by placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Stone {
    /// Owning player.
    pub owner: Player,
    /// Stone kind.
    pub kind: StoneKind,
}

impl Stone {
    /// Single-character glyph: `F`/`S`/`C` for player one, lowercase for two.
    pub fn glyph(self) -> char {
        match self.owner {
            Player::One => self.kind.code(),
            Player::Two => self.kind.code().to_ascii_lowercase(),
        }
    }
}
