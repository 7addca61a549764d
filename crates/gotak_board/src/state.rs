//! Canonical game state.

use crate::board::Board;
use crate::error::BoardError;
use crate::turn::Turn;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;

/// A game as the client sees it.
///
/// Each successful server call produces a fresh `GameState` that replaces the
/// previous one wholesale; nothing patches a state in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct GameState {
    /// Server identifier.
    id: String,
    /// Short public identifier used in URLs.
    slug: String,
    /// Board occupancy.
    board: Board,
    /// Turn log, ascending by turn number.
    turns: Vec<Turn>,
    /// Game tags (player names, dates, ...).
    meta: BTreeMap<String, String>,
}

impl GameState {
    /// A freshly created game: empty board, no turns, no tags.
    ///
    /// # Errors
    ///
    /// Fails if `size` is not a valid board size.
    #[instrument]
    pub fn empty(id: String, slug: String, size: u8) -> Result<Self, BoardError> {
        Ok(Self::new(id, slug, Board::new(size)?, Vec::new(), BTreeMap::new()))
    }

    /// The turn with the highest number, if any.
    pub fn latest_turn(&self) -> Option<&Turn> {
        self.turns.iter().max_by_key(|turn| *turn.number())
    }
}
