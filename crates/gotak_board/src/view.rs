//! Display facts derived from a [`GameState`].
//!
//! Everything here is a pure function of the state; the server stays the
//! authority on legality and results.

use crate::error::{BoardError, BoardErrorKind};
use crate::state::GameState;
use crate::stone::{Player, StoneKind};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Where a game is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GamePhase {
    /// No turn has been played.
    Waiting,
    /// Turns have been played and no result is recorded.
    Active,
    /// The latest turn carries a result tag.
    Finished,
}

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// A player won by road, flats or resignation.
    Winner(Player),
    /// Drawn game.
    Draw,
}

impl Outcome {
    /// Parses a PTN-style result tag: `R-0`, `F-0`, `1-0` and their mirrors,
    /// or `1/2-1/2`.
    #[instrument]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim() {
            "R-0" | "F-0" | "1-0" => Some(Outcome::Winner(Player::One)),
            "0-R" | "0-F" | "0-1" => Some(Outcome::Winner(Player::Two)),
            "1/2-1/2" => Some(Outcome::Draw),
            _ => None,
        }
    }
}

/// Stones a player starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Reserve {
    /// Flat or standing stones.
    stones: u8,
    /// Capstones.
    capstones: u8,
}

impl Reserve {
    /// How many stones of a kind can be drawn from this reserve.
    ///
    /// Flats and walls come from the same pool.
    pub fn available(&self, kind: StoneKind) -> u8 {
        match kind {
            StoneKind::Flat | StoneKind::Standing => self.stones,
            StoneKind::Capstone => self.capstones,
        }
    }
}

/// Player to move: player one when the number of played turns is even.
#[instrument(skip(state), fields(turns = state.turns().len()))]
pub fn current_player(state: &GameState) -> Player {
    if (state.turns().len() + 1) % 2 == 1 {
        Player::One
    } else {
        Player::Two
    }
}

/// Player and turn number of the next placement.
///
/// Player two answers inside player one's turn, so a turn without a second
/// move is completed under its own number; otherwise player one opens the
/// following turn.
#[instrument(skip(state), fields(turns = state.turns().len()))]
pub fn next_move(state: &GameState) -> (Player, u32) {
    match state.latest_turn() {
        None => (Player::One, 1),
        Some(turn) if turn.second().is_none() => (Player::Two, *turn.number()),
        Some(turn) => (Player::One, turn.number() + 1),
    }
}

/// Lifecycle phase of a game.
#[instrument(skip(state), fields(turns = state.turns().len()))]
pub fn game_phase(state: &GameState) -> GamePhase {
    match state.latest_turn() {
        None => GamePhase::Waiting,
        Some(turn) if turn.has_result() => GamePhase::Finished,
        Some(_) => GamePhase::Active,
    }
}

/// Outcome recorded on the latest turn, if it parses.
#[instrument(skip(state))]
pub fn outcome(state: &GameState) -> Option<Outcome> {
    state
        .latest_turn()
        .and_then(|turn| turn.result().as_deref())
        .and_then(Outcome::from_tag)
}

/// Standard allotment of stones for a board size.
///
/// Both players get the same allotment; the player is accepted so callers
/// can ask per side.
///
/// # Errors
///
/// Returns [`BoardErrorKind::InvalidBoardSize`] for sizes outside 3..=8.
#[instrument]
pub fn remaining_pieces(player: Player, board_size: u8) -> Result<Reserve, BoardError> {
    let (stones, capstones) = match board_size {
        3 => (10, 0),
        4 => (15, 0),
        5 => (21, 1),
        6 => (30, 1),
        7 => (40, 2),
        8 => (50, 2),
        other => return Err(BoardError::new(BoardErrorKind::InvalidBoardSize(other))),
    };
    Ok(Reserve { stones, capstones })
}

/// Everything the board screen shows besides the board itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct BoardView {
    /// Player to move.
    current_player: Player,
    /// Lifecycle phase.
    phase: GamePhase,
    /// Result, once finished.
    outcome: Option<Outcome>,
    /// Player one's reserve.
    reserve_one: Reserve,
    /// Player two's reserve.
    reserve_two: Reserve,
}

impl BoardView {
    /// Derives the view for a state.
    ///
    /// # Errors
    ///
    /// Fails if the board size has no standard allotment.
    #[instrument(skip(state), fields(slug = %state.slug()))]
    pub fn derive(state: &GameState) -> Result<Self, BoardError> {
        let size = state.board().size();
        Ok(Self {
            current_player: current_player(state),
            phase: game_phase(state),
            outcome: outcome(state),
            reserve_one: remaining_pieces(Player::One, size)?,
            reserve_two: remaining_pieces(Player::Two, size)?,
        })
    }

    /// Reserve of the given player.
    pub fn reserve(&self, player: Player) -> Reserve {
        match player {
            Player::One => self.reserve_one,
            Player::Two => self.reserve_two,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::turn::{Move, Turn};
    use std::collections::BTreeMap;

    fn turn(number: u32, result: Option<&str>) -> Turn {
        let a1 = "a1".parse().unwrap();
        Turn::new(
            number,
            Move::place(a1, StoneKind::Flat),
            None,
            result.map(str::to_string),
        )
    }

    fn state_with(turns: Vec<Turn>) -> GameState {
        GameState::new(
            "1".to_string(),
            "abc".to_string(),
            Board::new(5).unwrap(),
            turns,
            BTreeMap::new(),
        )
    }

    #[test]
    fn test_next_move_answers_open_turn() {
        assert_eq!(next_move(&state_with(vec![])), (Player::One, 1));
        assert_eq!(next_move(&state_with(vec![turn(1, None)])), (Player::Two, 1));
    }

    #[test]
    fn test_next_move_opens_turn_after_full_turn() {
        let opened = turn(1, None);
        let full = Turn::new(
            1,
            opened.first().clone(),
            Some(Move::place("b2".parse().unwrap(), StoneKind::Flat)),
            None,
        );
        assert_eq!(next_move(&state_with(vec![full])), (Player::One, 2));
    }

    #[test]
    fn test_turn_parity() {
        assert_eq!(current_player(&state_with(vec![])), Player::One);
        assert_eq!(current_player(&state_with(vec![turn(1, None)])), Player::Two);
        assert_eq!(
            current_player(&state_with(vec![turn(1, None), turn(2, None)])),
            Player::One
        );
    }

    #[test]
    fn test_phases() {
        assert_eq!(game_phase(&state_with(vec![])), GamePhase::Waiting);
        assert_eq!(game_phase(&state_with(vec![turn(1, None)])), GamePhase::Active);
        assert_eq!(
            game_phase(&state_with(vec![turn(1, None), turn(2, Some("R-0"))])),
            GamePhase::Finished
        );
        // only the latest turn counts
        assert_eq!(
            game_phase(&state_with(vec![turn(2, None), turn(1, Some("R-0"))])),
            GamePhase::Active
        );
    }

    #[test]
    fn test_outcome_tags() {
        assert_eq!(Outcome::from_tag("R-0"), Some(Outcome::Winner(Player::One)));
        assert_eq!(Outcome::from_tag("0-F"), Some(Outcome::Winner(Player::Two)));
        assert_eq!(Outcome::from_tag("1/2-1/2"), Some(Outcome::Draw));
        assert_eq!(Outcome::from_tag("?"), None);
    }

    #[test]
    fn test_standard_reserves() {
        let five = remaining_pieces(Player::One, 5).unwrap();
        assert_eq!((*five.stones(), *five.capstones()), (21, 1));
        assert_eq!(five.available(StoneKind::Standing), 21);
        assert_eq!(five.available(StoneKind::Capstone), 1);
        assert_eq!(remaining_pieces(Player::Two, 5).unwrap(), five);
        assert_eq!(*remaining_pieces(Player::One, 8).unwrap().stones(), 50);
        assert!(remaining_pieces(Player::One, 9).is_err());
    }

    #[test]
    fn test_board_view() {
        let view = BoardView::derive(&state_with(vec![turn(1, Some("0-R"))])).unwrap();
        assert_eq!(*view.current_player(), Player::Two);
        assert_eq!(*view.phase(), GamePhase::Finished);
        assert_eq!(*view.outcome(), Some(Outcome::Winner(Player::Two)));
        assert_eq!(view.reserve(Player::One).available(StoneKind::Flat), 21);
    }
}
