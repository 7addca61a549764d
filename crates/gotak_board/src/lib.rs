//! Pure Tak board model for the gotak client.
//!
//! Nothing in this crate talks to the network. It provides the canonical
//! game model the client normalizes server payloads into, and the pure
//! derivations a renderer needs.
//!
//! # Architecture
//!
//! - **Square**: cell coordinates and their `a1`-style labels
//! - **Board**: per-square stacks of stones, bottom to top
//! - **Turn**: the append-only move log
//! - **Replay**: rebuilds a board from the move log
//! - **Projection**: maps a cell and stack height to a screen point
//! - **View**: current player, phase, outcome and piece reserves
//!
//! # Example
//!
//! ```
//! use gotak_board::{Board, Player, Square, Stone, StoneKind};
//!
//! # fn example() -> Result<(), gotak_board::BoardError> {
//! let mut board = Board::new(5)?;
//! let c3: Square = "c3".parse()?;
//! board.place(c3, Stone::new(Player::One, StoneKind::Flat))?;
//! assert_eq!(board.stack(c3).map(|s| s.len()), Some(1));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod projection;
mod replay;
mod square;
mod state;
mod stone;
mod turn;
mod view;

pub use board::Board;
pub use error::{BoardError, BoardErrorKind};
pub use projection::{ProjectionMode, Projector, ScreenPoint, TileMetrics};
pub use replay::reconstruct;
pub use square::{MAX_BOARD_SIZE, Square};
pub use state::GameState;
pub use stone::{Player, Stone, StoneKind};
pub use turn::{Direction, Move, MoveAction, Turn};
pub use view::{
    BoardView, GamePhase, Outcome, Reserve, current_player, game_phase, next_move,
    outcome, remaining_pieces,
};
