//! Rebuilds board occupancy from the turn log.

use crate::board::Board;
use crate::error::{BoardError, BoardErrorKind};
use crate::stone::{Player, Stone};
use crate::turn::{MoveAction, Turn};
use tracing::{debug, instrument};

/// Replays a turn log onto an empty board.
///
/// Turns are applied in ascending turn number. Within a turn the first move
/// belongs to player one and the second to player two. Each placement is
/// pushed on top of its square, so a stack's order is the order of play and
/// the result depends only on the log.
///
/// Nothing is returned on failure; a partially replayed board never escapes.
///
/// # Errors
///
/// - [`BoardErrorKind::InvalidBoardSize`] for an unusable size.
/// - [`BoardErrorKind::SquareOutOfRange`] if a move targets a square off the
///   board.
/// - [`BoardErrorKind::UnsupportedMove`] for a spread, which would remove
///   stones from a stack.
#[instrument(skip(turns), fields(turns = turns.len()))]
pub fn reconstruct(size: u8, turns: &[Turn]) -> Result<Board, BoardError> {
    let mut board = Board::new(size)?;

    let mut ordered: Vec<&Turn> = turns.iter().collect();
    ordered.sort_by_key(|turn| *turn.number());

    for turn in ordered {
        let players = [Player::One, Player::Two];
        for (mv, owner) in turn.moves().zip(players) {
            let square = mv.square().check_within(size)?;
            match mv.action() {
                MoveAction::Place { stone } => {
                    board.place(square, Stone::new(owner, *stone))?;
                }
                MoveAction::Spread { .. } => {
                    return Err(BoardError::new(BoardErrorKind::UnsupportedMove {
                        turn: *turn.number(),
                        square: square.label(),
                    }));
                }
            }
        }
    }

    debug!(stones = board.stone_count(), "Board reconstructed from turns");
    Ok(board)
}
