//! Board of stacks, keyed by square.

use crate::error::{BoardError, BoardErrorKind};
use crate::square::{MAX_BOARD_SIZE, Square};
use crate::stone::Stone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// A square board where every cell holds a stack of stones.
///
/// Every square of the board has an entry, possibly an empty stack, and no
/// square outside the board does. Stacks are ordered bottom to top in
/// placement order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: u8,
    cells: BTreeMap<Square, Vec<Stone>>,
}

impl Board {
    /// Creates an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::InvalidBoardSize`] unless
    /// `1 <= size <= MAX_BOARD_SIZE`.
    #[instrument]
    pub fn new(size: u8) -> Result<Self, BoardError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(BoardError::new(BoardErrorKind::InvalidBoardSize(size)));
        }
        let cells = Square::all(size).map(|square| (square, Vec::new())).collect();
        Ok(Self { size, cells })
    }

    /// Builds a board from a snapshot of stacks.
    ///
    /// Squares absent from the snapshot are empty.
    ///
    /// # Errors
    ///
    /// Fails if the size is invalid or a stack lies outside the board.
    #[instrument(skip(stacks))]
    pub fn from_stacks(
        size: u8,
        stacks: impl IntoIterator<Item = (Square, Vec<Stone>)>,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(size)?;
        for (square, stack) in stacks {
            square.check_within(size)?;
            board.cells.insert(square, stack);
        }
        debug!(stones = board.stone_count(), "Board built from snapshot");
        Ok(board)
    }

    /// Board edge length.
    pub fn size(&self) -> u8 {
        self.size
    }

    /// The stack on a square, bottom first. `None` off the board.
    pub fn stack(&self, square: Square) -> Option<&[Stone]> {
        self.cells.get(&square).map(Vec::as_slice)
    }

    /// Top stone of a square, if any.
    pub fn top(&self, square: Square) -> Option<Stone> {
        self.stack(square).and_then(|stack| stack.last().copied())
    }

    /// Places a stone on top of a square's stack.
    ///
    /// # Errors
    ///
    /// Returns [`BoardErrorKind::SquareOutOfRange`] if the square is off the
    /// board.
    #[instrument(skip(self), fields(square = %square))]
    pub fn place(&mut self, square: Square, stone: Stone) -> Result<(), BoardError> {
        let size = self.size;
        let stack = self.cells.get_mut(&square).ok_or_else(|| {
            BoardError::new(BoardErrorKind::SquareOutOfRange {
                label: square.label(),
                size,
            })
        })?;
        stack.push(stone);
        Ok(())
    }

    /// All squares with their stacks.
    pub fn cells(&self) -> impl Iterator<Item = (Square, &[Stone])> {
        self.cells.iter().map(|(square, stack)| (*square, stack.as_slice()))
    }

    /// Total stones on the board.
    pub fn stone_count(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Whether no stone has been placed.
    pub fn is_empty(&self) -> bool {
        self.cells.values().all(Vec::is_empty)
    }

    /// Formats the board as text, top rank first.
    ///
    /// Each cell shows its top stone glyph (uppercase for player one) or `.`.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for y in (0..self.size).rev() {
            result.push_str(&format!("{:>2} ", y + 1));
            for x in 0..self.size {
                let glyph = Square::new(x, y)
                    .ok()
                    .and_then(|square| self.top(square))
                    .map_or('.', Stone::glyph);
                result.push(' ');
                result.push(glyph);
            }
            result.push('\n');
        }
        result.push_str("   ");
        for x in 0..self.size {
            result.push(' ');
            result.push(char::from(b'a' + x));
        }
        result
    }
}
