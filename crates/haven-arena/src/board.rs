//! 3×3 board rules.

use serde::{Deserialize, Serialize};

/// A player's mark. `X` always belongs to the first-queued player and moves
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The opposing mark.
    pub fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// Terminal board state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    Win(Mark),
    Draw,
}

/// Number of cells on the board.
pub const CELLS: usize = 9;

/// The eight three-in-a-row lines: rows, columns, diagonals.
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// 3×3 board, cells indexed 0–8 row-major.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Mark>; CELLS],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mark at a cell, if any.
    pub fn cell(&self, position: usize) -> Option<Mark> {
        self.cells.get(position).copied().flatten()
    }

    /// Whether `position` addresses a cell on the board.
    pub fn in_range(position: usize) -> bool {
        position < CELLS
    }

    /// Place a mark. The caller has already validated range and vacancy.
    pub fn place(&mut self, position: usize, mark: Mark) {
        self.cells[position] = Some(mark);
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Evaluate the board: a completed line wins, a full board draws.
    pub fn terminal(&self) -> Option<Terminal> {
        for line in LINES {
            if let Some(mark) = self.cells[line[0]]
                && self.cells[line[1]] == Some(mark)
                && self.cells[line[2]] == Some(mark)
            {
                return Some(Terminal::Win(mark));
            }
        }
        if self.is_full() {
            return Some(Terminal::Draw);
        }
        None
    }
}
