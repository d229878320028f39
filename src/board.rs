//! Game board state: a square grid of cells with ship placement and shot resolution.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use crate::common::{BoardError, Cell, Outcome};

/// Square grid of [`Cell`]s, addressed by column `x` and row `y`.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    ships: usize,
}

impl Board {
    /// Create a board of `size` x `size` empty cells.
    pub fn new(size: usize) -> Self {
        Board {
            size,
            cells: vec![Cell::Empty; size * size],
            ships: 0,
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.size && y < self.size).then(|| y * self.size + x)
    }

    /// State of the cell at (x, y), or `None` when off the board.
    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|i| self.cells[i])
    }

    /// Returns `true` if (x, y) holds an unhit ship.
    pub fn is_ship(&self, x: usize, y: usize) -> bool {
        self.cell(x, y) == Some(Cell::Ship)
    }

    /// Place a single-cell ship at (x, y). Leaves the board untouched on error.
    pub fn place(&mut self, x: usize, y: usize) -> Result<(), BoardError> {
        let i = self.index(x, y).ok_or(BoardError::OutOfBounds { x, y })?;
        match self.cells[i] {
            Cell::Empty => {
                self.cells[i] = Cell::Ship;
                self.ships += 1;
                Ok(())
            }
            Cell::Ship => Err(BoardError::ShipAlreadyPlaced { x, y }),
            Cell::Hit | Cell::Miss => Err(BoardError::CellResolved { x, y }),
        }
    }

    /// Fire at (x, y) and report what happened.
    pub fn apply(&mut self, x: usize, y: usize) -> Outcome {
        let Some(i) = self.index(x, y) else {
            return Outcome::InvalidMove;
        };
        match self.cells[i] {
            Cell::Ship => {
                self.cells[i] = Cell::Hit;
                self.ships -= 1;
                Outcome::Hit
            }
            Cell::Empty => {
                self.cells[i] = Cell::Miss;
                Outcome::Miss
            }
            Cell::Hit => Outcome::AlreadyHit,
            Cell::Miss => Outcome::AlreadyMissed,
        }
    }

    /// Number of ship cells not yet hit.
    pub fn remaining_ships(&self) -> usize {
        self.ships
    }

    /// Coordinates of every unhit ship, row by row.
    pub fn ship_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Ship)
            .map(move |(i, _)| (i % size, i / size))
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.ships = 0;
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{ size: {}, ships: {} }}", self.size, self.ships)?;
        for row in self.cells.chunks(self.size.max(1)) {
            for cell in row {
                let ch = match cell {
                    Cell::Empty => '*',
                    Cell::Ship => 'S',
                    Cell::Hit => 'X',
                    Cell::Miss => '.',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
