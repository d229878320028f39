//! Common types for the game: cell states, move outcomes and setup errors.

use thiserror::Error;

/// Largest field size a session may be configured with.
pub const MAX_FIELD_SIZE: usize = 20;

/// State of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Ship,
    Hit,
    Miss,
}

/// Result of a move attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// Move struck a ship cell.
    Hit,
    /// Move landed on open water.
    Miss,
    /// Cell was already hit; nothing changes.
    AlreadyHit,
    /// Cell was already missed; nothing changes.
    AlreadyMissed,
    /// Token was malformed or off the board.
    InvalidMove,
}

impl Outcome {
    /// Literal used for this outcome on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Hit => "Hit",
            Outcome::Miss => "Miss",
            Outcome::AlreadyHit => "Already hit",
            Outcome::AlreadyMissed => "Already missed",
            Outcome::InvalidMove => "Invalid move",
        }
    }

    /// Inverse of [`Outcome::as_str`].
    pub fn from_wire(text: &str) -> Option<Self> {
        match text {
            "Hit" => Some(Outcome::Hit),
            "Miss" => Some(Outcome::Miss),
            "Already hit" => Some(Outcome::AlreadyHit),
            "Already missed" => Some(Outcome::AlreadyMissed),
            "Invalid move" => Some(Outcome::InvalidMove),
            _ => None,
        }
    }

    /// Whether this outcome consumes a move from the budget.
    pub fn counts_as_move(self) -> bool {
        matches!(self, Outcome::Hit | Outcome::Miss)
    }
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Coordinates fall outside the board.
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    /// Attempted to place a ship on a cell that already holds one.
    #[error("cell ({x}, {y}) already holds a ship")]
    ShipAlreadyPlaced { x: usize, y: usize },
    /// Attempted to place a ship on a cell that was already shot at.
    #[error("cell ({x}, {y}) has already been resolved")]
    CellResolved { x: usize, y: usize },
    /// Requested more ships than the adjacency rule allows.
    #[error("{ships} ships cannot be placed on a board of size {size}")]
    TooManyShips { ships: usize, size: usize },
}

/// Errors raised when session parameters are out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("field size {size} is outside 1..={max}")]
    FieldSizeOutOfRange { size: usize, max: usize },
    #[error("{ships} ships exceed the maximum of {max} for this field size")]
    TooManyShips { ships: usize, max: usize },
}
