//! Parsing of textual move tokens such as `B7` into board coordinates.

use alloc::string::String;
use core::fmt;

/// A validated coordinate on a board of known size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Column, from the letter.
    pub x: usize,
    /// Row, from the number.
    pub y: usize,
}

impl Move {
    /// Parse `token` against a board of side `size`.
    ///
    /// The first character must be an ASCII letter (column `letter - 'A'`),
    /// followed by one or more ASCII digits (row `number - 1`). Returns `None`
    /// for anything malformed or off the board; valid columns are
    /// `'A'..='A' + size - 1`.
    pub fn parse(token: &str, size: usize) -> Option<Move> {
        let mut chars = token.chars();
        let letter = chars.next()?;
        if !letter.is_ascii_alphabetic() {
            return None;
        }
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let x = (letter as usize).checked_sub('A' as usize)?;
        let y = digits.parse::<usize>().ok()?.checked_sub(1)?;
        (x < size && y < size).then_some(Move { x, y })
    }

    /// Token naming this coordinate, e.g. `C3` for (2, 2).
    pub fn token(&self) -> String {
        alloc::format!("{}", self)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col = (b'A' + self.x as u8) as char;
        write!(f, "{}{}", col, self.y + 1)
    }
}
