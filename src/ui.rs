use std::fmt::Write;

use crate::{common::Outcome, game::Verdict, moves::Move};

/// What the client knows about one cell of the server's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Unknown,
    Hit,
    Miss,
}

/// Client-side copy of the board, filled in from the server's replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowBoard {
    size: usize,
    marks: Vec<Mark>,
}

impl ShadowBoard {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            marks: vec![Mark::Unknown; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn mark(&self, x: usize, y: usize) -> Option<Mark> {
        (x < self.size && y < self.size).then(|| self.marks[y * self.size + x])
    }

    /// Record the server's answer to `mv`. Returns `true` if the cell changed.
    pub fn record(&mut self, mv: Move, outcome: Outcome) -> bool {
        let mark = match outcome {
            Outcome::Hit => Mark::Hit,
            Outcome::Miss => Mark::Miss,
            _ => return false,
        };
        match self.marks.get_mut(mv.y * self.size + mv.x) {
            Some(slot) if mv.x < self.size && *slot == Mark::Unknown => {
                *slot = mark;
                true
            }
            _ => false,
        }
    }
}

/// Terminal view of the game: board, last move and ships left.
pub fn render(board: &ShadowBoard, last: Option<(&str, Outcome)>, ships_left: usize) -> String {
    let size = board.size();
    let mut out = String::new();
    out.push_str("\x1b[H\x1b[J");

    let padding = (size * 2).saturating_sub("BATTLESHIP".len()) / 2;
    let rule = "=".repeat(padding);
    let _ = writeln!(out, "{} BATTLESHIP {}\n", rule, rule);

    out.push_str("   ");
    for c in 0..size {
        let _ = write!(out, "{} ", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for y in 0..size {
        let _ = write!(out, "{:2} ", y + 1);
        for x in 0..size {
            let ch = match board.mark(x, y) {
                Some(Mark::Hit) => 'X',
                Some(Mark::Miss) => '.',
                _ => '*',
            };
            let _ = write!(out, "{} ", ch);
        }
        out.push('\n');
    }
    let _ = writeln!(out, "\n{}\n", "=".repeat(size * 2 + 2));

    out.push_str("| GAME INFO\n");
    if let Some((mv, outcome)) = last {
        let _ = writeln!(out, "| Last move: {} - {}", mv, outcome);
    }
    let _ = writeln!(out, "| Ships left: {}", ships_left);
    out.push_str("| Enter your move: ");
    out
}

/// Closing line shown once the server announces the result.
pub fn render_verdict(verdict: Verdict) -> String {
    format!("\n{}!\n", verdict.as_str())
}
