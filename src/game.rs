//! One player's game: validated session parameters, the hidden board and the
//! move budget, driven through Init, Playing and a final Won or Lost.

use rand::Rng;

use crate::{
    board::Board,
    common::{BoardError, Outcome, SetupError, MAX_FIELD_SIZE},
    moves::Move,
    placement::{max_ships, place_ships},
};

/// Immutable parameters of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionConfig {
    field_size: usize,
    ship_count: usize,
    move_budget: u32,
}

impl SessionConfig {
    /// Validate and build a configuration.
    pub fn new(field_size: usize, ship_count: usize, move_budget: u32) -> Result<Self, SetupError> {
        if field_size == 0 || field_size > MAX_FIELD_SIZE {
            return Err(SetupError::FieldSizeOutOfRange {
                size: field_size,
                max: MAX_FIELD_SIZE,
            });
        }
        let max = max_ships(field_size);
        if ship_count > max {
            return Err(SetupError::TooManyShips {
                ships: ship_count,
                max,
            });
        }
        Ok(Self {
            field_size,
            ship_count,
            move_budget,
        })
    }

    pub fn field_size(&self) -> usize {
        self.field_size
    }

    pub fn ship_count(&self) -> usize {
        self.ship_count
    }

    pub fn move_budget(&self) -> u32 {
        self.move_budget
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionState {
    Init,
    Playing,
    Won,
    Lost,
}

impl SessionState {
    /// Returns `true` once the session is Won or Lost.
    pub fn is_over(self) -> bool {
        matches!(self, SessionState::Won | SessionState::Lost)
    }
}

/// Final result announced to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    Win,
    Lose,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Win => "You win",
            Verdict::Lose => "You lose",
        }
    }

    pub fn from_wire(text: &str) -> Option<Self> {
        match text {
            "You win" => Some(Verdict::Win),
            "You lose" => Some(Verdict::Lose),
            _ => None,
        }
    }
}

/// Single-player game against a hidden layout: the board plus the move counter.
pub struct Session {
    config: SessionConfig,
    board: Board,
    moves: u32,
    state: SessionState,
}

impl Session {
    /// Create a session in the `Init` state with an empty board.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            board: Board::new(config.field_size()),
            moves: 0,
            state: SessionState::Init,
        }
    }

    /// Create a session already playing on a prepared board.
    ///
    /// Field size and ship count come from the board; `config` contributes
    /// only the move budget.
    pub fn with_board(config: SessionConfig, board: Board) -> Self {
        let mut session = Self {
            config,
            board,
            moves: 0,
            state: SessionState::Playing,
        };
        session.refresh();
        session
    }

    /// Place the configured ships at random and begin play.
    pub fn start<R: Rng>(&mut self, rng: &mut R) -> Result<SessionState, BoardError> {
        if self.state == SessionState::Init {
            place_ships(&mut self.board, self.config.ship_count(), rng)?;
            self.state = SessionState::Playing;
            self.refresh();
        }
        Ok(self.state)
    }

    fn refresh(&mut self) {
        if self.state != SessionState::Playing {
            return;
        }
        if self.board.remaining_ships() == 0 {
            self.state = SessionState::Won;
        } else if self.moves >= self.config.move_budget() {
            self.state = SessionState::Lost;
        }
    }

    /// Resolve one move token.
    ///
    /// Only Hit and Miss consume the move budget. Outside the `Playing` state
    /// every token is rejected as [`Outcome::InvalidMove`].
    pub fn play(&mut self, token: &str) -> Outcome {
        if self.state != SessionState::Playing {
            return Outcome::InvalidMove;
        }
        let Some(mv) = Move::parse(token, self.board.size()) else {
            return Outcome::InvalidMove;
        };
        let outcome = self.board.apply(mv.x, mv.y);
        if outcome.counts_as_move() {
            self.moves += 1;
        }
        self.refresh();
        outcome
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Verdict for a finished session.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.state {
            SessionState::Won => Some(Verdict::Win),
            SessionState::Lost => Some(Verdict::Lose),
            SessionState::Init | SessionState::Playing => None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves counted against the budget so far.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn ships_left(&self) -> usize {
        self.board.remaining_ships()
    }
}
