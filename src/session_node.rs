use rand::rngs::SmallRng;

use crate::{
    board::Board,
    game::{Session, SessionConfig, SessionState},
    protocol::ServerMessage,
    transport::Transport,
};

/// What a finished session looked like.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SessionSummary {
    pub player: String,
    pub state: SessionState,
    pub moves: u32,
    pub ships_left: usize,
}

/// Server side of one connection: owns the transport and drives a [`Session`]
/// from the greeting to the final verdict.
pub struct SessionNode {
    config: SessionConfig,
    transport: Box<dyn Transport>,
}

impl SessionNode {
    pub fn new(config: SessionConfig, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Play a session on a randomly placed board.
    pub async fn run(self, rng: &mut SmallRng) -> anyhow::Result<SessionSummary> {
        let config = self.config;
        self.drive(move |player| {
            let mut session = Session::new(config);
            session
                .start(rng)
                .map_err(|e| anyhow::anyhow!("[{}] ship placement failed: {}", player, e))?;
            Ok(session)
        })
        .await
    }

    /// Play a session on a prepared board.
    ///
    /// The board's size and ship count are announced to the client; only the
    /// move budget is taken from the config.
    pub async fn run_with_board(self, board: Board) -> anyhow::Result<SessionSummary> {
        let config = self.config;
        self.drive(move |_| Ok(Session::with_board(config, board))).await
    }

    async fn drive<F>(mut self, init: F) -> anyhow::Result<SessionSummary>
    where
        F: FnOnce(&str) -> anyhow::Result<Session>,
    {
        let greeting = self
            .transport
            .recv()
            .await
            .map_err(|e| anyhow::anyhow!("no greeting from client: {}", e))?;
        let player = greeting.text().to_string();
        log::info!("Client {} connected", player);

        let mut session = init(&player)?;
        let config = *session.config();
        // Announce the board actually in play.
        self.transport
            .send(
                ServerMessage::Metadata {
                    field_size: session.board().size(),
                    ships: session.ships_left(),
                }
                .to_frame(),
            )
            .await?;

        while session.state() == SessionState::Playing {
            let frame = self.transport.recv().await.map_err(|e| {
                log::warn!(
                    "[{}] session aborted after {} moves: {}",
                    player,
                    session.moves(),
                    e
                );
                e
            })?;
            let token = frame.text();
            let outcome = session.play(&token);
            log::debug!(
                "[{}] {} -> {} (moves {}/{}, ships left {})",
                player,
                token,
                outcome,
                session.moves(),
                config.move_budget(),
                session.ships_left()
            );
            self.transport
                .send(ServerMessage::Outcome(outcome).to_frame())
                .await?;
        }

        if let Some(verdict) = session.verdict() {
            self.transport
                .send(ServerMessage::Final(verdict).to_frame())
                .await?;
        }
        log::info!(
            "[{}] session over: {:?} after {} moves",
            player,
            session.state(),
            session.moves()
        );

        Ok(SessionSummary {
            player,
            state: session.state(),
            moves: session.moves(),
            ships_left: session.ships_left(),
        })
    }
}
