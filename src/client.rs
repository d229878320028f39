use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    common::Outcome,
    game::Verdict,
    moves::Move,
    protocol::{Frame, ServerMessage},
    transport::Transport,
    ui::{render, render_verdict, ShadowBoard},
};

/// Longest move token the client will send.
const MAX_TOKEN_LEN: usize = 3;

/// Why the client's game loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientExit {
    /// The server announced the result.
    Finished(Verdict),
    /// The connection closed before a result arrived.
    Disconnected,
    /// The player's input ran out.
    InputClosed,
}

/// Uppercase a typed move; `None` if it is empty or too long to be a move.
pub fn normalize_move(line: &str) -> Option<String> {
    let token = line.trim().to_ascii_uppercase();
    (!token.is_empty() && token.chars().count() <= MAX_TOKEN_LEN).then_some(token)
}

/// Player side of a connection.
pub struct GameClient<T: Transport> {
    transport: T,
    name: String,
}

impl<T: Transport> GameClient<T> {
    pub fn new(transport: T, name: impl Into<String>) -> Self {
        Self {
            transport,
            name: name.into(),
        }
    }

    /// Play until the server announces a result, the connection drops or
    /// `input` is exhausted. The view is redrawn into `out` before every move.
    pub async fn run<I, W>(mut self, input: I, out: &mut W) -> anyhow::Result<ClientExit>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        self.transport.send(Frame::encode(&self.name)).await?;
        let (field_size, ships) = match ServerMessage::parse(&self.transport.recv().await?)? {
            ServerMessage::Metadata { field_size, ships } => (field_size, ships),
            ServerMessage::Final(verdict) => return self.finish(verdict, out),
            other => return Err(anyhow::anyhow!("expected session metadata, got {:?}", other)),
        };
        log::debug!("session metadata: field {} ships {}", field_size, ships);

        let mut board = ShadowBoard::new(field_size);
        let mut ships_left = ships;
        let mut last: Option<(String, Outcome)> = None;
        let mut lines = input.lines();

        loop {
            write!(
                out,
                "{}",
                render(&board, last.as_ref().map(|(m, o)| (m.as_str(), *o)), ships_left)
            )?;
            out.flush()?;

            tokio::select! {
                biased;
                frame = self.transport.recv() => {
                    // Unprompted frames only arrive when the game is over.
                    let Ok(frame) = frame else {
                        return Ok(ClientExit::Disconnected);
                    };
                    match ServerMessage::parse(&frame)? {
                        ServerMessage::Final(verdict) => return self.finish(verdict, out),
                        other => log::warn!("ignoring unexpected {:?}", other),
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        return Ok(ClientExit::InputClosed);
                    };
                    let Some(token) = normalize_move(&line) else {
                        continue;
                    };
                    // A verdict may already be waiting even if the send fails.
                    if let Err(e) = self.transport.send(Frame::encode(&token)).await {
                        log::debug!("sending {} failed: {}", token, e);
                    }
                    let Ok(reply) = self.transport.recv().await else {
                        return Ok(ClientExit::Disconnected);
                    };
                    match ServerMessage::parse(&reply)? {
                        ServerMessage::Outcome(outcome) => {
                            if let Some(mv) = Move::parse(&token, field_size) {
                                if board.record(mv, outcome) && outcome == Outcome::Hit {
                                    ships_left = ships_left.saturating_sub(1);
                                }
                            }
                            last = Some((token, outcome));
                        }
                        ServerMessage::Final(verdict) => return self.finish(verdict, out),
                        other => log::warn!("ignoring unexpected {:?}", other),
                    }
                }
            }
        }
    }

    fn finish<W: Write>(self, verdict: Verdict, out: &mut W) -> anyhow::Result<ClientExit> {
        write!(out, "{}", render_verdict(verdict))?;
        out.flush()?;
        Ok(ClientExit::Finished(verdict))
    }
}
