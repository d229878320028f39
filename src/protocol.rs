//! Fixed-size text frames exchanged between client and server.
//!
//! Every message occupies exactly [`FRAME_SIZE`] bytes on the wire. Content is
//! UTF-8, truncated on a character boundary when longer than a frame and padded
//! with NUL bytes when shorter; a reader keeps everything before the first NUL.

use alloc::borrow::Cow;
use alloc::format;
use core::fmt;
use thiserror::Error;

use crate::common::Outcome;
use crate::game::Verdict;

/// Length in bytes of every frame.
pub const FRAME_SIZE: usize = 15;

/// One wire frame.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Frame([u8; FRAME_SIZE]);

impl Frame {
    /// Pack `text` into a frame, truncating and NUL-padding as needed.
    pub fn encode(text: &str) -> Self {
        let content = text.split('\0').next().unwrap_or_default();
        let mut end = content.len().min(FRAME_SIZE);
        while !content.is_char_boundary(end) {
            end -= 1;
        }
        let mut buf = [0u8; FRAME_SIZE];
        buf[..end].copy_from_slice(&content.as_bytes()[..end]);
        Frame(buf)
    }

    pub fn from_bytes(bytes: [u8; FRAME_SIZE]) -> Self {
        Frame(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.0
    }

    /// Text carried by the frame, up to the first NUL.
    pub fn text(&self) -> Cow<'_, str> {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(FRAME_SIZE);
        alloc::string::String::from_utf8_lossy(&self.0[..len])
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:?})", self.text())
    }
}

/// Errors raised while interpreting a server frame.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("unrecognised server message: {0:?}")]
    Unrecognised(alloc::string::String),
    #[error("malformed session metadata: {0:?}")]
    BadMetadata(alloc::string::String),
}

/// Messages sent by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMessage {
    /// Field size and ship count, sent once before the first move.
    Metadata { field_size: usize, ships: usize },
    /// Reply to a single move.
    Outcome(Outcome),
    /// Last frame of a session.
    Final(Verdict),
}

impl ServerMessage {
    pub fn to_frame(&self) -> Frame {
        match self {
            ServerMessage::Metadata { field_size, ships } => {
                Frame::encode(&format!("f={},n={}", field_size, ships))
            }
            ServerMessage::Outcome(outcome) => Frame::encode(outcome.as_str()),
            ServerMessage::Final(verdict) => Frame::encode(verdict.as_str()),
        }
    }

    pub fn parse(frame: &Frame) -> Result<Self, ProtocolError> {
        let text = frame.text();
        if let Some(outcome) = Outcome::from_wire(&text) {
            return Ok(ServerMessage::Outcome(outcome));
        }
        if let Some(verdict) = Verdict::from_wire(&text) {
            return Ok(ServerMessage::Final(verdict));
        }
        if text.starts_with("f=") {
            return parse_metadata(&text)
                .ok_or_else(|| ProtocolError::BadMetadata(text.into_owned()));
        }
        Err(ProtocolError::Unrecognised(text.into_owned()))
    }
}

fn parse_metadata(text: &str) -> Option<ServerMessage> {
    let (field, ships) = text.split_once(',')?;
    let field_size = field.strip_prefix("f=")?.parse().ok()?;
    let ships = ships.strip_prefix("n=")?.parse().ok()?;
    Some(ServerMessage::Metadata { field_size, ships })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_nul_padded() {
        let frame = Frame::encode("B7");
        assert_eq!(&frame.as_bytes()[..2], b"B7");
        assert!(frame.as_bytes()[2..].iter().all(|&b| b == 0));
        assert_eq!(frame.text(), "B7");
    }

    #[test]
    fn long_text_is_truncated() {
        let frame = Frame::encode("a-very-long-player-name");
        assert_eq!(frame.text(), "a-very-long-pla");
    }

    #[test]
    fn truncation_keeps_utf8_intact() {
        // 14 ASCII bytes followed by a two-byte character that does not fit.
        let frame = Frame::encode("abcdefghijklmné");
        assert_eq!(frame.text(), "abcdefghijklmn");
    }

    #[test]
    fn embedded_nul_ends_content() {
        assert_eq!(Frame::encode("ab\0cd").text(), "ab");
    }

    #[test]
    fn full_width_frame_has_no_terminator() {
        let frame = Frame::from_bytes(*b"exactly15bytes!");
        assert_eq!(frame.text(), "exactly15bytes!");
    }

    #[test]
    fn server_messages_parse_from_literals() {
        let cases = [
            ("Hit", ServerMessage::Outcome(Outcome::Hit)),
            ("Already missed", ServerMessage::Outcome(Outcome::AlreadyMissed)),
            ("Invalid move", ServerMessage::Outcome(Outcome::InvalidMove)),
            ("You win", ServerMessage::Final(Verdict::Win)),
            ("You lose", ServerMessage::Final(Verdict::Lose)),
            (
                "f=20,n=100",
                ServerMessage::Metadata {
                    field_size: 20,
                    ships: 100,
                },
            ),
        ];
        for (text, expected) in cases {
            assert_eq!(ServerMessage::parse(&Frame::encode(text)), Ok(expected));
        }
    }

    #[test]
    fn metadata_format_matches_wire_contract() {
        let frame = ServerMessage::Metadata {
            field_size: 5,
            ships: 3,
        }
        .to_frame();
        assert_eq!(frame.text(), "f=5,n=3");
    }

    #[test]
    fn unknown_frames_are_rejected() {
        assert!(matches!(
            ServerMessage::parse(&Frame::encode("Sunk")),
            Err(ProtocolError::Unrecognised(_))
        ));
        assert!(matches!(
            ServerMessage::parse(&Frame::encode("f=x,n=1")),
            Err(ProtocolError::BadMetadata(_))
        ));
    }
}
