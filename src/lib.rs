#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod board;
mod common;
mod game;
mod moves;
mod placement;
pub mod protocol;
#[cfg(feature = "std")]
mod client;
#[cfg(feature = "std")]
pub mod config;
#[cfg(feature = "std")]
mod logging;
#[cfg(feature = "std")]
mod server;
#[cfg(feature = "std")]
mod session_node;
#[cfg(feature = "std")]
pub mod transport;
#[cfg(feature = "std")]
pub mod ui;

pub use board::*;
pub use common::*;
pub use game::*;
pub use moves::*;
pub use placement::*;
pub use protocol::{Frame, ProtocolError, ServerMessage, FRAME_SIZE};
#[cfg(feature = "std")]
pub use client::*;
#[cfg(feature = "std")]
pub use config::{ConfigError, ConfigKey, ServerConfig};
#[cfg(feature = "std")]
pub use logging::{init_logging, LOG_ENV};
#[cfg(feature = "std")]
pub use server::*;
#[cfg(feature = "std")]
pub use session_node::*;
#[cfg(feature = "std")]
pub use transport::{in_memory::InMemoryTransport, tcp::TcpTransport, Transport};
