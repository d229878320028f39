//! Server configuration file: one `key=value` pair per line.
//!
//! ```text
//! field_size=10
//! number_of_moves=30
//! number_of_ships=8
//! server_port=8080
//! server_address=127.0.0.1
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Every key is required.

use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::common::SetupError;
use crate::game::SessionConfig;

/// Default location of the server configuration file.
pub const DEFAULT_CONFIG_FILE: &str = "config.cfg";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected key=value, got {text:?}")]
    MalformedLine { line: usize, text: String },
    #[error("line {line}: unknown key {key:?}")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: invalid value {value:?} for {key}")]
    InvalidValue {
        line: usize,
        key: ConfigKey,
        value: String,
    },
    #[error("missing required key {0}")]
    MissingKey(ConfigKey),
    #[error(transparent)]
    Invalid(#[from] SetupError),
}

/// Recognised configuration keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    FieldSize,
    NumberOfMoves,
    NumberOfShips,
    ServerPort,
    ServerAddress,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 5] = [
        ConfigKey::FieldSize,
        ConfigKey::NumberOfMoves,
        ConfigKey::NumberOfShips,
        ConfigKey::ServerPort,
        ConfigKey::ServerAddress,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::FieldSize => "field_size",
            ConfigKey::NumberOfMoves => "number_of_moves",
            ConfigKey::NumberOfShips => "number_of_ships",
            ConfigKey::ServerPort => "server_port",
            ConfigKey::ServerAddress => "server_address",
        }
    }

    /// Parse `value` and store it in the matching field of `draft`.
    fn apply(self, draft: &mut Draft, value: &str) -> Option<()> {
        match self {
            ConfigKey::FieldSize => draft.field_size = Some(value.parse().ok()?),
            ConfigKey::NumberOfMoves => draft.number_of_moves = Some(value.parse().ok()?),
            ConfigKey::NumberOfShips => draft.number_of_ships = Some(value.parse().ok()?),
            ConfigKey::ServerPort => {
                let port: u16 = value.parse().ok()?;
                if port == 0 {
                    return None;
                }
                draft.server_port = Some(port);
            }
            ConfigKey::ServerAddress => draft.server_address = Some(value.parse().ok()?),
        }
        Some(())
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or(())
    }
}

#[derive(Default)]
struct Draft {
    field_size: Option<usize>,
    number_of_moves: Option<u32>,
    number_of_ships: Option<usize>,
    server_port: Option<u16>,
    server_address: Option<IpAddr>,
}

/// Validated server settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub session: SessionConfig,
    pub server_address: IpAddr,
    pub server_port: u16,
}

impl ServerConfig {
    /// Read and validate the configuration file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_address, self.server_port)
    }
}

impl FromStr for ServerConfig {
    type Err = ConfigError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut draft = Draft::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let (key, value) = trimmed
                .split_once('=')
                .ok_or_else(|| ConfigError::MalformedLine {
                    line,
                    text: trimmed.to_string(),
                })?;
            let key = key.trim();
            let value = value.trim();
            let key: ConfigKey = key.parse().map_err(|_| ConfigError::UnknownKey {
                line,
                key: key.to_string(),
            })?;
            key.apply(&mut draft, value)
                .ok_or_else(|| ConfigError::InvalidValue {
                    line,
                    key,
                    value: value.to_string(),
                })?;
        }

        let session = SessionConfig::new(
            draft
                .field_size
                .ok_or(ConfigError::MissingKey(ConfigKey::FieldSize))?,
            draft
                .number_of_ships
                .ok_or(ConfigError::MissingKey(ConfigKey::NumberOfShips))?,
            draft
                .number_of_moves
                .ok_or(ConfigError::MissingKey(ConfigKey::NumberOfMoves))?,
        )?;
        Ok(ServerConfig {
            session,
            server_address: draft
                .server_address
                .ok_or(ConfigError::MissingKey(ConfigKey::ServerAddress))?,
            server_port: draft
                .server_port
                .ok_or(ConfigError::MissingKey(ConfigKey::ServerPort))?,
        })
    }
}
