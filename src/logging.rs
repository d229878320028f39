use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{self, LevelFilter, Metadata, Record};

/// Writes `[HH:MM:SS] LEVEL - message` lines to stderr.
struct StampedLogger;

impl log::Log for StampedLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let secs = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default();
            eprintln!("{} {} - {}", clock_stamp(secs), record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StampedLogger = StampedLogger;

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "SOLO_BATTLESHIP_LOG";

/// `[HH:MM:SS]` (UTC) for a Unix timestamp in seconds.
pub fn clock_stamp(unix_secs: u64) -> String {
    let day = unix_secs % 86_400;
    format!("[{:02}:{:02}:{:02}]", day / 3600, day % 3600 / 60, day % 60)
}

/// Install the stderr logger. The level comes from `SOLO_BATTLESHIP_LOG` and
/// falls back to `default` when the variable is unset or unparseable.
pub fn init_logging(default: LevelFilter) {
    let level = env::var(LOG_ENV)
        .ok()
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(default);
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}
