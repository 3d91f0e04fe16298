//! Driver configuration

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::INPUT_GUARD_MS;

/// Settings for a [`GameDriver`](crate::GameDriver) and the game loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Piece sequence seed
    pub seed: u32,
    /// Key re-entrancy window
    pub input_guard_ms: u64,
    /// Match length; `None` plays without a clock
    pub match_ms: Option<u64>,
    /// JSON-lines event log destination
    pub event_log_path: Option<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            input_guard_ms: INPUT_GUARD_MS as u64,
            match_ms: None,
            event_log_path: None,
        }
    }
}

impl DriverConfig {
    /// Create from environment variables
    ///
    /// - `TETRIS_SEED`: piece seed (default: derived from the clock)
    /// - `TETRIS_INPUT_GUARD_MS`: key guard window (default 50)
    /// - `TETRIS_MATCH_SECS`: match length in seconds (default: untimed)
    /// - `TETRIS_EVENT_LOG_PATH`: event log file (default: none)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    /// Unparsable values fall back to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let input_guard_ms = lookup("TETRIS_INPUT_GUARD_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(INPUT_GUARD_MS as u64);

        let match_ms = lookup("TETRIS_MATCH_SECS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(|secs| secs.saturating_mul(1000));

        let event_log_path = lookup("TETRIS_EVENT_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            seed,
            input_guard_ms,
            match_ms,
            event_log_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
