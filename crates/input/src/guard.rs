//! Re-entrancy guard for key handling.
//!
//! After a key is accepted, further keys are dropped for a short window so a
//! burst of repeats from the terminal cannot race the game state.

use crate::types::INPUT_GUARD_MS;

/// Time-based lock over key processing. Times are caller-supplied
/// milliseconds from any monotonic origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputGuard {
    window_ms: u64,
    locked_until: Option<u64>,
}

impl InputGuard {
    pub fn new() -> Self {
        Self::with_window_ms(INPUT_GUARD_MS as u64)
    }

    pub fn with_window_ms(window_ms: u64) -> Self {
        Self {
            window_ms,
            locked_until: None,
        }
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Whether a key arriving at `now_ms` may be processed. Acquiring
    /// starts a new window.
    pub fn try_acquire(&mut self, now_ms: u64) -> bool {
        if self.is_locked(now_ms) {
            return false;
        }
        self.locked_until = Some(now_ms.saturating_add(self.window_ms));
        true
    }

    pub fn is_locked(&self, now_ms: u64) -> bool {
        matches!(self.locked_until, Some(until) if now_ms < until)
    }

    /// Release immediately
    pub fn reset(&mut self) {
        self.locked_until = None;
    }
}

impl Default for InputGuard {
    fn default() -> Self {
        Self::new()
    }
}
