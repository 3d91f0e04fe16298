//! Auto-drop cadence
//!
//! Tracks when the falling piece should next be pushed down by gravity. The
//! owner tells it whether the game is playing and at which level; it answers
//! whether a drop is due at a given time.

use blocktris_core::drop_interval_ms;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoDrop {
    running: bool,
    level: u32,
    interval_ms: u64,
    last_drop_ms: u64,
}

impl AutoDrop {
    pub fn new() -> Self {
        Self {
            running: false,
            level: 1,
            interval_ms: drop_interval_ms(1) as u64,
            last_drop_ms: 0,
        }
    }

    /// Start dropping at `level`'s cadence. No-op when already running at
    /// that level; a level change restarts the interval from `now_ms`.
    pub fn start(&mut self, level: u32, now_ms: u64) {
        if self.running && self.level == level {
            return;
        }
        self.running = true;
        self.level = level;
        self.interval_ms = drop_interval_ms(level) as u64;
        self.last_drop_ms = now_ms;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Run while `playing`, stopped otherwise
    pub fn sync(&mut self, playing: bool, level: u32, now_ms: u64) {
        if playing {
            self.start(level, now_ms);
        } else {
            self.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn next_due_ms(&self) -> Option<u64> {
        self.running
            .then(|| self.last_drop_ms.saturating_add(self.interval_ms))
    }

    pub fn due(&self, now_ms: u64) -> bool {
        matches!(self.next_due_ms(), Some(at) if now_ms >= at)
    }

    /// Record a drop at `now_ms`; the next one is a full interval later.
    pub fn mark_dropped(&mut self, now_ms: u64) {
        self.last_drop_ms = now_ms;
    }
}

impl Default for AutoDrop {
    fn default() -> Self {
        Self::new()
    }
}
