//! Match clock for timed rounds
//!
//! Counts wall time from the start of a game. Pausing does not stop it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTimer {
    duration_ms: u64,
    started_at: Option<u64>,
    expired: bool,
}

impl MatchTimer {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            started_at: None,
            expired: false,
        }
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// (Re)start the clock at `now_ms`
    pub fn start(&mut self, now_ms: u64) {
        self.started_at = Some(now_ms);
        self.expired = false;
    }

    /// Disarm without expiring
    pub fn clear(&mut self) {
        self.started_at = None;
        self.expired = false;
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && !self.expired
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Time at which the running clock hits zero
    pub fn deadline_ms(&self) -> Option<u64> {
        match self.started_at {
            Some(start) if !self.expired => Some(start.saturating_add(self.duration_ms)),
            _ => None,
        }
    }

    pub fn remaining_ms(&self, now_ms: u64) -> u64 {
        match self.started_at {
            Some(_) if self.expired => 0,
            Some(start) => {
                let elapsed = now_ms.saturating_sub(start);
                self.duration_ms.saturating_sub(elapsed)
            }
            None => self.duration_ms,
        }
    }

    /// Returns true exactly once, on the first poll at or after the deadline.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        match self.deadline_ms() {
            Some(deadline) if now_ms >= deadline => {
                self.expired = true;
                true
            }
            _ => false,
        }
    }
}

/// `MM:SS`, rounding partial seconds up so the clock shows `00:00` only at
/// expiry.
pub fn format_mm_ss(ms: u64) -> String {
    let secs = ms.div_ceil(1000);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
