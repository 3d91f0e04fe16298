//! Game driver - owns a game together with its timers
//!
//! Everything time-dependent lives here, and time itself is injected: the
//! host passes a monotonic `now_ms` to every call. The driver never sleeps;
//! it reports the next instant it wants to be woken at through
//! [`GameDriver::next_deadline_ms`].

use blocktris_core::{GameSnapshot, GameState};
use blocktris_input::InputGuard;

use crate::auto_drop::AutoDrop;
use crate::config::DriverConfig;
use crate::match_timer::MatchTimer;
use crate::types::{Direction, GameAction, GameEvent};

#[derive(Debug, Clone)]
pub struct GameDriver {
    game: GameState,
    guard: InputGuard,
    auto_drop: AutoDrop,
    timer: Option<MatchTimer>,
}

impl GameDriver {
    pub fn new(config: &DriverConfig) -> Self {
        Self::with_game(GameState::new(config.seed), config)
    }

    /// Drive an existing game (e.g. one with a fixed piece sequence)
    pub fn with_game(game: GameState, config: &DriverConfig) -> Self {
        Self {
            game,
            guard: InputGuard::with_window_ms(config.input_guard_ms),
            auto_drop: AutoDrop::new(),
            timer: config.match_ms.map(MatchTimer::new),
        }
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.game.take_events()
    }

    pub fn auto_drop(&self) -> &AutoDrop {
        &self.auto_drop
    }

    pub fn match_timer(&self) -> Option<&MatchTimer> {
        self.timer.as_ref()
    }

    /// Match time left, if the game is timed
    pub fn remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.timer.as_ref().map(|t| t.remaining_ms(now_ms))
    }

    pub fn start_game(&mut self, now_ms: u64) -> bool {
        self.game.start_game();
        if let Some(timer) = &mut self.timer {
            timer.start(now_ms);
        }
        self.guard.reset();
        // Fresh cadence even when the level did not change
        self.auto_drop.stop();
        self.sync(now_ms);
        true
    }

    pub fn reset_game(&mut self, now_ms: u64) -> bool {
        self.game.reset_game();
        if let Some(timer) = &mut self.timer {
            timer.clear();
        }
        self.guard.reset();
        self.sync(now_ms);
        true
    }

    /// Flip pause. Resuming is refused once the match clock has run out.
    pub fn toggle_pause(&mut self, now_ms: u64) -> bool {
        if self.game.paused() && self.match_expired() {
            return false;
        }
        let accepted = self.game.toggle_pause();
        self.sync(now_ms);
        accepted
    }

    /// Apply an action directly, without the key guard. Used for remote or
    /// scripted input.
    pub fn apply(&mut self, action: GameAction, now_ms: u64) -> bool {
        match action {
            GameAction::Pause => self.toggle_pause(now_ms),
            GameAction::NewGame => self.start_game(now_ms),
            _ => {
                let accepted = self.game.apply_action(action);
                self.sync(now_ms);
                accepted
            }
        }
    }

    /// Handle a key press that mapped to `action`.
    ///
    /// The new-game key is always handled, the pause key once a game has
    /// started. Other keys are ignored unless the game is playing, then go
    /// through the re-entrancy guard.
    pub fn handle_key(&mut self, action: GameAction, now_ms: u64) -> bool {
        match action {
            GameAction::Pause if !self.game.started() => return false,
            GameAction::Pause | GameAction::NewGame => return self.apply(action, now_ms),
            _ => {}
        }
        if !self.game.is_playable() {
            return false;
        }
        if !self.guard.try_acquire(now_ms) {
            return false;
        }
        self.apply(action, now_ms)
    }

    /// Run whatever is due at `now_ms`: match expiry, then at most one
    /// gravity step. Returns true when the game changed.
    pub fn advance(&mut self, now_ms: u64) -> bool {
        let mut changed = false;

        if self.game.started() && !self.game.game_over() {
            if let Some(timer) = &mut self.timer {
                if timer.poll(now_ms) {
                    changed |= self.game.finish_match();
                }
            }
        }
        self.sync(now_ms);

        if self.auto_drop.due(now_ms) {
            self.game.move_piece(Direction::Down);
            self.auto_drop.mark_dropped(now_ms);
            self.sync(now_ms);
            changed = true;
        }
        changed
    }

    /// Earliest time at which [`advance`](Self::advance) has work to do
    pub fn next_deadline_ms(&self) -> Option<u64> {
        let drop = self.auto_drop.next_due_ms();
        let expiry = if self.game.started() && !self.game.game_over() {
            self.timer.as_ref().and_then(MatchTimer::deadline_ms)
        } else {
            None
        };
        match (drop, expiry) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn match_expired(&self) -> bool {
        self.timer.as_ref().is_some_and(MatchTimer::is_expired)
    }

    fn sync(&mut self, now_ms: u64) {
        self.auto_drop
            .sync(self.game.is_playable(), self.game.level(), now_ms);
    }
}
