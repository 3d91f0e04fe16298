//! Terminal runner (default binary).
//!
//! Single-threaded loop: crossterm key events go through the key map into
//! [`GameDriver::handle_key`], and the driver is advanced whenever its next
//! deadline passes. Settings come from the environment (see
//! [`DriverConfig::from_env`]).

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use blocktris::driver::{DriverConfig, EventLog, GameDriver};
use blocktris::input::{handle_key_event, should_quit};
use blocktris::term::{render_lines, TerminalRenderer};

/// Upper bound on one wait for input, so the clock display keeps moving
const MAX_WAIT_MS: u64 = 250;

fn main() -> Result<()> {
    let config = DriverConfig::from_env();
    let mut log = EventLog::open(config.event_log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, &mut log);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer, config: &DriverConfig, log: &mut EventLog) -> Result<()> {
    let origin = Instant::now();
    let now_ms = || origin.elapsed().as_millis() as u64;

    let mut driver = GameDriver::new(config);
    let mut dirty = true;

    loop {
        let now = now_ms();
        dirty |= driver.advance(now);

        for event in driver.take_events() {
            if let Err(err) = log.record(now, event) {
                eprintln!("[driver] event log write failed: {err}");
            }
        }

        if dirty || driver.match_timer().is_some_and(|t| t.is_running()) {
            let snapshot = driver.snapshot();
            term.draw(&render_lines(&snapshot, driver.remaining_ms(now)))?;
            dirty = false;
        }

        let wait_ms = driver
            .next_deadline_ms()
            .map_or(MAX_WAIT_MS, |at| at.saturating_sub(now))
            .min(MAX_WAIT_MS);

        if event::poll(Duration::from_millis(wait_ms))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                if should_quit(key) {
                    log.flush()?;
                    return Ok(());
                }
                if let Some(action) = handle_key_event(key) {
                    dirty |= driver.handle_key(action, now_ms());
                }
            } else {
                // Resize and the like
                dirty = true;
            }
        }
    }
}
