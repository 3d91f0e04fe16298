//! Async game loop.
//!
//! Runs a [`GameDriver`] as a single tokio task. Commands come in over an
//! `mpsc` channel and are applied one at a time; snapshots go out on a
//! `watch` channel and events on an unbounded `mpsc` channel. Gravity and
//! the match clock are driven by sleeping until the driver's next deadline.

use anyhow::anyhow;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Duration, Instant};

use blocktris_core::{GameSnapshot, GameState};

use crate::config::DriverConfig;
use crate::driver::GameDriver;
use crate::event_log::{spawn_event_writer, EventRecord};
use crate::types::{GameAction, GameEvent};

/// Bound of the command queue
const COMMAND_BUFFER: usize = 32;

/// Command delivered to the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverCommand {
    /// A key press, subject to the phase check and the input guard
    Key(GameAction),
    /// A direct action (remote peers, scripted input)
    Action(GameAction),
    /// Back to a fresh, not-started game
    Reset,
}

/// Handle to a running game loop.
///
/// Dropping the handle also stops the loop.
pub struct GameHandle {
    commands: mpsc::Sender<DriverCommand>,
    snapshots: watch::Receiver<GameSnapshot>,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
    log_writer: Option<JoinHandle<()>>,
}

impl GameHandle {
    pub async fn send(&self, command: DriverCommand) -> anyhow::Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| anyhow!("game loop has stopped"))
    }

    pub async fn key(&self, action: GameAction) -> anyhow::Result<()> {
        self.send(DriverCommand::Key(action)).await
    }

    pub async fn action(&self, action: GameAction) -> anyhow::Result<()> {
        self.send(DriverCommand::Action(action)).await
    }

    pub async fn reset(&self) -> anyhow::Result<()> {
        self.send(DriverCommand::Reset).await
    }

    /// Latest published snapshot
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshots.clone()
    }

    /// Ask the loop to stop. Safe to call any number of times.
    pub fn shutdown(&self) {
        self.shutdown.send_replace(true);
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stop the loop and wait for it to exit.
    ///
    /// Commands already queued are applied first. When an event log is
    /// configured this also waits for its last records to be written.
    pub async fn join(self) -> anyhow::Result<()> {
        self.shutdown();
        let result = self
            .task
            .await
            .map_err(|err| anyhow!("game loop task failed: {err}"));

        // The loop owned the log sender, so the writer drains and exits.
        if let Some(writer) = self.log_writer {
            writer
                .await
                .map_err(|err| anyhow!("event log task failed: {err}"))?;
        }
        result
    }
}

/// Start a game loop on the current tokio runtime.
///
/// The returned event receiver is unbounded: read it continuously, or drop
/// it to opt out of events. Holding it unread lets the queue grow for the
/// whole session.
pub fn spawn_game_loop(
    config: DriverConfig,
) -> anyhow::Result<(GameHandle, mpsc::UnboundedReceiver<GameEvent>)> {
    let driver = GameDriver::with_game(GameState::new(config.seed), &config);
    spawn_driver(driver, config.event_log_path)
}

/// Start a game loop around an existing driver.
///
/// Same event receiver contract as [`spawn_game_loop`].
pub fn spawn_driver(
    driver: GameDriver,
    event_log_path: Option<String>,
) -> anyhow::Result<(GameHandle, mpsc::UnboundedReceiver<GameEvent>)> {
    tokio::runtime::Handle::try_current()
        .map_err(|_| anyhow!("the game loop must be started inside a tokio runtime"))?;

    let (cmd_tx, cmd_rx) = mpsc::channel::<DriverCommand>(COMMAND_BUFFER);
    let (event_tx, event_rx) = mpsc::unbounded_channel::<GameEvent>();
    let (snapshot_tx, snapshot_rx) = watch::channel(driver.snapshot());
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (log_tx, log_writer) = match event_log_path {
        Some(path) => {
            let (tx, writer) = spawn_event_writer(path);
            (Some(tx), Some(writer))
        }
        None => (None, None),
    };

    let game_loop = GameLoop {
        driver,
        origin: Instant::now(),
        commands: cmd_rx,
        snapshots: snapshot_tx,
        events: event_tx,
        log: log_tx,
    };
    let task = tokio::spawn(game_loop.run(shutdown_rx));

    let handle = GameHandle {
        commands: cmd_tx,
        snapshots: snapshot_rx,
        shutdown: shutdown_tx,
        task,
        log_writer,
    };
    Ok((handle, event_rx))
}

struct GameLoop {
    driver: GameDriver,
    origin: Instant,
    commands: mpsc::Receiver<DriverCommand>,
    snapshots: watch::Sender<GameSnapshot>,
    events: mpsc::UnboundedSender<GameEvent>,
    log: Option<mpsc::UnboundedSender<EventRecord>>,
}

impl GameLoop {
    async fn run(mut self, mut shutdown: watch::Receiver<bool>) {
        loop {
            let deadline = self
                .driver
                .next_deadline_ms()
                .map(|ms| self.origin + Duration::from_millis(ms));

            tokio::select! {
                biased;

                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        self.drain_commands();
                        break;
                    }
                }
                cmd = self.commands.recv() => {
                    let Some(cmd) = cmd else { break };
                    self.execute(cmd);
                }
                _ = wait_until(deadline) => {
                    let now = self.now_ms();
                    self.driver.advance(now);
                }
            }

            self.publish();
        }
    }

    fn execute(&mut self, cmd: DriverCommand) {
        let now = self.now_ms();
        match cmd {
            DriverCommand::Key(action) => self.driver.handle_key(action, now),
            DriverCommand::Action(action) => self.driver.apply(action, now),
            DriverCommand::Reset => self.driver.reset_game(now),
        };
    }

    /// Apply whatever was queued before shutdown, then publish once.
    fn drain_commands(&mut self) {
        self.commands.close();
        while let Ok(cmd) = self.commands.try_recv() {
            self.execute(cmd);
        }
        self.publish();
    }

    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }

    fn publish(&mut self) {
        let events = self.driver.take_events();
        if !events.is_empty() {
            let now = self.now_ms();
            for event in events {
                if let Some(log) = &self.log {
                    if log.send(EventRecord::new(now, event)).is_err() {
                        eprintln!("[driver] event log closed, logging disabled");
                        self.log = None;
                    }
                }
                // Receiver may be gone; the game does not depend on it.
                let _ = self.events.send(event);
            }
        }

        let snapshot = self.driver.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current != snapshot {
                *current = snapshot;
                true
            } else {
                false
            }
        });
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
