//! Input/timing driver
//!
//! Turns the pure game state machine into a real-time game:
//!
//! - [`GameDriver`]: explicit-tick driver owning the game, the key guard,
//!   the auto-drop cadence and an optional match clock
//! - [`runtime`]: the same driver running as a tokio task behind channels
//! - [`protocol`]: JSON shapes of snapshots and events
//! - [`event_log`]: JSON-lines event log writers
//! - [`config`]: environment-driven settings

pub mod auto_drop;
pub mod config;
pub mod driver;
pub mod event_log;
pub mod match_timer;
pub mod protocol;
pub mod runtime;

pub use blocktris_types as types;

pub use auto_drop::AutoDrop;
pub use config::DriverConfig;
pub use driver::GameDriver;
pub use event_log::{spawn_event_writer, EventLog, EventRecord};
pub use match_timer::{format_mm_ss, MatchTimer};
pub use protocol::{EventMessage, SnapshotMessage};
pub use runtime::{spawn_driver, spawn_game_loop, DriverCommand, GameHandle};
