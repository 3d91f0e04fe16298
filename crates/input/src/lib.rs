//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`] and provides
//! the time-based guard that drops key bursts while one key is being handled.
//! Nothing here knows about the game state itself.

pub mod guard;
pub mod map;

pub use blocktris_types as types;

pub use guard::InputGuard;
pub use map::{handle_key_event, should_quit};
