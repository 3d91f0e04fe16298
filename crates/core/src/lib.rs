//! Core game logic module - pure, deterministic, and testable
//!
//! All game rules and state live here. Nothing in this crate touches a
//! clock, a terminal or a socket: time enters only through the driver that
//! calls [`GameState::move_piece`], so the same seed and the same sequence
//! of operations always produce the same game.
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 playfield and line clearing
//! - [`pieces`]: the seven tetrominoes and clockwise rotation
//! - [`placement`]: collision, placement, wall kicks and drop probing
//! - [`scoring`]: line-clear points, levels and the auto-drop interval
//! - [`rng`]: uniform seeded piece selection
//! - [`game_state`]: the state machine tying the above together
//! - [`snapshot`]: read-only copies of the state for consumers
//!
//! # Example
//!
//! ```
//! use blocktris_core::GameState;
//! use blocktris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start_game();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod placement;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blocktris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::GameState;
pub use pieces::{tetromino, Shape, Tetromino};
pub use placement::{can_place, drop_position, place, rotate_with_kicks};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{drop_interval_ms, level_for_lines, line_clear_points};
pub use snapshot::GameSnapshot;
