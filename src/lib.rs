//! Blocktris (workspace facade crate).
//!
//! Re-exports the member crates under one name,
//! `blocktris::{types, core, input, driver}`, and hosts the terminal
//! front end used by the `blocktris` binary.

pub mod term;

pub use blocktris_core as core;
pub use blocktris_driver as driver;
pub use blocktris_input as input;
pub use blocktris_types as types;
