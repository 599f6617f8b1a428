//! Tetrion (workspace facade crate).
//!
//! Re-exports the member crates under short names and hosts the headless
//! simulation used by the `tetrion` binary.

pub use tetrion_core as core;
pub use tetrion_engine as engine;
pub use tetrion_input as input;
pub use tetrion_types as types;

pub mod sim;
