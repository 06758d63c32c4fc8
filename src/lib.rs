//! Azul in the terminal
//!
//! Re-exports the rules engine, plus the console rendering and input parsing
//! the binary is built from.

pub use azul_engine::*;

pub mod display;
pub mod prompt;
