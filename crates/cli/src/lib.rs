//! `stowage-cli` library crate.
//!
//! Re-exports the argument parser and command runner for testing. The
//! binary entrypoint lives in `main.rs`.

pub mod args;
pub mod commands;
