//! Warehouse backend client.
//!
//! Provides the HTTP adapter and per-resource endpoint methods, the live
//! capacity preview session, and the multi-step flows built on them:
//! layout generation, door configuration and stock placement.

pub mod api;
pub mod config;
pub mod door;
pub mod generate;
pub mod preview;
pub mod resources;
pub mod stock;
