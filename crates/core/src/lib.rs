//! Domain logic for the warehouse layout client.
//!
//! Everything here is pure computation over data the caller supplies:
//! stock expansion, item-list editing, generate-layout request assembly,
//! validation result handling, door forms and locale lookup. Network
//! access lives in `stowage-client`.

pub mod door;
pub mod error;
pub mod items;
pub mod layout;
pub mod locale;
pub mod stock;
pub mod types;
pub mod validation;
