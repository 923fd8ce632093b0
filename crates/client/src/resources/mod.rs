//! One async method per backend endpoint, grouped by resource.
//!
//! Each submodule adds an `impl WarehouseApi` block plus the wire types it
//! needs. No business logic lives here.

pub mod dimensions;
pub mod door;
pub mod layout;
pub mod placements;
pub mod rooms;
pub mod stock;
pub mod suggestions;
pub mod visualization;
