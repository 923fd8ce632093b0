//! `/rooms/{id}/visualization` endpoints.

use stowage_core::types::DbId;

use crate::api::{ApiError, WarehouseApi};

/// Which rendering of the room to fetch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisualizationView {
    #[default]
    Overview,
    Grid,
    ThreeD,
}

impl VisualizationView {
    fn path_suffix(self) -> &'static str {
        match self {
            Self::Overview => "",
            Self::Grid => "/grid",
            Self::ThreeD => "/3d",
        }
    }
}

impl WarehouseApi {
    /// `GET /rooms/{id}/visualization[/grid|/3d]`. Rendering data is
    /// passed through untouched.
    pub async fn visualization(
        &self,
        room_id: DbId,
        view: VisualizationView,
    ) -> Result<serde_json::Value, ApiError> {
        self.get_json(&format!(
            "/rooms/{room_id}/visualization{}",
            view.path_suffix()
        ))
        .await
    }
}
