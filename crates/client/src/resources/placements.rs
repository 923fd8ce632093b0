//! Placement endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use stowage_core::types::DbId;

use crate::api::{ApiError, WarehouseApi};

/// One product instance positioned in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default)]
    pub id: Option<DbId>,
    pub product_id: DbId,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
    #[serde(default)]
    pub rotated: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Body for creating or moving a placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacementInput {
    pub product_id: DbId,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl WarehouseApi {
    /// `GET /rooms/{id}/placements`
    pub async fn list_placements(&self, room_id: DbId) -> Result<Vec<Placement>, ApiError> {
        self.get_json(&format!("/rooms/{room_id}/placements")).await
    }

    /// `POST /rooms/{id}/placements`
    pub async fn create_placement(
        &self,
        room_id: DbId,
        input: &PlacementInput,
    ) -> Result<Placement, ApiError> {
        self.send_json(Method::POST, &format!("/rooms/{room_id}/placements"), input)
            .await
    }

    /// `PUT /placements/{id}`
    pub async fn update_placement(
        &self,
        placement_id: DbId,
        input: &PlacementInput,
    ) -> Result<Placement, ApiError> {
        self.send_json(Method::PUT, &format!("/placements/{placement_id}"), input)
            .await
    }

    /// `DELETE /placements/{id}`
    pub async fn delete_placement(&self, placement_id: DbId) -> Result<(), ApiError> {
        self.delete(&format!("/placements/{placement_id}")).await
    }
}
