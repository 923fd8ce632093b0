//! `/rooms` endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use stowage_core::door::Door;
use stowage_core::stock::StockRecord;
use stowage_core::types::DbId;

use crate::api::{ApiError, WarehouseApi};

/// A storage room as returned by the backend.
///
/// Fields the client does not interpret are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: DbId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door: Option<Door>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Room {
    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }
}

/// Body for creating or updating a room.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomInput {
    pub name: String,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl WarehouseApi {
    /// `GET /rooms`
    pub async fn list_rooms(&self) -> Result<Vec<Room>, ApiError> {
        self.get_json("/rooms").await
    }

    /// `GET /rooms/{id}`
    pub async fn get_room(&self, room_id: DbId) -> Result<Room, ApiError> {
        self.get_json(&format!("/rooms/{room_id}")).await
    }

    /// `POST /rooms`
    pub async fn create_room(&self, input: &RoomInput) -> Result<Room, ApiError> {
        self.send_json(Method::POST, "/rooms", input).await
    }

    /// `PUT /rooms/{id}`
    pub async fn update_room(&self, room_id: DbId, input: &RoomInput) -> Result<Room, ApiError> {
        self.send_json(Method::PUT, &format!("/rooms/{room_id}"), input)
            .await
    }

    /// `DELETE /rooms/{id}`
    pub async fn delete_room(&self, room_id: DbId) -> Result<(), ApiError> {
        self.delete(&format!("/rooms/{room_id}")).await
    }

    /// `GET /rooms/{id}/stats`. The shape is display-only.
    pub async fn room_stats(&self, room_id: DbId) -> Result<serde_json::Value, ApiError> {
        self.get_json(&format!("/rooms/{room_id}/stats")).await
    }

    /// `GET /rooms/{id}/stock`: the stock snapshot used for auto-population.
    pub async fn room_stock(&self, room_id: DbId) -> Result<Vec<StockRecord>, ApiError> {
        self.get_json(&format!("/rooms/{room_id}/stock")).await
    }
}
