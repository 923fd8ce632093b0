//! Layout generation, retrieval and validation endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use stowage_core::layout::{GenerateLayoutRequest, LayoutOptions};
use stowage_core::types::{DbId, Timestamp};
use stowage_core::validation::{ValidateLayoutRequest, ValidationResult};

use crate::api::{ApiError, WarehouseApi};
use crate::resources::placements::Placement;

/// A computed room layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub id: Option<DbId>,
    #[serde(default)]
    pub room_id: Option<DbId>,
    #[serde(default)]
    pub algorithm: Option<String>,
    #[serde(default)]
    pub placements: Vec<Placement>,
    #[serde(default)]
    pub unplaced: Vec<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Layout {
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }
}

impl WarehouseApi {
    /// `POST /rooms/{id}/generate-layout`
    pub async fn generate_layout(
        &self,
        room_id: DbId,
        request: &GenerateLayoutRequest,
    ) -> Result<Layout, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/rooms/{room_id}/generate-layout"),
            request,
        )
        .await
    }

    /// `GET /rooms/{id}/layout`
    pub async fn get_layout(&self, room_id: DbId) -> Result<Layout, ApiError> {
        self.get_json(&format!("/rooms/{room_id}/layout")).await
    }

    /// `PUT /rooms/{id}/layout`
    pub async fn update_layout(
        &self,
        room_id: DbId,
        layout: &serde_json::Value,
    ) -> Result<Layout, ApiError> {
        self.send_json(Method::PUT, &format!("/rooms/{room_id}/layout"), layout)
            .await
    }

    /// `DELETE /rooms/{id}/layout`
    pub async fn delete_layout(&self, room_id: DbId) -> Result<(), ApiError> {
        self.delete(&format!("/rooms/{room_id}/layout")).await
    }

    /// `POST /rooms/{id}/layout/optimize`
    pub async fn optimize_layout(
        &self,
        room_id: DbId,
        options: &LayoutOptions,
    ) -> Result<Layout, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/rooms/{room_id}/layout/optimize"),
            options,
        )
        .await
    }

    /// `POST /rooms/{id}/layout/refresh`
    pub async fn refresh_layout(&self, room_id: DbId) -> Result<Layout, ApiError> {
        self.post_empty(&format!("/rooms/{room_id}/layout/refresh"))
            .await
    }

    /// `POST /rooms/{id}/validate-layout`
    pub async fn validate_layout(
        &self,
        room_id: DbId,
        request: &ValidateLayoutRequest,
    ) -> Result<ValidationResult, ApiError> {
        self.send_json(
            Method::POST,
            &format!("/rooms/{room_id}/validate-layout"),
            request,
        )
        .await
    }
}
