//! Warehouse stock endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use stowage_core::types::DbId;

use crate::api::{ApiError, WarehouseApi};

/// Body for `POST /warehouse-stock/place`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlaceStockRequest {
    pub room_id: DbId,
    pub product_id: DbId,
    pub quantity: i64,
}

/// How much of the placed quantity found a spot in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceStockResult {
    #[serde(default)]
    pub placed: i64,
    #[serde(default)]
    pub unplaced: i64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl WarehouseApi {
    /// `POST /warehouse-stock/update` as a multipart form with
    /// `product_id` and `quantity` fields.
    pub async fn update_stock(
        &self,
        product_id: DbId,
        quantity: i64,
    ) -> Result<serde_json::Value, ApiError> {
        let form = reqwest::multipart::Form::new()
            .text("product_id", product_id.to_string())
            .text("quantity", quantity.to_string());

        let response = self
            .request(Method::POST, "/warehouse-stock/update")
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /warehouse-stock/place`
    pub async fn place_stock(
        &self,
        request: &PlaceStockRequest,
    ) -> Result<PlaceStockResult, ApiError> {
        self.send_json(Method::POST, "/warehouse-stock/place", request)
            .await
    }
}
