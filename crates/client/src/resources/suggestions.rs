//! Storage suggestion endpoints.

use reqwest::Method;
use serde::{Deserialize, Serialize};
use stowage_core::types::DbId;

use crate::api::{ApiError, WarehouseApi};

/// Body for `POST /warehouse-stock/apply-suggestion`. The suggestion
/// itself is echoed back exactly as the server proposed it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplySuggestionRequest {
    pub product_id: DbId,
    pub quantity: i64,
    #[serde(flatten)]
    pub suggestion: serde_json::Map<String, serde_json::Value>,
}

impl WarehouseApi {
    /// `GET /warehouse-stock/{productId}/suggest-storage?quantity=`
    pub async fn suggest_storage(
        &self,
        product_id: DbId,
        quantity: i64,
    ) -> Result<serde_json::Value, ApiError> {
        let response = self
            .request(
                Method::GET,
                &format!("/warehouse-stock/{product_id}/suggest-storage"),
            )
            .query(&[("quantity", quantity)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// `POST /warehouse-stock/apply-suggestion`
    pub async fn apply_suggestion(
        &self,
        request: &ApplySuggestionRequest,
    ) -> Result<serde_json::Value, ApiError> {
        self.send_json(Method::POST, "/warehouse-stock/apply-suggestion", request)
            .await
    }

    /// `GET /warehouse-stock/pending-suggestions`
    pub async fn pending_suggestions(&self) -> Result<serde_json::Value, ApiError> {
        self.get_json("/warehouse-stock/pending-suggestions").await
    }
}
