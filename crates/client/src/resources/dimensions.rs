//! Product dimension endpoints.

use reqwest::Method;
use serde::Serialize;
use stowage_core::error::CoreError;
use stowage_core::locale::Translator;
use stowage_core::stock::DimensionRecord;
use stowage_core::types::DbId;
use validator::Validate;

use crate::api::{ApiError, WarehouseApi};

/// Body for creating or replacing a product's dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct DimensionInput {
    #[validate(range(exclusive_min = 0.0))]
    pub width: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub depth: f64,
    #[validate(range(exclusive_min = 0.0))]
    pub height: f64,
    #[validate(range(min = 0.0))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl DimensionInput {
    /// Check sizes are positive and weight non-negative.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        Ok(())
    }
}

/// Failure writing dimensions: the input was rejected locally, or the
/// request failed.
#[derive(Debug, thiserror::Error)]
pub enum DimensionError {
    #[error(transparent)]
    Local(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl DimensionError {
    pub fn user_message(&self, translator: &Translator) -> String {
        match self {
            DimensionError::Local(e) => translator.translate(e.message_key()).to_string(),
            DimensionError::Api(e) => e.user_message(translator),
        }
    }
}

impl WarehouseApi {
    /// `GET /products/dimensions`: every measured product.
    pub async fn list_dimensions(&self) -> Result<Vec<DimensionRecord>, ApiError> {
        self.get_json("/products/dimensions").await
    }

    /// `GET /products/{id}/dimensions`
    pub async fn get_dimensions(&self, product_id: DbId) -> Result<DimensionRecord, ApiError> {
        self.get_json(&format!("/products/{product_id}/dimensions"))
            .await
    }

    /// `POST /products/{id}/dimensions`. The input is checked first.
    pub async fn create_dimensions(
        &self,
        product_id: DbId,
        input: &DimensionInput,
    ) -> Result<DimensionRecord, DimensionError> {
        self.write_dimensions(Method::POST, product_id, input).await
    }

    /// `PUT /products/{id}/dimensions`. The input is checked first.
    pub async fn update_dimensions(
        &self,
        product_id: DbId,
        input: &DimensionInput,
    ) -> Result<DimensionRecord, DimensionError> {
        self.write_dimensions(Method::PUT, product_id, input).await
    }

    async fn write_dimensions(
        &self,
        method: Method,
        product_id: DbId,
        input: &DimensionInput,
    ) -> Result<DimensionRecord, DimensionError> {
        input.check()?;
        let record = self
            .send_json(method, &format!("/products/{product_id}/dimensions"), input)
            .await?;
        Ok(record)
    }

    /// `DELETE /products/{id}/dimensions`
    pub async fn delete_dimensions(&self, product_id: DbId) -> Result<(), ApiError> {
        self.delete(&format!("/products/{product_id}/dimensions"))
            .await
    }
}
