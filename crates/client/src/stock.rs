//! Add stock, then optionally place it in a room.
//!
//! The two requests are independent: a failed placement is reported next
//! to the successful stock update and never undoes it.

use stowage_core::error::CoreError;
use stowage_core::locale::{MessageKey, Translator};
use stowage_core::types::DbId;

use crate::api::{ApiError, WarehouseApi};
use crate::resources::stock::{PlaceStockRequest, PlaceStockResult};

#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error(transparent)]
    Local(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl StockError {
    pub fn user_message(&self, translator: &Translator) -> String {
        match self {
            StockError::Local(e) => translator.translate(e.message_key()).to_string(),
            StockError::Api(e) => e.user_message(translator),
        }
    }
}

/// Result of a stock update with optional room placement.
#[derive(Debug)]
pub struct StockOutcome {
    /// Backend response to the stock update.
    pub stock: serde_json::Value,
    /// Placement result; `None` when no room was requested.
    pub placement: Option<Result<PlaceStockResult, ApiError>>,
}

impl StockOutcome {
    /// Messages to show, one per completed step.
    pub fn messages(&self, translator: &Translator) -> Vec<String> {
        let mut messages = vec![translator.translate(MessageKey::StockUpdated).to_string()];
        match &self.placement {
            Some(Ok(_)) => messages.push(translator.translate(MessageKey::StockPlaced).to_string()),
            Some(Err(e)) => {
                let detail = e
                    .server_message()
                    .map(str::to_string)
                    .unwrap_or_else(|| translator.translate(MessageKey::PlacementFailed).to_string());
                messages.push(detail);
            }
            None => {}
        }
        messages
    }
}

/// Update stock for a product and, when `room_id` is given, place the
/// same quantity in that room.
pub async fn add_stock(
    api: &WarehouseApi,
    product_id: Option<DbId>,
    quantity: i64,
    room_id: Option<DbId>,
) -> Result<StockOutcome, StockError> {
    let product_id = product_id.ok_or(CoreError::MissingProduct)?;
    if quantity <= 0 {
        return Err(CoreError::NonPositiveQuantity(quantity).into());
    }

    let stock = api.update_stock(product_id, quantity).await?;
    tracing::info!(product_id, quantity, "Stock updated");

    let placement = match room_id {
        Some(room_id) => {
            let result = api
                .place_stock(&PlaceStockRequest {
                    room_id,
                    product_id,
                    quantity,
                })
                .await;
            match &result {
                Ok(placed) => tracing::info!(
                    room_id,
                    product_id,
                    placed = placed.placed,
                    unplaced = placed.unplaced,
                    "Stock placed"
                ),
                Err(e) => tracing::error!(room_id, product_id, error = %e, "Stock placement failed"),
            }
            Some(result)
        }
        None => None,
    };

    Ok(StockOutcome { stock, placement })
}
