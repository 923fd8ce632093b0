//! Generate-layout submission.
//!
//! Runs every local check before touching the network: the request is
//! assembled (and may fail on an empty item list or an unmeasured
//! product), then the latest capacity verdict is consulted, and only then
//! is the payload posted.

use stowage_core::error::CoreError;
use stowage_core::items::ItemRow;
use stowage_core::layout::{build_generate_request, GenerationOptions};
use stowage_core::locale::{MessageKey, Translator};
use stowage_core::stock::DimensionRecord;
use stowage_core::types::DbId;
use stowage_core::validation::{submit_allowed, ValidationResult};

use crate::api::{ApiError, WarehouseApi};
use crate::resources::layout::Layout;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error(transparent)]
    Local(#[from] CoreError),

    #[error("Submission blocked: the latest validation reports the items do not fit")]
    Blocked,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl GenerateError {
    pub fn user_message(&self, translator: &Translator) -> String {
        match self {
            GenerateError::Local(e) => translator.translate(e.message_key()).to_string(),
            GenerateError::Blocked => translator.translate(MessageKey::SubmitBlocked).to_string(),
            GenerateError::Api(e) => e.user_message(translator),
        }
    }
}

/// Build, gate and submit a generate-layout request for `room_id`.
pub async fn generate_layout(
    api: &WarehouseApi,
    room_id: DbId,
    rows: &[ItemRow],
    dimensions: &[DimensionRecord],
    options: &GenerationOptions,
    latest: Option<&ValidationResult>,
) -> Result<Layout, GenerateError> {
    let request = build_generate_request(rows, dimensions, options)?;

    if !submit_allowed(latest) {
        tracing::info!(room_id, "Layout generation blocked by failed validation");
        return Err(GenerateError::Blocked);
    }

    tracing::info!(
        room_id,
        algorithm = request.algorithm.as_str(),
        items = request.items.len(),
        "Submitting layout generation"
    );

    let layout = api.generate_layout(room_id, &request).await?;
    tracing::info!(room_id, placed = layout.placed_count(), "Layout generated");
    Ok(layout)
}
