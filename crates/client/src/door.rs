//! Door configuration flow.
//!
//! Saving waits for the backend to confirm the new placement and only then
//! runs the caller's refresh, passing it the door as persisted.

use std::future::Future;

use stowage_core::door::{Door, DoorForm};
use stowage_core::error::CoreError;
use stowage_core::locale::Translator;
use stowage_core::types::DbId;

use crate::api::{ApiError, WarehouseApi};
use crate::resources::rooms::Room;

#[derive(Debug, thiserror::Error)]
pub enum DoorError {
    #[error(transparent)]
    Local(#[from] CoreError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl DoorError {
    pub fn user_message(&self, translator: &Translator) -> String {
        match self {
            DoorError::Local(e) => translator.translate(e.message_key()).to_string(),
            DoorError::Api(e) => e.user_message(translator),
        }
    }
}

/// Door for `room_id`, taken from `room` when it already carries one and
/// fetched otherwise.
pub async fn load_door(
    api: &WarehouseApi,
    room_id: DbId,
    room: Option<&Room>,
) -> Result<Door, ApiError> {
    if let Some(door) = room.and_then(|r| r.door.as_ref()).filter(|d| !d.is_empty()) {
        return Ok(door.clone());
    }
    api.get_door(room_id).await
}

/// Validate the form, persist it, then call `on_saved` with the confirmed
/// door. `on_saved` does not run if either step fails.
pub async fn save_door<F, Fut>(
    api: &WarehouseApi,
    room_id: DbId,
    form: &DoorForm,
    on_saved: F,
) -> Result<Door, DoorError>
where
    F: FnOnce(Door) -> Fut,
    Fut: Future<Output = ()>,
{
    let door = form.to_door()?;
    let saved = api.update_door(room_id, &door).await?;
    tracing::info!(room_id, wall = ?saved.wall, "Door saved");
    on_saved(saved.clone()).await;
    Ok(saved)
}
