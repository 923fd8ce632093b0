//! `/rooms/{id}/door` endpoints.

use reqwest::Method;
use stowage_core::door::Door;
use stowage_core::types::DbId;

use crate::api::{ApiError, WarehouseApi};

impl WarehouseApi {
    /// `GET /rooms/{id}/door`
    pub async fn get_door(&self, room_id: DbId) -> Result<Door, ApiError> {
        self.get_json(&format!("/rooms/{room_id}/door")).await
    }

    /// `PUT /rooms/{id}/door`. Unset fields go out as `null`. Returns the
    /// door as persisted by the server.
    pub async fn update_door(&self, room_id: DbId, door: &Door) -> Result<Door, ApiError> {
        self.send_json(Method::PUT, &format!("/rooms/{room_id}/door"), door)
            .await
    }
}
