//! Live capacity preview for the item list being edited.
//!
//! [`PreviewSession`] re-validates the current rows against a room every
//! time the caller reports a change. Requests may overlap; each carries a
//! ticket from a [`RequestSequence`] and only the most recently issued
//! ticket may publish. Observers read the current verdict through a
//! [`tokio::sync::watch`] channel.

use std::sync::Arc;

use async_trait::async_trait;
use stowage_core::items::ItemRow;
use stowage_core::stock::DimensionRecord;
use stowage_core::types::DbId;
use stowage_core::validation::{
    annotate_rows, submit_allowed, RequestSequence, Ticket, ValidateLayoutRequest,
    ValidationResult,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{ApiError, WarehouseApi};

/// Anything that can answer a validate-layout request.
#[async_trait]
pub trait LayoutValidator: Send + Sync {
    async fn validate(
        &self,
        room_id: DbId,
        request: &ValidateLayoutRequest,
    ) -> Result<ValidationResult, ApiError>;
}

#[async_trait]
impl LayoutValidator for WarehouseApi {
    async fn validate(
        &self,
        room_id: DbId,
        request: &ValidateLayoutRequest,
    ) -> Result<ValidationResult, ApiError> {
        self.validate_layout(room_id, request).await
    }
}

/// What happened to one re-validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// The response replaced the shown result.
    Applied,
    /// The request failed and the shown result was cleared.
    Cleared,
    /// A newer request was issued meanwhile; the response was dropped.
    Superseded,
}

pub struct PreviewSession {
    validator: Arc<dyn LayoutValidator>,
    sequence: RequestSequence,
    latest: watch::Sender<Option<ValidationResult>>,
}

impl PreviewSession {
    pub fn new(validator: Arc<dyn LayoutValidator>) -> Self {
        let (latest, _) = watch::channel(None);
        Self {
            validator,
            sequence: RequestSequence::new(),
            latest,
        }
    }

    /// Watch the shown result.
    pub fn subscribe(&self) -> watch::Receiver<Option<ValidationResult>> {
        self.latest.subscribe()
    }

    /// Snapshot of the shown result.
    pub fn latest(&self) -> Option<ValidationResult> {
        self.latest.borrow().clone()
    }

    /// Whether the generate action is currently enabled.
    pub fn submit_allowed(&self) -> bool {
        submit_allowed(self.latest.borrow().as_ref())
    }

    /// Drop the shown result and supersede anything in flight, e.g. when
    /// the room selection is cleared.
    pub fn clear(&self) {
        let ticket = self.sequence.issue();
        self.publish(ticket, None);
    }

    /// Validate `rows` against `room_id` and wait for the outcome.
    pub async fn revalidate(
        &self,
        room_id: DbId,
        rows: &[ItemRow],
        dimensions: &[DimensionRecord],
    ) -> PreviewOutcome {
        let ticket = self.sequence.issue();
        let request = annotate_rows(rows, dimensions);
        self.run(ticket, room_id, request).await
    }

    /// Start a re-validation in the background.
    ///
    /// The ticket is taken before this returns, so calls order by
    /// invocation even when their responses do not.
    pub fn spawn_revalidate(
        self: &Arc<Self>,
        room_id: DbId,
        rows: &[ItemRow],
        dimensions: &[DimensionRecord],
    ) -> JoinHandle<PreviewOutcome> {
        let ticket = self.sequence.issue();
        let request = annotate_rows(rows, dimensions);
        let session = Arc::clone(self);
        tokio::spawn(async move { session.run(ticket, room_id, request).await })
    }

    async fn run(
        &self,
        ticket: Ticket,
        room_id: DbId,
        request: ValidateLayoutRequest,
    ) -> PreviewOutcome {
        tracing::debug!(
            room_id,
            ticket = ticket.value(),
            rows = request.items.len(),
            "Validating layout"
        );

        match self.validator.validate(room_id, &request).await {
            Ok(result) => {
                let valid = result.valid;
                if self.publish(ticket, Some(result)) {
                    tracing::debug!(room_id, ticket = ticket.value(), valid, "Validation applied");
                    PreviewOutcome::Applied
                } else {
                    tracing::debug!(room_id, ticket = ticket.value(), "Stale validation dropped");
                    PreviewOutcome::Superseded
                }
            }
            Err(e) => {
                tracing::error!(room_id, ticket = ticket.value(), error = %e, "Layout validation failed");
                if self.publish(ticket, None) {
                    PreviewOutcome::Cleared
                } else {
                    PreviewOutcome::Superseded
                }
            }
        }
    }

    /// Store `value` if `ticket` is still the newest. The check runs under
    /// the channel's write lock so two completions cannot interleave.
    fn publish(&self, ticket: Ticket, value: Option<ValidationResult>) -> bool {
        self.latest.send_if_modified(|slot| {
            if !self.sequence.is_current(ticket) {
                return false;
            }
            *slot = value;
            true
        })
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::Notify;

    use super::*;

    /// Valid when the total requested quantity is below five. Requests
    /// whose total equals `hold_total` wait until `release` is notified.
    struct GatedValidator {
        hold_total: Option<i64>,
        release: Notify,
        fail: bool,
    }

    impl GatedValidator {
        fn new(hold_total: Option<i64>, fail: bool) -> Self {
            Self {
                hold_total,
                release: Notify::new(),
                fail,
            }
        }
    }

    #[async_trait]
    impl LayoutValidator for GatedValidator {
        async fn validate(
            &self,
            _room_id: DbId,
            request: &ValidateLayoutRequest,
        ) -> Result<ValidationResult, ApiError> {
            let total: i64 = request.items.iter().map(|i| i.quantity).sum();
            if self.hold_total == Some(total) {
                self.release.notified().await;
            }
            if self.fail {
                return Err(ApiError::Api {
                    status: 500,
                    body: "{}".into(),
                    message: None,
                });
            }
            Ok(ValidationResult {
                valid: total < 5,
                ..Default::default()
            })
        }
    }

    #[tokio::test]
    async fn stale_response_does_not_overwrite_newer_one() {
        let validator = Arc::new(GatedValidator::new(Some(10), false));
        let session = Arc::new(PreviewSession::new(validator.clone()));

        let slow = session.spawn_revalidate(1, &[ItemRow::new(1, 10)], &[]);
        let fast = session.revalidate(1, &[ItemRow::new(1, 1)], &[]).await;
        assert_eq!(fast, PreviewOutcome::Applied);
        assert!(session.latest().unwrap().valid);

        validator.release.notify_one();
        assert_eq!(slow.await.unwrap(), PreviewOutcome::Superseded);
        assert!(session.latest().unwrap().valid);
        assert!(session.submit_allowed());
    }

    #[tokio::test]
    async fn invalid_result_blocks_submit() {
        let session = PreviewSession::new(Arc::new(GatedValidator::new(None, false)));

        assert!(session.submit_allowed());
        let outcome = session.revalidate(1, &[ItemRow::new(1, 3), ItemRow::new(1, 3)], &[]).await;
        assert_eq!(outcome, PreviewOutcome::Applied);
        assert!(!session.submit_allowed());
    }

    #[tokio::test]
    async fn failed_fetch_clears_result() {
        let session = PreviewSession::new(Arc::new(GatedValidator::new(None, false)));
        session.revalidate(1, &[ItemRow::new(1, 9)], &[]).await;
        assert!(session.latest().is_some());

        let session = PreviewSession {
            validator: Arc::new(GatedValidator::new(None, true)),
            ..session
        };
        let outcome = session.revalidate(1, &[ItemRow::new(1, 1)], &[]).await;
        assert_eq!(outcome, PreviewOutcome::Cleared);
        assert!(session.latest().is_none());
        assert!(session.submit_allowed());
    }

    #[tokio::test]
    async fn clear_supersedes_in_flight_request() {
        let validator = Arc::new(GatedValidator::new(Some(1), false));
        let session = Arc::new(PreviewSession::new(validator.clone()));
        let mut rx = session.subscribe();

        let pending = session.spawn_revalidate(1, &[ItemRow::new(1, 1)], &[]);
        session.clear();
        validator.release.notify_one();

        assert_eq!(pending.await.unwrap(), PreviewOutcome::Superseded);
        assert!(rx.borrow_and_update().is_none());
    }
}
