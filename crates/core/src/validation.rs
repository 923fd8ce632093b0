//! Capacity validation types and request fencing.
//!
//! The backend owns the capacity computation. This module defines the
//! request shape (raw rows annotated with dimensions), the read-only
//! result, the submit gate, and the sequence fence that keeps a slow,
//! superseded validation response from replacing a newer one.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::items::ItemRow;
use crate::stock::DimensionRecord;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// One row as sent to `POST /rooms/{id}/validate-layout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationItem {
    pub product_id: DbId,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidateLayoutRequest {
    pub items: Vec<ValidationItem>,
}

/// Annotate rows with product dimensions, one entry per row.
///
/// Rows are not merged: the server sees exactly what the user typed. Rows
/// with no product selected are left out since they cannot be measured.
pub fn annotate_rows(rows: &[ItemRow], dimensions: &[DimensionRecord]) -> ValidateLayoutRequest {
    let by_product: HashMap<DbId, &DimensionRecord> =
        dimensions.iter().map(|d| (d.product_id, d)).collect();

    let items = rows
        .iter()
        .filter_map(|row| {
            let product_id = row.product_id?;
            let dims = by_product.get(&product_id);
            Some(ValidationItem {
                product_id,
                quantity: row.quantity,
                width: dims.map(|d| d.width),
                depth: dims.map(|d| d.depth),
                height: dims.map(|d| d.height),
                weight: dims.and_then(|d| d.weight),
            })
        })
        .collect();

    ValidateLayoutRequest { items }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapacityEstimate {
    #[serde(default)]
    pub estimated_utilization: f64,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub room_volume: f64,
    #[serde(default)]
    pub total_volume: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoomValidation {
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub capacity: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockValidation {
    #[serde(default)]
    pub errors: Vec<String>,
}

/// Per-product fit advice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSuggestion {
    pub suggested_quantity: i64,
    #[serde(default)]
    pub limited_by: Option<String>,
}

/// Server verdict for an item list in a room. Replaced wholesale on every
/// re-validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    #[serde(default)]
    pub valid: bool,
    #[serde(default)]
    pub capacity: CapacityEstimate,
    #[serde(default)]
    pub room_validation: RoomValidation,
    #[serde(default)]
    pub stock_validation: StockValidation,
    #[serde(default)]
    pub suggestions: BTreeMap<DbId, ProductSuggestion>,
}

impl ValidationResult {
    /// All error strings, room errors first.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.room_validation
            .errors
            .iter()
            .chain(self.stock_validation.errors.iter())
            .map(String::as_str)
    }

    pub fn warnings(&self) -> &[String] {
        &self.room_validation.warnings
    }
}

/// Whether the generate action may be submitted.
///
/// Blocked only by a known-invalid result; no result yet means allowed.
pub fn submit_allowed(latest: Option<&ValidationResult>) -> bool {
    latest.map_or(true, |result| result.valid)
}

// ---------------------------------------------------------------------------
// Fencing
// ---------------------------------------------------------------------------

/// Identifies one issued validation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Monotonic sequence of validation requests. Only the most recently
/// issued ticket may publish its result.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, superseding all earlier ones.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn annotate_keeps_duplicate_rows_and_attaches_dimensions() {
        let dims = [DimensionRecord {
            product_id: 1,
            width: 2.0,
            depth: 3.0,
            height: 4.0,
            weight: Some(10.0),
        }];
        let rows = [
            ItemRow::new(1, 2),
            ItemRow::new(1, 3),
            ItemRow::new(2, 1),
            ItemRow::default(),
        ];

        let request = annotate_rows(&rows, &dims);
        assert_eq!(request.items.len(), 3);
        assert_eq!(request.items[0].width, Some(2.0));
        assert_eq!(request.items[1].quantity, 3);
        assert_eq!(request.items[2].width, None);

        let json = serde_json::to_value(&request).unwrap();
        assert!(json["items"][2].get("width").is_none());
    }

    #[test]
    fn partial_result_payload_decodes_with_defaults() {
        let result: ValidationResult = serde_json::from_value(json!({
            "valid": false,
            "capacity": {"estimated_utilization": 1.4, "strategy": "volume"},
            "room_validation": {"errors": ["Too many items"]},
            "suggestions": {"12": {"suggested_quantity": 8, "limited_by": "height"}}
        }))
        .unwrap();

        assert!(!result.valid);
        assert_eq!(result.capacity.strategy, "volume");
        assert_eq!(result.capacity.room_volume, 0.0);
        assert_eq!(result.errors().collect::<Vec<_>>(), vec!["Too many items"]);
        assert_eq!(result.suggestions[&12].suggested_quantity, 8);
        assert_eq!(result.suggestions[&12].limited_by.as_deref(), Some("height"));
    }

    #[test]
    fn submit_gate_blocks_only_invalid_results() {
        assert!(submit_allowed(None));

        let valid = ValidationResult {
            valid: true,
            ..Default::default()
        };
        assert!(submit_allowed(Some(&valid)));

        let invalid = ValidationResult::default();
        assert!(!submit_allowed(Some(&invalid)));
    }

    #[test]
    fn only_latest_ticket_is_current() {
        let seq = RequestSequence::new();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
        assert!(second > first);
    }
}
