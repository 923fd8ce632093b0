//! Warehouse stock expansion (the item aggregator).
//!
//! Turns a read-only stock snapshot plus product dimensions into layout
//! items, bounded by optional per-product and global caps, and reports a
//! preview of what was included, capped and excluded.

use std::collections::HashSet;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::CoreError;
use crate::items::LayoutItem;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Snapshot records
// ---------------------------------------------------------------------------

/// Current stock for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    #[serde(default)]
    pub product_id: Option<DbId>,
    #[serde(default)]
    pub quantity: i64,
}

/// Physical size of one unit of a product. A product without a record
/// cannot be placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    pub product_id: DbId,
    pub width: f64,
    pub depth: f64,
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl DimensionRecord {
    pub fn volume(&self) -> f64 {
        self.width * self.depth * self.height
    }
}

// ---------------------------------------------------------------------------
// Caps and policy
// ---------------------------------------------------------------------------

/// Expansion limits. `None` means unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitCaps {
    pub per_product_cap: Option<u32>,
    pub max_total_items: Option<u32>,
}

/// Effective cap as reported in a preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapLimit {
    Limited(u32),
    Unlimited,
}

impl From<Option<u32>> for CapLimit {
    fn from(cap: Option<u32>) -> Self {
        cap.map_or(CapLimit::Unlimited, CapLimit::Limited)
    }
}

impl Serialize for CapLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CapLimit::Limited(n) => serializer.serialize_u32(*n),
            CapLimit::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

/// What happens to stock records still unprocessed once the global budget
/// (`max_total_items`) is used up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExhaustionPolicy {
    /// Stop scanning; remaining records are not considered at all.
    #[default]
    Stop,
    /// Keep scanning and list remaining eligible records under
    /// `budget_exhausted`.
    RecordSkipped,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// A product whose stock quantity was reduced by a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CappedItem {
    pub product_id: DbId,
    pub requested: i64,
    pub used: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionBuckets {
    pub zero_stock: Vec<DbId>,
    pub missing_dimensions: Vec<DbId>,
    pub capped: Vec<CappedItem>,
    /// Only populated under [`ExhaustionPolicy::RecordSkipped`].
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub budget_exhausted: Vec<DbId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewSummary {
    pub included_products: usize,
    pub expanded_total: i64,
    pub per_product_cap: CapLimit,
    pub max_total_items: CapLimit,
    pub excluded: ExclusionBuckets,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockExpansion {
    pub included: Vec<LayoutItem>,
    pub preview: PreviewSummary,
}

// ---------------------------------------------------------------------------
// Expansion
// ---------------------------------------------------------------------------

/// Expand stock records into layout items.
///
/// Guarantees `sum(included.quantity) == preview.expanded_total`, the total
/// never exceeds `max_total_items`, and no item exceeds `per_product_cap`.
pub fn expand_stock(
    stock: &[StockRecord],
    dimensions: &[DimensionRecord],
    caps: InitCaps,
    policy: ExhaustionPolicy,
) -> StockExpansion {
    let measured: HashSet<DbId> = dimensions.iter().map(|d| d.product_id).collect();

    let mut included = Vec::new();
    let mut excluded = ExclusionBuckets::default();
    let mut expanded_total: i64 = 0;
    let budget = caps.max_total_items.map(i64::from).unwrap_or(i64::MAX);

    for record in stock {
        let Some(product_id) = record.product_id else {
            continue;
        };

        if record.quantity <= 0 {
            excluded.zero_stock.push(product_id);
            continue;
        }
        if !measured.contains(&product_id) {
            excluded.missing_dimensions.push(product_id);
            continue;
        }

        let mut quantity = record.quantity;
        let mut capped = false;

        if let Some(cap) = caps.per_product_cap {
            let cap = i64::from(cap);
            if quantity > cap {
                quantity = cap;
                capped = true;
            }
        }

        // Without a configured budget the total is still bounded by i64.
        let remaining = budget - expanded_total;
        if remaining <= 0 {
            match policy {
                ExhaustionPolicy::Stop => break,
                ExhaustionPolicy::RecordSkipped => {
                    excluded.budget_exhausted.push(product_id);
                    continue;
                }
            }
        }
        if quantity > remaining {
            quantity = remaining;
            capped = true;
        }

        if capped {
            excluded.capped.push(CappedItem {
                product_id,
                requested: record.quantity,
                used: quantity,
            });
        }

        if quantity <= 0 {
            continue;
        }

        included.push(LayoutItem {
            product_id,
            quantity,
        });
        expanded_total += quantity;
    }

    tracing::debug!(
        included = included.len(),
        expanded_total,
        zero_stock = excluded.zero_stock.len(),
        missing_dimensions = excluded.missing_dimensions.len(),
        capped = excluded.capped.len(),
        "Expanded warehouse stock",
    );

    StockExpansion {
        preview: PreviewSummary {
            included_products: included.len(),
            expanded_total,
            per_product_cap: caps.per_product_cap.into(),
            max_total_items: caps.max_total_items.into(),
            excluded,
        },
        included,
    }
}

/// Fail with [`CoreError::MissingDimensions`] for the first product that
/// has no dimension record.
pub fn require_dimensions<I>(
    product_ids: I,
    dimensions: &[DimensionRecord],
) -> Result<(), CoreError>
where
    I: IntoIterator<Item = DbId>,
{
    let measured: HashSet<DbId> = dimensions.iter().map(|d| d.product_id).collect();
    match product_ids.into_iter().find(|id| !measured.contains(id)) {
        Some(product_id) => Err(CoreError::MissingDimensions { product_id }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Auto-population
// ---------------------------------------------------------------------------

/// One-shot gate for populating the item list from stock.
///
/// Fires once, the first time products, dimensions and stock are all
/// loaded and non-empty. Any user edit before that disarms it.
#[derive(Debug, Clone)]
pub struct AutoPopulate {
    armed: bool,
    caps: InitCaps,
    policy: ExhaustionPolicy,
}

impl AutoPopulate {
    pub fn new(caps: InitCaps, policy: ExhaustionPolicy) -> Self {
        Self {
            armed: true,
            caps,
            policy,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Prevent any further auto-population.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Run the expansion if the gate is armed and every input is loaded.
    ///
    /// Returns the expansion only when it included at least one item. The
    /// gate disarms after the first run whether or not it applied.
    pub fn run(
        &mut self,
        product_count: usize,
        stock: &[StockRecord],
        dimensions: &[DimensionRecord],
    ) -> Option<StockExpansion> {
        if !self.armed || product_count == 0 || stock.is_empty() || dimensions.is_empty() {
            return None;
        }
        self.armed = false;

        let expansion = expand_stock(stock, dimensions, self.caps, self.policy);
        if expansion.included.is_empty() {
            tracing::info!("Stock auto-population found nothing placeable");
            return None;
        }
        Some(expansion)
    }
}

impl Default for AutoPopulate {
    fn default() -> Self {
        Self::new(InitCaps::default(), ExhaustionPolicy::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
