//! Layout item rows: the editable list a user builds before generating a
//! layout, and the merged, de-duplicated form the backend accepts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

/// One product/quantity pair in a generation request.
///
/// Within a request `product_id` values are unique and both fields are
/// positive; [`merge_rows`] is the only way the builder produces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutItem {
    pub product_id: DbId,
    pub quantity: i64,
}

/// A raw, user-editable row. May be incomplete (no product picked yet) or
/// carry a non-positive quantity while the user is typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ItemRow {
    pub product_id: Option<DbId>,
    pub quantity: i64,
}

impl ItemRow {
    pub fn new(product_id: DbId, quantity: i64) -> Self {
        Self {
            product_id: Some(product_id),
            quantity,
        }
    }
}

impl From<LayoutItem> for ItemRow {
    fn from(item: LayoutItem) -> Self {
        Self::new(item.product_id, item.quantity)
    }
}

/// Merge rows by product id, summing quantities.
///
/// First-seen order is kept. Rows without a product, with a non-positive
/// product id, or whose merged quantity is not positive are dropped. Fails
/// when a product's summed quantity does not fit in an `i64`.
pub fn merge_rows(rows: &[ItemRow]) -> Result<Vec<LayoutItem>, CoreError> {
    let mut merged: Vec<LayoutItem> = Vec::new();
    let mut index: HashMap<DbId, usize> = HashMap::new();

    for row in rows {
        let Some(product_id) = row.product_id else {
            continue;
        };
        if product_id <= 0 {
            continue;
        }
        match index.get(&product_id) {
            Some(&i) => {
                let item = &mut merged[i];
                item.quantity = item
                    .quantity
                    .checked_add(row.quantity)
                    .ok_or_else(|| quantity_overflow(product_id))?;
            }
            None => {
                index.insert(product_id, merged.len());
                merged.push(LayoutItem {
                    product_id,
                    quantity: row.quantity,
                });
            }
        }
    }

    merged.retain(|item| item.quantity > 0);
    Ok(merged)
}

fn quantity_overflow(product_id: DbId) -> CoreError {
    CoreError::Validation(format!("Quantity for product {product_id} is too large"))
}

/// Mutable item list backing the generation form.
///
/// Every mutation bumps [`revision`](Self::revision).
#[derive(Debug, Clone, Default)]
pub struct ItemList {
    rows: Vec<ItemRow>,
    revision: u64,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<ItemRow>) -> Self {
        Self { rows, revision: 0 }
    }

    pub fn rows(&self) -> &[ItemRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Monotonic change counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn add_row(&mut self, row: ItemRow) {
        self.rows.push(row);
        self.touch();
    }

    /// Replace the row at `index`.
    pub fn update_row(&mut self, index: usize, row: ItemRow) -> Result<(), CoreError> {
        let slot = self
            .rows
            .get_mut(index)
            .ok_or_else(|| CoreError::Validation(format!("No item row at index {index}")))?;
        *slot = row;
        self.touch();
        Ok(())
    }

    /// Remove and return the row at `index`, if present.
    pub fn remove_row(&mut self, index: usize) -> Option<ItemRow> {
        if index >= self.rows.len() {
            return None;
        }
        let removed = self.rows.remove(index);
        self.touch();
        Some(removed)
    }

    /// Replace the whole list, e.g. with an aggregator result.
    pub fn replace_with(&mut self, items: &[LayoutItem]) {
        self.rows = items.iter().copied().map(ItemRow::from).collect();
        self.touch();
    }

    pub fn reset(&mut self) {
        self.rows.clear();
        self.touch();
    }

    /// De-duplicated view suitable for a generation request.
    pub fn merged(&self) -> Result<Vec<LayoutItem>, CoreError> {
        merge_rows(&self.rows)
    }

    /// Sum of merged quantities.
    pub fn total_quantity(&self) -> Result<i64, CoreError> {
        self.merged()?.iter().try_fold(0i64, |total, item| {
            total
                .checked_add(item.quantity)
                .ok_or_else(|| CoreError::Validation("Total quantity is too large".into()))
        })
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}
