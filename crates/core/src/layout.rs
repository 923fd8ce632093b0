//! Generate-layout request assembly.
//!
//! Builds the wire payload for `POST /rooms/{id}/generate-layout` from the
//! editable item rows and the options chosen on the form. Unset options
//! are omitted from the payload rather than sent as `null`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::items::{merge_rows, ItemRow, LayoutItem};
use crate::stock::{require_dimensions, DimensionRecord};

/// Server-side layout strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    #[default]
    Compartment,
    CompartmentGrid,
    LaffMaxrects,
}

impl Algorithm {
    /// Stable string representation matching serde's `rename_all = "snake_case"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compartment => "compartment",
            Self::CompartmentGrid => "compartment_grid",
            Self::LaffMaxrects => "laff_maxrects",
        }
    }
}

impl std::str::FromStr for Algorithm {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compartment" => Ok(Self::Compartment),
            "compartment_grid" => Ok(Self::CompartmentGrid),
            "laff_maxrects" => Ok(Self::LaffMaxrects),
            other => Err(CoreError::Validation(format!("Unknown algorithm '{other}'"))),
        }
    }
}

/// Grid dimensions for the compartment strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
}

impl GridOptions {
    pub fn is_unset(&self) -> bool {
        self.columns.is_none() && self.rows.is_none()
    }
}

/// Options as collected from the form. `None` means "not set".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub algorithm: Algorithm,
    pub max_layers: Option<u32>,
    pub prefer_bottom: Option<bool>,
    pub minimize_height: Option<bool>,
    pub grid: GridOptions,
    pub column_max_height: Option<f64>,
}

/// The `options` sub-object of the payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_layers: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefer_bottom: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimize_height: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_max_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid: Option<GridOptions>,
}

impl From<&GenerationOptions> for LayoutOptions {
    fn from(opts: &GenerationOptions) -> Self {
        Self {
            max_layers: opts.max_layers,
            prefer_bottom: opts.prefer_bottom,
            minimize_height: opts.minimize_height,
            column_max_height: opts.column_max_height,
            grid: (!opts.grid.is_unset()).then_some(opts.grid),
        }
    }
}

/// Payload for `POST /rooms/{id}/generate-layout`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateLayoutRequest {
    pub algorithm: Algorithm,
    pub allow_rotation: bool,
    pub items: Vec<LayoutItem>,
    pub options: LayoutOptions,
}

/// Assemble a generation request from raw rows.
///
/// Rows are merged by product id; rows left without a positive product id
/// or quantity are dropped. Fails with [`CoreError::EmptyItemList`] when
/// nothing remains and with [`CoreError::MissingDimensions`] when a
/// product has no dimension record. Rotation is never requested.
pub fn build_generate_request(
    rows: &[ItemRow],
    dimensions: &[DimensionRecord],
    options: &GenerationOptions,
) -> Result<GenerateLayoutRequest, CoreError> {
    let items = merge_rows(rows)?;
    if items.is_empty() {
        return Err(CoreError::EmptyItemList);
    }
    require_dimensions(items.iter().map(|item| item.product_id), dimensions)?;

    Ok(GenerateLayoutRequest {
        algorithm: options.algorithm,
        allow_rotation: false,
        items,
        options: LayoutOptions::from(options),
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn measured() -> Vec<DimensionRecord> {
        [1, 2]
            .into_iter()
            .map(|product_id| DimensionRecord {
                product_id,
                width: 1.0,
                depth: 1.0,
                height: 1.0,
                weight: None,
            })
            .collect()
    }

    #[test]
    fn merges_rows_into_unique_items() {
        let rows = [ItemRow::new(1, 2), ItemRow::new(1, 3), ItemRow::new(2, 0)];
        let request =
            build_generate_request(&rows, &measured(), &GenerationOptions::default()).unwrap();
        assert_eq!(
            request.items,
            vec![LayoutItem {
                product_id: 1,
                quantity: 5
            }]
        );
        assert!(!request.allow_rotation);
    }

    #[test]
    fn empty_after_filtering_is_a_local_error() {
        let rows = [ItemRow::new(2, 0), ItemRow::default()];
        assert_matches!(
            build_generate_request(&rows, &measured(), &GenerationOptions::default()),
            Err(CoreError::EmptyItemList)
        );
        assert_matches!(
            build_generate_request(&[], &measured(), &GenerationOptions::default()),
            Err(CoreError::EmptyItemList)
        );
    }

    #[test]
    fn unmeasured_product_is_a_local_error() {
        let rows = [ItemRow::new(1, 1), ItemRow::new(99, 3)];
        assert_matches!(
            build_generate_request(&rows, &measured(), &GenerationOptions::default()),
            Err(CoreError::MissingDimensions { product_id: 99 })
        );
    }

    #[test]
    fn unset_options_are_omitted() {
        let request = build_generate_request(
            &[ItemRow::new(1, 1)],
            &measured(),
            &GenerationOptions::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "algorithm": "compartment",
                "allow_rotation": false,
                "items": [{"product_id": 1, "quantity": 1}],
                "options": {}
            })
        );
    }

    #[test]
    fn grid_with_only_columns_keeps_only_columns() {
        let options = GenerationOptions {
            algorithm: Algorithm::CompartmentGrid,
            grid: GridOptions {
                columns: Some(4),
                rows: None,
            },
            ..Default::default()
        };
        let request =
            build_generate_request(&[ItemRow::new(1, 1)], &measured(), &options).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["algorithm"], "compartment_grid");
        assert_eq!(json["options"]["grid"], json!({"columns": 4}));
    }

    #[test]
    fn explicit_false_and_zero_are_sent() {
        let options = GenerationOptions {
            algorithm: Algorithm::LaffMaxrects,
            max_layers: Some(0),
            prefer_bottom: Some(false),
            minimize_height: Some(true),
            column_max_height: Some(2.5),
            ..Default::default()
        };
        let request =
            build_generate_request(&[ItemRow::new(1, 1)], &measured(), &options).unwrap();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json["options"],
            json!({
                "max_layers": 0,
                "prefer_bottom": false,
                "minimize_height": true,
                "column_max_height": 2.5
            })
        );
    }

    #[test]
    fn algorithm_parses_from_wire_names() {
        assert_eq!("laff_maxrects".parse::<Algorithm>().unwrap(), Algorithm::LaffMaxrects);
        assert_eq!(Algorithm::CompartmentGrid.as_str(), "compartment_grid");
        assert!("shelf".parse::<Algorithm>().is_err());
    }
}
