//! Keyword classification of columns and the missing-value policy.
//!
//! Price-like columns have missing values filled with `0.0`; quantity-like
//! columns drop every row whose quantity is missing. Fills run before drops.

use log::{debug, info};
use serde::Deserialize;

use super::model::{Cell, Table};
use crate::error::TableError;

/// Value written into price-like cells that are missing or unparseable.
pub const PRICE_FILL: f64 = 0.0;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Keyword sets matched as case-insensitive substrings of column labels.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Keywords {
    pub price: Vec<String>,
    pub quantity: Vec<String>,
}

impl Default for Keywords {
    fn default() -> Self {
        Self {
            price: ["price", "amount", "cost", "total"].map(String::from).to_vec(),
            quantity: ["quantity", "qty", "units", "unit"].map(String::from).to_vec(),
        }
    }
}

/// What to do with a column that matches both keyword sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DualClassPolicy {
    /// Fill as price, then drop rows as quantity.
    #[default]
    Both,
    PriceOnly,
    QuantityOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    pub keywords: Keywords,
    pub dual_class: DualClassPolicy,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnClass {
    pub price: bool,
    pub quantity: bool,
}

impl ColumnClass {
    /// Narrow a dual match according to `policy`.
    fn under(self, policy: DualClassPolicy) -> Self {
        if !(self.price && self.quantity) {
            return self;
        }
        match policy {
            DualClassPolicy::Both => self,
            DualClassPolicy::PriceOnly => Self {
                price: true,
                quantity: false,
            },
            DualClassPolicy::QuantityOnly => Self {
                price: false,
                quantity: true,
            },
        }
    }
}

pub fn classify(label: &str, keywords: &Keywords) -> ColumnClass {
    let label = label.to_lowercase();
    let hit = |set: &[String]| set.iter().any(|k| label.contains(&k.to_lowercase()));
    ColumnClass {
        price: hit(keywords.price.as_slice()),
        quantity: hit(keywords.quantity.as_slice()),
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Counts gathered while resolving missing values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    pub price_columns: Vec<String>,
    pub quantity_columns: Vec<String>,
    /// Price cells that were missing or unparseable and got [`PRICE_FILL`].
    pub cells_filled: usize,
    pub rows_dropped: usize,
}

/// Coerce classified columns to numbers, fill missing prices and drop rows
/// with a missing quantity.
pub fn classify_and_impute(
    mut table: Table,
    config: &ResolverConfig,
) -> Result<(Table, ResolveSummary), TableError> {
    let mut summary = ResolveSummary::default();
    let rows_before = table.n_rows();
    let mut keep = vec![true; rows_before];

    let classes: Vec<ColumnClass> = table
        .columns()
        .iter()
        .map(|c| classify(&c.label, &config.keywords).under(config.dual_class))
        .collect();

    for (index, class) in classes.iter().enumerate() {
        if !(class.price || class.quantity) {
            continue;
        }
        let label = table.columns()[index].label.clone();
        debug!("column {label:?} classified as {class:?}");

        let mut filled = 0;
        let cells = table
            .update_cells(index, |cell| {
                *cell = cell.coerce_numeric();
                if class.price && cell.is_missing() {
                    *cell = Cell::Number(PRICE_FILL);
                    filled += 1;
                }
            })
            .unwrap_or_default();

        if class.price {
            summary.cells_filled += filled;
            summary.price_columns.push(label.clone());
        }

        if class.quantity {
            for (k, cell) in keep.iter_mut().zip(cells) {
                if cell.is_missing() {
                    *k = false;
                }
            }
            summary.quantity_columns.push(label);
        }
    }

    table.retain_rows(&keep)?;
    summary.rows_dropped = rows_before - table.n_rows();

    info!(
        "filled {} missing price cell(s) in {:?}; dropped {} row(s) missing {:?}",
        summary.cells_filled, summary.price_columns, summary.rows_dropped, summary.quantity_columns
    );

    Ok((table, summary))
}
