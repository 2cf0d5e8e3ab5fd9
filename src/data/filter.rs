use log::{info, warn};

use super::model::Table;
use crate::error::TableError;

// ---------------------------------------------------------------------------
// Positivity filter on quantity / price
// ---------------------------------------------------------------------------

pub const QUANTITY_COLUMN: &str = "quantity";
pub const PRICE_COLUMN: &str = "price";

/// Keep only rows with `quantity > 0` and `price >= 0`.
///
/// Applies only when the table has columns labelled exactly `quantity` and
/// `price`; otherwise the table passes through untouched. A row passes when:
/// * both cells coerce to numbers, and
/// * the quantity is strictly positive and the price is non-negative.
///
/// Returns the filtered table and the number of rows removed.
pub fn filter_rows(mut table: Table) -> Result<(Table, usize), TableError> {
    let (Some(quantity), Some(price)) =
        (table.column(QUANTITY_COLUMN), table.column(PRICE_COLUMN))
    else {
        warn!("row filter skipped: needs both '{QUANTITY_COLUMN}' and '{PRICE_COLUMN}' columns");
        return Ok((table, 0));
    };

    let mask: Vec<bool> = quantity
        .cells()
        .iter()
        .zip(price.cells())
        .map(|(q, p)| match (q.as_f64(), p.as_f64()) {
            (Some(q), Some(p)) => q > 0.0 && p >= 0.0,
            _ => false,
        })
        .collect();

    let before = table.n_rows();
    table.retain_rows(&mask)?;
    let removed = before - table.n_rows();
    info!("row filter removed {removed} row(s)");

    Ok((table, removed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Cell, Column};

    fn nums(values: &[f64]) -> Vec<Cell> {
        values.iter().map(|v| Cell::Number(*v)).collect()
    }

    #[test]
    fn keeps_positive_quantity_and_non_negative_price() {
        let table = Table::new(vec![
            Column::new("quantity", nums(&[2.0, 0.0, 3.0, -1.0, 1.0])),
            Column::new("price", nums(&[1.0, 5.0, 0.0, 2.0, -0.5])),
        ])
        .unwrap();

        let (table, removed) = filter_rows(table).unwrap();
        assert_eq!(removed, 3);
        assert_eq!(table.column("quantity").unwrap().cells(), nums(&[2.0, 3.0]));
        assert_eq!(table.column("price").unwrap().cells(), nums(&[1.0, 0.0]));
    }

    #[test]
    fn non_numeric_rows_fail() {
        let table = Table::new(vec![
            Column::new("quantity", vec![Cell::Text("4".into()), Cell::Text("lots".into())]),
            Column::new("price", vec![Cell::Text("1.5".into()), Cell::Text("2".into())]),
        ])
        .unwrap();

        let (table, removed) = filter_rows(table).unwrap();
        assert_eq!(removed, 1);
        assert_eq!(table.n_rows(), 1);
    }

    #[test]
    fn requires_exact_labels() {
        let table = Table::new(vec![
            Column::new("quantity", nums(&[0.0])),
            Column::new("unit_price", nums(&[-1.0])),
        ])
        .unwrap();

        let (table, removed) = filter_rows(table).unwrap();
        assert_eq!(removed, 0);
        assert_eq!(table.n_rows(), 1);
    }
}
