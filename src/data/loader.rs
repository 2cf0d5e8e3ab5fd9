use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Cell, Column, Table};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a sales table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row followed by records (the default when there is
///                no extension)
/// * `.json`    – `[{ "order_id": 1, "price": 9.5, ... }, ...]`
/// * `.parquet` – flat columns of strings, numbers or booleans
///
/// The path is checked before anything is read.
pub fn load_file(path: &Path) -> Result<Table, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => Err(LoadError::UnsupportedFormat(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, every field kept as text.
/// Empty fields load as [`Cell::Missing`].
fn load_csv(path: &Path) -> Result<Table, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::from_field).collect::<Vec<_>>());
    }

    Ok(Table::from_rows(headers, rows)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, as `df.to_json(orient='records')`
/// writes it):
///
/// ```json
/// [
///   { "Order ID": 1, "Unit Price": 9.5, "Quantity": 2 },
///   { "Order ID": 2, "Unit Price": null, "Quantity": "3" }
/// ]
/// ```
///
/// Columns follow first-seen key order; a key absent from a record is missing.
fn load_json(path: &Path) -> Result<Table, LoadError> {
    let text = std::fs::read_to_string(path)?;
    let root: JsonValue = serde_json::from_str(&text)?;

    let records = root
        .as_array()
        .ok_or_else(|| LoadError::Shape("expected top-level JSON array".into()))?;

    let mut headers: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .ok_or_else(|| LoadError::Shape(format!("row {i} is not a JSON object")))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = records.iter().filter_map(|rec| rec.as_object()).map(|obj| {
        headers
            .iter()
            .map(|h| obj.get(h).map_or(Cell::Missing, json_to_cell))
            .collect::<Vec<_>>()
    });

    Ok(Table::from_rows(headers.clone(), rows)?)
}

fn json_to_cell(val: &JsonValue) -> Cell {
    match val {
        JsonValue::Null => Cell::Missing,
        JsonValue::Number(n) => n.as_f64().map_or(Cell::Missing, Cell::Number),
        JsonValue::String(s) => Cell::from_field(s),
        other => Cell::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per field.
///
/// Integer and float columns load as numbers, everything else as text.
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table, LoadError> {
    let file = std::fs::File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build()?;

    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); headers.len()];

    for batch_result in reader {
        let batch = batch_result?;
        for (col_idx, column) in cells.iter_mut().enumerate() {
            let array = batch.column(col_idx);
            for row in 0..batch.num_rows() {
                column.push(extract_cell(array, row)?);
            }
        }
    }

    let columns = headers.into_iter().zip(cells).map(|(h, c)| Column::new(h, c)).collect();
    Ok(Table::new(columns)?)
}

// -- Arrow helpers --

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Result<Cell, LoadError> {
    if col.is_null(row) {
        return Ok(Cell::Missing);
    }
    let cell = match col.data_type() {
        DataType::Utf8 => Cell::from_field(col.as_string::<i32>().value(row)),
        DataType::LargeUtf8 => Cell::from_field(col.as_string::<i64>().value(row)),
        DataType::Int32 => downcast::<Int32Array>(col)
            .map(|a| Cell::Number(a.value(row) as f64))?,
        DataType::Int64 => downcast::<Int64Array>(col)
            .map(|a| Cell::Number(a.value(row) as f64))?,
        DataType::Float32 => downcast::<Float32Array>(col)
            .map(|a| Cell::Number(a.value(row) as f64))?,
        DataType::Float64 => downcast::<Float64Array>(col)
            .map(|a| Cell::Number(a.value(row)))?,
        DataType::Boolean => downcast::<BooleanArray>(col)
            .map(|a| Cell::Text(a.value(row).to_string()))?,
        _ => Cell::Text(array_value_to_string(col, row)?),
    };
    Ok(cell)
}

fn downcast<T: 'static>(col: &Arc<dyn Array>) -> Result<&T, LoadError> {
    col.as_any().downcast_ref::<T>().ok_or_else(|| {
        LoadError::Shape(format!("unexpected array for {:?}", col.data_type()))
    })
}
