use std::path::Path;

use anyhow::{Context, Result};

use super::model::Table;

/// Write `table` as CSV, header first. Parent directories are created and an
/// existing file is replaced. Missing cells are written as empty fields.
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("opening {} for writing", path.display()))?;

    writer
        .write_record(table.labels())
        .context("writing CSV header")?;
    for (row_no, row) in table.rows().enumerate() {
        writer
            .write_record(row.iter().map(|c| c.to_string()))
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV output")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Cell, Column};

    fn sample() -> Table {
        Table::new(vec![
            Column::new("product", vec![Cell::Text("Widget, large".into()), Cell::Missing]),
            Column::new("price", vec![Cell::Number(10.5), Cell::Number(0.0)]),
        ])
        .unwrap()
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("processed/nested/clean.csv");

        write_csv(&sample(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "product,price\n\"Widget, large\",10.5\n,0.0\n");
    }

    #[test]
    fn overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.csv");
        std::fs::write(&path, "stale,content\n1,2\n3,4\n5,6\n").unwrap();

        write_csv(&sample(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("product,price\n"));
        assert!(!written.contains("stale"));
    }
}
