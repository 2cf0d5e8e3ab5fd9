use std::fmt;

use crate::error::TableError;

// ---------------------------------------------------------------------------
// Cell – a single value in a column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Values stay `Text` after loading until a stage
/// coerces their column.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    /// Absent or unparseable data.
    Missing,
}

impl Cell {
    /// Build a cell from a raw text field; empty fields are missing.
    pub fn from_field(s: &str) -> Self {
        if s.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(s.to_string())
        }
    }

    /// Reinterpret the cell as a number. Anything that does not parse, and
    /// NaN, becomes [`Cell::Missing`].
    pub fn coerce_numeric(&self) -> Cell {
        match self.as_f64() {
            Some(v) => Cell::Number(v),
            None => Cell::Missing,
        }
    }

    /// Numeric view of the cell, parsing text on the fly.
    pub fn as_f64(&self) -> Option<f64> {
        let v = match self {
            Cell::Number(v) => *v,
            Cell::Text(s) => s.trim().parse::<f64>().ok()?,
            Cell::Missing => return None,
        };
        (!v.is_nan()).then_some(v)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            // Debug keeps the trailing ".0" on whole floats.
            Cell::Number(v) => write!(f, "{v:?}"),
            Cell::Missing => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

/// A labelled column of cells. Cells are read-only once the column is part
/// of a [`Table`]; see [`Table::update_cells`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub label: String,
    cells: Vec<Cell>,
}

impl Column {
    pub fn new(label: impl Into<String>, cells: Vec<Cell>) -> Self {
        Self {
            label: label.into(),
            cells,
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Ordered columns with a uniform row count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table, checking that every column has the same length.
    pub fn new(columns: Vec<Column>) -> Result<Self, TableError> {
        let n_rows = columns.first().map_or(0, |c| c.cells.len());
        if let Some(bad) = columns.iter().find(|c| c.cells.len() != n_rows) {
            return Err(TableError::ColumnLength {
                label: bad.label.clone(),
                expected: n_rows,
                actual: bad.cells.len(),
            });
        }
        Ok(Self { columns, n_rows })
    }

    /// Build a table from a header and row-major records.
    pub fn from_rows<I>(headers: Vec<String>, rows: I) -> Result<Self, TableError>
    where
        I: IntoIterator<Item = Vec<Cell>>,
    {
        let mut columns: Vec<Column> = headers
            .into_iter()
            .map(|h| Column::new(h, Vec::new()))
            .collect();

        for (row_no, row) in rows.into_iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TableError::RowWidth {
                    row: row_no,
                    expected: columns.len(),
                    actual: row.len(),
                });
            }
            for (col, cell) in columns.iter_mut().zip(row) {
                col.cells.push(cell);
            }
        }

        Self::new(columns)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn labels(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.label.as_str()).collect()
    }

    pub fn column(&self, label: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.label == label)
    }

    /// Rewrite the cells of the column at `index` one by one. The column
    /// length cannot change. Returns the updated cells, or `None` when
    /// `index` is out of range.
    pub fn update_cells<F>(&mut self, index: usize, f: F) -> Option<&[Cell]>
    where
        F: FnMut(&mut Cell),
    {
        let column = self.columns.get_mut(index)?;
        column.cells.iter_mut().for_each(f);
        Some(&column.cells)
    }

    /// Replace every column label at once.
    pub fn with_labels(mut self, labels: Vec<String>) -> Result<Self, TableError> {
        if labels.len() != self.columns.len() {
            return Err(TableError::LabelCount {
                expected: self.columns.len(),
                actual: labels.len(),
            });
        }
        for (col, label) in self.columns.iter_mut().zip(labels) {
            col.label = label;
        }
        Ok(self)
    }

    /// Keep only the rows whose entry in `mask` is `true`.
    pub fn retain_rows(&mut self, mask: &[bool]) -> Result<(), TableError> {
        if mask.len() != self.n_rows {
            return Err(TableError::MaskLength {
                expected: self.n_rows,
                actual: mask.len(),
            });
        }
        for col in &mut self.columns {
            let mut keep = mask.iter();
            col.cells.retain(|_| *keep.next().unwrap_or(&false));
        }
        self.n_rows = mask.iter().filter(|&&k| k).count();
        Ok(())
    }

    /// Iterate rows in order, one `Vec` of borrowed cells per row.
    pub fn rows(&self) -> impl Iterator<Item = Vec<&Cell>> + '_ {
        (0..self.n_rows).map(move |i| self.columns.iter().map(|c| &c.cells[i]).collect())
    }

    /// A printable preview of the first `n` rows.
    pub fn head(&self, n: usize) -> Head<'_> {
        Head { table: self, n }
    }
}

/// Display adapter returned by [`Table::head`].
pub struct Head<'a> {
    table: &'a Table,
    n: usize,
}

impl fmt::Display for Head<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.table.is_empty() {
            let header: Vec<&str> = self.table.labels();
            return write!(f, "{}\n(no rows)", header.join("  "));
        }

        let shown: Vec<Vec<String>> = self
            .table
            .rows()
            .take(self.n)
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();

        let widths: Vec<usize> = self
            .table
            .columns
            .iter()
            .enumerate()
            .map(|(j, col)| {
                shown
                    .iter()
                    .map(|r| r[j].chars().count())
                    .chain(std::iter::once(col.label.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let header: Vec<String> = self
            .table
            .columns
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:>w$}", c.label, w = *w))
            .collect();
        write!(f, "{}", header.join("  "))?;

        for (i, row) in shown.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(v, w)| format!("{v:>w$}", w = *w))
                .collect();
            write!(f, "\n{}", line.join("  "))?;
        }
        if self.table.n_rows > self.n {
            write!(f, "\n... {} more rows", self.table.n_rows - self.n)?;
        }
        Ok(())
    }
}
