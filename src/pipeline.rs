use anyhow::{Context, Result};
use log::info;

use crate::config::CleanerConfig;
use crate::data::missing::{classify_and_impute, ResolveSummary};
use crate::data::model::Table;
use crate::data::{filter, loader, normalize, writer};

/// Rows shown when logging a freshly loaded table.
const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// What each stage did during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleaningSummary {
    pub rows_in: usize,
    pub labels_changed: usize,
    pub missing: ResolveSummary,
    /// `None` when the row filter was not requested.
    pub rows_filtered: Option<usize>,
    pub rows_out: usize,
}

// ---------------------------------------------------------------------------
// Stages
// ---------------------------------------------------------------------------

/// Run the in-memory stages: normalize labels, resolve missing values, then
/// the optional row filter.
pub fn clean(table: Table, config: &CleanerConfig) -> Result<(Table, CleaningSummary)> {
    let mut summary = CleaningSummary {
        rows_in: table.n_rows(),
        ..Default::default()
    };

    let before: Vec<String> = table.labels().into_iter().map(str::to_string).collect();
    let table = normalize::normalize_table(table).context("normalizing column names")?;
    summary.labels_changed = before
        .iter()
        .zip(table.labels())
        .filter(|(a, b)| a.as_str() != *b)
        .count();
    info!("Standardized column names: {:?}", table.labels());

    let (mut table, missing) =
        classify_and_impute(table, &config.resolver()).context("resolving missing values")?;
    summary.missing = missing;

    if config.positive_only {
        let (filtered, removed) = filter::filter_rows(table).context("filtering rows")?;
        table = filtered;
        summary.rows_filtered = Some(removed);
    }

    summary.rows_out = table.n_rows();
    Ok((table, summary))
}

/// Load, clean and write according to `config`.
pub fn run(config: &CleanerConfig) -> Result<CleaningSummary> {
    info!("Loading data from {}...", config.input.display());
    let table = loader::load_file(&config.input)
        .with_context(|| format!("loading {}", config.input.display()))?;
    info!(
        "Data loaded successfully: {} rows x {} columns\n{}",
        table.n_rows(),
        table.n_cols(),
        table.head(PREVIEW_ROWS)
    );

    let (table, summary) = clean(table, config)?;

    writer::write_csv(&table, &config.output)
        .with_context(|| format!("writing {}", config.output.display()))?;
    info!(
        "Cleaned data saved to {} ({} of {} rows kept)",
        config.output.display(),
        summary.rows_out,
        summary.rows_in
    );

    Ok(summary)
}
