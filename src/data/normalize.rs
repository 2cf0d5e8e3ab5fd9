//! Column label normalization: slugify, then make unique.

use std::collections::{HashMap, HashSet};

use log::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::model::Table;
use crate::error::TableError;

/// Label used when a header normalizes to nothing.
pub const PLACEHOLDER_LABEL: &str = "unnamed";

/// Marker placed between a repeated label and its counter.
const VERSION_MARKER: &str = "_v";

/// Slugify a single label: accent-folded, lowercase, `[a-z0-9_]` only, with
/// single underscores between words and none at either end.
pub fn normalize_label(raw: &str) -> String {
    let folded: String = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(char::is_ascii)
        .collect();

    let mut slug = String::with_capacity(folded.len());
    let mut in_separator = false;
    for c in folded.chars() {
        if c.is_whitespace() || c == '-' || c == '_' {
            in_separator = true;
            continue;
        }
        if !c.is_ascii_alphanumeric() {
            continue;
        }
        if in_separator && !slug.is_empty() {
            slug.push('_');
        }
        in_separator = false;
        slug.push(c);
    }

    if slug.is_empty() {
        PLACEHOLDER_LABEL.to_string()
    } else {
        slug
    }
}

/// Make labels pairwise unique, preserving order.
///
/// The first occurrence keeps its name; each repeat gets `_v{n}` with the
/// smallest `n` (from that label's counter) not already taken. Generated
/// labels are registered too, so a later header equal to one collides.
pub fn dedupe_labels(labels: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(labels.len());
    let mut next_suffix: HashMap<String, usize> = HashMap::new();
    let mut out = Vec::with_capacity(labels.len());

    for label in labels {
        if used.insert(label.clone()) {
            next_suffix.insert(label.clone(), 1);
            out.push(label);
            continue;
        }

        let counter = next_suffix.entry(label.clone()).or_insert(1);
        let mut candidate = format!("{label}{VERSION_MARKER}{counter}");
        while used.contains(&candidate) {
            *counter += 1;
            candidate = format!("{label}{VERSION_MARKER}{counter}");
        }
        *counter += 1;

        used.insert(candidate.clone());
        next_suffix.entry(candidate.clone()).or_insert(1);
        out.push(candidate);
    }

    out
}

/// Normalize then de-duplicate a list of labels.
pub fn normalize_labels<S: AsRef<str>>(labels: &[S]) -> Vec<String> {
    dedupe_labels(labels.iter().map(|l| normalize_label(l.as_ref())).collect())
}

/// Rewrite a table's labels into their normalized, unique form.
pub fn normalize_table(table: Table) -> Result<Table, TableError> {
    let original: Vec<String> = table.labels().into_iter().map(str::to_string).collect();
    let normalized = normalize_labels(&original);

    for (before, after) in original.iter().zip(&normalized) {
        if before != after {
            debug!("renamed column {before:?} -> {after:?}");
        }
    }

    table.with_labels(normalized)
}
