//! Row filtering by date range and categorical selections.

use std::collections::BTreeSet;

use fleet_core::models::{DateRange, Field, FilterSpec, Record};
use serde::Serialize;
use tracing::debug;

/// Keep the records that satisfy every constraint of `spec`, in source order.
///
/// The date range is inclusive on both ends. Each categorical dimension
/// restricts only when its selection is not [`Selection::All`]. An empty
/// result is valid.
///
/// [`Selection::All`]: fleet_core::models::Selection::All
pub fn filter(records: &[Record], spec: &FilterSpec) -> Vec<Record> {
    let kept: Vec<Record> = records
        .iter()
        .filter(|r| matches(r, spec))
        .cloned()
        .collect();

    debug!("Filter kept {} of {} records", kept.len(), records.len());
    kept
}

/// Per-row predicate behind [`filter`].
pub fn matches(record: &Record, spec: &FilterSpec) -> bool {
    spec.date_range.contains(record.date)
        && spec.companies.allows(&record.company_name)
        && spec.directions.allows(&record.direction)
        && spec.container_sizes.allows(&record.container_size)
}

// ── Filter options ────────────────────────────────────────────────────────────

/// Choices offered by the overview filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub companies: Vec<String>,
    pub directions: Vec<String>,
    pub container_sizes: Vec<String>,
    /// Earliest and latest record date; `None` for an empty table.
    pub date_bounds: Option<DateRange>,
}

/// Distinct, sorted, non-blank values of every filterable dimension.
pub fn filter_options(records: &[Record]) -> FilterOptions {
    FilterOptions {
        companies: distinct_values(records, Field::Company),
        directions: distinct_values(records, Field::Direction),
        container_sizes: distinct_values(records, Field::ContainerSize),
        date_bounds: date_bounds(records),
    }
}

/// Distinct non-blank values of `field`, sorted ascending.
pub fn distinct_values(records: &[Record], field: Field) -> Vec<String> {
    records
        .iter()
        .map(|r| r.field(field))
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// The range spanning the earliest and latest record dates.
pub fn date_bounds(records: &[Record]) -> Option<DateRange> {
    let start = records.iter().map(|r| r.date).min()?;
    let end = records.iter().map(|r| r.date).max()?;
    Some(DateRange::new(start, end))
}
