//! Counting aggregations behind the overview metrics and charts.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use fleet_core::formatting::{format_delta_display, format_percent_change, percentage, Trend};
use fleet_core::models::{Field, Record};
use fleet_core::status::COMPLETED_STATUS;
use fleet_core::time_utils::YearMonth;
use serde::Serialize;

/// Label shown in place of a top entity when there is nothing to rank.
pub const NO_DATA: &str = "No Data";

// ── Result types ──────────────────────────────────────────────────────────────

/// A category or entity with its row count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountEntry {
    pub key: String,
    pub count: u64,
}

/// A category's share of the total, in percent with one decimal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub key: String,
    pub count: u64,
    pub percent: f64,
}

/// Completed rows on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

/// Completed shipments this month against the month before.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyMetric {
    /// `YYYY-MM` of the reference month.
    pub month: String,
    /// `YYYY-MM` of the preceding month.
    pub previous_month: String,
    pub current: u64,
    pub previous: u64,
    pub delta: i64,
    pub percent_change: String,
}

impl MonthlyMetric {
    pub fn trend(&self) -> Trend {
        Trend::of(self.delta)
    }

    /// Card caption such as `"▼ -25.0% (-1)"`.
    pub fn delta_display(&self) -> String {
        format_delta_display(self.delta, &self.percent_change)
    }
}

/// Distinct-value count of one field plus its most frequent value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySummary {
    pub unique: usize,
    pub top: Option<String>,
}

impl EntitySummary {
    pub fn top_label(&self) -> &str {
        self.top.as_deref().unwrap_or(NO_DATA)
    }
}

// ── ReportAggregator ──────────────────────────────────────────────────────────

/// Stateless helper computing the overview aggregates.
pub struct ReportAggregator;

impl ReportAggregator {
    /// Count completed rows in the month of `reference_date` and in the month
    /// before it.
    ///
    /// Only rows with a `Driver` value are counted. See
    /// [`format_percent_change`] for the zero-previous rule.
    pub fn monthly_completion_metric(records: &[Record], reference_date: NaiveDate) -> MonthlyMetric {
        let this_month = YearMonth::of(reference_date);
        let last_month = this_month.previous();

        let mut current = 0u64;
        let mut previous = 0u64;
        for r in completed(records).filter(|r| r.has_driver()) {
            if this_month.contains(r.date) {
                current += 1;
            } else if last_month.contains(r.date) {
                previous += 1;
            }
        }

        MonthlyMetric {
            month: this_month.to_string(),
            previous_month: last_month.to_string(),
            current,
            previous,
            delta: current as i64 - previous as i64,
            percent_change: format_percent_change(current, previous),
        }
    }

    /// The `n` most frequent values of `field` among rows whose status equals
    /// `status`, by count descending.
    ///
    /// Equal counts keep the order in which the values first appear.
    pub fn top_entities(records: &[Record], status: &str, field: Field, n: usize) -> Vec<CountEntry> {
        let mut ranked = rank_by_count(records.iter().filter(|r| r.status == status), field);
        ranked.truncate(n);
        ranked
    }

    /// Count rows per value of `field`, keys ascending.
    ///
    /// Blank values form no category. Like the completion metric, only rows
    /// with a `Driver` value add to a count.
    pub fn categorical_distribution(records: &[Record], field: Field) -> Vec<CountEntry> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for r in records {
            let key = r.field(field);
            if key.is_empty() {
                continue;
            }
            *counts.entry(key).or_insert(0) += u64::from(r.has_driver());
        }
        counts
            .into_iter()
            .map(|(key, count)| CountEntry {
                key: key.to_string(),
                count,
            })
            .collect()
    }

    /// Completed rows per day, dates ascending.
    pub fn daily_completions(records: &[Record]) -> Vec<DailyCount> {
        let mut counts: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for r in completed(records) {
            *counts.entry(r.date).or_insert(0) += u64::from(r.has_driver());
        }
        counts
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect()
    }

    /// Number of distinct non-blank values of `field` and the most frequent one.
    pub fn entity_summary(records: &[Record], field: Field) -> EntitySummary {
        let ranked = rank_by_count(records.iter(), field);
        EntitySummary {
            unique: ranked.len(),
            top: ranked.into_iter().next().map(|e| e.key),
        }
    }

    /// Completed rows in the month of `reference_date`.
    pub fn completed_in_month(records: &[Record], reference_date: NaiveDate) -> Vec<Record> {
        let month = YearMonth::of(reference_date);
        completed(records)
            .filter(|r| month.contains(r.date))
            .cloned()
            .collect()
    }

    /// Percent share of each entry in the total count.
    pub fn shares(entries: &[CountEntry]) -> Vec<Share> {
        let total: u64 = entries.iter().map(|e| e.count).sum();
        entries
            .iter()
            .map(|e| Share {
                key: e.key.clone(),
                count: e.count,
                percent: percentage(e.count as f64, total as f64, 1),
            })
            .collect()
    }
}

// ── Private helpers ───────────────────────────────────────────────────────────

fn completed(records: &[Record]) -> impl Iterator<Item = &Record> {
    records.iter().filter(|r| r.status == COMPLETED_STATUS)
}

/// Count non-blank values of `field`, most frequent first, ties in
/// first-seen order.
fn rank_by_count<'a>(records: impl Iterator<Item = &'a Record>, field: Field) -> Vec<CountEntry> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut ranked: Vec<CountEntry> = Vec::new();

    for r in records {
        let key = r.field(field);
        if key.is_empty() {
            continue;
        }
        match positions.get(key) {
            Some(&i) => ranked[i].count += 1,
            None => {
                positions.insert(key, ranked.len());
                ranked.push(CountEntry {
                    key: key.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

// ── Tests ─────────────────────────────────────────────────────────────────────
