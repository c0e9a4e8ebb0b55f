//! Plain-text rendering of the overview and driver status reports.
//!
//! Each renderer returns the full report as a `String`; the caller decides
//! where it goes.

use std::fmt::Write;

use fleet_core::formatting::format_count;
use fleet_core::models::{PhotoSlot, Record, Selection};
use fleet_core::status::tag_color;
use fleet_data::aggregator::{CountEntry, Share};
use fleet_data::analysis::{DriverStatusReport, OverviewReport};
use fleet_data::lookup::{Location, PhotoSource};

/// Viewer URL of an image stored under an external file id.
pub const PHOTO_VIEW_URL: &str = "https://drive.google.com/uc?export=view&id=";

/// Placeholder for an empty status card field.
pub const NOT_AVAILABLE: &str = "N/A";

pub fn photo_url(external_id: &str) -> String {
    format!("{PHOTO_VIEW_URL}{external_id}")
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        NOT_AVAILABLE
    } else {
        value
    }
}

fn selection_label(selection: &Selection) -> String {
    match selection {
        Selection::All => "All".to_string(),
        Selection::Only(values) => values.iter().cloned().collect::<Vec<_>>().join(", "),
    }
}

// ── Overview ───────────────────────────────────────────────────────────────────

/// Render the overview dashboard: metric cards, the daily completion series,
/// the top-N rankings and the category distributions.
pub fn render_overview(report: &OverviewReport) -> String {
    let mut out = String::new();
    let range = &report.filter.date_range;

    let _ = writeln!(
        out,
        "Fleet overview {} to {} ({} of {} records)",
        range.start,
        range.end,
        format_count(report.records_matched as u64),
        format_count(report.records_total as u64),
    );
    let _ = writeln!(
        out,
        "Company: {} | Direction: {} | Container: {}",
        selection_label(&report.filter.companies),
        selection_label(&report.filter.directions),
        selection_label(&report.filter.container_sizes),
    );
    out.push('\n');

    let metric = &report.completion;
    let _ = writeln!(
        out,
        "Completed in {}: {} ({} vs {})",
        metric.month,
        format_count(metric.current),
        report.completion_delta,
        metric.previous_month,
    );
    let _ = writeln!(
        out,
        "Companies this month: {} (top: {})",
        report.companies_this_month.unique,
        report.companies_this_month.top_label(),
    );
    let _ = writeln!(
        out,
        "Plates this month: {} (top: {})",
        report.plates_this_month.unique,
        report.plates_this_month.top_label(),
    );

    out.push_str("\nCompleted per day\n");
    if report.completions_by_date.is_empty() {
        out.push_str("  (none)\n");
    }
    for day in &report.completions_by_date {
        let _ = writeln!(out, "  {}  {:>6}", day.date, format_count(day.count));
    }

    write_ranking(&mut out, "Top drivers", &report.top_drivers);
    write_ranking(&mut out, "Top plates", &report.top_plates);
    write_ranking(&mut out, "Top companies", &report.top_companies);

    write_shares(&mut out, "Status colour", &report.status_colors, true);
    write_shares(&mut out, "Export / import", &report.directions, false);
    write_shares(&mut out, "Container size", &report.container_sizes, false);

    out
}

fn write_ranking(out: &mut String, title: &str, entries: &[CountEntry]) {
    let _ = writeln!(out, "\n{title}");
    if entries.is_empty() {
        out.push_str("  (none)\n");
    }
    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    for (i, e) in entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:>2}. {:<width$}  {:>6}",
            i + 1,
            e.key,
            format_count(e.count)
        );
    }
}

fn write_shares(out: &mut String, title: &str, shares: &[Share], with_palette: bool) {
    let _ = writeln!(out, "\n{title}");
    if shares.is_empty() {
        out.push_str("  (none)\n");
    }
    let width = shares.iter().map(|s| s.key.len()).max().unwrap_or(0);
    for s in shares {
        let _ = write!(
            out,
            "  {:<width$}  {:>6}  {:>5.1}%",
            s.key,
            format_count(s.count),
            s.percent
        );
        if with_palette {
            if let Some(hex) = tag_color(&s.key) {
                let _ = write!(out, "  {hex}");
            }
        }
        out.push('\n');
    }
}

// ── Driver status ──────────────────────────────────────────────────────────────

/// Render the driver view: status card, photo links, location and history.
pub fn render_driver_status(report: &DriverStatusReport) -> String {
    let mut out = String::new();
    let r = &report.latest.record;

    let _ = writeln!(out, "Driver: {}", report.driver);
    let _ = writeln!(
        out,
        "Status: {} [{}]",
        or_na(&r.status),
        report.latest.color
    );
    let _ = writeln!(
        out,
        "Last update: {} {}",
        r.date,
        r.time.as_deref().unwrap_or(NOT_AVAILABLE)
    );
    let _ = writeln!(out, "Plate: {}", or_na(&r.plate));
    let _ = writeln!(out, "Company: {}", or_na(&r.company_name));
    let _ = writeln!(out, "Export / import: {}", or_na(&r.direction));
    let _ = writeln!(out, "Container: {}", or_na(&r.container_size));

    let location = match report.location {
        Location::At(c) => format!("{}, {}", c.lat, c.lon),
        Location::Invalid => "invalid coordinates".to_string(),
        Location::Absent => "not recorded".to_string(),
    };
    let _ = writeln!(out, "Location: {location}");

    out.push_str("\nPhotos\n");
    let width = PhotoSlot::ALL
        .iter()
        .map(|s| s.column().len())
        .max()
        .unwrap_or(0);
    for photo in &report.photos {
        let target = match &photo.source {
            PhotoSource::Available { external_id } => photo_url(external_id),
            PhotoSource::Missing => "image unavailable".to_string(),
        };
        let _ = writeln!(out, "  {:<width$}  {}", photo.slot.column(), target);
    }

    let _ = writeln!(out, "\nHistory ({} rows)", report.history.len());
    for h in &report.history {
        out.push_str(&history_line(h));
    }

    out
}

fn history_line(r: &Record) -> String {
    format!(
        "  {}  {:<8}  {:<12}  {:<24}  {:<8}  {:<8}  {}\n",
        r.date,
        r.time.as_deref().unwrap_or(NOT_AVAILABLE),
        or_na(&r.plate),
        or_na(&r.company_name),
        or_na(&r.direction),
        or_na(&r.container_size),
        or_na(&r.status),
    )
}
