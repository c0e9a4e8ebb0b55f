//! Report pipelines for the two dashboard views.
//!
//! Every report is a pure function of the loaded tables and the request; it
//! is rebuilt from scratch for each query and holds no state of its own.

use std::path::Path;

use chrono::NaiveDate;
use fleet_core::models::{Field, FilterSpec, PhotoIndex, Record};
use fleet_core::status::COMPLETED_STATUS;
use fleet_core::Result;
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregator::{CountEntry, DailyCount, EntitySummary, MonthlyMetric, ReportAggregator, Share};
use crate::filter::filter;
use crate::lookup::{
    driver_history, latest_record_for, parse_location, resolve_photo_references, LatestStatus,
    Location, PhotoRef,
};
use crate::normalizer::{build_photo_index, normalize};
use crate::reader::load_rows;

// ── Loaded tables ─────────────────────────────────────────────────────────────

/// The two source tables after validation.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub records: Vec<Record>,
    pub photos: PhotoIndex,
}

impl DashboardData {
    /// Load and normalise the tracking export and, when given, the photo
    /// index export.
    pub fn load(records_path: &Path, photos_path: Option<&Path>) -> Result<Self> {
        let records = normalize(&load_rows(records_path)?)?;
        let photos = match photos_path {
            Some(path) => build_photo_index(&load_rows(path)?),
            None => PhotoIndex::new(),
        };

        info!(
            "Loaded {} records and {} indexed photos",
            records.len(),
            photos.len()
        );
        Ok(Self { records, photos })
    }
}

// ── Overview ──────────────────────────────────────────────────────────────────

/// Everything the overview dashboard displays.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewReport {
    pub filter: FilterSpec,
    pub reference_date: NaiveDate,
    pub records_total: usize,
    pub records_matched: usize,
    /// Completed shipments this month vs. last month.
    pub completion: MonthlyMetric,
    /// Completion card caption, e.g. `"▲ 25.0% (+1)"`.
    pub completion_delta: String,
    pub companies_this_month: EntitySummary,
    pub plates_this_month: EntitySummary,
    pub completions_by_date: Vec<DailyCount>,
    pub top_drivers: Vec<CountEntry>,
    pub top_plates: Vec<CountEntry>,
    pub top_companies: Vec<CountEntry>,
    pub status_colors: Vec<Share>,
    pub directions: Vec<Share>,
    pub container_sizes: Vec<Share>,
}

/// Filter `records` by `spec` and derive every overview aggregate.
///
/// `reference_date` picks the "this month" of the completion metric and the
/// month cards; `top_n` caps the rankings.
pub fn build_overview(
    records: &[Record],
    spec: &FilterSpec,
    reference_date: NaiveDate,
    top_n: usize,
) -> OverviewReport {
    let matched = filter(records, spec);

    let completion = ReportAggregator::monthly_completion_metric(&matched, reference_date);
    let this_month = ReportAggregator::completed_in_month(&matched, reference_date);

    let top = |field| ReportAggregator::top_entities(&matched, COMPLETED_STATUS, field, top_n);
    let shares = |field| {
        ReportAggregator::shares(&ReportAggregator::categorical_distribution(&matched, field))
    };

    let report = OverviewReport {
        filter: spec.clone(),
        reference_date,
        records_total: records.len(),
        records_matched: matched.len(),
        completion_delta: completion.delta_display(),
        companies_this_month: ReportAggregator::entity_summary(&this_month, Field::Company),
        plates_this_month: ReportAggregator::entity_summary(&this_month, Field::Plate),
        completions_by_date: ReportAggregator::daily_completions(&matched),
        top_drivers: top(Field::DriverName),
        top_plates: top(Field::Plate),
        top_companies: top(Field::Company),
        status_colors: shares(Field::StatusColor),
        directions: shares(Field::Direction),
        container_sizes: shares(Field::ContainerSize),
        completion,
    };

    debug!(
        matched = report.records_matched,
        completed_this_month = report.completion.current,
        "overview built"
    );
    report
}

// ── Driver status ─────────────────────────────────────────────────────────────

/// Everything the driver lookup view displays.
#[derive(Debug, Clone, Serialize)]
pub struct DriverStatusReport {
    pub driver: String,
    pub latest: LatestStatus,
    pub photos: Vec<PhotoRef>,
    pub location: Location,
    pub history: Vec<Record>,
}

/// Build the status card, photo references, location and history of one
/// driver. `None` when the driver has no rows.
pub fn build_driver_status(
    records: &[Record],
    photos: &PhotoIndex,
    driver_name: &str,
) -> Option<DriverStatusReport> {
    let latest = latest_record_for(records, driver_name)?;
    let photo_refs = resolve_photo_references(&latest.record, photos);
    let location = parse_location(latest.record.location.as_deref());

    Some(DriverStatusReport {
        driver: driver_name.to_string(),
        photos: photo_refs,
        location,
        history: driver_history(records, driver_name),
        latest,
    })
}
