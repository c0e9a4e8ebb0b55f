//! Per-driver lookups: latest status, photo references and location.

use std::collections::BTreeSet;

use fleet_core::models::{PhotoIndex, PhotoSlot, Record};
use fleet_core::status::StatusTone;
use serde::Serialize;
use tracing::debug;

// ── Latest status ─────────────────────────────────────────────────────────────

/// A driver's most recent record and the colour its status is shown in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatestStatus {
    pub record: Record,
    pub tone: StatusTone,
    /// Hex colour of `tone`.
    pub color: &'static str,
}

/// Find the record with the latest date among the rows of `driver_name`
/// (exact match). When several rows share that date the first one in source
/// order wins. `None` when the driver has no rows.
pub fn latest_record_for(records: &[Record], driver_name: &str) -> Option<LatestStatus> {
    let mut latest: Option<&Record> = None;
    for r in records.iter().filter(|r| r.driver_name == driver_name) {
        if latest.map_or(true, |best| r.date > best.date) {
            latest = Some(r);
        }
    }

    let record = latest?.clone();
    let tone = StatusTone::for_status(&record.status);
    if tone == StatusTone::Unknown {
        debug!(
            "Status \"{}\" has no colour; using the neutral tone",
            record.status
        );
    }

    Some(LatestStatus {
        record,
        tone,
        color: tone.hex(),
    })
}

/// Every row of `driver_name` in source order.
pub fn driver_history(records: &[Record], driver_name: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.driver_name == driver_name)
        .cloned()
        .collect()
}

/// Distinct non-blank driver names, sorted ascending.
pub fn driver_names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.driver_name.as_str())
        .filter(|n| !n.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ── Photos ────────────────────────────────────────────────────────────────────

/// Where the image for a photo slot can be fetched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PhotoSource {
    Available { external_id: String },
    /// No filename, or a filename the photo index does not know.
    Missing,
}

/// Resolution of one photo slot of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoRef {
    pub slot: PhotoSlot,
    pub source: PhotoSource,
}

/// Resolve the five photo slots of `record` against `index`, in slot order.
pub fn resolve_photo_references(record: &Record, index: &PhotoIndex) -> Vec<PhotoRef> {
    PhotoSlot::ALL
        .iter()
        .map(|&slot| {
            let source = record
                .photo_file(slot)
                .filter(|file| !file.trim().is_empty())
                .and_then(|file| index.get(file))
                .map(|id| PhotoSource::Available {
                    external_id: id.to_string(),
                })
                .unwrap_or(PhotoSource::Missing);
            PhotoRef { slot, source }
        })
        .collect()
}

// ── Location ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Outcome of parsing a `"lat,lon"` location cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Location {
    At(Coordinates),
    /// Present but not two numeric components.
    Invalid,
    /// Null or blank.
    Absent,
}

/// Parse a `"lat,lon"` string. Whitespace around either component is ignored.
pub fn parse_location(text: Option<&str>) -> Location {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Location::Absent;
    };

    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    let [lat, lon] = parts.as_slice() else {
        return Location::Invalid;
    };

    match (lat.parse::<f64>(), lon.parse::<f64>()) {
        (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => {
            Location::At(Coordinates { lat, lon })
        }
        _ => Location::Invalid,
    }
}
