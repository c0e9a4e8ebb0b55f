//! Validation of raw sheet rows into typed [`Record`]s and [`PhotoIndex`]es.

use std::collections::BTreeMap;

use fleet_core::data_processors::{title_case, CellText, DateParser};
use fleet_core::models::{columns, PhotoIndex, PhotoSlot, RawRow, Record};
use fleet_core::{FleetError, Result};
use tracing::debug;

/// Validate every raw row into a [`Record`], preserving source order.
///
/// Company names are upper-cased and statuses title-cased; other text cells
/// are kept as entered (trimmed). The first row whose date does not parse
/// fails the whole table with [`FleetError::RecordParse`].
pub fn normalize(rows: &[RawRow]) -> Result<Vec<Record>> {
    let records = rows
        .iter()
        .enumerate()
        .map(|(i, row)| normalize_row(i + 1, row))
        .collect::<Result<Vec<_>>>()?;

    debug!("Normalised {} records", records.len());
    Ok(records)
}

/// Build the filename → external id index from the photo sheet rows.
///
/// Rows with a blank filename or blank id are skipped.
pub fn build_photo_index(rows: &[RawRow]) -> PhotoIndex {
    let mut index = PhotoIndex::new();
    let mut skipped = 0usize;

    for row in rows {
        let filename = row.get(columns::PHOTO_FILE).and_then(CellText::of);
        let id = row.get(columns::PHOTO_ID).and_then(CellText::of);
        match (filename, id) {
            (Some(filename), Some(id)) => {
                index.insert(filename, id);
            }
            _ => skipped += 1,
        }
    }

    debug!(
        "Photo index: {} files indexed, {} rows skipped",
        index.len(),
        skipped
    );
    index
}

fn normalize_row(row_number: usize, row: &RawRow) -> Result<Record> {
    let raw_date = row.get(columns::DATE);
    let date = raw_date
        .and_then(DateParser::parse)
        .ok_or_else(|| FleetError::RecordParse {
            row: row_number,
            field: columns::DATE,
            value: CellText::describe(raw_date),
        })?;

    let text = |column: &str| CellText::or_empty(row.get(column));
    let optional = |column: &str| row.get(column).and_then(CellText::of);

    let name = optional(columns::NAME);
    // `Driver` falls back to `Name` when the column is absent; a blank `Name`
    // falls back to `Driver`.
    let driver = if row.contains_key(columns::DRIVER) {
        optional(columns::DRIVER)
    } else {
        name.clone()
    };
    let driver_name = name.or_else(|| driver.clone()).unwrap_or_default();

    let photos: BTreeMap<PhotoSlot, String> = PhotoSlot::ALL
        .iter()
        .filter_map(|slot| optional(slot.column()).map(|file| (*slot, file)))
        .collect();

    Ok(Record {
        date,
        time: optional(columns::TIME),
        driver_name,
        driver,
        plate: text(columns::PLATE),
        company_name: text(columns::COMPANY).to_uppercase(),
        direction: text(columns::DIRECTION),
        container_size: text(columns::CONTAINER_SIZE),
        status: title_case(&text(columns::STATUS)),
        status_color: text(columns::STATUS_COLOR),
        location: optional(columns::LOCATION).or_else(|| optional(columns::LOCATION_ALIAS)),
        photos,
    })
}
