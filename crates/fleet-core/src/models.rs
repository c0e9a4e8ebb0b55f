use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Column headers of the shipment-tracking sheet and the photo index sheet.
pub mod columns {
    pub const DATE: &str = "Date";
    pub const TIME: &str = "Time";
    pub const NAME: &str = "Name";
    pub const DRIVER: &str = "Driver";
    pub const PLATE: &str = "Plat";
    pub const COMPANY: &str = "Nama Perusahaan";
    pub const DIRECTION: &str = "Ekspor / Impor";
    pub const CONTAINER_SIZE: &str = "20 Feet / 40 Feet";
    pub const STATUS: &str = "Status";
    pub const STATUS_COLOR: &str = "Status Color";
    pub const LOCATION: &str = "Lokasi";
    pub const LOCATION_ALIAS: &str = "Location";

    /// Filename column of the photo index sheet.
    pub const PHOTO_FILE: &str = "Foto";
    /// External file identifier column of the photo index sheet.
    pub const PHOTO_ID: &str = "ID";
}

/// Sentinel selection value meaning "no restriction on this dimension".
pub const ALL_SENTINEL: &str = "All";

/// One loosely-typed spreadsheet row, keyed by column header.
pub type RawRow = serde_json::Map<String, serde_json::Value>;

// ── PhotoSlot ─────────────────────────────────────────────────────────────────

/// The five fixed photo columns attached to every tracking event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PhotoSlot {
    #[serde(rename = "Foto")]
    Photo,
    #[serde(rename = "Depan Container")]
    ContainerFront,
    #[serde(rename = "Belakang Container")]
    ContainerBack,
    #[serde(rename = "Kiri Container")]
    ContainerLeft,
    #[serde(rename = "Kanan Container")]
    ContainerRight,
}

impl PhotoSlot {
    /// All slots in display order.
    pub const ALL: [PhotoSlot; 5] = [
        PhotoSlot::Photo,
        PhotoSlot::ContainerFront,
        PhotoSlot::ContainerBack,
        PhotoSlot::ContainerLeft,
        PhotoSlot::ContainerRight,
    ];

    /// Sheet column holding this slot's filename; also used as the slot title.
    pub fn column(self) -> &'static str {
        match self {
            PhotoSlot::Photo => "Foto",
            PhotoSlot::ContainerFront => "Depan Container",
            PhotoSlot::ContainerBack => "Belakang Container",
            PhotoSlot::ContainerLeft => "Kiri Container",
            PhotoSlot::ContainerRight => "Kanan Container",
        }
    }
}

impl std::fmt::Display for PhotoSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

// ── Field ─────────────────────────────────────────────────────────────────────

/// A categorical text field of [`Record`] that reports can group by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    DriverName,
    Plate,
    Company,
    Direction,
    ContainerSize,
    Status,
    StatusColor,
}

impl Field {
    /// Sheet column the field is read from.
    pub fn column(self) -> &'static str {
        match self {
            Field::DriverName => columns::NAME,
            Field::Plate => columns::PLATE,
            Field::Company => columns::COMPANY,
            Field::Direction => columns::DIRECTION,
            Field::ContainerSize => columns::CONTAINER_SIZE,
            Field::Status => columns::STATUS,
            Field::StatusColor => columns::STATUS_COLOR,
        }
    }
}

// ── Record ────────────────────────────────────────────────────────────────────

/// One validated shipment-tracking event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: NaiveDate,
    /// Local time of day exactly as entered in the sheet.
    #[serde(default)]
    pub time: Option<String>,
    pub driver_name: String,
    /// Value of the `Driver` column. Counting metrics only count rows where
    /// this is present.
    #[serde(default)]
    pub driver: Option<String>,
    pub plate: String,
    /// Upper-cased company name.
    pub company_name: String,
    pub direction: String,
    pub container_size: String,
    /// Title-cased status.
    pub status: String,
    pub status_color: String,
    /// Raw `"lat,lon"` text, if any.
    #[serde(default)]
    pub location: Option<String>,
    /// Non-blank photo filenames keyed by slot.
    #[serde(default)]
    pub photos: BTreeMap<PhotoSlot, String>,
}

impl Record {
    /// Text value of a categorical field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::DriverName => &self.driver_name,
            Field::Plate => &self.plate,
            Field::Company => &self.company_name,
            Field::Direction => &self.direction,
            Field::ContainerSize => &self.container_size,
            Field::Status => &self.status,
            Field::StatusColor => &self.status_color,
        }
    }

    /// Stored filename for `slot`, if one was entered.
    pub fn photo_file(&self, slot: PhotoSlot) -> Option<&str> {
        self.photos.get(&slot).map(String::as_str)
    }

    pub fn has_driver(&self) -> bool {
        self.driver.is_some()
    }
}

// ── PhotoIndex ────────────────────────────────────────────────────────────────

/// Mapping from photo filename to its opaque external file identifier.
///
/// Blank filenames and blank identifiers never enter the index. A filename
/// listed more than once keeps the identifier of its last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoIndex {
    entries: BTreeMap<String, String>,
}

impl PhotoIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from `(filename, external_id)` pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut index = Self::new();
        for (filename, id) in pairs {
            index.insert(filename, id);
        }
        index
    }

    /// Insert one mapping, returning `false` when it was rejected as blank.
    pub fn insert(&mut self, filename: impl Into<String>, id: impl Into<String>) -> bool {
        let filename = filename.into();
        let id = id.into();
        if filename.trim().is_empty() || id.trim().is_empty() {
            return false;
        }
        self.entries.insert(filename, id);
        true
    }

    pub fn get(&self, filename: &str) -> Option<&str> {
        self.entries.get(filename).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Filter vocabulary ─────────────────────────────────────────────────────────

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// `true` when `start <= date <= end`. A reversed range contains nothing.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// The chosen values for one categorical filter dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// No restriction.
    #[default]
    All,
    /// Only rows whose value is one of these.
    Only(BTreeSet<String>),
}

impl Selection {
    /// Build a selection from user choices.
    ///
    /// An empty choice list, or one containing [`ALL_SENTINEL`], is
    /// unrestricted.
    pub fn from_choices<I, S>(choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut chosen = BTreeSet::new();
        for choice in choices {
            let choice = choice.into();
            if choice == ALL_SENTINEL {
                return Selection::All;
            }
            chosen.insert(choice);
        }
        if chosen.is_empty() {
            Selection::All
        } else {
            Selection::Only(chosen)
        }
    }

    pub fn allows(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(values) => values.contains(value),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

/// User-chosen constraints applied before any aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub date_range: DateRange,
    #[serde(default)]
    pub companies: Selection,
    #[serde(default)]
    pub directions: Selection,
    #[serde(default)]
    pub container_sizes: Selection,
}

impl FilterSpec {
    /// A spec that only restricts by date.
    pub fn unrestricted(date_range: DateRange) -> Self {
        Self {
            date_range,
            companies: Selection::All,
            directions: Selection::All,
            container_sizes: Selection::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_record() -> Record {
        let mut photos = BTreeMap::new();
        photos.insert(PhotoSlot::Photo, "IMG_01.jpg".to_string());
        Record {
            date: date(2024, 1, 15),
            time: Some("08:30".to_string()),
            driver_name: "Ahmad".to_string(),
            driver: Some("Ahmad".to_string()),
            plate: "B 1234 XY".to_string(),
            company_name: "PT MAJU".to_string(),
            direction: "Ekspor".to_string(),
            container_size: "20 Feet".to_string(),
            status: "Selesai".to_string(),
            status_color: "Green".to_string(),
            location: None,
            photos,
        }
    }

    // ── Record ─────────────────────────────────────────────────────────────

    #[test]
    fn test_record_field_access() {
        let r = sample_record();
        assert_eq!(r.field(Field::DriverName), "Ahmad");
        assert_eq!(r.field(Field::Plate), "B 1234 XY");
        assert_eq!(r.field(Field::Company), "PT MAJU");
        assert_eq!(r.field(Field::ContainerSize), "20 Feet");
        assert_eq!(r.field(Field::StatusColor), "Green");
    }

    #[test]
    fn test_record_photo_file() {
        let r = sample_record();
        assert_eq!(r.photo_file(PhotoSlot::Photo), Some("IMG_01.jpg"));
        assert_eq!(r.photo_file(PhotoSlot::ContainerLeft), None);
    }

    #[test]
    fn test_record_serializes_photo_slots_by_column_name() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert_eq!(json["photos"]["Foto"], "IMG_01.jpg");
        assert_eq!(json["date"], "2024-01-15");
    }

    // ── PhotoSlot ──────────────────────────────────────────────────────────

    #[test]
    fn test_photo_slot_order_and_columns() {
        let cols: Vec<&str> = PhotoSlot::ALL.iter().map(|s| s.column()).collect();
        assert_eq!(
            cols,
            vec![
                "Foto",
                "Depan Container",
                "Belakang Container",
                "Kiri Container",
                "Kanan Container"
            ]
        );
    }

    // ── PhotoIndex ─────────────────────────────────────────────────────────

    #[test]
    fn test_photo_index_skips_blank_entries() {
        let index = PhotoIndex::from_pairs(vec![
            ("a.jpg", "id-a"),
            ("", "id-blank"),
            ("b.jpg", "  "),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a.jpg"), Some("id-a"));
        assert_eq!(index.get("b.jpg"), None);
    }

    #[test]
    fn test_photo_index_last_duplicate_wins() {
        let index = PhotoIndex::from_pairs(vec![("a.jpg", "old"), ("a.jpg", "new")]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("a.jpg"), Some("new"));
    }

    // ── Selection ──────────────────────────────────────────────────────────

    #[test]
    fn test_selection_empty_is_all() {
        assert!(Selection::from_choices(Vec::<String>::new()).is_all());
    }

    #[test]
    fn test_selection_sentinel_wins() {
        let sel = Selection::from_choices(vec!["PT MAJU", "All"]);
        assert!(sel.is_all());
        assert!(sel.allows("ANYTHING"));
    }

    #[test]
    fn test_selection_only() {
        let sel = Selection::from_choices(vec!["Ekspor"]);
        assert!(sel.allows("Ekspor"));
        assert!(!sel.allows("Impor"));
    }

    // ── DateRange ──────────────────────────────────────────────────────────

    #[test]
    fn test_date_range_inclusive_bounds() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31));
        assert!(range.contains(date(2024, 1, 1)));
        assert!(range.contains(date(2024, 1, 31)));
        assert!(!range.contains(date(2024, 2, 1)));
    }

    #[test]
    fn test_date_range_reversed_is_empty() {
        let range = DateRange::new(date(2024, 2, 1), date(2024, 1, 1));
        assert!(!range.contains(date(2024, 1, 15)));
    }
}
