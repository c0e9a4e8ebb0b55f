use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::debug;

// ── DateParser ────────────────────────────────────────────────────────────────

/// Parses the `Date` cell of a sheet row into a calendar date.
pub struct DateParser;

/// Day zero of spreadsheet serial date numbers.
const SERIAL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Largest serial number spreadsheets accept (9999-12-31).
const MAX_SERIAL: f64 = 2_958_465.0;

impl DateParser {
    /// Attempt to parse a [`serde_json::Value`] into a [`NaiveDate`].
    ///
    /// Handles:
    /// * `null` / blank string → `None`
    /// * JSON string → RFC 3339, ISO (`2024-01-15`, `2024/01/15`), US
    ///   (`01/15/2024`) and then day-first (`15/01/2024`) forms, each
    ///   optionally followed by a time of day. Years must have four digits.
    /// * JSON number, or a string holding one → spreadsheet serial day number.
    pub fn parse(value: &Value) -> Option<NaiveDate> {
        match value {
            Value::String(s) => Self::parse_str(s.trim()),
            Value::Number(n) => n.as_f64().and_then(Self::from_serial),
            _ => None,
        }
    }

    fn parse_str(s: &str) -> Option<NaiveDate> {
        if s.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.date_naive());
        }

        // Month-first is tried before day-first, so `03/04/2024` is 4 March.
        const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];
        const DATETIME_FORMATS: &[&str] = &[
            "%Y-%m-%d %H:%M:%S",
            "%Y-%m-%dT%H:%M:%S",
            "%Y-%m-%d %H:%M",
            "%Y/%m/%d %H:%M:%S",
            "%m/%d/%Y %H:%M:%S",
            "%m/%d/%Y %H:%M",
            "%d/%m/%Y %H:%M:%S",
            "%d/%m/%Y %H:%M",
        ];

        // `%Y` also matches one- and two-digit years; those are rejected.
        let parsed = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok().filter(has_full_year))
            .or_else(|| {
                DATETIME_FORMATS.iter().find_map(|fmt| {
                    NaiveDateTime::parse_from_str(s, fmt)
                        .ok()
                        .map(|dt| dt.date())
                        .filter(has_full_year)
                })
            })
            .or_else(|| s.parse::<f64>().ok().and_then(Self::from_serial));
        if parsed.is_some() {
            return parsed;
        }

        debug!("DateParser: could not parse date string \"{}\"", s);
        None
    }

    /// Convert a spreadsheet serial number (days since 1899-12-30, fractional
    /// part is the time of day) into a date.
    pub fn from_serial(serial: f64) -> Option<NaiveDate> {
        if !serial.is_finite() || !(1.0..=MAX_SERIAL).contains(&serial) {
            return None;
        }
        let (y, m, d) = SERIAL_EPOCH;
        NaiveDate::from_ymd_opt(y, m, d)?.checked_add_days(Days::new(serial.trunc() as u64))
    }
}

fn has_full_year(date: &NaiveDate) -> bool {
    (1000..=9999).contains(&date.year())
}

// ── CellText ──────────────────────────────────────────────────────────────────

/// Coerces loosely-typed cells into text.
pub struct CellText;

impl CellText {
    /// Trimmed text of a cell, or `None` when the cell is null or blank.
    ///
    /// Numbers and booleans are rendered with their JSON spelling; nested
    /// arrays and objects with their compact JSON form.
    pub fn of(value: &Value) -> Option<String> {
        let text = match value {
            Value::Null => return None,
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => other.to_string(),
        };
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Like [`CellText::of`] but maps missing and blank cells to `""`.
    pub fn or_empty(value: Option<&Value>) -> String {
        value.and_then(Self::of).unwrap_or_default()
    }

    /// Short human-readable rendering of a cell for error messages.
    pub fn describe(value: Option<&Value>) -> String {
        match value {
            None => "<missing>".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

// ── Case helpers ──────────────────────────────────────────────────────────────

/// Title-case `s`: each letter that follows a non-letter is upper-cased and
/// every other letter is lower-cased.
///
/// ```
/// use fleet_core::data_processors::title_case;
///
/// assert_eq!(title_case("sampai tujuan pabrik / gudang"), "Sampai Tujuan Pabrik / Gudang");
/// assert_eq!(title_case("SELESAI"), "Selesai");
/// ```
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // ── DateParser ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(DateParser::parse(&json!("2024-01-15")), Some(date(2024, 1, 15)));
        assert_eq!(DateParser::parse(&json!("2024/01/15")), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_rfc3339_keeps_local_date() {
        assert_eq!(
            DateParser::parse(&json!("2024-01-15T23:30:00+07:00")),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_month_first_before_day_first() {
        assert_eq!(DateParser::parse(&json!("03/04/2024")), Some(date(2024, 3, 4)));
        // 25 cannot be a month, so the day-first reading applies.
        assert_eq!(DateParser::parse(&json!("25/01/2024")), Some(date(2024, 1, 25)));
    }

    #[test]
    fn test_parse_datetime_strings_drop_time() {
        assert_eq!(
            DateParser::parse(&json!("2024-01-15 08:45:00")),
            Some(date(2024, 1, 15))
        );
        assert_eq!(
            DateParser::parse(&json!("1/15/2024 8:45")),
            Some(date(2024, 1, 15))
        );
    }

    #[test]
    fn test_parse_serial_number() {
        // 45306 is 2024-01-15 in spreadsheet serial numbering.
        assert_eq!(DateParser::parse(&json!(45306)), Some(date(2024, 1, 15)));
        assert_eq!(DateParser::parse(&json!(45306.75)), Some(date(2024, 1, 15)));
    }

    #[test]
    fn test_parse_serial_number_as_text() {
        assert_eq!(DateParser::parse(&json!("45306")), Some(date(2024, 1, 15)));
        assert_eq!(DateParser::parse(&json!(" 45306.5 ")), Some(date(2024, 1, 15)));
        assert_eq!(DateParser::parse(&json!("0")), None);
    }

    #[test]
    fn test_parse_rejects_short_years() {
        assert_eq!(DateParser::parse(&json!("1/15/24")), None);
        assert_eq!(DateParser::parse(&json!("15/01/24")), None);
        assert_eq!(DateParser::parse(&json!("24-01-15")), None);
        assert_eq!(DateParser::parse(&json!("1/15/24 08:00")), None);
    }

    #[test]
    fn test_parse_rejects_dashed_day_first() {
        assert_eq!(DateParser::parse(&json!("15-01-2024")), None);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(DateParser::parse(&json!("")), None);
        assert_eq!(DateParser::parse(&json!("   ")), None);
        assert_eq!(DateParser::parse(&json!("not a date")), None);
        assert_eq!(DateParser::parse(&json!("2024-13-01")), None);
        assert_eq!(DateParser::parse(&json!(null)), None);
        assert_eq!(DateParser::parse(&json!(-3)), None);
        assert_eq!(DateParser::parse(&json!(true)), None);
    }

    // ── CellText ──────────────────────────────────────────────────────────

    #[test]
    fn test_cell_text_of() {
        assert_eq!(CellText::of(&json!("  Ekspor ")), Some("Ekspor".to_string()));
        assert_eq!(CellText::of(&json!(40)), Some("40".to_string()));
        assert_eq!(CellText::of(&json!("")), None);
        assert_eq!(CellText::of(&json!(null)), None);
    }

    #[test]
    fn test_cell_text_or_empty() {
        assert_eq!(CellText::or_empty(None), "");
        assert_eq!(CellText::or_empty(Some(&json!(null))), "");
        assert_eq!(CellText::or_empty(Some(&json!("B 1"))), "B 1");
    }

    #[test]
    fn test_cell_text_describe() {
        assert_eq!(CellText::describe(None), "<missing>");
        assert_eq!(CellText::describe(Some(&json!("x"))), "x");
        assert_eq!(CellText::describe(Some(&json!(null))), "null");
    }

    // ── title_case ────────────────────────────────────────────────────────

    #[test]
    fn test_title_case_words() {
        assert_eq!(title_case("tiba di pelabuhan"), "Tiba Di Pelabuhan");
        assert_eq!(title_case("MUAT BARANG"), "Muat Barang");
    }

    #[test]
    fn test_title_case_after_punctuation_and_digits() {
        assert_eq!(title_case("keluar pabrik/menuju pelabuhan"), "Keluar Pabrik/Menuju Pelabuhan");
        assert_eq!(title_case("20 feet"), "20 Feet");
        assert_eq!(title_case("2nd"), "2Nd");
    }

    #[test]
    fn test_title_case_empty() {
        assert_eq!(title_case(""), "");
    }
}
