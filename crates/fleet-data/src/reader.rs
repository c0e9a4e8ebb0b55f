//! Loading of exported spreadsheet tables.
//!
//! A table export is either a JSON array of row objects (the shape a
//! "get all records" sheet call returns) or a CSV file with a header row.
//! Both are read into loosely-typed [`RawRow`] mappings for the normaliser.

use std::io::Read;
use std::path::Path;

use fleet_core::models::RawRow;
use fleet_core::{FleetError, Result};
use serde_json::Value;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read an exported table from `path`, choosing the parser by extension.
pub fn load_rows(path: &Path) -> Result<Vec<RawRow>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let file = || {
        std::fs::File::open(path).map_err(|source| FleetError::FileRead {
            path: path.to_path_buf(),
            source,
        })
    };

    let rows = match ext.as_deref() {
        Some("json") => {
            let mut content = String::new();
            file()?
                .read_to_string(&mut content)
                .map_err(|source| FleetError::FileRead {
                    path: path.to_path_buf(),
                    source,
                })?;
            parse_json_rows(&content)?
        }
        Some("csv") => parse_csv_rows(file()?)?,
        _ => return Err(FleetError::UnsupportedFormat(path.to_path_buf())),
    };

    debug!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse a JSON array of row objects.
pub fn parse_json_rows(content: &str) -> Result<Vec<RawRow>> {
    let value: Value = serde_json::from_str(content)?;
    let Value::Array(items) = value else {
        return Err(FleetError::InvalidTable(
            "expected a JSON array of row objects".to_string(),
        ));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(row) => Ok(row),
            other => Err(FleetError::InvalidTable(format!(
                "row {} is not an object: {}",
                i + 1,
                other
            ))),
        })
        .collect()
}

/// Parse CSV with a header row. Every cell becomes a JSON string; short rows
/// simply lack the trailing columns.
pub fn parse_csv_rows<R: Read>(reader: R) -> Result<Vec<RawRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let row: RawRow = headers
            .iter()
            .zip(record.iter())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        rows.push(row);
    }

    Ok(rows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    // ── parse_json_rows ───────────────────────────────────────────────────────

    #[test]
    fn test_parse_json_rows_keeps_cell_types() {
        let rows = parse_json_rows(r#"[{"Date": "2024-01-15", "ID": 42, "Time": ""}]"#).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["Date"], "2024-01-15");
        assert_eq!(rows[0]["ID"], 42);
        assert_eq!(rows[0]["Time"], "");
    }

    #[test]
    fn test_parse_json_rows_rejects_non_array() {
        let err = parse_json_rows(r#"{"Date": "2024-01-15"}"#).unwrap_err();
        assert!(matches!(err, FleetError::InvalidTable(_)));
    }

    #[test]
    fn test_parse_json_rows_rejects_non_object_row() {
        let err = parse_json_rows(r#"[{"Date": "2024-01-15"}, 3]"#).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_parse_json_rows_bad_json() {
        let err = parse_json_rows("[{").unwrap_err();
        assert!(matches!(err, FleetError::JsonParse(_)));
    }

    // ── parse_csv_rows ────────────────────────────────────────────────────────

    #[test]
    fn test_parse_csv_rows() {
        let csv = "Date, Name ,Status\n2024-01-15,Ahmad,selesai\n2024-01-16,Budi,muat barang\n";
        let rows = parse_csv_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["Name"], "Ahmad");
        assert_eq!(rows[1]["Status"], "muat barang");
    }

    #[test]
    fn test_parse_csv_rows_short_row() {
        let csv = "Date,Name,Status\n2024-01-15,Ahmad\n";
        let rows = parse_csv_rows(csv.as_bytes()).unwrap();
        assert_eq!(rows[0].len(), 2);
        assert!(rows[0].get("Status").is_none());
    }

    // ── load_rows ─────────────────────────────────────────────────────────────

    #[test]
    fn test_load_rows_json_file() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "records.json", r#"[{"Name": "Ahmad"}]"#);
        let rows = load_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_load_rows_csv_file_uppercase_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "records.CSV", "Name\nAhmad\nBudi\n");
        let rows = load_rows(&path).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_load_rows_unsupported_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(dir.path(), "records.xlsx", "");
        let err = load_rows(&path).unwrap_err();
        assert!(matches!(err, FleetError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_rows_missing_file() {
        let err = load_rows(Path::new("/tmp/fleet-missing-export-xyz.json")).unwrap_err();
        assert!(matches!(err, FleetError::FileRead { .. }));
    }
}
