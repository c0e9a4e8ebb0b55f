use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Root of the dashboard's per-user state, `~/.fleet-dashboard/`.
fn dashboard_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".fleet-dashboard")
}

/// Ensure the standard `~/.fleet-dashboard/` directory hierarchy exists.
///
/// Creates `~/.fleet-dashboard/` and its `data/` subdirectory, where the
/// exports are looked up, if absent.
pub fn ensure_directories() -> anyhow::Result<()> {
    std::fs::create_dir_all(dashboard_dir().join("data"))?;
    Ok(())
}

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a `--log-level` name to an `EnvFilter` directive.
fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_lowercase(),
    }
}

/// Initialise the global `tracing` subscriber on stderr.
///
/// Stdout is reserved for the report itself. Unrecognised levels fall back to
/// `info`.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(level_directive(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    tracing_subscriber::registry().with(filter).with(layer).init();

    Ok(())
}

// ── Export discovery ───────────────────────────────────────────────────────────

/// First existing `{stem}.json` or `{stem}.csv` in `dir`.
fn find_export(dir: &Path, stem: &str) -> Option<PathBuf> {
    ["json", "csv"]
        .into_iter()
        .map(|ext| dir.join(format!("{stem}.{ext}")))
        .find(|p| p.is_file())
}

/// Locate the tracking sheet export under `~/.fleet-dashboard/data/`.
pub fn discover_records_path() -> Option<PathBuf> {
    find_export(&dashboard_dir().join("data"), "records")
}

/// Locate the photo index export under `~/.fleet-dashboard/data/`.
pub fn discover_photos_path() -> Option<PathBuf> {
    find_export(&dashboard_dir().join("data"), "photos")
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Run `f` with `HOME` pointed at `home`, restoring it afterwards.
    fn with_home<T>(home: &Path, f: impl FnOnce() -> T) -> T {
        let original_home = std::env::var_os("HOME");
        std::env::set_var("HOME", home);

        let result = f();

        match original_home {
            Some(v) => std::env::set_var("HOME", v),
            None => std::env::remove_var("HOME"),
        }
        result
    }

    // ── ensure_directories ────────────────────────────────────────────────────

    // Everything touching HOME lives in one test so parallel tests never see
    // each other's override.
    #[test]
    fn test_directories_and_discovery() {
        let tmp = TempDir::new().expect("tempdir");

        let (before, records, photos) = with_home(tmp.path(), || {
            ensure_directories().expect("ensure_directories should succeed");
            let before = discover_records_path();

            let data = tmp.path().join(".fleet-dashboard").join("data");
            std::fs::write(data.join("records.csv"), "Date\n").unwrap();
            std::fs::write(data.join("records.json"), "[]").unwrap();
            std::fs::write(data.join("photos.csv"), "Foto,ID\n").unwrap();

            (before, discover_records_path(), discover_photos_path())
        });

        let root = tmp.path().join(".fleet-dashboard");
        assert!(!root.join("logs").exists(), "no logs subdir is created");
        assert!(root.join("data").is_dir(), "data subdir must exist");
        assert!(before.is_none());
        assert_eq!(records, Some(root.join("data").join("records.json")));
        assert_eq!(photos, Some(root.join("data").join("photos.csv")));
    }

    // ── find_export ───────────────────────────────────────────────────────────

    #[test]
    fn test_find_export_ignores_directories() {
        let tmp = TempDir::new().expect("tempdir");
        std::fs::create_dir(tmp.path().join("records.json")).unwrap();
        assert!(find_export(tmp.path(), "records").is_none());
    }

    // ── level_directive ───────────────────────────────────────────────────────

    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive("DEBUG"), "debug");
        assert_eq!(level_directive("CRITICAL"), "error");
        assert_eq!(level_directive("warning"), "warn");
        assert_eq!(level_directive("ERROR"), "error");
        assert_eq!(level_directive("Trace"), "trace");
    }
}
