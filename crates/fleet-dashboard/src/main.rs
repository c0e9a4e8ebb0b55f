mod bootstrap;
mod render;

use anyhow::{Context, Result};
use fleet_core::models::{DateRange, FilterSpec, Selection, ALL_SENTINEL};
use fleet_core::settings::Settings;
use fleet_core::FleetError;
use fleet_core::time_utils::today_in;
use fleet_data::analysis::{build_driver_status, build_overview, DashboardData};
use fleet_data::filter::filter_options;
use fleet_data::lookup::driver_names;

fn main() -> Result<()> {
    let settings = Settings::load_with_last_used();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Fleet Dashboard v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "View: {}, Format: {}, Timezone: {}",
        settings.view,
        settings.format,
        settings.timezone
    );

    let Some(records_path) = settings
        .records
        .clone()
        .or_else(bootstrap::discover_records_path)
    else {
        return Err(FleetError::Config(
            "no tracking export given; pass --records or place records.json / records.csv in ~/.fleet-dashboard/data/"
                .to_string(),
        )
        .into());
    };
    let photos_path = settings
        .photos
        .clone()
        .or_else(bootstrap::discover_photos_path);

    let data = DashboardData::load(&records_path, photos_path.as_deref())
        .with_context(|| format!("failed to load {}", records_path.display()))?;

    match settings.view.as_str() {
        "overview" => run_overview(&settings, &data)?,
        "driver" => run_driver(&settings, &data)?,
        unknown => eprintln!("Unknown view: {}", unknown),
    }

    Ok(())
}

fn run_overview(settings: &Settings, data: &DashboardData) -> Result<()> {
    let options = filter_options(&data.records);
    let Some(bounds) = options.date_bounds else {
        tracing::info!("The tracking export has no rows");
        println!("No records to report.");
        return Ok(());
    };

    let companies = company_choices(&settings.company);
    let spec = FilterSpec {
        date_range: DateRange::new(
            settings.start.unwrap_or(bounds.start),
            settings.end.unwrap_or(bounds.end),
        ),
        companies: Selection::from_choices(companies.iter().cloned()),
        directions: Selection::from_choices(settings.direction.iter().cloned()),
        container_sizes: Selection::from_choices(settings.container.iter().cloned()),
    };
    warn_unknown_choices("company", &companies, &options.companies);
    warn_unknown_choices("direction", &settings.direction, &options.directions);
    warn_unknown_choices("container", &settings.container, &options.container_sizes);

    let reference_date = settings
        .reference_date
        .unwrap_or_else(|| today_in(&settings.timezone));

    let report = build_overview(&data.records, &spec, reference_date, settings.top as usize);

    if settings.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_overview(&report));
    }
    Ok(())
}

fn run_driver(settings: &Settings, data: &DashboardData) -> Result<()> {
    let names = driver_names(&data.records);
    let Some(driver) = settings.driver.clone().or_else(|| names.first().cloned()) else {
        tracing::info!("The tracking export has no named drivers");
        println!("No drivers to look up.");
        return Ok(());
    };

    let Some(report) = build_driver_status(&data.records, &data.photos, &driver) else {
        println!("No data found for driver {driver}.");
        return Ok(());
    };

    if settings.format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render::render_driver_status(&report));
    }
    Ok(())
}

/// Upper-case `--company` values the way company names are stored.
fn company_choices(chosen: &[String]) -> Vec<String> {
    chosen
        .iter()
        .map(|c| {
            if c == ALL_SENTINEL {
                c.clone()
            } else {
                c.trim().to_uppercase()
            }
        })
        .collect()
}

/// Warn about selected values that occur in no record.
fn warn_unknown_choices(dimension: &str, chosen: &[String], known: &[String]) {
    for value in chosen {
        if value != ALL_SENTINEL && !known.contains(value) {
            tracing::warn!("{} \"{}\" does not occur in the data", dimension, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fleet_core::models::Record;
    use fleet_data::filter::filter;
    use std::collections::BTreeMap;

    // ── company_choices ───────────────────────────────────────────────────────

    #[test]
    fn test_company_choices_match_stored_case() {
        let chosen = company_choices(&["pt maju".to_string(), " Pt Jaya ".to_string()]);
        assert_eq!(chosen, vec!["PT MAJU", "PT JAYA"]);
    }

    #[test]
    fn test_company_choices_keep_all_sentinel() {
        let chosen = company_choices(&["All".to_string()]);
        assert!(Selection::from_choices(chosen).is_all());
    }

    #[test]
    fn test_lower_case_company_filter_keeps_rows() {
        let record = Record {
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            time: None,
            driver_name: "Ahmad".to_string(),
            driver: Some("Ahmad".to_string()),
            plate: "B 1".to_string(),
            company_name: "PT MAJU".to_string(),
            direction: "Ekspor".to_string(),
            container_size: "20 Feet".to_string(),
            status: "Selesai".to_string(),
            status_color: "Green".to_string(),
            location: None,
            photos: BTreeMap::new(),
        };
        let mut spec = FilterSpec::unrestricted(DateRange::new(record.date, record.date));
        spec.companies = Selection::from_choices(company_choices(&["pt maju".to_string()]));

        assert_eq!(filter(&[record], &spec).len(), 1);
    }
}
