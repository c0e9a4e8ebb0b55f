//! Record builders shared by the unit tests of this crate.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use fleet_core::models::Record;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A record with a driver, a plate derived from the name, and a status colour
/// tag of `Green` for completed rows and `Red` otherwise.
pub fn record(
    day: &str,
    name: &str,
    company: &str,
    direction: &str,
    container: &str,
    status: &str,
) -> Record {
    Record {
        date: NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(),
        time: None,
        driver_name: name.to_string(),
        driver: Some(name.to_string()),
        plate: format!("B {name}"),
        company_name: company.to_string(),
        direction: direction.to_string(),
        container_size: container.to_string(),
        status: status.to_string(),
        status_color: if status == "Selesai" { "Green" } else { "Red" }.to_string(),
        location: None,
        photos: BTreeMap::new(),
    }
}
