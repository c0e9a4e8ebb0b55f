use serde::{Deserialize, Serialize};

/// Percent change shown when the previous period had no completions but the
/// current one does.
pub const INFINITE_CHANGE: &str = "∞%";

/// Format a count with thousands separators.
///
/// ```
/// use fleet_core::formatting::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1234567), "1,234,567");
/// ```
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Month-over-month percent change as display text.
///
/// With no previous completions the result is `"∞%"` when there are current
/// completions and `"0%"` otherwise. Otherwise `delta / previous * 100` with
/// one decimal place.
///
/// ```
/// use fleet_core::formatting::format_percent_change;
///
/// assert_eq!(format_percent_change(5, 0), "∞%");
/// assert_eq!(format_percent_change(0, 0), "0%");
/// assert_eq!(format_percent_change(3, 4), "-25.0%");
/// ```
pub fn format_percent_change(current: u64, previous: u64) -> String {
    if previous == 0 {
        return if current > 0 {
            INFINITE_CHANGE.to_string()
        } else {
            "0%".to_string()
        };
    }
    let delta = current as f64 - previous as f64;
    format!("{:.1}%", (delta / previous as f64) * 100.0)
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero.
///
/// ```
/// use fleet_core::formatting::percentage;
///
/// assert!((percentage(1.0, 3.0, 1) - 33.3).abs() < 1e-9);
/// assert_eq!(percentage(4.0, 0.0, 1), 0.0);
/// ```
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

// ── Trend ─────────────────────────────────────────────────────────────────────

/// Direction of a month-over-month change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn of(delta: i64) -> Self {
        match delta {
            d if d > 0 => Trend::Up,
            d if d < 0 => Trend::Down,
            _ => Trend::Flat,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Trend::Up => "▲",
            Trend::Down => "▼",
            Trend::Flat => "•",
        }
    }
}

/// Card caption for a change, e.g. `"▲ 25.0% (+1)"`.
pub fn format_delta_display(delta: i64, percent_change: &str) -> String {
    format!("{} {} ({:+})", Trend::of(delta).icon(), percent_change, delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_count_groups_thousands() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(12345), "12,345");
    }

    #[test]
    fn test_percent_change_infinite_when_previous_zero() {
        assert_eq!(format_percent_change(5, 0), "∞%");
    }

    #[test]
    fn test_percent_change_zero_when_both_zero() {
        assert_eq!(format_percent_change(0, 0), "0%");
    }

    #[test]
    fn test_percent_change_negative() {
        assert_eq!(format_percent_change(3, 4), "-25.0%");
    }

    #[test]
    fn test_percent_change_positive_and_flat() {
        assert_eq!(format_percent_change(5, 4), "25.0%");
        assert_eq!(format_percent_change(4, 4), "0.0%");
        assert_eq!(format_percent_change(0, 3), "-100.0%");
    }

    #[test]
    fn test_percent_change_rounds_to_one_decimal() {
        // 1/3 = 33.333…%
        assert_eq!(format_percent_change(4, 3), "33.3%");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1.0, 4.0, 1), 25.0);
        assert_eq!(percentage(0.0, 0.0, 1), 0.0);
    }

    #[test]
    fn test_trend_of() {
        assert_eq!(Trend::of(3), Trend::Up);
        assert_eq!(Trend::of(-1), Trend::Down);
        assert_eq!(Trend::of(0), Trend::Flat);
    }

    #[test]
    fn test_delta_display() {
        assert_eq!(format_delta_display(1, "25.0%"), "▲ 25.0% (+1)");
        assert_eq!(format_delta_display(-1, "-25.0%"), "▼ -25.0% (-1)");
        assert_eq!(format_delta_display(0, "0%"), "• 0% (+0)");
    }
}
