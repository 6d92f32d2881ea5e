//! Display helpers shared by the view-models.

use chrono::{DateTime, Local, NaiveDateTime};

/// Placeholder for a missing optional field.
pub const MISSING: &str = "Yok";

const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Format a backend timestamp the way the Turkish locale prints it,
/// `dd.MM.yyyy HH:mm:ss`.
///
/// Timestamps with an offset are shown in local time; naive ones as sent.
/// Unparseable input is returned unchanged.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, pattern) {
            return dt.format(DISPLAY_FORMAT).to_string();
        }
    }
    raw.to_string()
}

/// Signed credit delta, e.g. `+50 kredi` or `-3 kredi`.
#[must_use]
pub fn credit_delta(amount: i64) -> String {
    if amount > 0 {
        format!("+{amount} kredi")
    } else {
        format!("{amount} kredi")
    }
}

/// Credit balance, e.g. `120 kredi`.
#[must_use]
pub fn credits(balance: i64) -> String {
    format!("{balance} kredi")
}

/// The value, or [`MISSING`] when absent or blank.
#[must_use]
pub fn or_missing(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

/// `4.5 (120 değerlendirme)`, or `None` for unrated companies.
#[must_use]
pub fn rating_line(rating: Option<f64>, total: Option<i64>) -> Option<String> {
    let rating = rating?;
    Some(format!("{rating} ({} değerlendirme)", total.unwrap_or(0)))
}
