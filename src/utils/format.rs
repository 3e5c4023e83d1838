use crate::utils::error::{BlogError, Result};
use chrono::{DateTime, Datelike, NaiveDate};

const PT_BR_MONTHS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Renders a publication timestamp as `dd LLL yyyy` in pt-BR, e.g. `25 mar 2021`.
///
/// The calendar date is taken in the offset the input carries; no conversion to the
/// local zone happens. Prismic writes offsets without a colon (`+0000`), so that form is
/// accepted alongside RFC 3339 and bare dates.
pub fn format_date(input: &str) -> Result<String> {
    let date = parse_date(input.trim()).ok_or_else(|| BlogError::DateFormat {
        input: input.to_string(),
    })?;

    Ok(format!(
        "{:02} {} {:04}",
        date.day(),
        PT_BR_MONTHS[date.month0() as usize],
        date.year()
    ))
}

/// Like [`format_date`] for optional timestamps; unpublished content renders as nothing.
pub fn format_optional_date(input: Option<&str>) -> Result<Option<String>> {
    input.map(format_date).transpose()
}

/// Display form for listing rows: an unparseable or missing timestamp shows as `-`
/// so one bad record does not hide the rest.
pub fn display_date(input: Option<&str>) -> String {
    match format_optional_date(input) {
        Ok(Some(date)) => date,
        Ok(None) => "-".to_string(),
        Err(e) => {
            tracing::warn!("⚠️ {}", e);
            "-".to_string()
        }
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%z") {
        return Some(dt.date_naive());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").ok()
}
