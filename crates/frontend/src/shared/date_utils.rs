//! Display formatting for backend timestamps (`REGDATE`, `MODDATE`, price
//! list validity).

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// "2024-03-15T14:02:26.123Z" -> "15.03.2024 14:02:26" (UTC, as sent).
/// Unparseable input comes back unchanged.
pub fn format_datetime(value: &str) -> String {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.naive_utc().format("%d.%m.%Y %H:%M:%S").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%d.%m.%Y %H:%M:%S").to_string();
    }
    format_date(value)
}

/// "2024-03-15" or any timestamp starting with it -> "15.03.2024"
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    value
        .get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
        .map(|d| d.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// Today as `YYYY-MM-DD`, for `<input type="date">` defaults
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(format_datetime("2024-03-15T14:02:26.123Z"), "15.03.2024 14:02:26");
        assert_eq!(format_datetime("2024-12-31T23:59:59"), "31.12.2024 23:59:59");
        assert_eq!(format_datetime("2024-12-31"), "31.12.2024");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "15.03.2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "15.03.2024");
    }

    #[test]
    fn test_invalid_input_is_kept() {
        assert_eq!(format_datetime("invalid"), "invalid");
        assert_eq!(format_date(""), "");
        assert_eq!(today_iso().len(), 10);
    }
}
