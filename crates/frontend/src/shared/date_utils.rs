//! Date formatting for table cells and date inputs.

/// Format an ISO date ("2026-03-15" or "2026-03-15T09:30:00Z") as DD.MM.YYYY.
/// Anything unparseable is returned unchanged.
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Some((year, rest)) = date_part.split_once('-') {
        if let Some((month, day)) = rest.split_once('-') {
            if !year.is_empty() && !month.is_empty() && !day.is_empty() {
                return format!("{}.{}.{}", day, month, year);
            }
        }
    }
    date_str.to_string()
}

/// Today's date as an ISO string, for `<input type="date">` defaults.
pub fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-03-15"), "15.03.2026");
        assert_eq!(format_date("2026-03-15T09:30:00Z"), "15.03.2026");
    }

    #[test]
    fn test_format_date_invalid_passthrough() {
        assert_eq!(format_date("not a date"), "not a date");
        assert_eq!(format_date(""), "");
    }
}
