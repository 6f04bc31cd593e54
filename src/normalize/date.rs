use chrono::NaiveDateTime;

use crate::season::midnight;

/// Comparable value of a date truncated to midnight; time of day is ignored
pub fn normalize_date(date: &NaiveDateTime) -> i64 {
    timestamp_millis(&midnight(*date))
}

/// Milliseconds since the epoch, reading the civil time as UTC
pub fn timestamp_millis(date: &NaiveDateTime) -> i64 {
    date.and_utc().timestamp_millis()
}

pub fn format_ddmmyyyy(date: &NaiveDateTime) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `14/06/2025` or `14/06/2025 au 15/06/2025`
pub fn format_date_range(start: &NaiveDateTime, end: &NaiveDateTime) -> String {
    if start.date() == end.date() {
        format_ddmmyyyy(start)
    } else {
        format!("{} au {}", format_ddmmyyyy(start), format_ddmmyyyy(end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_normalize_ignores_time_of_day() {
        assert_eq!(normalize_date(&at(14, 0, 0)), normalize_date(&at(14, 18, 45)));
        assert_ne!(normalize_date(&at(14, 23, 59)), normalize_date(&at(15, 0, 0)));
    }

    #[test]
    fn test_date_range_formatting() {
        assert_eq!(format_date_range(&at(14, 9, 0), &at(14, 18, 0)), "14/06/2025");
        assert_eq!(
            format_date_range(&at(14, 9, 0), &at(15, 9, 0)),
            "14/06/2025 au 15/06/2025"
        );
    }
}
