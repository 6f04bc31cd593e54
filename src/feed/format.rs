use chrono::{DateTime, Datelike, FixedOffset, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};

const MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// fr-FR digit group separator (narrow no-break space)
pub const GROUP_SEPARATOR: char = '\u{202F}';

/// "14 juin 2025"
pub fn format_long_date(date: &NaiveDateTime) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Long start date, followed by the end date for multi-day tournaments
pub fn format_long_range(start: &NaiveDateTime, end: &NaiveDateTime, separator: &str) -> String {
    if start.date() == end.date() {
        format_long_date(start)
    } else {
        format!(
            "{}{}{}",
            format_long_date(start),
            separator,
            format_long_date(end)
        )
    }
}

/// Cents as a fr-FR euro amount without the symbol: `150050` -> "1 500,5"
pub fn format_euros(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = group_digits(cents / 100);

    match cents % 100 {
        0 => format!("{}{}", sign, whole),
        frac if frac % 10 == 0 => format!("{}{},{}", sign, whole, frac / 10),
        frac => format!("{}{},{:02}", sign, whole, frac),
    }
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 3);

    for (idx, digit) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(digit);
    }

    grouped
}

/// Civil local time pinned to the machine's offset. Times skipped by a
/// DST change are read as UTC.
fn with_local_offset(date: &NaiveDateTime) -> DateTime<FixedOffset> {
    Local
        .from_local_datetime(date)
        .earliest()
        .map(|local| local.fixed_offset())
        .unwrap_or_else(|| Utc.from_utc_datetime(date).fixed_offset())
}

/// RSS `pubDate`: "Sat, 22 Mar 2025 00:00:00 +0100"
pub fn format_rfc2822(date: &NaiveDateTime) -> String {
    with_local_offset(date).to_rfc2822()
}

/// Sitemap `lastmod`: "2025-03-22T00:00:00.000+01:00"
pub fn format_iso(date: &NaiveDateTime) -> String {
    with_local_offset(date).to_rfc3339_opts(SecondsFormat::Millis, true)
}
