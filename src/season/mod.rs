//! Competitive season boundaries.
//!
//! A season runs from July 1st of year N to June 30th of year N+1. Every
//! window is derived from a single "now" so that one pipeline run sees a
//! consistent set of boundaries.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

const SEASON_START_MONTH: u32 = 7;

/// Date boundaries derived from the current date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonWindows {
    pub now: NaiveDateTime,
    pub season_start_year: i32,
    pub current_season_start: NaiveDateTime,
    pub last_completed_season_start: NaiveDateTime,
    pub last_completed_season_end: NaiveDateTime,
    pub today_midnight: NaiveDateTime,
    pub yesterday_midnight: NaiveDateTime,
}

impl SeasonWindows {
    pub fn at(now: NaiveDateTime) -> Self {
        let (season_start_year, _) = season_years(now);
        let today_midnight = midnight(now);

        Self {
            now,
            season_start_year,
            current_season_start: season_start(season_start_year),
            last_completed_season_start: season_start(season_start_year - 1),
            last_completed_season_end: season_end(season_start_year),
            today_midnight,
            yesterday_midnight: today_midnight - Duration::days(1),
        }
    }

    pub fn season_end_year(&self) -> i32 {
        self.season_start_year + 1
    }

    pub fn is_in_current_season(&self, date: NaiveDateTime) -> bool {
        date >= self.current_season_start
    }

    pub fn is_in_last_completed_season(&self, date: NaiveDateTime) -> bool {
        date >= self.last_completed_season_start && date <= self.last_completed_season_end
    }

    /// "2024-2025" for the current season
    pub fn current_label(&self) -> String {
        format!("{}-{}", self.season_start_year, self.season_end_year())
    }

    /// "2023-2024" for the season before the current one
    pub fn previous_label(&self) -> String {
        format!("{}-{}", self.season_start_year - 1, self.season_start_year)
    }

    /// Name of the timestamp column used by the upcoming-tournaments time filter
    pub fn upcoming_field_name(&self) -> String {
        format!(
            "Tournois à venir pour la saison en cours ({})",
            self.current_label()
        )
    }
}

/// (start year, end year) of the season containing `now`
pub fn season_years(now: NaiveDateTime) -> (i32, i32) {
    let start_year = if now.month() >= SEASON_START_MONTH {
        now.year()
    } else {
        now.year() - 1
    };
    (start_year, start_year + 1)
}

pub fn current_season_start(now: NaiveDateTime) -> NaiveDateTime {
    season_start(season_years(now).0)
}

/// [start, end] of the season immediately preceding the current one
pub fn last_completed_season(now: NaiveDateTime) -> (NaiveDateTime, NaiveDateTime) {
    let (start_year, _) = season_years(now);
    (season_start(start_year - 1), season_end(start_year))
}

/// Wall-clock time in the site's local timezone
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn midnight(date: NaiveDateTime) -> NaiveDateTime {
    date.date().and_time(NaiveTime::MIN)
}

fn season_start(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, SEASON_START_MONTH, 1)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

/// June 30th, 23:59:59.999 of `year`
fn season_end(year: i32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, 6, 30)
        .and_then(|date| date.and_hms_milli_opt(23, 59, 59, 999))
        .unwrap_or_default()
}
