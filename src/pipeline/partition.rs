use super::SeasonBuckets;
use crate::domain::Tournament;
use crate::season::SeasonWindows;

/// Split tournaments into the three map buckets.
///
/// The buckets are not a strict partition: a tournament that started
/// yesterday is both upcoming and past-in-current-season.
pub fn partition(tournaments: &[Tournament], windows: &SeasonWindows) -> SeasonBuckets {
    let select = |keep: &dyn Fn(&Tournament) -> bool| -> Vec<Tournament> {
        tournaments.iter().filter(|t| keep(t)).cloned().collect()
    };

    SeasonBuckets {
        upcoming: select(&|t| is_upcoming(t, windows)),
        past_current: select(&|t| is_past_current(t, windows)),
        previous: select(&|t| windows.is_in_last_completed_season(t.start_date)),
    }
}

/// Starts yesterday or later, so a tournament already under way still shows
pub fn is_upcoming(tournament: &Tournament, windows: &SeasonWindows) -> bool {
    tournament.start_date >= windows.yesterday_midnight
}

pub fn is_past_current(tournament: &Tournament, windows: &SeasonWindows) -> bool {
    tournament.start_date >= windows.current_season_start
        && tournament.start_date <= windows.today_midnight
}
