use log::debug;

use super::dedup::same_tournament;
use super::SeasonBuckets;
use crate::domain::Tournament;
use crate::season::SeasonWindows;

/// Append curated records whose dedup key is not already present.
///
/// Fetched entries are never removed or altered, and applying the same
/// mock set twice yields the same list as applying it once.
pub fn upsert(fetched: &[Tournament], mocks: &[Tournament]) -> Vec<Tournament> {
    let mut merged = fetched.to_vec();

    for mock in mocks {
        if merged.iter().any(|existing| same_tournament(existing, mock)) {
            debug!("Skipping curated tournament {} (already present)", mock.id);
            continue;
        }
        merged.push(mock.clone());
    }

    merged
}

/// Curated tournaments, one list per season bucket
#[derive(Debug, Clone, Default)]
pub struct MockOverlay {
    pub upcoming: Vec<Tournament>,
    pub past_current: Vec<Tournament>,
    pub previous: Vec<Tournament>,
}

impl MockOverlay {
    pub fn new(
        upcoming: Vec<Tournament>,
        past_current: Vec<Tournament>,
        previous: Vec<Tournament>,
    ) -> Self {
        Self {
            upcoming,
            past_current,
            previous,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.upcoming.is_empty() && self.past_current.is_empty() && self.previous.is_empty()
    }

    pub fn all(&self) -> Vec<Tournament> {
        self.upcoming
            .iter()
            .chain(&self.past_current)
            .chain(&self.previous)
            .cloned()
            .collect()
    }

    /// Merge each bucket against its own curated list, restricted to the
    /// season window that list belongs to.
    pub fn apply(&self, buckets: &SeasonBuckets, windows: &SeasonWindows) -> SeasonBuckets {
        let in_current = |t: &&Tournament| windows.is_in_current_season(t.start_date);
        let in_previous = |t: &&Tournament| windows.is_in_last_completed_season(t.start_date);

        let upcoming: Vec<Tournament> = self.upcoming.iter().filter(in_current).cloned().collect();
        let past_current: Vec<Tournament> =
            self.past_current.iter().filter(in_current).cloned().collect();
        let previous: Vec<Tournament> = self.previous.iter().filter(in_previous).cloned().collect();

        SeasonBuckets {
            upcoming: upsert(&buckets.upcoming, &upcoming),
            past_current: upsert(&buckets.past_current, &past_current),
            previous: upsert(&buckets.previous, &previous),
        }
    }
}
