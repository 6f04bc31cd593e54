//! Tournament dataset reconciliation.
//!
//! Per bucket the order is fixed: partition, merge curated records, dedupe.

pub mod dedup;
pub mod mock;
pub mod partition;

use log::info;
use std::cmp::Reverse;

use crate::domain::Tournament;
use crate::season::SeasonWindows;

pub use dedup::{dedupe, DedupKey};
pub use mock::{upsert, MockOverlay};
pub use partition::partition;

/// Tournaments per map layer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeasonBuckets {
    pub upcoming: Vec<Tournament>,
    pub past_current: Vec<Tournament>,
    pub previous: Vec<Tournament>,
}

impl SeasonBuckets {
    pub fn total(&self) -> usize {
        self.upcoming.len() + self.past_current.len() + self.previous.len()
    }

    fn map_each(&self, f: impl Fn(&[Tournament]) -> Vec<Tournament>) -> Self {
        Self {
            upcoming: f(&self.upcoming),
            past_current: f(&self.past_current),
            previous: f(&self.previous),
        }
    }
}

/// Partition, merge curated records, then dedupe every bucket.
/// Buckets come back sorted by start date, then id.
pub fn build_buckets(
    tournaments: &[Tournament],
    mocks: &MockOverlay,
    windows: &SeasonWindows,
) -> SeasonBuckets {
    let partitioned = partition(tournaments, windows);
    let merged = mocks.apply(&partitioned, windows);
    let buckets = merged.map_each(|bucket| {
        let mut deduped = dedupe(bucket);
        sort_by_start_asc(&mut deduped);
        deduped
    });

    info!(
        "  → Buckets: {} upcoming, {} past (current season), {} previous season",
        buckets.upcoming.len(),
        buckets.past_current.len(),
        buckets.previous.len()
    );
    buckets
}

/// Unpartitioned list for the static feed: every fetched and curated
/// record, deduped, most recent start first
pub fn feed_tournaments(tournaments: &[Tournament], mocks: &MockOverlay) -> Vec<Tournament> {
    let merged = upsert(tournaments, &mocks.all());
    let mut deduped = dedupe(&merged);
    deduped.sort_by_key(|t| (Reverse(t.start_date), Reverse(t.id)));
    deduped
}

pub fn sort_by_start_asc(tournaments: &mut [Tournament]) {
    tournaments.sort_by_key(|t| (t.start_date, t.id));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TournamentBuilder;
    use chrono::NaiveDate;

    fn windows() -> SeasonWindows {
        SeasonWindows::at(
            NaiveDate::from_ymd_opt(2025, 10, 19)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_mock_superseded_by_newer_fetched_record() {
        let fetched = vec![
            TournamentBuilder::new(500).club("C", "01").on(2025, 11, 8).build(),
            TournamentBuilder::new(501).club("C", "01").on(2025, 11, 8).build(),
        ];
        let mocks = MockOverlay::new(
            vec![TournamentBuilder::new(999_000).club("C", "01").on(2025, 11, 8).build()],
            Vec::new(),
            Vec::new(),
        );

        let buckets = build_buckets(&fetched, &mocks, &windows());

        assert_eq!(buckets.upcoming.len(), 1);
        assert_eq!(buckets.upcoming[0].id, 501);
    }

    #[test]
    fn test_buckets_are_sorted() {
        let fetched = vec![
            TournamentBuilder::new(3).club("C", "03").on(2025, 12, 1).build(),
            TournamentBuilder::new(1).club("C", "01").on(2025, 11, 1).build(),
            TournamentBuilder::new(2).club("C", "02").on(2025, 11, 1).build(),
        ];

        let buckets = build_buckets(&fetched, &MockOverlay::default(), &windows());
        let ids: Vec<i64> = buckets.upcoming.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_feed_list_is_most_recent_first() {
        let fetched = vec![
            TournamentBuilder::new(1).club("C", "01").on(2025, 1, 1).build(),
            TournamentBuilder::new(2).club("C", "02").on(2025, 11, 1).build(),
            TournamentBuilder::new(3).club("C", "02").on(2025, 11, 1).build(),
        ];
        let mocks = MockOverlay::new(
            Vec::new(),
            Vec::new(),
            vec![TournamentBuilder::new(9).club("C", "09").on(2025, 3, 22).build()],
        );

        let feed = feed_tournaments(&fetched, &mocks);
        let ids: Vec<i64> = feed.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![3, 9, 1]);
    }
}
