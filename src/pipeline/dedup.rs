use std::collections::HashMap;

use crate::domain::Tournament;
use crate::normalize::normalize_date;

/// Identity of a real-world tournament: organizing club and start day
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub club_identifier: String,
    pub start_day: i64,
}

impl DedupKey {
    pub fn of(tournament: &Tournament) -> Self {
        Self {
            club_identifier: tournament.club.identifier.clone(),
            start_day: normalize_date(&tournament.start_date),
        }
    }
}

pub fn same_tournament(a: &Tournament, b: &Tournament) -> bool {
    a.club.identifier == b.club.identifier
        && normalize_date(&a.start_date) == normalize_date(&b.start_date)
}

/// Collapse records sharing a [`DedupKey`], keeping the highest id.
///
/// Output follows first-seen key order. Consumers needing another order
/// sort explicitly.
pub fn dedupe(tournaments: &[Tournament]) -> Vec<Tournament> {
    let mut positions: HashMap<DedupKey, usize> = HashMap::new();
    let mut survivors: Vec<Tournament> = Vec::with_capacity(tournaments.len());

    for candidate in tournaments {
        let key = DedupKey::of(candidate);
        match positions.get(&key) {
            Some(&idx) => {
                if candidate.id > survivors[idx].id {
                    survivors[idx] = candidate.clone();
                }
            }
            None => {
                positions.insert(key, survivors.len());
                survivors.push(candidate.clone());
            }
        }
    }

    survivors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TournamentBuilder;
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn tournament(id: i64, club: &str, day: u32) -> Tournament {
        TournamentBuilder::new(id).club("Club", club).on(2025, 6, day).build()
    }

    #[test]
    fn test_highest_id_survives() {
        let list = vec![tournament(100, "08940975", 14), tournament(200, "08940975", 14)];

        let result = dedupe(&list);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 200);
    }

    #[test]
    fn test_highest_id_survives_regardless_of_order() {
        let list = vec![
            tournament(300, "08940975", 14),
            tournament(100, "08940975", 14),
            tournament(200, "08940975", 14),
        ];

        assert_eq!(dedupe(&list)[0].id, 300);
    }

    #[test]
    fn test_time_of_day_does_not_split_keys() {
        let morning = tournament(1, "08751260", 22);
        let evening = TournamentBuilder::new(2)
            .club("Club", "08751260")
            .starts_at(
                NaiveDate::from_ymd_opt(2025, 6, 22)
                    .unwrap()
                    .and_hms_opt(19, 30, 0)
                    .unwrap(),
            )
            .build();

        let result = dedupe(&[morning, evening]);

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 2);
    }

    #[test]
    fn test_distinct_keys_are_kept() {
        let list = vec![
            tournament(1, "A", 14),
            tournament(2, "B", 14),
            tournament(3, "A", 15),
            tournament(4, "A", 14),
        ];

        let result = dedupe(&list);
        let keys: HashSet<DedupKey> = result.iter().map(DedupKey::of).collect();

        assert_eq!(result.len(), 3);
        assert_eq!(keys.len(), 3);

        let ids: Vec<i64> = result.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![4, 2, 3]);
    }

    #[test]
    fn test_survivor_is_max_id_per_key() {
        let list: Vec<Tournament> = (0..40)
            .map(|i| tournament((i * 37) % 101, ["A", "B", "C"][(i % 3) as usize], 1 + (i % 4) as u32))
            .collect();

        let result = dedupe(&list);

        for survivor in &result {
            let key = DedupKey::of(survivor);
            let max_id = list
                .iter()
                .filter(|t| DedupKey::of(t) == key)
                .map(|t| t.id)
                .max()
                .unwrap();
            assert_eq!(survivor.id, max_id);
        }
        let distinct: HashSet<DedupKey> = list.iter().map(DedupKey::of).collect();
        assert_eq!(result.len(), distinct.len());
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe(&[]).is_empty());
    }
}
