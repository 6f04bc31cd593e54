use crate::domain::{TournamentBuilder, TournamentType};
use crate::pipeline::MockOverlay;

/// Curated tournaments that the federation API does not list.
///
/// Each list only contributes to its own bucket, and only while its
/// entries fall in that bucket's season window. A mock is skipped when a
/// fetched record already has its club and day, so the upstream listing
/// is kept. Ids start at 999 000 to stay clear of federation ids.
pub fn curated_mocks() -> MockOverlay {
    MockOverlay::new(Vec::new(), Vec::new(), previous_season_mocks())
}

fn previous_season_mocks() -> Vec<crate::domain::Tournament> {
    vec![
        TournamentBuilder::new(999_996)
            .identifier("MOCK-ATT-XV-2025")
            .name("Les Olymping's du 15e")
            .tournament_type(TournamentType::Departmental)
            .club("ASSOC. TENNIS DE TABLE PARIS XVe", "08751260")
            .on(2025, 3, 22)
            .until(2025, 3, 23)
            .address("31 rue Péclet", "75015", "Paris")
            .venue("Mairie du XVème - Salle des fêtes")
            .coordinates(48.8411737, 2.2991291)
            .rules_url("")
            .endowment(70_000)
            .affiche("https://cdn.paris.fr/paris/2025/02/10/original-8d98985523369228222740f1675f4a0e.png")
            .build(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::build_buckets;
    use crate::season::SeasonWindows;
    use chrono::NaiveDate;

    #[test]
    fn test_curated_mocks_are_previous_season() {
        let mocks = curated_mocks();
        let windows = SeasonWindows::at(
            NaiveDate::from_ymd_opt(2025, 10, 19)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );

        assert!(mocks.upcoming.is_empty());
        assert!(mocks.past_current.is_empty());
        assert_eq!(mocks.previous.len(), 1);

        let mock = &mocks.previous[0];
        assert!(windows.is_in_last_completed_season(mock.start_date));
        assert_eq!(mock.rules_url(), None);
        assert_eq!(mock.endowment_euros(), 700);
        assert_eq!(mock.address.postal_code, "75015");
    }

    #[test]
    fn test_fetched_listing_beats_curated_mock() {
        let windows = SeasonWindows::at(
            NaiveDate::from_ymd_opt(2025, 10, 19)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );
        let fetched = TournamentBuilder::new(4321)
            .club("ATT XV", "08751260")
            .on(2025, 3, 22)
            .build();

        let buckets = build_buckets(&[fetched], &curated_mocks(), &windows);
        let ids: Vec<i64> = buckets.previous.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![4321]);
    }
}
