use anyhow::Result;
use chrono::NaiveDateTime;
use log::{error, info};

use crate::api::{FfttClient, SortOrder, TournamentQuery};
use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::domain::Tournament;
use crate::season::SeasonWindows;

pub struct IngestionService {
    cache: Cache,
    api_client: FfttClient,
}

impl IngestionService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.paths.cache_dir)?,
            api_client: FfttClient::new(&config.api)?,
        })
    }

    /// Fetch tournaments from the start of the last completed season.
    ///
    /// A failed fetch leaves the previous cache in place and is returned.
    pub async fn run(&mut self, now: NaiveDateTime) -> Result<()> {
        info!("=== Starting Data Ingestion ===\n");

        let windows = SeasonWindows::at(now);
        let tournaments = self
            .fetch_tournaments(&windows)
            .await
            .inspect_err(|e| error!("Failed to fetch tournaments, keeping cached data: {:?}", e))?;
        info!("  → Fetched {} tournaments\n", tournaments.len());

        self.save_parsed_cache(&tournaments)?;
        info!("  → Saved to parsed cache\n");

        info!("=== Ingestion Complete ===");
        Ok(())
    }

    async fn fetch_tournaments(&mut self, windows: &SeasonWindows) -> Result<Vec<Tournament>> {
        info!(
            "Step 1: Fetching tournaments since {}...",
            windows.last_completed_season_start.date()
        );

        let query = Self::season_query(windows);
        self.api_client.fetch_tournaments(&query, Some(&self.cache)).await
    }

    fn save_parsed_cache(&self, tournaments: &[Tournament]) -> Result<()> {
        info!("Step 2: Saving parsed tournament cache...");
        self.cache.save_tournaments(tournaments)
    }

    fn season_query(windows: &SeasonWindows) -> TournamentQuery {
        TournamentQuery::new()
            .start_after(windows.last_completed_season_start)
            .order(SortOrder::Asc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TournamentBuilder;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 19)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_failed_fetch_is_reported_and_keeps_cache() {
        let cache_dir = std::env::temp_dir().join(format!(
            "tournois_tt_ingest_{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&cache_dir);

        let mut config = AppConfig::new();
        config.api.base_url = "http://127.0.0.1:9/api".to_string();
        config.api.timeout_secs = 2;
        config.api.rate_limit_ms = 0;
        config.paths.cache_dir = cache_dir.clone();

        let cached = vec![TournamentBuilder::new(7).on(2025, 11, 8).build()];
        Cache::new(&cache_dir).unwrap().save_tournaments(&cached).unwrap();

        let mut service = IngestionService::new(&config).unwrap();
        assert!(service.run(now()).await.is_err());

        let kept = Cache::new(&cache_dir).unwrap().load_tournaments().unwrap();
        let ids: Vec<i64> = kept.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![7]);

        std::fs::remove_dir_all(cache_dir).unwrap();
    }

    #[test]
    fn test_season_query_starts_at_previous_season() {
        let windows = SeasonWindows::at(
            NaiveDate::from_ymd_opt(2025, 10, 19)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );

        let query = IngestionService::season_query(&windows);

        assert_eq!(
            query.to_pairs(),
            vec![
                ("order[startDate]", "asc".to_string()),
                ("startDate[after]", "2024-07-01T00:00:00".to_string()),
            ]
        );
    }
}
