use anyhow::Result;
use chrono::NaiveDateTime;
use log::info;
use std::path::PathBuf;

use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::domain::Tournament;
use crate::feed::{FeedGenerator, FeedReport};
use crate::map::{JsonFileStore, MapPayload, MapStore};
use crate::pipeline::{build_buckets, feed_tournaments, MockOverlay};
use crate::season::SeasonWindows;

/// Turns the cached dataset into the map payload and the static feed
pub struct ProcessingService {
    config: AppConfig,
    cache: Cache,
    mocks: MockOverlay,
}

impl ProcessingService {
    pub fn new(config: AppConfig, mocks: MockOverlay) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.paths.cache_dir)?,
            config,
            mocks,
        })
    }

    pub fn run(&self, now: NaiveDateTime) -> Result<()> {
        info!("=== Starting Data Processing ===\n");

        let tournaments = self.load_tournaments_from_cache()?;
        self.build_map(&tournaments, now, &mut self.default_store())?;
        self.build_feed(&tournaments, now)?;

        info!("=== Processing Complete ===");
        Ok(())
    }

    /// Map payload only, dispatched to `store`
    pub fn run_map(&self, now: NaiveDateTime, store: &mut dyn MapStore) -> Result<MapPayload> {
        info!("=== Building Map Data ===\n");
        let tournaments = self.load_tournaments_from_cache()?;
        let payload = self.build_map(&tournaments, now, store)?;
        info!("=== Map Data Complete ===");
        Ok(payload)
    }

    /// Static feed only
    pub fn run_feed(&self, now: NaiveDateTime) -> Result<FeedReport> {
        info!("=== Building Feed ===\n");
        let tournaments = self.load_tournaments_from_cache()?;
        let report = self.build_feed(&tournaments, now)?;
        info!("=== Feed Complete ===");
        Ok(report)
    }

    pub fn default_store(&self) -> JsonFileStore {
        JsonFileStore::in_dir(&self.config.paths.output_dir)
    }

    fn load_tournaments_from_cache(&self) -> Result<Vec<Tournament>> {
        info!("Step 1: Loading cached tournaments...");
        let tournaments = self.cache.load_tournaments()?;
        info!("  → Loaded {} tournaments from cache\n", tournaments.len());
        Ok(tournaments)
    }

    fn build_map(
        &self,
        tournaments: &[Tournament],
        now: NaiveDateTime,
        store: &mut dyn MapStore,
    ) -> Result<MapPayload> {
        info!("Step 2: Building map datasets...");

        let windows = SeasonWindows::at(now);
        let buckets = build_buckets(tournaments, &self.mocks, &windows);
        let payload = MapPayload::build(&buckets, &windows);
        info!("  → {} map rows across {} datasets", payload.row_count(), payload.datasets.len());

        store.add_data_to_map(&payload)?;
        Ok(payload)
    }

    fn build_feed(&self, tournaments: &[Tournament], now: NaiveDateTime) -> Result<FeedReport> {
        info!("Step 3: Generating feed...");

        let feed = feed_tournaments(tournaments, &self.mocks);
        let generator = FeedGenerator::new(self.config.site.clone(), self.output_dir())?;
        let report = generator.generate(&feed, now)?;
        Ok(report)
    }

    fn output_dir(&self) -> PathBuf {
        self.config.paths.output_dir.clone()
    }
}
