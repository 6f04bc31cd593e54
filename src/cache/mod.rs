use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::Tournament;
use crate::errors::{cache_context, excerpt};

/// Parsed cache key of the fetched tournament dataset
pub const TOURNAMENTS_KEY: &str = "data";

/// File-based cache: raw upstream pages and parsed datasets
pub struct Cache {
    raw_dir: PathBuf,
    parsed_dir: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(cache_dir: P) -> Result<Self> {
        let cache_dir = cache_dir.as_ref();
        let raw_dir = cache_dir.join("raw");
        let parsed_dir = cache_dir.join("parsed");

        fs::create_dir_all(&raw_dir).context("Failed to create raw cache directory")?;
        fs::create_dir_all(&parsed_dir).context("Failed to create parsed cache directory")?;

        Ok(Self {
            raw_dir,
            parsed_dir,
        })
    }

    // --- Two-Tier Cache Methods ---

    /// Save raw API response to cache
    pub fn save_raw(&self, id: &str, data: &Value) -> Result<()> {
        let file_path = self.build_raw_path(id);
        self.write_json(&file_path, data)
            .with_context(|| cache_context("write", id))?;
        info!("Saved raw data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load raw API response from cache
    pub fn load_raw(&self, id: &str) -> Result<Option<Value>> {
        let file_path = self.build_raw_path(id);
        self.read_json_opt(&file_path)
            .with_context(|| cache_context("read", id))
    }

    /// Save parsed data to cache
    pub fn save_parsed<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let file_path = self.build_parsed_path(key);
        self.write_json(&file_path, data)
            .with_context(|| cache_context("write", key))?;
        info!("Saved parsed data to cache: {}", file_path.display());
        Ok(())
    }

    /// Load parsed data from cache
    pub fn load_parsed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>> {
        let file_path = self.build_parsed_path(key);
        self.read_json_opt(&file_path)
            .with_context(|| cache_context("read", key))
    }

    // --- Tournament Dataset ---

    pub fn save_tournaments(&self, tournaments: &[Tournament]) -> Result<()> {
        self.save_parsed(TOURNAMENTS_KEY, &tournaments)
    }

    /// Cached tournaments, empty when nothing was ingested yet
    pub fn load_tournaments(&self) -> Result<Vec<Tournament>> {
        match self.load_parsed(TOURNAMENTS_KEY)? {
            Some(tournaments) => Ok(tournaments),
            None => {
                warn!(
                    "No cached tournaments at {}, continuing with none",
                    self.build_parsed_path(TOURNAMENTS_KEY).display()
                );
                Ok(Vec::new())
            }
        }
    }

    // --- Helper Methods ---

    fn build_raw_path(&self, id: &str) -> PathBuf {
        self.raw_dir.join(format!("{}.json", id))
    }

    fn build_parsed_path(&self, key: &str) -> PathBuf {
        self.parsed_dir.join(format!("{}.json", key))
    }

    fn write_json<T: Serialize>(&self, path: &Path, data: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(data)?;
        fs::write(path, json).context("Failed to write cache file")?;
        Ok(())
    }

    fn read_json_opt<T: for<'de> Deserialize<'de>>(&self, path: &Path) -> Result<Option<T>> {
        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(path)?;
        let data = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. Starts with: {}",
                path,
                excerpt(&json)
            )
        })?;
        Ok(Some(data))
    }
}
