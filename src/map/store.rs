use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

use super::config::MapPayload;

pub const MAP_DATA_FILE: &str = "map-data.json";

/// Receiver of the map payload
pub trait MapStore {
    fn add_data_to_map(&mut self, payload: &MapPayload) -> Result<()>;
}

/// Writes the payload as pretty JSON for the static site
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `map-data.json` inside the given output directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir.into().join(MAP_DATA_FILE))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl MapStore for JsonFileStore {
    fn add_data_to_map(&mut self, payload: &MapPayload) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(payload).context("Failed to serialize map payload")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write map data to {:?}", self.path))?;

        info!("  → Map data written to {}", self.path.display());
        Ok(())
    }
}

/// Keeps every dispatched payload in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub payloads: Vec<MapPayload>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&MapPayload> {
        self.payloads.last()
    }
}

impl MapStore for MemoryStore {
    fn add_data_to_map(&mut self, payload: &MapPayload) -> Result<()> {
        self.payloads.push(payload.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::SeasonBuckets;
    use crate::season::SeasonWindows;
    use chrono::NaiveDate;

    fn payload() -> MapPayload {
        let windows = SeasonWindows::at(
            NaiveDate::from_ymd_opt(2025, 10, 19)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        );
        MapPayload::build(&SeasonBuckets::default(), &windows)
    }

    #[test]
    fn test_json_file_store_writes_payload() {
        let dir = std::env::temp_dir().join("tournois_tt_test_map_store");
        let _ = fs::remove_dir_all(&dir);

        let mut store = JsonFileStore::in_dir(&dir);
        store.add_data_to_map(&payload()).unwrap();

        let written = fs::read_to_string(dir.join(MAP_DATA_FILE)).unwrap();
        let json: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(json["datasets"][0]["info"]["id"], "current_tournaments");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_memory_store_keeps_payloads() {
        let mut store = MemoryStore::new();
        store.add_data_to_map(&payload()).unwrap();
        store.add_data_to_map(&payload()).unwrap();

        assert_eq!(store.payloads.len(), 2);
        assert_eq!(store.last(), Some(&payload()));
    }
}
