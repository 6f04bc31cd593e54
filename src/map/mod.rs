//! Map output: geo-grouped rows, dataset schema, filters, layers and the
//! payload handed to the map view.

pub mod config;
pub mod datasets;
pub mod filters;
pub mod layers;
pub mod rows;
pub mod store;

pub use config::{MapConfig, MapPayload};
pub use datasets::{build_datasets, tournament_fields, Dataset};
pub use rows::{group_by_location, project_rows, Cell, GeoGroup, MapRow, FALLBACK_COORDINATES};
pub use store::{JsonFileStore, MapStore, MemoryStore};
