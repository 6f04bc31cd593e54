//! Federation tournament API client and the local HTTP API.

pub mod client;
pub mod handlers;
pub mod hydra;
pub mod query;
pub mod routes;

pub use client::FfttClient;
pub use hydra::{HydraCollection, TournamentPage};
pub use query::{SortOrder, TournamentQuery};
