pub mod ingestion;
pub mod processing;
pub mod server;
