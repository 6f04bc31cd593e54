pub mod mocks;
pub mod settings;

pub use mocks::curated_mocks;
pub use settings::AppConfig;
