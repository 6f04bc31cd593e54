mod builder;
pub mod dates;
pub mod models;

pub use builder::TournamentBuilder;
pub use dates::{format_date, parse_date};
pub use models::*;
