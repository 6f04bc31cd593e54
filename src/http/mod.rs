mod client;

pub use client::{RateLimitedClient, TextResponse};
