use thiserror::Error;

/// Longest slice of an unexpected body kept in error messages
const BODY_EXCERPT_LEN: usize = 200;

/// Failures talking to the tournament API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Tournament API returned status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Tournament API returned an error: {0}")]
    Hydra(String),
    #[error("Tournament API returned an unexpected response: {0}")]
    InvalidPayload(String),
}

impl ApiError {
    pub fn invalid_payload(body: &str) -> Self {
        ApiError::InvalidPayload(excerpt(body))
    }
}

/// First characters of `text`, marked when cut
pub fn excerpt(text: &str) -> String {
    match text.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

pub fn fetch_context(url: &str) -> String {
    format!("Failed to fetch from: {}", url)
}

pub fn cache_context(operation: &str, key: &str) -> String {
    format!("Failed to {} cache for key: {}", operation, key)
}
