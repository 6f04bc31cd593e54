use std::time::Duration;
use tokio::time::{sleep, Instant};

/// Spaces requests so that two consecutive calls are at least `delay` apart
pub struct RateLimiter {
    delay: Duration,
    last_request: Option<Instant>,
}

impl RateLimiter {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(delay_ms),
            last_request: None,
        }
    }

    pub async fn wait(&mut self) {
        if let Some(remaining) = self.remaining() {
            sleep(remaining).await;
        }
        self.last_request = Some(Instant::now());
    }

    fn remaining(&self) -> Option<Duration> {
        let elapsed = self.last_request?.elapsed();
        self.delay.checked_sub(elapsed).filter(|d| !d.is_zero())
    }
}
