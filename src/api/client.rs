use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;

use crate::api::hydra::TournamentPage;
use crate::api::query::TournamentQuery;
use crate::cache::Cache;
use crate::config::settings::ApiSettings;
use crate::domain::Tournament;
use crate::errors::{fetch_context, ApiError};
use crate::http::RateLimitedClient;
use crate::pagination::{PageIterator, PaginationConfig};

/// Client for the federation tournament API
pub struct FfttClient {
    client: RateLimitedClient,
    endpoint: String,
    pagination: PaginationConfig,
}

impl FfttClient {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
            Some(settings.referer),
        )?;

        Ok(Self {
            client,
            endpoint: Self::build_endpoint(&settings.base_url, settings.tournaments_endpoint),
            pagination: PaginationConfig::new(settings.items_per_page),
        })
    }

    /// Fetch every page matching `query`. Raw pages are kept in `cache` when given.
    pub async fn fetch_tournaments(
        &mut self,
        query: &TournamentQuery,
        cache: Option<&Cache>,
    ) -> Result<Vec<Tournament>> {
        let mut pages = PageIterator::new(self.pagination.clone());
        let mut tournaments = Vec::new();

        loop {
            if pages.has_reached_max() {
                warn!("Stopping at page limit ({} pages)", pages.current_page() - 1);
                break;
            }

            let page_query = query
                .clone()
                .page(pages.current_page())
                .items_per_page(pages.items_per_page());
            let page = self.fetch_page(&page_query, cache).await?;
            let received = page.tournaments.len();

            info!(
                "  → Page {}: {} tournaments{}",
                pages.current_page(),
                received,
                page.total
                    .map(|total| format!(" (of {})", total))
                    .unwrap_or_default()
            );

            tournaments.extend(page.tournaments);
            if !pages.record_page(received, page.total) {
                break;
            }
        }

        info!("Fetched {} tournaments", pages.fetched());
        Ok(tournaments)
    }

    /// Fetch a single page
    pub async fn fetch_page(
        &mut self,
        query: &TournamentQuery,
        cache: Option<&Cache>,
    ) -> Result<TournamentPage> {
        let url = query.url(&self.endpoint);
        let response = self.client.get_text(&url).await?;

        if !response.status.is_success() {
            return Err(ApiError::Status {
                status: response.status.as_u16(),
                url,
            }
            .into());
        }

        if let Some(cache) = cache {
            Self::save_raw_page(cache, query, &response.body);
        }

        TournamentPage::from_body(&response.body).with_context(|| fetch_context(&url))
    }

    // --- Helper Methods ---

    fn build_endpoint(base_url: &str, path: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }

    fn save_raw_page(cache: &Cache, query: &TournamentQuery, body: &str) {
        let Ok(value) = serde_json::from_str::<Value>(body) else {
            return;
        };
        let key = format!("tournaments_page_{}", query.page.unwrap_or(1));
        if let Err(e) = cache.save_raw(&key, &value) {
            warn!("Failed to save {} to cache: {:?}", key, e);
        }
    }
}
