use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use chrono::NaiveDateTime;
use log::error;
use serde_json::json;
use std::cmp::Reverse;
use std::sync::Arc;

use crate::api::hydra::HydraCollection;
use crate::api::query::{SortOrder, TournamentQuery};
use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::domain::Tournament;
use crate::map::MapPayload;
use crate::pipeline::{build_buckets, MockOverlay};
use crate::season::{local_now, SeasonWindows};

const DEFAULT_ITEMS_PER_PAGE: usize = 30;
const MAX_ITEMS_PER_PAGE: usize = 500;

pub struct AppState {
    pub cache: Cache,
    pub config: AppConfig,
    pub mocks: MockOverlay,
    pub clock: fn() -> NaiveDateTime,
}

impl AppState {
    pub fn new(cache: Cache, config: AppConfig, mocks: MockOverlay) -> Self {
        Self {
            cache,
            config,
            mocks,
            clock: local_now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }
}

pub async fn healthz() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn get_tournaments(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let query = match TournamentQuery::from_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str()))) {
        Ok(query) => query,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, e.to_string()),
    };

    let tournaments = match state.cache.load_tournaments() {
        Ok(tournaments) => tournaments,
        Err(e) => {
            error!("Failed to load tournaments: {:?}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Cache Error".to_string());
        }
    };

    Json(select_page(tournaments, &query)).into_response()
}

pub async fn get_map(State(state): State<Arc<AppState>>) -> Response {
    let tournaments = match state.cache.load_tournaments() {
        Ok(tournaments) => tournaments,
        Err(e) => {
            error!("Failed to load tournaments: {:?}", e);
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Cache Error".to_string());
        }
    };

    let windows = SeasonWindows::at((state.clock)());
    let buckets = build_buckets(&tournaments, &state.mocks, &windows);
    Json(MapPayload::build(&buckets, &windows)).into_response()
}

/// Filter, order and slice `tournaments` for one collection page
fn select_page(tournaments: Vec<Tournament>, query: &TournamentQuery) -> HydraCollection<Tournament> {
    let mut matching: Vec<Tournament> = tournaments
        .into_iter()
        .filter(|t| query.matches(t))
        .collect();

    match query.order.unwrap_or_default() {
        SortOrder::Asc => matching.sort_by_key(|t| (t.start_date, t.id)),
        SortOrder::Desc => matching.sort_by_key(|t| (Reverse(t.start_date), Reverse(t.id))),
    }

    let total = matching.len();
    let per_page = query
        .items_per_page
        .map(|n| n as usize)
        .unwrap_or(DEFAULT_ITEMS_PER_PAGE)
        .clamp(1, MAX_ITEMS_PER_PAGE);
    let page = query.page.unwrap_or(1).max(1);

    let member = matching
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect();

    HydraCollection::new(member, total)
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({"error": message}))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TournamentBuilder;

    fn tournaments() -> Vec<Tournament> {
        (1..=5)
            .map(|id| TournamentBuilder::new(id).on(2025, 11, id as u32).build())
            .collect()
    }

    #[test]
    fn test_select_page_defaults_to_ascending() {
        let page = select_page(tournaments(), &TournamentQuery::new().items_per_page(2));
        let ids: Vec<i64> = page.member.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![1, 2]);
        assert_eq!(page.total_items, 5);
    }

    #[test]
    fn test_select_page_descending_second_page() {
        let query = TournamentQuery::new()
            .order(SortOrder::Desc)
            .items_per_page(2)
            .page(2);

        let page = select_page(tournaments(), &query);
        let ids: Vec<i64> = page.member.iter().map(|t| t.id).collect();

        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn test_select_page_past_the_end() {
        let page = select_page(tournaments(), &TournamentQuery::new().page(9));

        assert!(page.member.is_empty());
        assert_eq!(page.total_items, 5);
    }

    #[test]
    fn test_select_page_huge_page_number() {
        let query = TournamentQuery::from_pairs([("page", "18446744073709551615")]).unwrap();

        let page = select_page(tournaments(), &query);

        assert!(page.member.is_empty());
        assert_eq!(page.total_items, 5);
    }
}
