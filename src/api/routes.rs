use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::handlers::{get_map, get_tournaments, healthz, AppState};

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/healthz", get(healthz))
        .route("/v1/tournaments", get(get_tournaments))
        .route("/v1/map", get(get_map))
        .with_state(state)
}
