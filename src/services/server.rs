use anyhow::Result;
use log::info;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::handlers::AppState;
use crate::api::routes::create_router;
use crate::cache::Cache;
use crate::config::settings::AppConfig;
use crate::pipeline::MockOverlay;

pub struct ServerService {
    port: u16,
    config: AppConfig,
    mocks: MockOverlay,
}

impl ServerService {
    pub fn new(port: u16, config: AppConfig, mocks: MockOverlay) -> Self {
        Self {
            port,
            config,
            mocks,
        }
    }

    pub async fn run(&self) -> Result<()> {
        let cache = Cache::new(&self.config.paths.cache_dir)?;
        let state = Arc::new(AppState::new(cache, self.config.clone(), self.mocks.clone()));

        let app = create_router(state)
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive());

        let addr = SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Server listening on {}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}
