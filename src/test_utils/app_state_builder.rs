//! Test app state builder for HTTP-level testing.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::HeaderValue;

use crate::{
    adapters::{http::app_state::AppState, persistence::StaticCatalogRepo},
    application::use_cases::catalog::{CatalogRepoTrait, CatalogUseCases},
    infra::config::AppConfig,
};

pub struct TestAppStateBuilder {
    repo: Arc<dyn CatalogRepoTrait>,
    cors_origin: HeaderValue,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppStateBuilder {
    /// Defaults to the built-in static catalog.
    pub fn new() -> Self {
        Self {
            repo: Arc::new(StaticCatalogRepo::new()),
            cors_origin: HeaderValue::from_static("http://localhost:5173"),
        }
    }

    pub fn with_repo(mut self, repo: Arc<dyn CatalogRepoTrait>) -> Self {
        self.repo = repo;
        self
    }

    pub fn with_cors_origin(mut self, origin: &'static str) -> Self {
        self.cors_origin = HeaderValue::from_static(origin);
        self
    }

    pub fn build(self) -> AppState {
        let config = AppConfig {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            cors_origin: self.cors_origin,
            log_file: None,
        };

        AppState {
            config: Arc::new(config),
            catalog_use_cases: Arc::new(CatalogUseCases::new(self.repo)),
        }
    }
}
