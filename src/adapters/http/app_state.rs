use std::sync::Arc;

use axum::extract::FromRef;

use crate::{infra::config::AppConfig, use_cases::catalog::CatalogUseCases};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog_use_cases: Arc<CatalogUseCases>,
}

impl FromRef<AppState> for Arc<CatalogUseCases> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.catalog_use_cases.clone()
    }
}
