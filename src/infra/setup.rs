use std::fs::File;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    adapters::{
        catalog::RemoteCatalog,
        http::app_state::AppState,
        persistence::{JsonFileStore, StaticCatalogRepo},
    },
    infra::{
        config::{AppConfig, StorefrontConfig, log_file_from_env},
        error::InfraError,
    },
    use_cases::{catalog::CatalogUseCases, storefront::StorefrontSession},
};

pub fn init_app_state() -> Result<AppState, InfraError> {
    let config = AppConfig::from_env()?;

    let catalog_use_cases = CatalogUseCases::new(Arc::new(StaticCatalogRepo::new()));

    Ok(AppState {
        config: Arc::new(config),
        catalog_use_cases: Arc::new(catalog_use_cases),
    })
}

/// Storefront session talking to the catalog over HTTP, persisting to a JSON file.
pub fn init_storefront(config: &StorefrontConfig) -> Result<StorefrontSession, InfraError> {
    let catalog = RemoteCatalog::new(&config.catalog_base_url).map_err(InfraError::CatalogClient)?;
    let store = JsonFileStore::open(&config.store_path);

    Ok(StorefrontSession::new(Arc::new(catalog), Arc::new(store)))
}

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "data_platform=debug,tower_http=debug".into());

    // Console (pretty logs)
    let console_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .pretty();

    // File (structured JSON logs), skipped when the file cannot be created
    let json_layer = log_file_from_env()
        .and_then(|path| match File::create(&path) {
            Ok(file) => Some(file),
            Err(err) => {
                eprintln!("cannot create log file {}: {err}", path.display());
                None
            }
        })
        .map(|file| {
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(true)
                .with_span_list(true)
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(json_layer)
        .try_init()
        .ok();
}
