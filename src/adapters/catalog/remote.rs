use async_trait::async_trait;
use data_platform_sdk::{CatalogClient, CatalogConfig, CatalogError};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::catalog::CatalogPort,
    domain::entities::{Plan, Product, Region},
};

/// Catalog port over HTTP, backed by the SDK client.
pub struct RemoteCatalog {
    client: CatalogClient,
}

impl RemoteCatalog {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let client = CatalogClient::new(CatalogConfig::new(base_url)).map_err(map_catalog_error)?;
        Ok(Self { client })
    }

    pub fn from_client(client: CatalogClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CatalogPort for RemoteCatalog {
    async fn regions(&self) -> AppResult<Vec<Region>> {
        self.client.regions().await.map_err(map_catalog_error)
    }

    async fn pricing_regions(&self) -> AppResult<Vec<Region>> {
        self.client.pricing_regions().await.map_err(map_catalog_error)
    }

    async fn products(&self, region: &str) -> AppResult<Vec<Product>> {
        self.client.products(region).await.map_err(map_catalog_error)
    }

    async fn plans(&self, region: &str, product: &str, currency: &str) -> AppResult<Vec<Plan>> {
        self.client
            .plans(region, product, currency)
            .await
            .map_err(map_catalog_error)
    }
}

fn map_catalog_error(err: CatalogError) -> AppError {
    match err {
        CatalogError::Api {
            status: 404,
            message,
            ..
        } => AppError::NotFound(message),
        CatalogError::Config(msg) => {
            AppError::Internal(format!("Catalog client misconfigured: {msg}"))
        }
        other => AppError::Upstream(other.to_string()),
    }
}
