use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    app_error::AppResult,
    application::{ports::catalog::CatalogPort, use_cases::catalog::CatalogUseCases},
    domain::entities::{Plan, Product, Region},
};

/// Catalog port served in-process by the catalog use cases, without HTTP.
pub struct LocalCatalog {
    use_cases: Arc<CatalogUseCases>,
}

impl LocalCatalog {
    pub fn new(use_cases: Arc<CatalogUseCases>) -> Self {
        Self { use_cases }
    }
}

#[async_trait]
impl CatalogPort for LocalCatalog {
    async fn regions(&self) -> AppResult<Vec<Region>> {
        self.use_cases.list_regions().await
    }

    async fn pricing_regions(&self) -> AppResult<Vec<Region>> {
        self.use_cases.list_regions().await
    }

    async fn products(&self, region: &str) -> AppResult<Vec<Product>> {
        self.use_cases.list_products(region).await
    }

    async fn plans(&self, region: &str, product: &str, currency: &str) -> AppResult<Vec<Plan>> {
        self.use_cases
            .list_plans(region, product, Some(currency))
            .await
    }
}
