//! In-memory catalog port for testing the storefront without HTTP.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::{
    adapters::persistence::StaticCatalogRepo,
    app_error::{AppError, AppResult},
    application::{ports::catalog::CatalogPort, use_cases::catalog::{CatalogRepoTrait, CatalogUseCases, GeoRegionProfile}},
    domain::entities::{Plan, Product, Region},
};

/// Catalog port with configurable failures and latency.
///
/// `with_static_catalog()` answers from the built-in catalog; `new()` starts
/// empty and unknown regions are not found.
#[derive(Default)]
pub struct InMemoryCatalog {
    regions: Vec<Region>,
    pricing_regions: Option<Vec<Region>>,
    backing: Option<Arc<CatalogUseCases>>,
    delay: Option<Duration>,
    fail_all: bool,
    fail_plans: bool,
    plan_calls: AtomicUsize,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_static_catalog() -> Self {
        Self {
            regions: StaticCatalogRepo::regions(),
            backing: Some(Arc::new(CatalogUseCases::new(Arc::new(
                StaticCatalogRepo::new(),
            )))),
            ..Self::default()
        }
    }

    pub fn with_pricing_regions(mut self, regions: Vec<Region>) -> Self {
        self.pricing_regions = Some(regions);
        self
    }

    /// Every call fails with an upstream error.
    pub fn failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Only plan fetches fail.
    pub fn failing_plans(mut self) -> Self {
        self.fail_plans = true;
        self
    }

    /// Plan fetches sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of plan fetches started.
    pub fn plan_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> AppResult<()> {
        if self.fail_all {
            return Err(AppError::Upstream("catalog unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogPort for InMemoryCatalog {
    async fn regions(&self) -> AppResult<Vec<Region>> {
        self.check()?;
        Ok(self.regions.clone())
    }

    async fn pricing_regions(&self) -> AppResult<Vec<Region>> {
        self.check()?;
        Ok(self
            .pricing_regions
            .clone()
            .unwrap_or_else(|| self.regions.clone()))
    }

    async fn products(&self, region: &str) -> AppResult<Vec<Product>> {
        self.check()?;
        match &self.backing {
            Some(use_cases) => use_cases.list_products(region).await,
            None => Err(AppError::NotFound("Unknown region".into())),
        }
    }

    async fn plans(&self, region: &str, product: &str, currency: &str) -> AppResult<Vec<Plan>> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.check()?;
        if self.fail_plans {
            return Err(AppError::Upstream("plans unavailable".into()));
        }

        match &self.backing {
            Some(use_cases) => use_cases.list_plans(region, product, Some(currency)).await,
            None => Ok(Vec::new()),
        }
    }
}

/// Catalog repository whose every read fails, for error-path route tests.
#[derive(Default)]
pub struct FailingCatalogRepo;

#[async_trait]
impl CatalogRepoTrait for FailingCatalogRepo {
    async fn list_regions(&self) -> AppResult<Vec<Region>> {
        Err(AppError::Storage("catalog tables unavailable".into()))
    }

    async fn list_geo_regions(&self) -> AppResult<Vec<GeoRegionProfile>> {
        Err(AppError::Storage("catalog tables unavailable".into()))
    }

    async fn list_region_product_keys(&self, _region: &str) -> AppResult<Vec<String>> {
        Err(AppError::Storage("catalog tables unavailable".into()))
    }

    async fn get_product(&self, _product: &str) -> AppResult<Option<Product>> {
        Err(AppError::Storage("catalog tables unavailable".into()))
    }

    async fn list_plans(&self, _product: &str, _region: &str, _currency: &str) -> AppResult<Vec<Plan>> {
        Err(AppError::Upstream("pricing feed unavailable".into()))
    }
}
