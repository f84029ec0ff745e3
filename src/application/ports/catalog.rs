//! Catalog port.
//!
//! The storefront reads regions, products and plans through this trait. It is
//! implemented over HTTP (`adapters::catalog::RemoteCatalog`) and in-process
//! (`adapters::catalog::LocalCatalog`), so any backend that speaks the catalog
//! contract can be plugged in.

use async_trait::async_trait;

use crate::app_error::AppResult;
use crate::domain::entities::{Plan, Product, Region};

#[async_trait]
pub trait CatalogPort: Send + Sync {
    async fn regions(&self) -> AppResult<Vec<Region>>;

    /// Regions used for billing currency display.
    async fn pricing_regions(&self) -> AppResult<Vec<Region>>;

    async fn products(&self, region: &str) -> AppResult<Vec<Product>>;

    /// Plans for a bucket, priced in `currency`.
    async fn plans(&self, region: &str, product: &str, currency: &str) -> AppResult<Vec<Plan>>;
}
