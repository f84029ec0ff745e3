use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use crate::app_error::{AppError, AppResult};
use crate::domain::entities::{GeoRegion, Plan, Product, Region};

// ============================================================================
// Repository Trait
// ============================================================================

/// A geography region as stored: market keys only, resolved against the region list
/// when served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeoRegionProfile {
    pub key: String,
    pub label: String,
    pub markets: Vec<String>,
}

#[async_trait]
pub trait CatalogRepoTrait: Send + Sync {
    async fn list_regions(&self) -> AppResult<Vec<Region>>;

    async fn list_geo_regions(&self) -> AppResult<Vec<GeoRegionProfile>>;

    /// Product keys offered in a region, in display order.
    async fn list_region_product_keys(&self, region: &str) -> AppResult<Vec<String>>;

    async fn get_product(&self, product: &str) -> AppResult<Option<Product>>;

    /// Every plan tier for (product, region), priced in `currency`.
    async fn list_plans(&self, product: &str, region: &str, currency: &str) -> AppResult<Vec<Plan>>;
}

// ============================================================================
// Use Cases
// ============================================================================

#[derive(Clone)]
pub struct CatalogUseCases {
    repo: Arc<dyn CatalogRepoTrait>,
}

impl CatalogUseCases {
    pub fn new(repo: Arc<dyn CatalogRepoTrait>) -> Self {
        Self { repo }
    }

    #[instrument(skip(self))]
    pub async fn list_regions(&self) -> AppResult<Vec<Region>> {
        self.repo.list_regions().await
    }

    /// Geography regions with their markets embedded. Markets that do not resolve
    /// to a region are skipped.
    #[instrument(skip(self))]
    pub async fn list_geo_regions(&self) -> AppResult<Vec<GeoRegion>> {
        let regions = self.repo.list_regions().await?;
        let geos = self.repo.list_geo_regions().await?;

        Ok(geos
            .into_iter()
            .map(|geo| GeoRegion {
                markets: resolve_markets(&geo.markets, &regions),
                key: geo.key,
                label: geo.label,
            })
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn list_geo_markets(&self, geo: &str) -> AppResult<Vec<Region>> {
        let geo_key = normalize_key(geo);
        let geos = self.repo.list_geo_regions().await?;
        let geo = geos
            .into_iter()
            .find(|g| g.key == geo_key)
            .ok_or_else(|| AppError::NotFound("Unknown geography region".into()))?;

        let regions = self.repo.list_regions().await?;
        Ok(resolve_markets(&geo.markets, &regions))
    }

    #[instrument(skip(self))]
    pub async fn list_products(&self, region: &str) -> AppResult<Vec<Product>> {
        let region = self.require_region(region).await?;

        let keys = self.repo.list_region_product_keys(&region.key).await?;
        let mut products = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(product) = self.repo.get_product(&key).await? {
                products.push(product);
            }
        }
        Ok(products)
    }

    /// Plans for a region/product. An empty currency means the region's own currency.
    #[instrument(skip(self))]
    pub async fn list_plans(
        &self,
        region: &str,
        product: &str,
        currency: Option<&str>,
    ) -> AppResult<Vec<Plan>> {
        let region = self.require_region(region).await?;
        let product_key = normalize_key(product);

        let allowed = self.repo.list_region_product_keys(&region.key).await?;
        if !allowed.contains(&product_key) {
            return Err(AppError::NotFound(
                "Product not available for region".into(),
            ));
        }

        let currency = pricing_currency(currency, &region);
        self.repo
            .list_plans(&product_key, &region.key, &currency)
            .await
    }

    async fn require_region(&self, region: &str) -> AppResult<Region> {
        let region_key = normalize_key(region);
        self.repo
            .list_regions()
            .await?
            .into_iter()
            .find(|r| r.key == region_key)
            .ok_or_else(|| AppError::NotFound("Unknown region".into()))
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase()
}

fn resolve_markets(keys: &[String], regions: &[Region]) -> Vec<Region> {
    keys.iter()
        .filter_map(|k| regions.iter().find(|r| &r.key == k).cloned())
        .collect()
}

/// Requested currency (upper-cased), else the region's currency, else USD.
fn pricing_currency(requested: Option<&str>, region: &Region) -> String {
    requested
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .or(Some(region.currency.as_str()).filter(|c| !c.is_empty()))
        .unwrap_or(data_platform_types::DEFAULT_CURRENCY)
        .to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::static_catalog::StaticCatalogRepo;

    fn use_cases() -> CatalogUseCases {
        CatalogUseCases::new(Arc::new(StaticCatalogRepo::new()))
    }

    #[tokio::test]
    async fn list_regions_returns_four_markets() {
        let regions = use_cases().list_regions().await.unwrap();
        let keys: Vec<_> = regions.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["india", "us", "ue", "au"]);
    }

    #[tokio::test]
    async fn geo_regions_embed_markets() {
        let geos = use_cases().list_geo_regions().await.unwrap();
        let asia = geos.iter().find(|g| g.key == "asia").unwrap();
        assert_eq!(asia.label, "Asia");
        assert_eq!(asia.markets.len(), 1);
        assert_eq!(asia.markets[0].currency, "INR");
    }

    #[tokio::test]
    async fn geo_markets_unknown_geo_is_not_found() {
        let err = use_cases().list_geo_markets("antarctica").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Unknown geography region"));
    }

    #[tokio::test]
    async fn geo_markets_is_case_insensitive() {
        let markets = use_cases().list_geo_markets("EUROPE").await.unwrap();
        assert_eq!(markets[0].key, "ue");
    }

    #[tokio::test]
    async fn products_follow_region_availability() {
        let products = use_cases().list_products("us").await.unwrap();
        let keys: Vec<_> = products.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["forex", "futures_options"]);
    }

    #[tokio::test]
    async fn products_unknown_region_is_not_found() {
        let err = use_cases().list_products("mars").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Unknown region"));
    }

    #[tokio::test]
    async fn plans_default_to_region_currency() {
        let plans = use_cases().list_plans("india", "equity", None).await.unwrap();
        assert_eq!(plans.len(), 5);
        let starter = &plans[0];
        assert_eq!(starter.id, "plan_equity_india_starter");
        assert_eq!(starter.currency, "INR");
        assert_eq!(starter.price_monthly_usd, 79.0);
        assert_eq!(starter.price_monthly, 6557.0);
    }

    #[tokio::test]
    async fn plans_use_requested_currency() {
        let plans = use_cases()
            .list_plans("india", "equity", Some("eur"))
            .await
            .unwrap();
        assert!(plans.iter().all(|p| p.currency == "EUR"));
        assert_eq!(plans[0].price_monthly, 73.0);
    }

    #[tokio::test]
    async fn plans_empty_currency_falls_back_to_region() {
        let plans = use_cases()
            .list_plans("au", "equity", Some(""))
            .await
            .unwrap();
        assert_eq!(plans[0].currency, "AUD");
    }

    #[tokio::test]
    async fn plans_product_not_in_region_is_not_found() {
        let err = use_cases()
            .list_plans("au", "forex", None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(ref m) if m == "Product not available for region"));
    }

    #[test]
    fn pricing_currency_fallbacks() {
        let mut region = crate::test_utils::create_test_region(|r| r.currency = "INR".into());
        assert_eq!(pricing_currency(Some("aud"), &region), "AUD");
        assert_eq!(pricing_currency(Some("  "), &region), "INR");
        region.currency.clear();
        assert_eq!(pricing_currency(None, &region), "USD");
    }
}
