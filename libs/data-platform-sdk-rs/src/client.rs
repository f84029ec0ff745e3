//! Catalog client implementation.

use std::time::Duration;

use data_platform_types::{
    DataEnvelope, ErrorBody, GeoRegion, HealthStatus, Plan, Product, Region,
};
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::CatalogError;

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the catalog client.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog API (e.g., "http://localhost:4000")
    pub base_url: String,

    /// Total request timeout (default: 30s)
    pub timeout: Option<Duration>,
}

impl CatalogConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: None,
        }
    }
}

/// Async client for the subscription catalog endpoints.
///
/// Every method returns the unwrapped `data` of the response envelope.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: Url,
    http_client: reqwest::Client,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// Fails when the base URL is empty or not a valid absolute URL.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let trimmed = config.base_url.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::Config("base_url is required".into()));
        }

        let base_url = Url::parse(trimmed)
            .map_err(|e| CatalogError::Config(format!("invalid base_url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Config(format!(
                "base_url cannot carry a path: {}",
                base_url
            )));
        }

        let http_client = reqwest::Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .timeout(config.timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT))
            .build()?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    pub async fn health(&self) -> Result<HealthStatus, CatalogError> {
        self.get(&["health"], &[]).await
    }

    pub async fn regions(&self) -> Result<Vec<Region>, CatalogError> {
        self.get(&["subscription", "regions"], &[]).await
    }

    /// Billing regions (currency display + checkout).
    pub async fn pricing_regions(&self) -> Result<Vec<Region>, CatalogError> {
        self.get(&["pricing", "regions"], &[]).await
    }

    pub async fn geo_regions(&self) -> Result<Vec<GeoRegion>, CatalogError> {
        self.get(&["subscription", "geo", "regions"], &[]).await
    }

    pub async fn geo_markets(&self, geo: &str) -> Result<Vec<Region>, CatalogError> {
        self.get(&["subscription", "geo", "regions", geo, "markets"], &[])
            .await
    }

    pub async fn products(&self, region: &str) -> Result<Vec<Product>, CatalogError> {
        self.get(&["subscription", "regions", region, "products"], &[])
            .await
    }

    /// Plans for a region/product, priced in `currency`.
    ///
    /// An empty currency is omitted so the server falls back to the region's currency.
    pub async fn plans(
        &self,
        region: &str,
        product: &str,
        currency: &str,
    ) -> Result<Vec<Plan>, CatalogError> {
        self.get(
            &["subscription", "regions", region, "products", product, "plans"],
            &[("currency", currency)],
        )
        .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        params: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = join_url(&self.base_url, segments, params);

        tracing::debug!(url = %url, "catalog request");

        let response = self
            .http_client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(api_error(
                status.as_u16(),
                status.canonical_reason(),
                &text,
            ));
        }

        let envelope: DataEnvelope<T> = response.json().await?;
        Ok(envelope.data)
    }
}

/// Append path segments to the base URL and add non-empty query params.
///
/// Each segment is percent-encoded on its own, so a key containing `/` stays
/// one segment.
fn join_url(base: &Url, segments: &[&str], params: &[(&str, &str)]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }

    let present: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    if !present.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in present {
            pairs.append_pair(k, v);
        }
    }
    url
}

/// Build an API error from a failed response, preferring the body's message.
fn api_error(status: u16, reason: Option<&str>, body: &str) -> CatalogError {
    let parsed = serde_json::from_str::<ErrorBody>(body).ok();
    let code = parsed.as_ref().and_then(|b| b.code);
    let message = parsed
        .map(|b| b.error)
        .filter(|m| !m.is_empty())
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| "Request failed".to_string());

    CatalogError::Api {
        status,
        code,
        message,
    }
}
