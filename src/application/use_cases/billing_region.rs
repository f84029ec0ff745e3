//! Billing region: which market's currency the cart and checkout display in.

use std::sync::Arc;

use tracing::instrument;

use crate::{
    application::ports::{
        catalog::CatalogPort,
        key_value_store::{KeyValueStore, read_or_none, write_best_effort},
    },
    domain::entities::{Currency, Region},
};

pub const BILLING_REGION_STORAGE_KEY: &str = "billing_region";
pub const DEFAULT_BILLING_REGION: &str = "us";

/// Shown until the catalog answers.
pub fn fallback_regions() -> Vec<Region> {
    [
        ("india", "INDIA", "India", "INR", "asia"),
        ("us", "US", "United States", "USD", "north_america"),
        ("ue", "EU", "European Union", "EUR", "europe"),
        ("au", "AU", "Australia", "AUD", "oceania"),
    ]
    .into_iter()
    .map(|(key, label, name, currency, geo)| Region {
        key: key.into(),
        label: label.into(),
        name: name.into(),
        currency: currency.into(),
        geo: geo.into(),
    })
    .collect()
}

pub struct BillingRegion {
    store: Arc<dyn KeyValueStore>,
    regions: Vec<Region>,
    selected: String,
}

impl BillingRegion {
    /// Restore the persisted selection, falling back to `us`.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let selected = read_or_none(store.as_ref(), BILLING_REGION_STORAGE_KEY)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BILLING_REGION.to_string());

        let mut billing = Self {
            store,
            regions: fallback_regions(),
            selected,
        };
        billing.ensure_known();
        billing
    }

    /// Replace the region list with the catalog's pricing regions. Failures and
    /// empty answers keep the current list.
    #[instrument(skip(self, catalog))]
    pub async fn refresh(&mut self, catalog: &dyn CatalogPort) {
        match catalog.pricing_regions().await {
            Ok(regions) if !regions.is_empty() => {
                self.regions = regions;
                self.ensure_known();
            }
            Ok(_) => tracing::debug!("Pricing regions empty, keeping fallback list"),
            Err(err) => tracing::warn!(error = %err, "Failed to load pricing regions"),
        }
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn selected_key(&self) -> &str {
        &self.selected
    }

    pub fn selected_region(&self) -> Option<&Region> {
        self.regions.iter().find(|r| r.key == self.selected)
    }

    /// Active billing currency code, `USD` when nothing matches.
    pub fn currency(&self) -> String {
        self.selected_region()
            .map(|r| r.currency.to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| Currency::Usd.as_str().to_string())
    }

    /// Select a region and persist it. Unknown keys reset to `us`.
    #[instrument(skip(self))]
    pub fn set_region(&mut self, key: &str) {
        self.selected = key.trim().to_lowercase();
        self.ensure_known();
        self.persist();
    }

    fn ensure_known(&mut self) {
        if self.selected_region().is_none() && self.selected != DEFAULT_BILLING_REGION {
            tracing::debug!(region = %self.selected, "Unknown billing region, resetting");
            self.selected = DEFAULT_BILLING_REGION.to_string();
            self.persist();
        }
    }

    fn persist(&self) {
        write_best_effort(self.store.as_ref(), BILLING_REGION_STORAGE_KEY, &self.selected);
    }
}
