//! Storefront session: the subscription builder behind the regions page.
//!
//! Owns the selection state, the catalog caches, the cart and the billing
//! region. Plan lists are cached per (bucket, currency) and fetched
//! concurrently, one task per bucket. Fetches that go stale (currency switched,
//! bucket unticked) are aborted and never land in the cache.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::instrument;

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::{catalog::CatalogPort, key_value_store::KeyValueStore},
        use_cases::{
            billing_region::BillingRegion,
            cart::Cart,
            checkout::{CheckoutForm, OrderConfirmation, place_order},
            selection::{BucketState, SelectionState},
        },
    },
    domain::{
        entities::{
            Plan, PlanTier, Product, Region,
            bucket::BucketKey,
            cart_item::{CartItem, CartItemMeta},
        },
        pricing::{
            DISCOUNT_RATE, DiscountedTotal, apply_discount, compute_feature_price,
            normalize_selected_features, required_features,
        },
    },
};

const PLAN_COLUMN_ORDER: [&str; 4] = ["Starter", "Pro", "Business", "Elite"];

const SUMMARY_GROUP_ORDER: [&str; 6] = [
    "equity",
    "forex",
    "option",
    "future options",
    "fixed income",
    "crypto",
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PlanCacheKey {
    bucket: BucketKey,
    currency: String,
}

/// Contents of the feature dialog for one plan card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureDialog {
    pub bucket: BucketKey,
    pub plan: Plan,
    pub required: Vec<String>,
    pub selected: Vec<String>,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub bucket: BucketKey,
    pub plan_key: PlanTier,
    pub label: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryGroup {
    pub key: String,
    pub label: String,
    pub rows: Vec<SummaryRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencySummary {
    pub currency: String,
    pub groups: Vec<SummaryGroup>,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

pub struct StorefrontSession {
    catalog: Arc<dyn CatalogPort>,
    selection: SelectionState,
    regions: Vec<Region>,
    products_by_region: HashMap<String, Vec<Product>>,
    plans: HashMap<PlanCacheKey, Vec<Plan>>,
    in_flight: HashMap<PlanCacheKey, JoinHandle<AppResult<Vec<Plan>>>>,
    currency: String,
    cart: Cart,
    billing: BillingRegion,
}

impl StorefrontSession {
    pub fn new(catalog: Arc<dyn CatalogPort>, store: Arc<dyn KeyValueStore>) -> Self {
        let billing = BillingRegion::load(store.clone());
        let currency = billing.currency();

        Self {
            catalog,
            selection: SelectionState::new(),
            regions: Vec::new(),
            products_by_region: HashMap::new(),
            plans: HashMap::new(),
            in_flight: HashMap::new(),
            currency,
            cart: Cart::load(store),
            billing,
        }
    }

    // ========================================================================
    // Catalog loading
    // ========================================================================

    /// Load the market list and refresh the billing regions. Failures leave
    /// the lists empty or unchanged.
    #[instrument(skip(self))]
    pub async fn load_regions(&mut self) {
        self.regions = self.catalog.regions().await.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Failed to load regions");
            Vec::new()
        });

        self.billing.refresh(self.catalog.as_ref()).await;
        let currency = self.billing.currency();
        self.change_currency(&currency);
    }

    /// Load products for every selected region that has none cached yet.
    #[instrument(skip(self))]
    pub async fn load_products(&mut self) {
        let missing: Vec<String> = self
            .selection
            .selected_regions()
            .iter()
            .filter(|r| !self.products_by_region.contains_key(*r))
            .cloned()
            .collect();

        for region in missing {
            let products = self.catalog.products(&region).await.unwrap_or_else(|err| {
                tracing::warn!(region = %region, error = %err, "Failed to load products");
                Vec::new()
            });
            self.products_by_region.insert(region, products);
        }
    }

    /// Spawn a plan fetch for every selected bucket missing from the cache for
    /// the active currency. Returns immediately; see [`Self::settle_plans`].
    pub fn request_plans(&mut self) {
        for bucket in self.selection.selected_buckets() {
            let key = PlanCacheKey {
                bucket,
                currency: self.currency.clone(),
            };
            if self.plans.contains_key(&key) || self.in_flight.contains_key(&key) {
                continue;
            }

            let catalog = self.catalog.clone();
            let (region, product, currency) = (
                key.bucket.region.clone(),
                key.bucket.product.clone(),
                key.currency.clone(),
            );
            tracing::debug!(bucket = %key.bucket, currency = %key.currency, "Fetching plans");

            let handle = tokio::spawn(async move {
                catalog.plans(&region, &product, &currency).await
            });
            self.in_flight.insert(key, handle);
        }
    }

    /// Wait for every in-flight fetch and cache the results. A failed fetch
    /// caches an empty list.
    #[instrument(skip(self), fields(in_flight = self.in_flight.len()))]
    pub async fn settle_plans(&mut self) {
        let pending: Vec<_> = self.in_flight.drain().collect();

        for (key, handle) in pending {
            let plans = match handle.await {
                Ok(Ok(plans)) => plans,
                Ok(Err(err)) => {
                    tracing::warn!(bucket = %key.bucket, error = %err, "Failed to load plans");
                    Vec::new()
                }
                Err(err) if err.is_cancelled() => continue,
                Err(err) => {
                    tracing::error!(bucket = %key.bucket, error = %err, "Plan fetch task failed");
                    Vec::new()
                }
            };

            if key.currency != self.currency || !self.selection.is_bucket_active(&key.bucket) {
                continue;
            }

            let plans = plans
                .into_iter()
                .map(|p| fill_plan_defaults(p, &key))
                .collect();
            self.plans.insert(key, plans);
        }
    }

    /// Fetch every missing plan list for the active currency, concurrently.
    pub async fn load_plans(&mut self) {
        self.request_plans();
        self.settle_plans().await;
    }

    /// Switch the display currency. Fetches for any other currency are
    /// aborted; selections are kept.
    #[instrument(skip(self))]
    pub fn change_currency(&mut self, currency: &str) {
        let currency = currency.trim().to_uppercase();
        if currency == self.currency {
            return;
        }
        self.currency = currency;
        self.abort_stale();
    }

    /// Change the billing region; the display currency follows it.
    pub fn set_billing_region(&mut self, key: &str) {
        self.billing.set_region(key);
        let currency = self.billing.currency();
        self.change_currency(&currency);
    }

    fn abort_stale(&mut self) {
        let currency = &self.currency;
        let selection = &self.selection;
        self.in_flight.retain(|key, handle| {
            let live = &key.currency == currency && selection.is_bucket_active(&key.bucket);
            if !live {
                tracing::debug!(bucket = %key.bucket, currency = %key.currency, "Aborting stale plan fetch");
                handle.abort();
            }
            live
        });
    }

    // ========================================================================
    // Selection
    // ========================================================================

    pub fn toggle_region(&mut self, region: &str) -> bool {
        let selected = self.selection.toggle_region(region);
        if !selected {
            self.abort_stale();
        }
        selected
    }

    pub fn toggle_product(&mut self, region: &str, product: &str) -> bool {
        let selected = self.selection.toggle_product(region, product);
        if !selected {
            self.abort_stale();
        }
        selected
    }

    #[instrument(skip(self))]
    pub fn select_plan(&mut self, bucket: &BucketKey, tier: PlanTier) -> AppResult<()> {
        let plan = self.loaded_plan(bucket, tier)?.clone();
        self.selection.select_plan(bucket, &plan);
        Ok(())
    }

    /// Prepare the feature dialog for a plan card. Initializes the selection
    /// like [`Self::select_plan`] without selecting the plan.
    pub fn open_features(&mut self, bucket: &BucketKey, tier: PlanTier) -> AppResult<FeatureDialog> {
        let plan = self.loaded_plan(bucket, tier)?.clone();
        self.selection.init_features(bucket, &plan);
        Ok(self.feature_dialog(bucket, plan))
    }

    pub fn toggle_feature(
        &mut self,
        bucket: &BucketKey,
        tier: PlanTier,
        feature: &str,
    ) -> AppResult<FeatureDialog> {
        let plan = self.loaded_plan(bucket, tier)?.clone();
        self.selection.toggle_feature(bucket, &plan, feature);
        Ok(self.feature_dialog(bucket, plan))
    }

    pub fn bucket_state(&self, bucket: &BucketKey) -> BucketState {
        let plan = self
            .selection
            .selected_plan(bucket)
            .and_then(|tier| self.loaded_plan(bucket, tier).ok());
        self.selection.bucket_state(bucket, plan)
    }

    /// Drop the plan choice behind a summary row.
    pub fn remove_summary_item(&mut self, bucket: &BucketKey) {
        self.selection.deselect_plan(bucket);
    }

    fn feature_dialog(&self, bucket: &BucketKey, plan: Plan) -> FeatureDialog {
        let selected = self.selection.features_for(bucket, &plan);
        FeatureDialog {
            bucket: bucket.clone(),
            required: required_features(&plan),
            price: compute_feature_price(&plan, Some(&selected)),
            selected,
            plan,
        }
    }

    // ========================================================================
    // Views
    // ========================================================================

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn products(&self, region: &str) -> &[Product] {
        self.products_by_region
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Plans of a bucket for the active currency, `None` while loading.
    pub fn plans_for(&self, bucket: &BucketKey) -> Option<&[Plan]> {
        self.plans
            .get(&PlanCacheKey {
                bucket: bucket.clone(),
                currency: self.currency.clone(),
            })
            .map(Vec::as_slice)
    }

    pub fn is_loading(&self, bucket: &BucketKey) -> bool {
        self.plans_for(bucket).is_none() && self.selection.is_bucket_active(bucket)
    }

    /// Distinct plan names across the selected buckets, in column order.
    pub fn plan_columns(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for bucket in self.selection.selected_buckets() {
            for plan in self.plans_for(&bucket).unwrap_or_default() {
                if !names.contains(&plan.name) {
                    names.push(plan.name.clone());
                }
            }
        }

        names.sort_by(|a, b| {
            preferred_order(a, &PLAN_COLUMN_ORDER).cmp(&preferred_order(b, &PLAN_COLUMN_ORDER))
        });
        names
    }

    /// Selected plans grouped by currency and product, with discounted totals.
    pub fn summary_by_currency(&self) -> Vec<CurrencySummary> {
        let mut by_currency: Vec<(String, Vec<(String, String, SummaryRow)>)> = Vec::new();

        for (bucket, plan) in self.selected_plans() {
            let selected = self.selection.stored_features(&bucket, plan.key);
            let price = compute_feature_price(plan, selected);
            let product_label = self.product_label(&bucket);

            let row = SummaryRow {
                label: format!("{} {}", self.region_label(&bucket.region), plan.name),
                plan_key: plan.key,
                price,
                bucket,
            };
            let entry = (product_label.to_lowercase(), title_case(&product_label), row);

            match by_currency.iter_mut().find(|(c, _)| c == &self.currency) {
                Some((_, rows)) => rows.push(entry),
                None => by_currency.push((self.currency.clone(), vec![entry])),
            }
        }

        by_currency
            .into_iter()
            .map(|(currency, rows)| {
                let subtotal: f64 = rows.iter().map(|(_, _, r)| r.price as f64).sum();
                let DiscountedTotal {
                    subtotal,
                    discount,
                    total,
                } = apply_discount(subtotal, DISCOUNT_RATE);

                CurrencySummary {
                    currency,
                    groups: group_rows(rows),
                    subtotal,
                    discount,
                    total,
                }
            })
            .collect()
    }

    // ========================================================================
    // Cart
    // ========================================================================

    /// Add the selected plan of a bucket to the cart at its feature price.
    #[instrument(skip(self))]
    pub fn add_to_cart(&mut self, bucket: &BucketKey) -> AppResult<()> {
        let tier = self
            .selection
            .selected_plan(bucket)
            .ok_or_else(|| AppError::InvalidInput("No plan selected".into()))?;
        let plan = self.loaded_plan(bucket, tier)?.clone();

        let item = self.cart_item(bucket, &plan);
        self.cart.add(item);
        Ok(())
    }

    /// Add every selected, loaded plan. Returns how many were offered to the cart.
    pub fn add_all_to_cart(&mut self) -> usize {
        let items: Vec<CartItem> = self
            .selected_plans()
            .map(|(bucket, plan)| self.cart_item(&bucket, plan))
            .collect();

        let count = items.len();
        for item in items {
            self.cart.add(item);
        }
        count
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn billing(&self) -> &BillingRegion {
        &self.billing
    }

    pub fn checkout(&mut self, form: &CheckoutForm) -> AppResult<OrderConfirmation> {
        place_order(&mut self.cart, &self.billing, form)
    }

    fn cart_item(&self, bucket: &BucketKey, plan: &Plan) -> CartItem {
        let stored = self.selection.stored_features(bucket, plan.key);
        let selected = match stored {
            Some(s) => normalize_selected_features(plan, Some(s)),
            None => required_features(plan),
        };

        CartItem {
            id: plan.id.clone(),
            name: format!("{} • {} • {}", bucket.region, bucket.product, plan.name),
            region: bucket.region.clone(),
            product: bucket.product.clone(),
            price_monthly: compute_feature_price(plan, Some(&selected)) as f64,
            price_monthly_usd: Some(plan.price_monthly_usd),
            currency: self.currency.clone(),
            qty: 1,
            meta: Some(CartItemMeta {
                plan_key: plan.key,
                selected_features: selected,
            }),
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn loaded_plan(&self, bucket: &BucketKey, tier: PlanTier) -> AppResult<&Plan> {
        self.plans_for(bucket)
            .and_then(|plans| plans.iter().find(|p| p.key == tier))
            .ok_or_else(|| AppError::NotFound(format!("Plan {} not loaded for {}", tier, bucket)))
    }

    /// Selected buckets that have a selected plan present in the cache.
    fn selected_plans(&self) -> impl Iterator<Item = (BucketKey, &Plan)> {
        self.selection
            .selected_buckets()
            .into_iter()
            .filter_map(move |bucket| {
                let tier = self.selection.selected_plan(&bucket)?;
                let plan = self.loaded_plan(&bucket, tier).ok()?;
                Some((bucket, plan))
            })
    }

    fn region_label(&self, region: &str) -> String {
        self.regions
            .iter()
            .find(|r| r.key == region)
            .map(|r| r.label.clone())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| region.to_string())
    }

    fn product_label(&self, bucket: &BucketKey) -> String {
        self.products(&bucket.region)
            .iter()
            .find(|p| p.key == bucket.product)
            .map(|p| p.label.clone())
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| bucket.product.clone())
    }
}

impl Drop for StorefrontSession {
    fn drop(&mut self) {
        for handle in self.in_flight.values() {
            handle.abort();
        }
    }
}

/// Backends may omit `product`/`region`; the display currency is always the
/// one the plans were requested in.
fn fill_plan_defaults(mut plan: Plan, key: &PlanCacheKey) -> Plan {
    if plan.product.is_empty() {
        plan.product = key.bucket.product.clone();
    }
    if plan.region.is_empty() {
        plan.region = key.bucket.region.clone();
    }
    plan.currency = key.currency.clone();
    plan
}

/// Known names first in the given order, then everything else alphabetically.
fn preferred_order<'a>(name: &'a str, preferred: &[&str]) -> (usize, &'a str) {
    let rank = preferred
        .iter()
        .position(|p| *p == name)
        .unwrap_or(preferred.len());
    (rank, if rank == preferred.len() { name } else { "" })
}

fn group_rows(rows: Vec<(String, String, SummaryRow)>) -> Vec<SummaryGroup> {
    let mut groups: Vec<SummaryGroup> = Vec::new();
    for (key, label, row) in rows {
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.rows.push(row),
            None => groups.push(SummaryGroup {
                key,
                label,
                rows: vec![row],
            }),
        }
    }

    groups.sort_by(|a, b| {
        preferred_order(&a.key, &SUMMARY_GROUP_ORDER)
            .cmp(&preferred_order(&b.key, &SUMMARY_GROUP_ORDER))
    });
    for group in &mut groups {
        group.rows.sort_by(|a, b| a.label.cmp(&b.label));
    }
    groups
}

fn title_case(s: &str) -> String {
    s.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
