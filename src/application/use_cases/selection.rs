//! Bucket-keyed selection state.
//!
//! Tracks which regions and products are ticked, which plan tier is selected per
//! bucket, and the optional features picked per (bucket, tier). Required
//! features are never stored as removable: every stored selection is kept
//! normalized against the plan it was last touched with.

use std::collections::{BTreeMap, HashSet};

use crate::domain::{
    entities::{
        Plan, PlanTier,
        bucket::{BucketKey, PlanBucketKey},
    },
    pricing::{normalize_selected_features, required_features},
};

/// Observable state of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketState {
    Unselected,
    /// Plan selected with only its required features.
    DefaultFeatures(PlanTier),
    /// Plan selected with extra optional features.
    CustomFeatures(PlanTier),
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected_regions: Vec<String>,
    selected_products: BTreeMap<String, Vec<String>>,
    selected_plans: BTreeMap<BucketKey, PlanTier>,
    selected_features: BTreeMap<PlanBucketKey, Vec<String>>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Region / product ticks
    // ========================================================================

    /// Tick or untick a region. Unticking cascades through every bucket in it.
    /// Returns whether the region is selected afterwards.
    pub fn toggle_region(&mut self, region: &str) -> bool {
        let region = region.trim().to_lowercase();
        if self.selected_regions.contains(&region) {
            self.clear_region(&region);
            false
        } else {
            self.selected_regions.push(region);
            true
        }
    }

    /// Tick or untick a product under a region. Unticking clears that bucket only.
    /// Returns whether the product is selected afterwards.
    pub fn toggle_product(&mut self, region: &str, product: &str) -> bool {
        let bucket = BucketKey::new(region, product);
        let products = self
            .selected_products
            .entry(bucket.region.clone())
            .or_default();

        if products.contains(&bucket.product) {
            self.clear_product(&bucket.region, &bucket.product);
            false
        } else {
            products.push(bucket.product);
            true
        }
    }

    pub fn is_region_selected(&self, region: &str) -> bool {
        self.selected_regions.iter().any(|r| r == region)
    }

    pub fn selected_regions(&self) -> &[String] {
        &self.selected_regions
    }

    pub fn selected_products(&self, region: &str) -> &[String] {
        self.selected_products
            .get(region)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every ticked (region, product) pair, in tick order.
    pub fn selected_buckets(&self) -> Vec<BucketKey> {
        self.selected_regions
            .iter()
            .flat_map(|region| {
                self.selected_products(region)
                    .iter()
                    .map(move |product| BucketKey::new(region, product))
            })
            .collect()
    }

    pub fn is_bucket_active(&self, bucket: &BucketKey) -> bool {
        self.is_region_selected(&bucket.region)
            && self
                .selected_products(&bucket.region)
                .contains(&bucket.product)
    }

    // ========================================================================
    // Plan and feature selection
    // ========================================================================

    /// Select `plan` for the bucket. A first selection for this (bucket, tier)
    /// starts at the required features; an existing one is re-normalized
    /// against the (possibly changed) catalog.
    pub fn select_plan(&mut self, bucket: &BucketKey, plan: &Plan) {
        self.selected_plans.insert(bucket.clone(), plan.key);
        self.init_features(bucket, plan);
    }

    /// Prepare the feature selection for a plan without selecting it (feature
    /// dialog opened from a plan card).
    pub fn init_features(&mut self, bucket: &BucketKey, plan: &Plan) {
        let key = bucket.with_plan(plan.key);
        let next = match self.selected_features.get(&key) {
            Some(current) => normalize_selected_features(plan, Some(current)),
            None => required_features(plan),
        };
        self.selected_features.insert(key, next);
    }

    /// Flip an optional feature. Required features are locked and toggling one
    /// is a no-op, as is toggling a name the plan does not offer.
    /// Returns whether the stored selection changed.
    pub fn toggle_feature(&mut self, bucket: &BucketKey, plan: &Plan, feature: &str) -> bool {
        let required = required_features(plan);
        if required.iter().any(|f| f == feature) {
            return false;
        }

        let key = bucket.with_plan(plan.key);
        let mut current = self
            .selected_features
            .get(&key)
            .cloned()
            .unwrap_or(required);

        if current.iter().any(|f| f == feature) {
            current.retain(|f| f != feature);
        } else {
            current.push(feature.to_string());
        }

        let next = normalize_selected_features(plan, Some(&current));
        let changed = self.selected_features.get(&key) != Some(&next);
        self.selected_features.insert(key, next);
        changed
    }

    /// Drop only the plan choice for a bucket; feature picks are kept so
    /// re-selecting the same tier restores them.
    pub fn deselect_plan(&mut self, bucket: &BucketKey) {
        self.selected_plans.remove(bucket);
    }

    /// Remove the plan selection and every feature selection of a bucket.
    pub fn clear_bucket(&mut self, bucket: &BucketKey) {
        self.selected_plans.remove(bucket);
        self.selected_features.retain(|k, _| &k.bucket != bucket);
    }

    /// Untick a region and clear every bucket under it.
    pub fn clear_region(&mut self, region: &str) {
        let region = region.trim().to_lowercase();
        self.selected_regions.retain(|r| r != &region);
        self.selected_products.remove(&region);
        self.selected_plans.retain(|b, _| !b.in_region(&region));
        self.selected_features.retain(|k, _| !k.bucket.in_region(&region));
    }

    /// Untick one product under a region and clear its bucket.
    pub fn clear_product(&mut self, region: &str, product: &str) {
        let bucket = BucketKey::new(region, product);
        if let Some(products) = self.selected_products.get_mut(&bucket.region) {
            products.retain(|p| p != &bucket.product);
        }
        self.clear_bucket(&bucket);
    }

    pub fn selected_plan(&self, bucket: &BucketKey) -> Option<PlanTier> {
        self.selected_plans.get(bucket).copied()
    }

    /// The stored selection for (bucket, tier), if any. Not normalized.
    pub fn stored_features(&self, bucket: &BucketKey, tier: PlanTier) -> Option<&[String]> {
        self.selected_features
            .get(&bucket.with_plan(tier))
            .map(Vec::as_slice)
    }

    /// Normalized selection for a plan in a bucket; the required set when
    /// nothing was stored yet.
    pub fn features_for(&self, bucket: &BucketKey, plan: &Plan) -> Vec<String> {
        let stored = self.stored_features(bucket, plan.key);
        normalize_selected_features(plan, stored)
    }

    /// Current state of a bucket. `plan` is the catalog entry of the selected
    /// tier; without it a selected bucket reports default features.
    pub fn bucket_state(&self, bucket: &BucketKey, plan: Option<&Plan>) -> BucketState {
        let Some(tier) = self.selected_plan(bucket) else {
            return BucketState::Unselected;
        };

        let Some(plan) = plan.filter(|p| p.key == tier) else {
            return BucketState::DefaultFeatures(tier);
        };

        let selected: HashSet<String> = self.features_for(bucket, plan).into_iter().collect();
        let required: HashSet<String> = required_features(plan).into_iter().collect();

        if selected == required {
            BucketState::DefaultFeatures(tier)
        } else {
            BucketState::CustomFeatures(tier)
        }
    }
}
