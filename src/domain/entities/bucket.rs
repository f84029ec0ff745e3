use serde::{Deserialize, Serialize};

use crate::domain::entities::PlanTier;

/// A (region, product) pair for which one plan can be selected.
///
/// Displays as `{region}:{product}`; keys are lower-cased on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketKey {
    pub region: String,
    pub product: String,
}

impl BucketKey {
    pub fn new(region: &str, product: &str) -> Self {
        Self {
            region: region.trim().to_lowercase(),
            product: product.trim().to_lowercase(),
        }
    }

    pub fn with_plan(&self, tier: PlanTier) -> PlanBucketKey {
        PlanBucketKey {
            bucket: self.clone(),
            tier,
        }
    }

    pub fn in_region(&self, region: &str) -> bool {
        self.region == region
    }
}

impl std::fmt::Display for BucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.region, self.product)
    }
}

impl std::str::FromStr for BucketKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((region, product))
                if !region.trim().is_empty()
                    && !product.trim().is_empty()
                    && !product.contains(':') =>
            {
                Ok(BucketKey::new(region, product))
            }
            _ => Err(format!("Invalid bucket key: {}. Expected region:product", s)),
        }
    }
}

/// Feature selections are tracked per plan tier inside a bucket: `{region}:{product}:{tier}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlanBucketKey {
    pub bucket: BucketKey,
    pub tier: PlanTier,
}

impl std::fmt::Display for PlanBucketKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.bucket, self.tier)
    }
}
