use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;
use crate::numeric::lenient_f64;

/// A market the catalog sells data for (India, US, EU, Australia).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub key: String,
    pub label: String,
    pub name: String,
    pub currency: String,
    pub geo: String,
}

/// A continent-level grouping with its markets embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoRegion {
    pub key: String,
    pub label: String,
    pub markets: Vec<Region>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub key: String,
    pub label: String,
    pub short: String,
}

/// Plan tiers, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    Starter,
    Business,
    Elite,
    Pro,
    Anyone,
}

impl PlanTier {
    pub const ALL: [PlanTier; 5] = [
        PlanTier::Starter,
        PlanTier::Business,
        PlanTier::Elite,
        PlanTier::Pro,
        PlanTier::Anyone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanTier::Starter => "starter",
            PlanTier::Business => "business",
            PlanTier::Elite => "elite",
            PlanTier::Pro => "pro",
            PlanTier::Anyone => "anyone",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Starter => "Starter",
            PlanTier::Business => "Business",
            PlanTier::Elite => "Elite",
            PlanTier::Pro => "Pro",
            PlanTier::Anyone => "Any One",
        }
    }

    pub fn summary(&self) -> &'static str {
        match self {
            PlanTier::Starter => "For prototypes and light usage.",
            PlanTier::Business => "For growing teams and regular production.",
            PlanTier::Elite => "For serious production workloads with premium limits.",
            PlanTier::Pro => "Enterprise-grade access with custom limits.",
            PlanTier::Anyone => "Single-product entry plan with fair-use limits.",
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PlanTier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "starter" => Ok(PlanTier::Starter),
            "business" => Ok(PlanTier::Business),
            "elite" => Ok(PlanTier::Elite),
            "pro" => Ok(PlanTier::Pro),
            "anyone" => Ok(PlanTier::Anyone),
            _ => Err(ParseError::UnknownPlanTier(s.to_string())),
        }
    }
}

/// Informational quotas shown on plan cards. Not used in pricing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanLimits {
    pub api_calls_per_month: String,
    pub websocket_connections: String,
    pub symbols: String,
    pub users: String,
}

impl PlanLimits {
    pub fn new(api_calls_per_month: &str, websocket_connections: &str, symbols: &str, users: &str) -> Self {
        Self {
            api_calls_per_month: api_calls_per_month.to_string(),
            websocket_connections: websocket_connections.to_string(),
            symbols: symbols.to_string(),
            users: users.to_string(),
        }
    }

    /// Quota name to display string, in a stable order.
    pub fn as_map(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([
            ("apiCallsPerMonth", self.api_calls_per_month.as_str()),
            ("websocketConnections", self.websocket_connections.as_str()),
            ("symbols", self.symbols.as_str()),
            ("users", self.users.as_str()),
        ])
    }
}

/// A purchasable offering for one (product, region, tier).
///
/// `price_monthly` is the base price already converted into `currency`.
/// Prices that arrive malformed are coerced to 0 on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub key: PlanTier,
    pub name: String,
    pub product: String,
    pub region: String,
    #[serde(rename = "priceMonthlyUSD", default, deserialize_with = "lenient_f64")]
    pub price_monthly_usd: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_monthly: f64,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub limits: PlanLimits,
}

impl Plan {
    pub fn has_feature(&self, feature: &str) -> bool {
        self.features.iter().any(|f| f == feature)
    }
}
