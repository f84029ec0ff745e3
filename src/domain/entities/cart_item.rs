use data_platform_types::lenient_f64;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::entities::{PlanTier, fx_rate};

/// A materialised purchase record, persisted as part of the cart JSON array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub product: String,
    /// Feature-adjusted price at add time, in `currency`.
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_monthly: f64,
    /// Full USD price of the plan, before feature adjustment. Informational only.
    #[serde(
        rename = "priceMonthlyUSD",
        default,
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub price_monthly_usd: Option<f64>,
    #[serde(default)]
    pub currency: String,
    #[serde(default = "default_qty", deserialize_with = "lenient_qty")]
    pub qty: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<CartItemMeta>,
}

/// Which features were selected when the item was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemMeta {
    pub plan_key: PlanTier,
    #[serde(default)]
    pub selected_features: Vec<String>,
}

impl CartItem {
    /// The feature-adjusted unit price expressed in USD, used to re-price the
    /// line into another currency. Unknown currencies count as USD.
    pub fn unit_usd(&self) -> f64 {
        self.price_monthly / fx_rate(&self.currency)
    }

    pub fn line_total(&self) -> f64 {
        self.price_monthly * f64::from(self.qty)
    }
}

fn default_qty() -> u32 {
    1
}

fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    lenient_f64(value).map(Some).map_err(serde::de::Error::custom)
}

/// Quantities below 1 (or not numbers at all) fall back to 1.
fn lenient_qty<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let q = lenient_f64(deserializer)?;
    if q >= 1.0 {
        Ok(q.floor().min(f64::from(u32::MAX)) as u32)
    } else {
        Ok(1)
    }
}
