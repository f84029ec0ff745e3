//! Test data factories.
//!
//! Each factory returns a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use crate::domain::entities::{
    Plan, PlanLimits, PlanTier, Region,
    cart_item::{CartItem, CartItemMeta},
};

pub fn feature_list(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// Create a starter plan with the canonical five features plus one optional
/// feature, priced at 79 USD.
pub fn create_test_plan(overrides: impl FnOnce(&mut Plan)) -> Plan {
    let mut plan = Plan {
        id: "plan_equity_us_starter".to_string(),
        key: PlanTier::Starter,
        name: "Starter".to_string(),
        product: "equity".to_string(),
        region: "us".to_string(),
        price_monthly_usd: 79.0,
        price_monthly: 79.0,
        currency: "USD".to_string(),
        summary: "Best for prototypes".to_string(),
        features: feature_list(&[
            "REST API access",
            "Real-time snapshots (polling)",
            "1 year historical OHLCV",
            "Standard rate limits",
            "Email support",
            "Extended fundamentals",
        ]),
        limits: PlanLimits::new("750,000", "—", "5,000", "1"),
    };
    overrides(&mut plan);
    plan
}

pub fn create_test_region(overrides: impl FnOnce(&mut Region)) -> Region {
    let mut region = Region {
        key: "us".to_string(),
        label: "US".to_string(),
        name: "United States".to_string(),
        currency: "USD".to_string(),
        geo: "north_america".to_string(),
    };
    overrides(&mut region);
    region
}

pub fn create_test_cart_item(overrides: impl FnOnce(&mut CartItem)) -> CartItem {
    let mut item = CartItem {
        id: "plan_equity_us_starter".to_string(),
        name: "us • equity • Starter".to_string(),
        region: "us".to_string(),
        product: "equity".to_string(),
        price_monthly: 66.0,
        price_monthly_usd: Some(79.0),
        currency: "USD".to_string(),
        qty: 1,
        meta: Some(CartItemMeta {
            plan_key: PlanTier::Starter,
            selected_features: feature_list(&[
                "REST API access",
                "Real-time snapshots (polling)",
                "1 year historical OHLCV",
                "Standard rate limits",
                "Email support",
            ]),
        }),
    };
    overrides(&mut item);
    item
}
