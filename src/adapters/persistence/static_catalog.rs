//! The fixed subscription catalog served by the catalog API.
//!
//! Regions, products, per-region availability, plan tiers with their feature
//! lists, USD base prices and display limits. Unknown products fall back to the
//! equity tables.

use async_trait::async_trait;

use crate::{
    app_error::AppResult,
    application::use_cases::catalog::{CatalogRepoTrait, GeoRegionProfile},
    domain::entities::{Plan, PlanLimits, PlanTier, Product, Region, convert_from_usd},
};

const REGIONS: [(&str, &str, &str, &str, &str); 4] = [
    ("india", "INDIA", "India", "INR", "asia"),
    ("us", "US", "United States", "USD", "north_america"),
    ("ue", "EU", "European Union", "EUR", "europe"),
    ("au", "AU", "Australia", "AUD", "oceania"),
];

const GEO_REGIONS: [(&str, &str, &[&str]); 4] = [
    ("asia", "Asia", &["india"]),
    ("north_america", "North America", &["us"]),
    ("europe", "Europe", &["ue"]),
    ("oceania", "Oceania", &["au"]),
];

const PRODUCTS: [(&str, &str, &str); 4] = [
    ("equity", "EQUITY", "Equities & ETFs"),
    ("forex", "FOREX", "FX (Spot & Forwards)"),
    ("futures_options", "FUTURE OPTION", "Futures & Options market data"),
    ("bonds", "BOND", "Rates, treasuries & corporate bonds"),
];

fn region_product_keys(region: &str) -> &'static [&'static str] {
    match region {
        "us" => &["forex", "futures_options"],
        "india" => &["equity", "forex"],
        "ue" => &["equity", "forex"],
        "au" => &["equity"],
        _ => &[],
    }
}

fn common_features(tier: PlanTier) -> &'static [&'static str] {
    match tier {
        PlanTier::Starter => &[
            "REST API access",
            "Real-time snapshots (polling)",
            "1 year historical OHLCV",
            "Standard rate limits",
            "Email support",
        ],
        PlanTier::Business => &[
            "REST + WebSocket streaming",
            "Tick-by-tick (where available)",
            "5 years historical OHLCV",
            "Higher rate limits",
            "Priority email support",
        ],
        PlanTier::Elite => &[
            "REST + WebSocket streaming",
            "Tick-by-tick (where available)",
            "10 years historical OHLCV + replay",
            "Burst rate limits",
            "Priority support (SLA)",
            "Multiple API keys + team seats",
        ],
        PlanTier::Pro => &[
            "Dedicated throughput profile",
            "Advanced entitlement controls",
            "Custom symbols & coverage packs",
            "SLA + phone/Slack support",
            "Audit logs + usage analytics",
        ],
        PlanTier::Anyone => &[
            "Single-product access",
            "Simplified onboarding",
            "Fair-use limits",
            "Community support",
        ],
    }
}

fn addon_features(product: &str, tier: PlanTier) -> &'static [&'static str] {
    use PlanTier::*;
    match (product, tier) {
        ("forex", Starter) => &["Majors + minors coverage", "1s + 1m bars", "Trading session calendar"],
        ("forex", Business) => &["Expanded crosses", "Streaming quotes", "Fixings snapshots"],
        ("forex", Elite) => &[
            "Expanded crosses + exotics",
            "Sub-second ticks (where available)",
            "Forwards & swaps reference",
        ],
        ("forex", Pro) => &["Prime-like routing", "Custom liquidity profiles", "Dedicated endpoints"],
        ("forex", Anyone) => &["Starter features", "Forex-only"],

        ("futures_options", Starter) => &["Front-month futures", "Delayed options chains", "Settlement calendar"],
        ("futures_options", Business) => &["Real-time futures", "Options chains (standard)", "Open interest"],
        ("futures_options", Elite) => &[
            "Full chains + Greeks",
            "Streaming",
            "Historical chains (where available)",
        ],
        ("futures_options", Pro) => &["Full depth", "Custom venues", "SLA"],
        ("futures_options", Anyone) => &["Starter features", "Futures/options-only"],

        ("bonds", Starter) => &["Treasury curve snapshots", "Reference ISIN data", "EOD yields"],
        ("bonds", Business) => &["Intraday curve updates", "Corporate bond reference", "Calendars"],
        ("bonds", Elite) => &["Streaming curves", "Expanded corporates", "Analytics add-ons"],
        ("bonds", Pro) => &["Institutional distribution", "Custom curves", "SLA"],
        ("bonds", Anyone) => &["Starter features", "Bond-only"],

        (_, Starter) => &["Basic fundamentals", "Top-of-book (where available)", "Corporate actions (basic)"],
        (_, Business) => &["Extended fundamentals", "Corporate actions + dividends", "End-of-day bulk"],
        (_, Elite) => &[
            "Global fundamentals + statements",
            "Options reference (read-only)",
            "Low-latency routing",
        ],
        (_, Pro) => &["Custom feeds", "Entitlement-ready symbols", "Institutional routing"],
        (_, Anyone) => &["Starter features", "Equity-only"],
    }
}

/// Baseline monthly USD price, ordered as `PlanTier::ALL`.
fn base_prices_usd(product: &str) -> [u32; 5] {
    match product {
        "forex" => [59, 99, 149, 299, 39],
        "futures_options" => [89, 149, 249, 499, 59],
        "bonds" => [49, 89, 149, 299, 29],
        _ => [79, 129, 199, 399, 49],
    }
}

fn price_usd(product: &str, tier: PlanTier) -> u32 {
    let index = PlanTier::ALL
        .iter()
        .position(|t| *t == tier)
        .unwrap_or_default();
    base_prices_usd(product)[index]
}

fn limits(product: &str, tier: PlanTier) -> PlanLimits {
    use PlanTier::*;
    let (calls, sockets, symbols, users) = match (product, tier) {
        ("equity", Starter) => ("750,000", "—", "5,000", "1"),
        ("equity", Business) => ("1,500,000", "3", "15,000", "3"),
        ("equity", Elite) => ("3,000,000", "10", "50,000+", "Up to 10"),
        ("equity", Anyone) => ("250,000", "—", "1,000", "1"),

        ("forex", Starter) => ("1,000,000", "—", "150", "1"),
        ("forex", Business) => ("2,500,000", "5", "500", "3"),
        ("forex", Elite) => ("5,000,000", "10", "2,000+", "Up to 10"),
        ("forex", Anyone) => ("300,000", "—", "75", "1"),

        ("futures_options", Starter) => ("600,000", "—", "2,000", "1"),
        ("futures_options", Business) => ("1,500,000", "5", "10,000", "3"),
        ("futures_options", Elite) => ("3,500,000", "12", "25,000", "Up to 10"),
        ("futures_options", Anyone) => ("200,000", "—", "1,000", "1"),

        ("bonds", Starter) => ("400,000", "—", "50,000 ISIN", "1"),
        ("bonds", Business) => ("900,000", "3", "150,000 ISIN", "3"),
        ("bonds", Elite) => ("2,000,000", "8", "500,000+ ISIN", "Up to 10"),
        ("bonds", Anyone) => ("150,000", "—", "25,000 ISIN", "1"),

        ("equity" | "forex" | "futures_options" | "bonds", Pro) => {
            ("Custom", "Custom", "Custom", "Custom")
        }

        _ => ("750,000", "—", "5,000", "1"),
    };
    PlanLimits::new(calls, sockets, symbols, users)
}

/// Build every tier for (product, region) priced in `currency`.
pub fn build_plans(product: &str, region: &str, currency: &str) -> Vec<Plan> {
    PlanTier::ALL
        .iter()
        .map(|&tier| {
            let features = common_features(tier)
                .iter()
                .chain(addon_features(product, tier))
                .map(|f| f.to_string())
                .collect();
            let usd = f64::from(price_usd(product, tier));

            Plan {
                id: format!("plan_{}_{}_{}", product, region, tier),
                key: tier,
                name: tier.display_name().to_string(),
                product: product.to_string(),
                region: region.to_string(),
                price_monthly_usd: usd,
                price_monthly: convert_from_usd(usd, currency) as f64,
                currency: currency.to_string(),
                summary: tier.summary().to_string(),
                features,
                limits: limits(product, tier),
            }
        })
        .collect()
}

#[derive(Debug, Default, Clone)]
pub struct StaticCatalogRepo;

impl StaticCatalogRepo {
    pub fn new() -> Self {
        Self
    }

    pub fn regions() -> Vec<Region> {
        REGIONS
            .iter()
            .map(|(key, label, name, currency, geo)| Region {
                key: key.to_string(),
                label: label.to_string(),
                name: name.to_string(),
                currency: currency.to_string(),
                geo: geo.to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl CatalogRepoTrait for StaticCatalogRepo {
    async fn list_regions(&self) -> AppResult<Vec<Region>> {
        Ok(Self::regions())
    }

    async fn list_geo_regions(&self) -> AppResult<Vec<GeoRegionProfile>> {
        Ok(GEO_REGIONS
            .iter()
            .map(|(key, label, markets)| GeoRegionProfile {
                key: key.to_string(),
                label: label.to_string(),
                markets: markets.iter().map(|m| m.to_string()).collect(),
            })
            .collect())
    }

    async fn list_region_product_keys(&self, region: &str) -> AppResult<Vec<String>> {
        Ok(region_product_keys(region)
            .iter()
            .map(|k| k.to_string())
            .collect())
    }

    async fn get_product(&self, product: &str) -> AppResult<Option<Product>> {
        Ok(PRODUCTS
            .iter()
            .find(|(key, _, _)| *key == product)
            .map(|(key, label, short)| Product {
                key: key.to_string(),
                label: label.to_string(),
                short: short.to_string(),
            }))
    }

    async fn list_plans(&self, product: &str, region: &str, currency: &str) -> AppResult<Vec<Plan>> {
        Ok(build_plans(product, region, currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pricing::required_features;

    #[test]
    fn equity_starter_features_are_common_then_addons() {
        let plans = build_plans("equity", "india", "USD");
        let starter = plans.iter().find(|p| p.key == PlanTier::Starter).unwrap();
        assert_eq!(starter.features.len(), 8);
        assert_eq!(starter.features[0], "REST API access");
        assert_eq!(starter.features[5], "Basic fundamentals");
    }

    #[test]
    fn starter_required_set_is_the_canonical_five() {
        let plans = build_plans("forex", "us", "USD");
        let starter = &plans[0];
        assert_eq!(required_features(starter), starter.features[..5].to_vec());
    }

    #[test]
    fn anyone_tier_has_six_features_and_falls_back() {
        let plans = build_plans("bonds", "us", "USD");
        let anyone = plans.iter().find(|p| p.key == PlanTier::Anyone).unwrap();
        assert_eq!(anyone.features.len(), 6);
        assert_eq!(anyone.price_monthly_usd, 29.0);
        assert_eq!(required_features(anyone), anyone.features[..5].to_vec());
    }

    #[test]
    fn unknown_product_uses_equity_tables() {
        let plans = build_plans("crypto", "us", "USD");
        assert_eq!(plans[0].price_monthly_usd, 79.0);
        assert_eq!(plans[0].features[5], "Basic fundamentals");
        assert_eq!(plans[0].limits.api_calls_per_month, "750,000");
    }

    #[test]
    fn prices_convert_into_currency() {
        let plans = build_plans("futures_options", "us", "AUD");
        let pro = plans.iter().find(|p| p.key == PlanTier::Pro).unwrap();
        assert_eq!(pro.price_monthly_usd, 499.0);
        assert_eq!(pro.price_monthly, 773.0); // 773.45
        assert_eq!(pro.limits.users, "Custom");
    }

    #[test]
    fn plan_ids_compose_product_region_tier() {
        let ids: Vec<_> = build_plans("forex", "ue", "EUR")
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(
            ids,
            vec![
                "plan_forex_ue_starter",
                "plan_forex_ue_business",
                "plan_forex_ue_elite",
                "plan_forex_ue_pro",
                "plan_forex_ue_anyone",
            ]
        );
    }
}
