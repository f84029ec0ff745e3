//! Feature-based proportional pricing.
//!
//! A plan's displayed price is `full * selected / total`, where `selected` counts
//! the normalized selection (required features plus valid optional ones) and
//! `total` is the size of the plan's feature catalog.

use std::collections::HashSet;

use crate::domain::entities::Plan;

/// Number of features that are always included in a plan's price baseline.
pub const REQUIRED_FEATURE_COUNT: usize = 5;

/// Canonical names looked up first when deriving the required set.
pub const REQUIRED_FEATURE_NAMES: [&str; REQUIRED_FEATURE_COUNT] = [
    "REST API access",
    "Real-time snapshots (polling)",
    "1 year historical OHLCV",
    "Standard rate limits",
    "Email support",
];

/// Flat discount applied to each currency group in the selection summary.
pub const DISCOUNT_RATE: f64 = 0.1;

/// The locked subset of `plan.features`, at most `REQUIRED_FEATURE_COUNT` long.
///
/// Two passes: canonical names present in the catalog (in priority order), then
/// the remaining slots filled from the catalog in order.
pub fn required_features(plan: &Plan) -> Vec<String> {
    let all = &plan.features;
    if all.is_empty() {
        return Vec::new();
    }

    let mut required: Vec<String> = Vec::with_capacity(REQUIRED_FEATURE_COUNT);

    for name in REQUIRED_FEATURE_NAMES {
        if required.len() >= REQUIRED_FEATURE_COUNT {
            break;
        }
        if plan.has_feature(name) && !required.iter().any(|r| r == name) {
            required.push(name.to_string());
        }
    }

    for feature in all {
        if required.len() >= REQUIRED_FEATURE_COUNT {
            break;
        }
        if !required.contains(feature) {
            required.push(feature.clone());
        }
    }

    required
}

/// Canonical selection for a plan: required features first, then the caller's
/// picks, keeping only names that exist in the catalog and dropping duplicates.
///
/// Unknown names are silently ignored. Idempotent.
pub fn normalize_selected_features(plan: &Plan, selected: Option<&[String]>) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut normalized = Vec::new();

    let required = required_features(plan);
    let picks = selected.unwrap_or_default();

    for feature in required.iter().chain(picks.iter()) {
        if plan.has_feature(feature) && seen.insert(feature.as_str()) {
            normalized.push(feature.clone());
        }
    }

    normalized
}

/// Proportional price for a selection, in the plan's display currency.
///
/// Rounds half away from zero. A plan without features cannot be subdivided and
/// always costs its full price. Malformed prices count as 0.
pub fn compute_feature_price(plan: &Plan, selected: Option<&[String]>) -> i64 {
    let full = sanitize_price(plan.price_monthly);
    let total = plan.features.len();
    if total == 0 {
        return full.round() as i64;
    }

    let normalized = normalize_selected_features(plan, selected);
    let count = normalized.len().min(total);

    (full * count as f64 / total as f64).round() as i64
}

fn sanitize_price(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Subtotal, discount and total of one currency group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscountedTotal {
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
}

pub fn apply_discount(subtotal: f64, rate: f64) -> DiscountedTotal {
    let discount = if subtotal > 0.0 { subtotal * rate } else { 0.0 };
    DiscountedTotal {
        subtotal,
        discount,
        total: subtotal - discount,
    }
}
