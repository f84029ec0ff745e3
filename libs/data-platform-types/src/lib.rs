//! Shared wire types for the data platform subscription catalog.
//!
//! This crate provides:
//! - Catalog records (`Region`, `GeoRegion`, `Product`, `Plan`, `PlanLimits`)
//! - The closed set of plan tiers (`PlanTier`)
//! - The fixed from-USD currency table and `convert_from_usd`
//! - The `{ "data": ... }` response envelope and error body

mod catalog;
mod currency;
mod errors;
mod numeric;
mod responses;

pub use catalog::{GeoRegion, Plan, PlanLimits, PlanTier, Product, Region};
pub use currency::{Currency, DEFAULT_CURRENCY, convert_from_usd, fx_rate};
pub use errors::{ErrorBody, ErrorCode, ParseError};
pub use numeric::lenient_f64;
pub use responses::{DataEnvelope, HealthStatus};
