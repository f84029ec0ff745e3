pub mod bucket;
pub mod cart_item;

pub use data_platform_types::{
    Currency, GeoRegion, Plan, PlanLimits, PlanTier, Product, Region, convert_from_usd, fx_rate,
};
