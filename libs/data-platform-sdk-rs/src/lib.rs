//! Rust client for the data platform subscription catalog API.
//!
//! # Example
//!
//! ```rust,ignore
//! use data_platform_sdk::{CatalogClient, CatalogConfig};
//!
//! let client = CatalogClient::new(CatalogConfig::new("http://localhost:4000"))?;
//! let plans = client.plans("india", "equity", "INR").await?;
//! println!("{} plans", plans.len());
//! ```

mod client;
mod error;

pub use client::{CatalogClient, CatalogConfig};
pub use error::CatalogError;

// Re-export shared types for convenience
pub use data_platform_types::{
    ErrorCode, GeoRegion, HealthStatus, Plan, PlanLimits, PlanTier, Product, Region,
};
