//! Test utilities.
//!
//! This module provides:
//! - Test data factories for creating valid fixtures
//! - In-memory implementations of the catalog and key-value store ports
//! - A builder for the HTTP `AppState`

mod app_state_builder;
mod catalog_mocks;
mod factories;
mod store_mocks;

pub use app_state_builder::*;
pub use catalog_mocks::*;
pub use factories::*;
pub use store_mocks::*;
