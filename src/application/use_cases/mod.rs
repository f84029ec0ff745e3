pub mod billing_region;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod selection;
pub mod storefront;
