pub mod entities;
pub mod pricing;
