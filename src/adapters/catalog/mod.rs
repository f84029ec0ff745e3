//! Catalog port implementations.

pub mod local;
pub mod remote;

pub use local::LocalCatalog;
pub use remote::RemoteCatalog;
