pub mod json_file_store;
pub mod static_catalog;

pub use json_file_store::JsonFileStore;
pub use static_catalog::StaticCatalogRepo;
