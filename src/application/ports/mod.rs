pub mod catalog;
pub mod key_value_store;
