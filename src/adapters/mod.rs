pub mod catalog;
pub mod http;
pub mod persistence;
