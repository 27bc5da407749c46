pub mod banner;
pub mod config;
pub mod store;
