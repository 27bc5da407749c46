pub mod carpark;
pub mod config;
pub mod lookup;
pub mod query;
pub mod search;
