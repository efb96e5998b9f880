//! Collector configuration: types, defaults, file loading.

pub mod persistence;
pub mod types;

pub use persistence::load_config;
pub use types::CollectorConfig;
