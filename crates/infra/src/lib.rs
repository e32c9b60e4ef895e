//! Infrastructure layer: storage, stock bookkeeping, config, application services.

pub mod config;
pub mod services;
pub mod stock;
pub mod store;
