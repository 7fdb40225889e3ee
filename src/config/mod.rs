//! Configuration loading and management for the roster engine.
//!
//! Company settings (name, GSTIN, invoice defaults) are loaded from YAML at
//! startup and shared read-only with the request handlers.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::CompanyConfig;
