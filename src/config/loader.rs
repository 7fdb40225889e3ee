//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading company
//! settings from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{RosterError, RosterResult};

use super::types::CompanyConfig;

/// Loads and provides access to the company configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/
/// └── company.yaml   # Company name, address, GSTIN, invoice defaults
/// ```
///
/// # Example
///
/// ```no_run
/// use roster_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!("Issuing invoices as {}", loader.company().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    company: CompanyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if the
    /// file is missing or contains invalid YAML.
    pub fn load<P: AsRef<Path>>(path: P) -> RosterResult<Self> {
        let path = path.as_ref();

        let company_path = path.join("company.yaml");
        let company = Self::load_yaml::<CompanyConfig>(&company_path)?;

        Ok(Self { company })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> RosterResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| RosterError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| RosterError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the loaded company settings.
    pub fn company(&self) -> &CompanyConfig {
        &self.company
    }
}
