//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the model
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::{EngineConfig, LookupConfig, ModelConfig};

/// Loads and provides access to the model configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── lookup.yaml   # Net salary lookup endpoint and pacing
/// └── model.yaml    # Share tax rate and default scenario inputs
/// ```
///
/// # Example
///
/// ```no_run
/// use share_sacrifice::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// println!("Share tax rate: {}", loader.config().share_tax_rate());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML, an unknown month or an unsupported tier
    ///   (`ConfigParseError`)
    /// - The share tax rate is outside `[0, 1]`, the default price is not
    ///   positive, or the default gross salary is negative (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let lookup_path = path.join("lookup.yaml");
        let lookup = Self::load_yaml::<LookupConfig>(&lookup_path)?;

        let model_path = path.join("model.yaml");
        let model = Self::load_yaml::<ModelConfig>(&model_path)?;
        Self::validate_model(&model).map_err(|message| EngineError::ConfigParseError {
            path: model_path.display().to_string(),
            message,
        })?;

        Ok(Self {
            config: EngineConfig::new(lookup, model),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_model(model: &ModelConfig) -> Result<(), String> {
        if model.share_tax_rate < Decimal::ZERO || model.share_tax_rate > Decimal::ONE {
            return Err(format!(
                "share_tax_rate must be between 0 and 1, got {}",
                model.share_tax_rate
            ));
        }
        if model.defaults.price <= Decimal::ZERO {
            return Err(format!(
                "defaults.price must be greater than zero, got {}",
                model.defaults.price
            ));
        }
        if model.defaults.gross_annual < Decimal::ZERO {
            return Err(format!(
                "defaults.gross_annual must not be negative, got {}",
                model.defaults.gross_annual
            ));
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader and returns the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}
