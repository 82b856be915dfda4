//! Configuration loading and management for the share sacrifice model.
//!
//! This module loads the net salary lookup settings and the model parameters
//! from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use share_sacrifice::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Lookup URL: {}", config.config().lookup().url_template);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{EngineConfig, LookupConfig, ModelConfig, ScenarioDefaults};
