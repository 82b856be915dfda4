//! Application state for the share sacrifice API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::lookup::NetSalaryLookup;

/// A net salary lookup that can be shared across request handlers.
pub type SharedLookup = Arc<dyn NetSalaryLookup + Send + Sync>;

/// Shared application state.
///
/// Contains the loaded configuration and the net salary lookup. Every request
/// goes through the same lookup, so a [`PacedLookup`](crate::lookup::PacedLookup)
/// keeps spacing out calls across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    config: Arc<EngineConfig>,
    lookup: SharedLookup,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(config: EngineConfig, lookup: SharedLookup) -> Self {
        Self {
            config: Arc::new(config),
            lookup,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a handle to the net salary lookup.
    pub fn lookup(&self) -> SharedLookup {
        Arc::clone(&self.lookup)
    }
}
