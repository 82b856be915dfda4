//! Configuration types for the share sacrifice model.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::DEFAULT_SHARE_TAX_RATE;
use crate::lookup::DEFAULT_MIN_INTERVAL;
use crate::models::{Month, Tier};

/// Where and how net salaries are looked up (`lookup.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    /// URL of the tax calculator page, with an `{amount}` placeholder for the
    /// gross monthly salary.
    pub url_template: String,
    /// The `id` of the element holding the net salary.
    #[serde(default = "default_element_id")]
    pub element_id: String,
    /// Minimum pause between consecutive lookups, in milliseconds.
    #[serde(default = "default_min_interval_ms")]
    pub min_interval_ms: u64,
}

impl LookupConfig {
    /// The minimum pause between consecutive lookups.
    pub fn min_interval(&self) -> Duration {
        Duration::from_millis(self.min_interval_ms)
    }
}

fn default_element_id() -> String {
    "net_pay".to_string()
}

fn default_min_interval_ms() -> u64 {
    DEFAULT_MIN_INTERVAL.as_millis() as u64
}

/// Scenario inputs used when a request leaves them out.
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioDefaults {
    /// Yearly gross salary before any reduction.
    pub gross_annual: Decimal,
    /// Share price.
    pub price: Decimal,
    /// Months in which the reduction applies.
    #[serde(default)]
    pub reduction_months: Vec<Month>,
    /// Tiers compared by a scenario comparison.
    #[serde(default = "default_tiers")]
    pub tiers: Vec<Tier>,
}

impl ScenarioDefaults {
    /// The yearly gross spread evenly over twelve months.
    pub fn gross_monthly(&self) -> Decimal {
        self.gross_annual / Decimal::from(12)
    }
}

fn default_tiers() -> Vec<Tier> {
    Tier::ALL.to_vec()
}

/// Model parameters (`model.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    /// Flat rate applied to the value of granted shares.
    #[serde(default = "default_share_tax_rate")]
    pub share_tax_rate: Decimal,
    /// Default scenario inputs.
    pub defaults: ScenarioDefaults,
}

fn default_share_tax_rate() -> Decimal {
    DEFAULT_SHARE_TAX_RATE
}

/// The complete configuration loaded from a configuration directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    lookup: LookupConfig,
    model: ModelConfig,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(lookup: LookupConfig, model: ModelConfig) -> Self {
        Self { lookup, model }
    }

    /// Returns the lookup configuration.
    pub fn lookup(&self) -> &LookupConfig {
        &self.lookup
    }

    /// Returns the model configuration.
    pub fn model(&self) -> &ModelConfig {
        &self.model
    }

    /// Returns the default scenario inputs.
    pub fn defaults(&self) -> &ScenarioDefaults {
        &self.model.defaults
    }

    /// Returns the share tax rate.
    pub fn share_tax_rate(&self) -> Decimal {
        self.model.share_tax_rate
    }
}
