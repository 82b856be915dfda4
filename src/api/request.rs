//! Request types for the share sacrifice API.
//!
//! Percentages and month labels are taken as plain values and validated by the
//! engine, so an unsupported tier or an unknown month is reported with its
//! own error code rather than as malformed JSON.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{ScenarioParams, YearlyValueParams};
use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{Month, Tier};

/// Request body for the `/yearly-value` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearlyValueRequest {
    /// Monthly gross salary before any reduction.
    pub gross: Decimal,
    /// Reduction percentage; one of 0, 0.25, 0.5, 0.75.
    pub pct: Decimal,
    /// Share price.
    pub price: Decimal,
    /// Reduction month labels. Falls back to the configured defaults.
    #[serde(default)]
    pub reduction_months: Option<Vec<String>>,
}

impl YearlyValueRequest {
    /// Converts the request into yearly parameters, filling gaps from `config`.
    pub fn into_params(self, config: &EngineConfig) -> EngineResult<YearlyValueParams> {
        let months = resolve_months(self.reduction_months, config)?;

        Ok(YearlyValueParams::new(self.gross, self.pct, self.price)
            .with_reduction_months(months)
            .with_share_tax_rate(config.share_tax_rate()))
    }
}

/// Request body for the `/scenarios` endpoint.
///
/// Every field is optional; missing fields use the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioRequest {
    /// Monthly gross salary. Defaults to the configured yearly gross / 12.
    #[serde(default)]
    pub gross: Option<Decimal>,
    /// Share price.
    #[serde(default)]
    pub price: Option<Decimal>,
    /// Reduction month labels.
    #[serde(default)]
    pub reduction_months: Option<Vec<String>>,
    /// Reduction percentages to compare.
    #[serde(default)]
    pub tiers: Option<Vec<Decimal>>,
}

impl ScenarioRequest {
    /// Converts the request into scenario parameters, filling gaps from `config`.
    pub fn into_params(self, config: &EngineConfig) -> EngineResult<ScenarioParams> {
        let defaults = config.defaults();
        let months = resolve_months(self.reduction_months, config)?;
        let tiers = match self.tiers {
            Some(pcts) => pcts
                .into_iter()
                .map(Tier::try_from)
                .collect::<EngineResult<Vec<_>>>()?,
            None => defaults.tiers.clone(),
        };

        Ok(ScenarioParams::new(
            self.gross.unwrap_or_else(|| defaults.gross_monthly()),
            self.price.unwrap_or(defaults.price),
        )
        .with_reduction_months(months)
        .with_tiers(tiers)
        .with_share_tax_rate(config.share_tax_rate()))
    }
}

fn resolve_months(labels: Option<Vec<String>>, config: &EngineConfig) -> EngineResult<Vec<Month>> {
    match labels {
        Some(labels) => labels.iter().map(|label| label.parse()).collect(),
        None => Ok(config.defaults().reduction_months.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LookupConfig, ModelConfig, ScenarioDefaults};
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_config() -> EngineConfig {
        EngineConfig::new(
            LookupConfig {
                url_template: "https://example.com/?salary={amount}".to_string(),
                element_id: "net_pay".to_string(),
                min_interval_ms: 0,
            },
            ModelConfig {
                share_tax_rate: dec("0.3"),
                defaults: ScenarioDefaults {
                    gross_annual: dec("48000"),
                    price: dec("25"),
                    reduction_months: vec![Month::Apr, Month::May],
                    tiers: vec![Tier::None, Tier::Half],
                },
            },
        )
    }

    #[test]
    fn test_yearly_request_uses_default_months_and_tax_rate() {
        let request: YearlyValueRequest =
            serde_json::from_str(r#"{"gross": "4000", "pct": 0.25, "price": "50"}"#).unwrap();

        let params = request.into_params(&test_config()).unwrap();

        assert_eq!(params.gross, dec("4000"));
        assert_eq!(params.pct, dec("0.25"));
        assert_eq!(params.share_tax_rate, dec("0.3"));
        assert!(params.reduction_months.contains(&Month::Apr));
        assert!(params.reduction_months.contains(&Month::May));
        assert_eq!(params.reduction_months.len(), 2);
    }

    #[test]
    fn test_yearly_request_explicit_empty_months() {
        let request: YearlyValueRequest = serde_json::from_str(
            r#"{"gross": 4000, "pct": 0.25, "price": 50, "reduction_months": []}"#,
        )
        .unwrap();

        let params = request.into_params(&test_config()).unwrap();
        assert!(params.reduction_months.is_empty());
    }

    #[test]
    fn test_yearly_request_unknown_month() {
        let request = YearlyValueRequest {
            gross: dec("4000"),
            pct: dec("0.25"),
            price: dec("50"),
            reduction_months: Some(vec!["APR".to_string(), "SMARCH".to_string()]),
        };

        match request.into_params(&test_config()) {
            Err(EngineError::UnknownMonth { label }) => assert_eq!(label, "SMARCH"),
            other => panic!("Expected UnknownMonth error, got {:?}", other),
        }
    }

    #[test]
    fn test_scenario_request_defaults() {
        let params = ScenarioRequest::default()
            .into_params(&test_config())
            .unwrap();

        assert_eq!(params.gross, dec("4000"));
        assert_eq!(params.price, dec("25"));
        assert_eq!(params.tiers, vec![Tier::None, Tier::Half]);
        assert_eq!(params.share_tax_rate, dec("0.3"));
    }

    #[test]
    fn test_scenario_request_unsupported_tier() {
        let request = ScenarioRequest {
            tiers: Some(vec![dec("0.25"), dec("0.9")]),
            ..ScenarioRequest::default()
        };

        assert!(matches!(
            request.into_params(&test_config()),
            Err(EngineError::UnsupportedTier { .. })
        ));
    }
}
