//! Scenario comparison across reduction tiers.
//!
//! Builds one yearly table per tier and derives the cumulative series used to
//! compare them: how much net salary and net share value have been received
//! by each month, and how large the share value is relative to the salary.

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::lookup::NetSalaryLookup;
use crate::models::{
    Month, ScenarioComparison, ScenarioPoint, ScenarioSeries, Tier, YearlyTable,
};

use super::shares::DEFAULT_SHARE_TAX_RATE;
use super::yearly_value::{MONEY_DECIMAL_PLACES, YearlyValueParams, compute_yearly_value};

/// Inputs of a scenario comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioParams {
    /// Monthly gross salary before any reduction.
    pub gross: Decimal,
    /// Share price, constant across the year.
    pub price: Decimal,
    /// Months in which the reduction applies.
    pub reduction_months: BTreeSet<Month>,
    /// Tiers to compare, in output order.
    pub tiers: Vec<Tier>,
    /// Flat rate applied to the value of granted shares.
    pub share_tax_rate: Decimal,
}

impl ScenarioParams {
    /// Creates parameters comparing all tiers, with no reduction months and
    /// the default tax rate.
    pub fn new(gross: Decimal, price: Decimal) -> Self {
        Self {
            gross,
            price,
            reduction_months: BTreeSet::new(),
            tiers: Tier::ALL.to_vec(),
            share_tax_rate: DEFAULT_SHARE_TAX_RATE,
        }
    }

    /// Sets the months in which the reduction applies.
    pub fn with_reduction_months(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.reduction_months = months.into_iter().collect();
        self
    }

    /// Sets the tiers to compare.
    pub fn with_tiers(mut self, tiers: impl IntoIterator<Item = Tier>) -> Self {
        self.tiers = tiers.into_iter().collect();
        self
    }

    /// Sets the flat tax rate applied to share value.
    pub fn with_share_tax_rate(mut self, share_tax_rate: Decimal) -> Self {
        self.share_tax_rate = share_tax_rate;
        self
    }

    fn yearly_params(&self, tier: Tier) -> YearlyValueParams {
        YearlyValueParams {
            gross: self.gross,
            pct: tier.pct(),
            price: self.price,
            reduction_months: self.reduction_months.clone(),
            share_tax_rate: self.share_tax_rate,
        }
    }

    fn validate(&self) -> EngineResult<()> {
        if self.tiers.is_empty() {
            return Err(EngineError::invalid_input("tiers", "must not be empty"));
        }

        let unique: BTreeSet<Tier> = self.tiers.iter().copied().collect();
        if unique.len() != self.tiers.len() {
            return Err(EngineError::invalid_input(
                "tiers",
                "must not contain duplicates",
            ));
        }

        for &tier in &self.tiers {
            self.yearly_params(tier).validate()?;
        }
        Ok(())
    }
}

/// Computes a yearly table for each tier and the derived cumulative series.
///
/// Tables are computed one after another through the same lookup; they are
/// never run in parallel.
///
/// # Errors
///
/// - `InvalidInput` if the tier list is empty or has duplicates, or any
///   yearly input is invalid. No lookup is made.
/// - Any error of [`compute_yearly_value`]; no partial comparison is returned.
pub fn compare_scenarios<L>(params: &ScenarioParams, lookup: &L) -> EngineResult<ScenarioComparison>
where
    L: NetSalaryLookup + ?Sized,
{
    params.validate()?;

    info!(
        gross = %params.gross,
        price = %params.price,
        tiers = params.tiers.len(),
        "Comparing scenarios"
    );

    let series = params
        .tiers
        .iter()
        .map(|&tier| {
            let table = compute_yearly_value(&params.yearly_params(tier), lookup)?;
            build_series(tier, table)
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(ScenarioComparison {
        gross: params.gross,
        price: params.price,
        series,
    })
}

/// Derives the cumulative series of one table.
///
/// Fails with `InvalidInput` if a cumulative value overflows.
pub fn build_series(tier: Tier, table: YearlyTable) -> EngineResult<ScenarioSeries> {
    let overflow = || EngineError::invalid_input("gross", "cumulative net values overflow");
    let mut cumulative_salary_net = Decimal::ZERO;
    let mut cumulative_shares_net = Decimal::ZERO;

    let points = table
        .rows()
        .iter()
        .map(|row| {
            cumulative_salary_net = cumulative_salary_net
                .checked_add(row.salary_net)
                .ok_or_else(overflow)?;
            cumulative_shares_net = cumulative_shares_net
                .checked_add(row.shares_net)
                .ok_or_else(overflow)?;
            let cumulative_total_net = cumulative_salary_net
                .checked_add(cumulative_shares_net)
                .ok_or_else(overflow)?;

            let shares_to_salary_pct = if cumulative_salary_net.is_zero() {
                Decimal::ZERO
            } else {
                cumulative_shares_net
                    .checked_div(cumulative_salary_net)
                    .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                    .ok_or_else(overflow)?
                    .round_dp(MONEY_DECIMAL_PLACES)
            };

            Ok(ScenarioPoint {
                month: row.month,
                salary_net: row.salary_net,
                shares_net: row.shares_net,
                cumulative_salary_net,
                cumulative_shares_net,
                cumulative_total_net,
                shares_to_salary_pct,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    Ok(ScenarioSeries {
        tier,
        table,
        points,
    })
}
