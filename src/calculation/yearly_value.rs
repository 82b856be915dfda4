//! Yearly value table.
//!
//! This module walks the twelve months of a year, applies the reduction tier in
//! the selected months, looks up the net salary for each month and converts the
//! sacrificed cash into shares.

use std::collections::BTreeSet;
use std::time::Instant;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::lookup::NetSalaryLookup;
use crate::models::{AuditStep, Month, MonthRecord, Tier, YearlyTable};

use super::compensation::compute_compensation_for_tier;
use super::shares::{DEFAULT_SHARE_TAX_RATE, convert_to_shares};

/// Decimal places of every monetary value in a yearly table.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Inputs of a yearly computation.
///
/// # Examples
///
/// ```
/// use share_sacrifice::calculation::YearlyValueParams;
/// use share_sacrifice::models::Month;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let params = YearlyValueParams::new(
///     Decimal::from_str("4166.67").unwrap(),
///     Decimal::from_str("0.25").unwrap(),
///     Decimal::from_str("50.03").unwrap(),
/// )
/// .with_reduction_months([Month::Apr, Month::May, Month::Jun]);
///
/// assert_eq!(params.reduction_months.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyValueParams {
    /// Monthly gross salary before any reduction.
    pub gross: Decimal,
    /// Reduction percentage applied in the reduction months.
    pub pct: Decimal,
    /// Share price, constant across the year.
    pub price: Decimal,
    /// Months in which the reduction applies.
    pub reduction_months: BTreeSet<Month>,
    /// Flat rate applied to the value of granted shares.
    pub share_tax_rate: Decimal,
}

impl YearlyValueParams {
    /// Creates parameters with no reduction months and the default tax rate.
    pub fn new(gross: Decimal, pct: Decimal, price: Decimal) -> Self {
        Self {
            gross,
            pct,
            price,
            reduction_months: BTreeSet::new(),
            share_tax_rate: DEFAULT_SHARE_TAX_RATE,
        }
    }

    /// Sets the months in which the reduction applies.
    pub fn with_reduction_months(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.reduction_months = months.into_iter().collect();
        self
    }

    /// Sets the flat tax rate applied to share value.
    pub fn with_share_tax_rate(mut self, share_tax_rate: Decimal) -> Self {
        self.share_tax_rate = share_tax_rate;
        self
    }

    /// Checks every input and returns the scenario tier.
    ///
    /// Runs before any lookup so an invalid request never spends a
    /// rate-limited call.
    pub fn validate(&self) -> EngineResult<Tier> {
        let tier = Tier::try_from(self.pct)?;

        if self.gross < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "gross",
                format!("must not be negative, got {}", self.gross),
            ));
        }
        if self.price <= Decimal::ZERO {
            return Err(EngineError::invalid_input(
                "price",
                format!("must be greater than zero, got {}", self.price),
            ));
        }
        if self.share_tax_rate < Decimal::ZERO || self.share_tax_rate > Decimal::ONE {
            return Err(EngineError::invalid_input(
                "share_tax_rate",
                format!("must be between 0 and 1, got {}", self.share_tax_rate),
            ));
        }
        compute_compensation_for_tier(self.gross, tier, 0)?;

        Ok(tier)
    }
}

/// Computes the twelve-month table of salary and share value.
///
/// For each month in calendar order:
/// 1. The month's tier is the scenario tier if the month is a reduction month,
///    otherwise no reduction.
/// 2. The gross salary is split into reduced gross and share cash.
/// 3. The net salary for the reduced gross is looked up.
/// 4. The share cash buys whole shares at `price`.
/// 5. Shares are valued gross and after the tax proxy.
///
/// Lookups are issued one at a time. Pacing between lookups is the lookup's
/// concern (see [`PacedLookup`](crate::lookup::PacedLookup)).
///
/// # Errors
///
/// - `UnsupportedTier` / `InvalidInput` if the parameters are invalid, including
///   a gross whose compensation cannot be represented; no lookup is made.
/// - `InvalidInput` if the looked up net salaries are too large to total.
/// - `LookupFailed` if any month's lookup fails. The table built so far is
///   discarded.
///
/// # Examples
///
/// ```
/// use share_sacrifice::calculation::{YearlyValueParams, compute_yearly_value};
/// use share_sacrifice::error::EngineResult;
/// use share_sacrifice::models::Month;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let lookup = |gross: Decimal| -> EngineResult<Decimal> { Ok(gross * Decimal::new(8, 1)) };
/// let params = YearlyValueParams::new(
///     Decimal::from_str("4166.67").unwrap(),
///     Decimal::from_str("0.25").unwrap(),
///     Decimal::from_str("50.03").unwrap(),
/// )
/// .with_reduction_months([Month::Apr]);
///
/// let table = compute_yearly_value(&params, &lookup).unwrap();
/// assert_eq!(table.rows().len(), 12);
/// assert_eq!(table.row(Month::Apr).shares_net, Decimal::from_str("790.47").unwrap());
/// assert_eq!(table.row(Month::Jan).shares_net, Decimal::ZERO);
/// ```
pub fn compute_yearly_value<L>(params: &YearlyValueParams, lookup: &L) -> EngineResult<YearlyTable>
where
    L: NetSalaryLookup + ?Sized,
{
    let start_time = Instant::now();
    let scenario_tier = params.validate()?;

    info!(
        gross = %params.gross,
        pct = %params.pct,
        price = %params.price,
        reduction_months = params.reduction_months.len(),
        "Computing yearly value"
    );

    let mut rows = Vec::with_capacity(Month::ALL.len());
    let mut audit_trace = Vec::new();
    let mut step_number: u32 = 1;

    for month in Month::ALL {
        let tier = if params.reduction_months.contains(&month) {
            scenario_tier
        } else {
            Tier::None
        };

        let split = compute_compensation_for_tier(params.gross, tier, step_number)?;
        audit_trace.push(for_month(split.audit_step, month));
        step_number += 1;

        let salary_net = lookup.net_salary(split.gross_new)?;
        audit_trace.push(lookup_step(step_number, month, split.gross_new, salary_net));
        step_number += 1;

        let conversion = convert_to_shares(
            split.compensation,
            params.price,
            params.share_tax_rate,
            step_number,
        )?;
        audit_trace.push(for_month(conversion.audit_step, month));
        step_number += 1;

        debug!(
            month = %month,
            pct = %tier.pct(),
            salary_net = %salary_net,
            shares = %conversion.shares,
            "Month computed"
        );

        rows.push(MonthRecord {
            month,
            salary_gross: round_money(split.gross_new),
            salary_net: round_money(salary_net),
            shares: conversion.shares,
            shares_gross: round_money(conversion.shares_gross),
            shares_net: round_money(conversion.shares_net),
            pct: tier.pct(),
            price: round_money(params.price),
        });
    }

    let table = YearlyTable::new(scenario_tier.pct(), rows, audit_trace);
    let (Some(total_salary_net), Some(total_shares_net)) =
        (table.total_salary_net(), table.total_shares_net())
    else {
        return Err(EngineError::invalid_input("gross", "yearly net totals overflow"));
    };

    info!(
        label = table.label(),
        total_salary_net = %total_salary_net,
        total_shares_net = %total_shares_net,
        duration_ms = start_time.elapsed().as_millis() as u64,
        "Yearly value computed"
    );

    Ok(table)
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp(MONEY_DECIMAL_PLACES)
}

fn for_month(mut step: AuditStep, month: Month) -> AuditStep {
    step.month = Some(month);
    step
}

fn lookup_step(step_number: u32, month: Month, gross: Decimal, net: Decimal) -> AuditStep {
    AuditStep {
        step_number,
        month: Some(month),
        rule_id: "net_salary_lookup".to_string(),
        rule_name: "Net Salary Lookup".to_string(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string()
        }),
        output: serde_json::json!({
            "net": net.normalize().to_string()
        }),
        reasoning: format!(
            "Net salary for gross ${} is ${}",
            gross.normalize(),
            net.normalize()
        ),
    }
}
