//! Salary compensation split.
//!
//! This module splits a gross monthly salary into the reduced gross salary
//! that is still paid out and the cash amount converted into shares.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, Tier};

/// The result of splitting a gross salary, including the audit step.
#[derive(Debug, Clone)]
pub struct CompensationResult {
    /// The tier that was applied.
    pub tier: Tier,
    /// Gross salary after the reduction.
    pub gross_new: Decimal,
    /// Cash amount earmarked for shares, multiplier included.
    pub compensation: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Splits `gross` according to the reduction percentage `pct`.
///
/// - `gross_new = gross * (1 - pct)`
/// - `compensation = gross * pct * multiplier(pct)`
///
/// Values are not rounded. `pct` must be one of the supported tiers
/// (0, 0.25, 0.5, 0.75); anything else fails with `UnsupportedTier` before any
/// arithmetic is done. A `gross` too large for the compensation to be
/// represented fails with `InvalidInput`.
///
/// # Examples
///
/// ```
/// use share_sacrifice::calculation::compute_compensation;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let half = Decimal::from_str("0.5").unwrap();
/// let result = compute_compensation(Decimal::from(2000), half, 1).unwrap();
/// assert_eq!(result.gross_new, Decimal::from(1000));
/// assert_eq!(result.compensation, Decimal::from(1500));
///
/// let unsupported = Decimal::from_str("0.4").unwrap();
/// assert!(compute_compensation(Decimal::from(2000), unsupported, 1).is_err());
/// ```
pub fn compute_compensation(
    gross: Decimal,
    pct: Decimal,
    step_number: u32,
) -> EngineResult<CompensationResult> {
    let tier = Tier::try_from(pct)?;
    compute_compensation_for_tier(gross, tier, step_number)
}

/// Splits `gross` for an already validated tier.
pub fn compute_compensation_for_tier(
    gross: Decimal,
    tier: Tier,
    step_number: u32,
) -> EngineResult<CompensationResult> {
    let pct = tier.pct();
    let multiplier = tier.multiplier();

    let overflow = || {
        EngineError::invalid_input(
            "gross",
            format!("{} overflows at a {} reduction", gross, pct.normalize()),
        )
    };
    let gross_new = gross.checked_mul(Decimal::ONE - pct).ok_or_else(overflow)?;
    let compensation = gross
        .checked_mul(pct)
        .and_then(|share_cash| share_cash.checked_mul(multiplier))
        .ok_or_else(overflow)?;

    let reasoning = if tier == Tier::None {
        format!("No reduction: gross ${} paid in full", gross.normalize())
    } else {
        format!(
            "${} x (1 - {}) = ${} paid; ${} x {} x {} = ${} converted to shares",
            gross.normalize(),
            pct.normalize(),
            gross_new.normalize(),
            gross.normalize(),
            pct.normalize(),
            multiplier.normalize(),
            compensation.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        month: None,
        rule_id: "compensation_split".to_string(),
        rule_name: "Salary Compensation Split".to_string(),
        input: serde_json::json!({
            "gross": gross.normalize().to_string(),
            "pct": pct.normalize().to_string()
        }),
        output: serde_json::json!({
            "gross_new": gross_new.normalize().to_string(),
            "compensation": compensation.normalize().to_string(),
            "multiplier": multiplier.normalize().to_string()
        }),
        reasoning,
    };

    Ok(CompensationResult {
        tier,
        gross_new,
        compensation,
        audit_step,
    })
}
