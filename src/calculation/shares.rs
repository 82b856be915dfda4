//! Share conversion.
//!
//! This module converts a cash amount into whole shares and values the
//! shares after a flat tax proxy.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The flat rate applied to the value of granted shares (21%).
///
/// This approximates capital gains tax with a single rate regardless of
/// jurisdiction or income bracket. The acquisition price is taken as zero, so
/// the whole value of the shares is taxed as gain.
pub const DEFAULT_SHARE_TAX_RATE: Decimal = Decimal::from_parts(21, 0, 0, false, 2);

/// Returns the number of whole shares `amount` buys at `price`.
///
/// The fractional remainder is dropped; it is neither refunded nor carried
/// over to the next month. Fails with `InvalidInput` if `price` is not
/// positive.
///
/// # Examples
///
/// ```
/// use share_sacrifice::calculation::compute_shares;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let shares = compute_shares(
///     Decimal::from_str("1041.67").unwrap(),
///     Decimal::from_str("50.03").unwrap(),
/// ).unwrap();
/// assert_eq!(shares, Decimal::from(20));
/// ```
pub fn compute_shares(amount: Decimal, price: Decimal) -> EngineResult<Decimal> {
    if price <= Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "price",
            format!("must be greater than zero, got {}", price),
        ));
    }

    amount
        .checked_div(price)
        .map(|shares| shares.floor())
        .ok_or_else(|| {
            EngineError::invalid_input("amount", format!("{} / {} overflows", amount, price))
        })
}

/// Returns the value of `shares` at `price` after the default 21% tax proxy.
///
/// ```
/// use share_sacrifice::calculation::compute_shares_net_value;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let net = compute_shares_net_value(Decimal::from(20), Decimal::from_str("50.03").unwrap());
/// assert_eq!(net, Decimal::from_str("790.474").unwrap());
/// ```
pub fn compute_shares_net_value(shares: Decimal, price: Decimal) -> Decimal {
    compute_shares_net_value_at_rate(shares, price, DEFAULT_SHARE_TAX_RATE)
}

/// Returns the value of `shares` at `price` after a flat `tax_rate`.
pub fn compute_shares_net_value_at_rate(
    shares: Decimal,
    price: Decimal,
    tax_rate: Decimal,
) -> Decimal {
    shares * price * (Decimal::ONE - tax_rate)
}

/// The result of converting cash into shares, including the audit step.
#[derive(Debug, Clone)]
pub struct ShareConversionResult {
    /// Whole shares granted.
    pub shares: Decimal,
    /// Nominal value of the shares.
    pub shares_gross: Decimal,
    /// Value of the shares after the tax proxy.
    pub shares_net: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Converts `amount` into whole shares and values them gross and net.
pub fn convert_to_shares(
    amount: Decimal,
    price: Decimal,
    tax_rate: Decimal,
    step_number: u32,
) -> EngineResult<ShareConversionResult> {
    let shares = compute_shares(amount, price)?;
    let shares_gross = shares * price;
    let shares_net = compute_shares_net_value_at_rate(shares, price, tax_rate);
    let leftover = amount - shares_gross;

    let audit_step = AuditStep {
        step_number,
        month: None,
        rule_id: "share_conversion".to_string(),
        rule_name: "Share Conversion".to_string(),
        input: serde_json::json!({
            "amount": amount.normalize().to_string(),
            "price": price.normalize().to_string(),
            "tax_rate": tax_rate.normalize().to_string()
        }),
        output: serde_json::json!({
            "shares": shares.normalize().to_string(),
            "shares_gross": shares_gross.normalize().to_string(),
            "shares_net": shares_net.normalize().to_string(),
            "dropped_remainder": leftover.normalize().to_string()
        }),
        reasoning: format!(
            "floor(${} / ${}) = {} shares; {} x ${} x (1 - {}) = ${}",
            amount.normalize(),
            price.normalize(),
            shares.normalize(),
            shares.normalize(),
            price.normalize(),
            tax_rate.normalize(),
            shares_net.normalize()
        ),
    };

    Ok(ShareConversionResult {
        shares,
        shares_gross,
        shares_net,
        audit_step,
    })
}
