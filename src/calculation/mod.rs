//! Calculation logic for the share sacrifice model.
//!
//! This module contains the compensation split of a gross salary, the
//! conversion of cash into whole shares, the twelve-month yearly value table
//! and the comparison of several reduction tiers.

mod compensation;
mod scenario;
mod shares;
mod yearly_value;

pub use compensation::{CompensationResult, compute_compensation, compute_compensation_for_tier};
pub use scenario::{ScenarioParams, build_series, compare_scenarios};
pub use shares::{
    DEFAULT_SHARE_TAX_RATE, ShareConversionResult, compute_shares, compute_shares_net_value,
    compute_shares_net_value_at_rate, convert_to_shares,
};
pub use yearly_value::{MONEY_DECIMAL_PLACES, YearlyValueParams, compute_yearly_value};
