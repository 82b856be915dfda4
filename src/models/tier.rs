//! Salary reduction tiers.
//!
//! Only four reduction percentages are supported. Each one carries a fixed
//! incentive multiplier that amplifies the cash converted to shares, so a
//! deeper salary sacrifice buys proportionally more shares.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A supported salary reduction percentage.
///
/// | Tier            | pct  | multiplier |
/// |-----------------|------|------------|
/// | `None`          | 0.0  | 0.0        |
/// | `Quarter`       | 0.25 | 1.0        |
/// | `Half`          | 0.5  | 1.5        |
/// | `ThreeQuarters` | 0.75 | 2.0        |
///
/// # Examples
///
/// ```
/// use share_sacrifice::models::Tier;
/// use rust_decimal::Decimal;
///
/// let tier = Tier::try_from(Decimal::new(5, 1)).unwrap();
/// assert_eq!(tier, Tier::Half);
/// assert_eq!(tier.multiplier(), Decimal::new(15, 1));
///
/// assert!(Tier::try_from(Decimal::new(3, 1)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub enum Tier {
    /// No reduction.
    None,
    /// 25% reduction.
    Quarter,
    /// 50% reduction.
    Half,
    /// 75% reduction.
    ThreeQuarters,
}

impl Tier {
    /// All supported tiers, shallowest first.
    pub const ALL: [Tier; 4] = [Tier::None, Tier::Quarter, Tier::Half, Tier::ThreeQuarters];

    /// Returns the fraction of gross salary given up.
    pub fn pct(self) -> Decimal {
        match self {
            Tier::None => Decimal::ZERO,
            Tier::Quarter => Decimal::new(25, 2),
            Tier::Half => Decimal::new(5, 1),
            Tier::ThreeQuarters => Decimal::new(75, 2),
        }
    }

    /// Returns the incentive multiplier applied to the sacrificed amount.
    pub fn multiplier(self) -> Decimal {
        match self {
            Tier::None => Decimal::ZERO,
            Tier::Quarter => Decimal::ONE,
            Tier::Half => Decimal::new(15, 1),
            Tier::ThreeQuarters => Decimal::TWO,
        }
    }
}

impl TryFrom<Decimal> for Tier {
    type Error = EngineError;

    fn try_from(pct: Decimal) -> Result<Self, Self::Error> {
        Tier::ALL
            .into_iter()
            .find(|tier| tier.pct() == pct)
            .ok_or(EngineError::UnsupportedTier { pct })
    }
}

impl From<Tier> for Decimal {
    fn from(tier: Tier) -> Self {
        tier.pct()
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pct())
    }
}
