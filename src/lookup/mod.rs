//! Net salary lookup.
//!
//! The yearly computation does not implement income tax rules. It delegates
//! the gross to net conversion to a [`NetSalaryLookup`], which in production
//! is a third-party tax calculator page ([`ScrapedNetSalary`]) wrapped in a
//! [`PacedLookup`] so consecutive requests are spaced out.
//!
//! Any closure `Fn(Decimal) -> EngineResult<Decimal>` is a lookup, which keeps
//! the arithmetic testable without network access:
//!
//! ```
//! use share_sacrifice::error::EngineResult;
//! use share_sacrifice::lookup::NetSalaryLookup;
//! use rust_decimal::Decimal;
//!
//! let flat = |gross: Decimal| -> EngineResult<Decimal> { Ok(gross * Decimal::new(8, 1)) };
//! assert_eq!(flat.net_salary(Decimal::from(2000)).unwrap(), Decimal::from(1600));
//! ```

mod paced;
mod scrape;

use rust_decimal::Decimal;

use crate::error::EngineResult;

pub use paced::{DEFAULT_MIN_INTERVAL, PacedLookup};
pub use scrape::{ScrapedNetSalary, extract_element_text, parse_amount};

/// Converts a gross monthly salary into the net monthly salary after taxes.
///
/// Implementations are blocking and may be slow. Callers issue lookups one at a
/// time; a failure must be reported as
/// [`EngineError::LookupFailed`](crate::error::EngineError::LookupFailed).
pub trait NetSalaryLookup {
    /// Returns the net monthly salary for `gross_monthly`.
    fn net_salary(&self, gross_monthly: Decimal) -> EngineResult<Decimal>;
}

impl<F> NetSalaryLookup for F
where
    F: Fn(Decimal) -> EngineResult<Decimal>,
{
    fn net_salary(&self, gross_monthly: Decimal) -> EngineResult<Decimal> {
        self(gross_monthly)
    }
}
