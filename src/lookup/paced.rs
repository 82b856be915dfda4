//! Minimum-interval pacing for net salary lookups.

use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use tracing::debug;

use super::NetSalaryLookup;
use crate::error::EngineResult;

/// Default pause between two consecutive lookups.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(500);

/// Wraps a lookup so that consecutive calls are at least `min_interval` apart.
///
/// The first call goes through immediately. Later calls sleep for whatever is
/// left of the interval since the previous call returned. Calls through a
/// shared reference are serialized, so one `PacedLookup` behind an `Arc`
/// still spaces out requests from several callers.
///
/// # Examples
///
/// ```
/// use share_sacrifice::error::EngineResult;
/// use share_sacrifice::lookup::{NetSalaryLookup, PacedLookup};
/// use rust_decimal::Decimal;
/// use std::time::Duration;
///
/// let lookup = PacedLookup::new(
///     |gross: Decimal| -> EngineResult<Decimal> { Ok(gross) },
///     Duration::ZERO,
/// );
/// assert_eq!(lookup.net_salary(Decimal::from(10)).unwrap(), Decimal::from(10));
/// ```
#[derive(Debug)]
pub struct PacedLookup<L> {
    inner: L,
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl<L> PacedLookup<L> {
    /// Wraps `inner` with the given minimum interval.
    pub fn new(inner: L, min_interval: Duration) -> Self {
        Self {
            inner,
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// Wraps `inner` with [`DEFAULT_MIN_INTERVAL`].
    pub fn with_default_interval(inner: L) -> Self {
        Self::new(inner, DEFAULT_MIN_INTERVAL)
    }

    /// The configured minimum interval.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// The wrapped lookup.
    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: NetSalaryLookup> NetSalaryLookup for PacedLookup<L> {
    fn net_salary(&self, gross_monthly: Decimal) -> EngineResult<Decimal> {
        // Held across the inner call so concurrent callers queue up.
        let mut last_call = self
            .last_call
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = *last_call {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!(wait_ms = wait.as_millis() as u64, "Pacing net salary lookup");
                thread::sleep(wait);
            }
        }

        let result = self.inner.net_salary(gross_monthly);
        *last_call = Some(Instant::now());
        result
    }
}
