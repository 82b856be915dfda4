//! Calendar month labels.
//!
//! Months are addressed by their three-letter upper-case label (`JAN`..`DEC`).
//! The label is how callers select reduction months and how rows of a
//! [`YearlyTable`](super::YearlyTable) are looked up.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A calendar month, ordered January to December.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Month {
    /// January.
    Jan,
    /// February.
    Feb,
    /// March.
    Mar,
    /// April.
    Apr,
    /// May.
    May,
    /// June.
    Jun,
    /// July.
    Jul,
    /// August.
    Aug,
    /// September.
    Sep,
    /// October.
    Oct,
    /// November.
    Nov,
    /// December.
    Dec,
}

impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Returns the three-letter upper-case label.
    ///
    /// # Examples
    ///
    /// ```
    /// use share_sacrifice::models::Month;
    ///
    /// assert_eq!(Month::Apr.label(), "APR");
    /// ```
    pub fn label(self) -> &'static str {
        match self {
            Month::Jan => "JAN",
            Month::Feb => "FEB",
            Month::Mar => "MAR",
            Month::Apr => "APR",
            Month::May => "MAY",
            Month::Jun => "JUN",
            Month::Jul => "JUL",
            Month::Aug => "AUG",
            Month::Sep => "SEP",
            Month::Oct => "OCT",
            Month::Nov => "NOV",
            Month::Dec => "DEC",
        }
    }

    /// Returns the month number, 1 for January through 12 for December.
    pub fn number(self) -> u32 {
        chrono::Month::from(self).number_from_month()
    }
}

impl From<Month> for chrono::Month {
    fn from(month: Month) -> Self {
        match month {
            Month::Jan => chrono::Month::January,
            Month::Feb => chrono::Month::February,
            Month::Mar => chrono::Month::March,
            Month::Apr => chrono::Month::April,
            Month::May => chrono::Month::May,
            Month::Jun => chrono::Month::June,
            Month::Jul => chrono::Month::July,
            Month::Aug => chrono::Month::August,
            Month::Sep => chrono::Month::September,
            Month::Oct => chrono::Month::October,
            Month::Nov => chrono::Month::November,
            Month::Dec => chrono::Month::December,
        }
    }
}

impl From<chrono::Month> for Month {
    fn from(month: chrono::Month) -> Self {
        // number_from_month is always within 1..=12
        Month::ALL[month.number_from_month() as usize - 1]
    }
}

impl FromStr for Month {
    type Err = EngineError;

    /// Parses a month label, case-insensitively.
    ///
    /// Accepts three-letter labels and full English names. `AGU` is accepted
    /// as a legacy spelling of August.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let trimmed = label.trim();
        if trimmed.eq_ignore_ascii_case("AGU") {
            return Ok(Month::Aug);
        }

        trimmed
            .parse::<chrono::Month>()
            .map(Month::from)
            .map_err(|_| EngineError::UnknownMonth {
                label: label.to_string(),
            })
    }
}

impl TryFrom<String> for Month {
    type Error = EngineError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
