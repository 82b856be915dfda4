//! Scenario comparison models.

use rust_decimal::Decimal;
use serde::Serialize;

use super::{Month, Tier, YearlyTable};

/// Cumulative figures for one month of a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioPoint {
    /// The calendar month.
    pub month: Month,
    /// Net salary paid this month.
    pub salary_net: Decimal,
    /// Net share value granted this month.
    pub shares_net: Decimal,
    /// Net salary accumulated since January.
    pub cumulative_salary_net: Decimal,
    /// Net share value accumulated since January.
    pub cumulative_shares_net: Decimal,
    /// Accumulated net salary plus accumulated net share value.
    pub cumulative_total_net: Decimal,
    /// Accumulated share value as a percentage of accumulated salary.
    pub shares_to_salary_pct: Decimal,
}

/// The yearly table of one tier and its derived cumulative series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioSeries {
    /// The tier this series was computed for.
    pub tier: Tier,
    /// The underlying yearly table.
    pub table: YearlyTable,
    /// One point per month, January first.
    pub points: Vec<ScenarioPoint>,
}

impl ScenarioSeries {
    /// The December point, i.e. the year-end totals.
    pub fn year_end(&self) -> Option<&ScenarioPoint> {
        self.points.last()
    }
}

/// Yearly tables at several tiers, side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioComparison {
    /// Monthly gross salary before any reduction.
    pub gross: Decimal,
    /// Share price used in every scenario.
    pub price: Decimal,
    /// One series per requested tier, in request order.
    pub series: Vec<ScenarioSeries>,
}

impl ScenarioComparison {
    /// Returns the series computed for a tier.
    pub fn for_tier(&self, tier: Tier) -> Option<&ScenarioSeries> {
        self.series.iter().find(|s| s.tier == tier)
    }
}
