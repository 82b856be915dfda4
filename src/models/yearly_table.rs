//! Yearly table models.
//!
//! This module contains the [`MonthRecord`] row type and the [`YearlyTable`]
//! produced by [`compute_yearly_value`](crate::calculation::compute_yearly_value).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, Month};

/// One row of a yearly table.
///
/// Monetary values are rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecord {
    /// The calendar month of this row.
    pub month: Month,
    /// Gross salary paid after any reduction.
    pub salary_gross: Decimal,
    /// Net salary returned by the net salary lookup.
    pub salary_net: Decimal,
    /// Whole shares granted this month.
    pub shares: Decimal,
    /// Nominal value of the shares granted.
    pub shares_gross: Decimal,
    /// Value of the shares granted after the tax proxy.
    pub shares_net: Decimal,
    /// Reduction percentage applied this month.
    pub pct: Decimal,
    /// Share price used this month.
    pub price: Decimal,
}

impl MonthRecord {
    /// Net salary plus net share value, or `None` on overflow.
    pub fn total_net(&self) -> Option<Decimal> {
        self.salary_net.checked_add(self.shares_net)
    }
}

/// Twelve month records for one reduction scenario.
///
/// A table always holds exactly one row per month in calendar order and is
/// immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearlyTable {
    label: String,
    pct: Decimal,
    rows: Vec<MonthRecord>,
    audit_trace: Vec<AuditStep>,
}

impl YearlyTable {
    /// Builds a table from twelve rows in calendar order.
    pub(crate) fn new(pct: Decimal, rows: Vec<MonthRecord>, audit_trace: Vec<AuditStep>) -> Self {
        debug_assert_eq!(rows.len(), Month::ALL.len());
        debug_assert!(rows.iter().zip(Month::ALL).all(|(row, m)| row.month == m));

        Self {
            label: format!("pct_{}", pct.normalize()),
            pct,
            rows,
            audit_trace,
        }
    }

    /// The scenario label, e.g. `pct_0.25`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The scenario reduction percentage.
    pub fn pct(&self) -> Decimal {
        self.pct
    }

    /// All rows, January first.
    pub fn rows(&self) -> &[MonthRecord] {
        &self.rows
    }

    /// Returns the row for a month.
    pub fn row(&self, month: Month) -> &MonthRecord {
        &self.rows[month.number() as usize - 1]
    }

    /// The audit steps recorded while building the table.
    pub fn audit_trace(&self) -> &[AuditStep] {
        &self.audit_trace
    }

    /// Sum of net salary over the year, or `None` on overflow.
    pub fn total_salary_net(&self) -> Option<Decimal> {
        checked_sum(self.rows.iter().map(|r| r.salary_net))
    }

    /// Sum of net share value over the year, or `None` on overflow.
    pub fn total_shares_net(&self) -> Option<Decimal> {
        checked_sum(self.rows.iter().map(|r| r.shares_net))
    }
}

fn checked_sum(mut values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, Decimal::checked_add)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(month: Month, salary_net: i64, shares_net: i64) -> MonthRecord {
        MonthRecord {
            month,
            salary_gross: Decimal::from(2000),
            salary_net: Decimal::from(salary_net),
            shares: Decimal::ZERO,
            shares_gross: Decimal::ZERO,
            shares_net: Decimal::from(shares_net),
            pct: Decimal::ZERO,
            price: Decimal::from(50),
        }
    }

    fn table() -> YearlyTable {
        let rows = Month::ALL
            .iter()
            .map(|&m| row(m, 1500, if m == Month::Apr { 100 } else { 0 }))
            .collect();
        YearlyTable::new(Decimal::new(25, 2), rows, vec![])
    }

    #[test]
    fn test_label_uses_normalized_pct() {
        assert_eq!(table().label(), "pct_0.25");
        let half = YearlyTable::new(
            Decimal::new(50, 2),
            Month::ALL.iter().map(|&m| row(m, 0, 0)).collect(),
            vec![],
        );
        assert_eq!(half.label(), "pct_0.5");
    }

    #[test]
    fn test_row_lookup_by_month() {
        let table = table();
        assert_eq!(table.row(Month::Apr).shares_net, Decimal::from(100));
        assert_eq!(table.row(Month::Dec).month, Month::Dec);
    }

    #[test]
    fn test_totals() {
        let table = table();
        assert_eq!(table.total_salary_net(), Some(Decimal::from(18000)));
        assert_eq!(table.total_shares_net(), Some(Decimal::from(100)));
    }

    #[test]
    fn test_totals_overflow_is_none() {
        let huge = YearlyTable::new(
            Decimal::ZERO,
            Month::ALL
                .iter()
                .map(|&m| MonthRecord {
                    salary_net: Decimal::MAX,
                    ..row(m, 0, 0)
                })
                .collect(),
            vec![],
        );
        assert_eq!(huge.total_salary_net(), None);
        assert_eq!(huge.row(Month::Jan).total_net(), Some(Decimal::MAX));
    }

    #[test]
    fn test_month_record_serializes_camel_case() {
        let json = serde_json::to_value(row(Month::Jan, 1500, 0)).unwrap();
        assert_eq!(json["month"], "JAN");
        assert!(json.get("salaryGross").is_some());
        assert!(json.get("salaryNet").is_some());
        assert!(json.get("sharesGross").is_some());
        assert!(json.get("sharesNet").is_some());
    }

    #[test]
    fn test_total_net_adds_salary_and_shares() {
        assert_eq!(row(Month::Apr, 1500, 100).total_net(), Some(Decimal::from(1600)));
    }
}
