//! Core data models for the share sacrifice model.
//!
//! This module contains all the domain models used throughout the crate.

mod audit;
mod month;
mod scenario;
mod tier;
mod yearly_table;

pub use audit::AuditStep;
pub use month::Month;
pub use scenario::{ScenarioComparison, ScenarioPoint, ScenarioSeries};
pub use tier::Tier;
pub use yearly_table::{MonthRecord, YearlyTable};
