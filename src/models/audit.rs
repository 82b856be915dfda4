//! Audit trail models.
//!
//! Every rule applied while building a yearly table records an [`AuditStep`]
//! so a reader can trace each monthly figure back to its inputs.

use serde::{Deserialize, Serialize};

use super::Month;

/// A single step in the audit trace recording a calculation decision.
///
/// # Example
///
/// ```
/// use share_sacrifice::models::{AuditStep, Month};
///
/// let step = AuditStep {
///     step_number: 1,
///     month: Some(Month::Apr),
///     rule_id: "compensation".to_string(),
///     rule_name: "Salary Compensation Split".to_string(),
///     input: serde_json::json!({ "gross": "4166.67", "pct": "0.25" }),
///     output: serde_json::json!({ "gross_new": "3125.0025" }),
///     reasoning: "$4166.67 x (1 - 0.25) = $3125.0025".to_string(),
/// };
/// assert_eq!(step.month, Some(Month::Apr));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The month this step applies to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<Month>,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
