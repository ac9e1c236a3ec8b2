//! Calculation result envelope and audit trace.
//!
//! This module contains the [`CostCalculationResult`] type returned for month
//! and year requests, and the audit structures that record how each counted
//! week contributed to the totals.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{PeriodBreakdown, PeriodKind, WeekEntry};

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for one rule
/// application, typically one counted week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
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

/// A warning generated during calculation.
///
/// Warnings flag results that are computed but may be unreliable, such as
/// weeks outside the reference dataset's coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a calculation.
///
/// # Example
///
/// ```
/// use childcare_engine::models::AuditTrace;
///
/// let trace = AuditTrace {
///     steps: vec![],
///     warnings: vec![],
///     duration_us: 1234,
/// };
/// assert!(trace.steps.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a month or year cost calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCalculationResult {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The version of the reference dataset used.
    pub dataset_version: String,
    /// Month or year.
    pub period: PeriodKind,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Gross cost and savings.
    pub breakdown: PeriodBreakdown,
    /// Net cost divided by twelve, present for year results.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_average: Option<Decimal>,
    /// Sum of the counted weeks' billed totals.
    pub billed_total: Decimal,
    /// The weeks counted toward the period.
    pub weeks: Vec<WeekEntry>,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_result() -> CostCalculationResult {
        CostCalculationResult {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: "0.1.0".to_string(),
            dataset_version: "2025.1".to_string(),
            period: PeriodKind::Month,
            period_start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            period_end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
            breakdown: PeriodBreakdown {
                gross_cost: dec("1144"),
                govt_funding_savings: dec("600"),
                tax_free_savings: dec("108.8"),
                net_cost: dec("435.2"),
            },
            monthly_average: None,
            billed_total: dec("544"),
            weeks: vec![],
            audit_trace: AuditTrace {
                steps: vec![AuditStep {
                    step_number: 1,
                    rule_id: "week_cost".to_string(),
                    rule_name: "Week Cost".to_string(),
                    input: serde_json::json!({ "week_start": "2026-01-05" }),
                    output: serde_json::json!({ "total": "136" }),
                    reasoning: "Funded term week".to_string(),
                }],
                warnings: vec![],
                duration_us: 12,
            },
        }
    }

    #[test]
    fn test_result_round_trips_through_json() {
        let result = sample_result();
        let json = serde_json::to_string(&result).unwrap();
        let parsed: CostCalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, result);
    }

    #[test]
    fn test_result_serializes_period_and_breakdown() {
        let json = serde_json::to_value(sample_result()).unwrap();
        assert_eq!(json["period"], "month");
        assert_eq!(json["period_start"], "2026-01-01");
        assert_eq!(json["breakdown"]["net_cost"], "435.2");
        assert_eq!(json["audit_trace"]["steps"][0]["rule_id"], "week_cost");
        assert!(json.get("monthly_average").is_none());
    }

    #[test]
    fn test_year_result_serializes_monthly_average() {
        let result = CostCalculationResult {
            period: PeriodKind::Year,
            monthly_average: Some(dec("432.5")),
            ..sample_result()
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["period"], "year");
        assert_eq!(json["monthly_average"], "432.5");
    }

    #[test]
    fn test_audit_warning_serialization() {
        let warning = AuditWarning {
            code: "REFERENCE_DATA_OUT_OF_RANGE".to_string(),
            message: "week 2029-01-01 is outside dataset coverage".to_string(),
            severity: "medium".to_string(),
        };
        let json = serde_json::to_string(&warning).unwrap();
        assert!(json.contains("\"code\":\"REFERENCE_DATA_OUT_OF_RANGE\""));
        assert!(json.contains("\"severity\":\"medium\""));
    }
}
