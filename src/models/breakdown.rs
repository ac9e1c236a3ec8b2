//! Aggregated cost breakdowns for a month, a year, or the flat-rate mode.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, WeekCostResult};

/// The span a calendar-mode breakdown covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodKind {
    /// The Monday-start weeks whose Monday falls in a calendar month.
    Month,
    /// 52 seven-day steps from 1 January.
    Year,
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PeriodKind::Month => write!(f, "month"),
            PeriodKind::Year => write!(f, "year"),
        }
    }
}

/// Gross cost and savings for a period.
///
/// # Example
///
/// ```
/// use childcare_engine::models::PeriodBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = PeriodBreakdown::default();
/// assert_eq!(breakdown.net_cost, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodBreakdown {
    /// Cost of every paid hour at the provider's rate.
    pub gross_cost: Decimal,
    /// Saving from funded hours, net of the surcharge.
    pub govt_funding_savings: Decimal,
    /// Tax-Free Childcare top-up, capped.
    pub tax_free_savings: Decimal,
    /// What remains after both savings. Not floored at zero.
    pub net_cost: Decimal,
}

impl PeriodBreakdown {
    /// Sum of both savings.
    pub fn total_savings(&self) -> Decimal {
        self.govt_funding_savings + self.tax_free_savings
    }
}

/// One week counted toward a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekEntry {
    /// The date the week was evaluated from.
    pub week_start: NaiveDate,
    /// The week's cost.
    pub cost: WeekCostResult,
}

/// The full output of a month or year aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodCalculation {
    /// Month or year.
    pub kind: PeriodKind,
    /// First day of the period.
    pub period_start: NaiveDate,
    /// Last day of the period.
    pub period_end: NaiveDate,
    /// Gross cost and savings.
    pub breakdown: PeriodBreakdown,
    /// Net cost over twelve months. Years only.
    pub monthly_average: Option<Decimal>,
    /// Sum of the counted weeks' billed totals.
    pub billed_total: Decimal,
    /// The weeks that were counted, in order.
    pub weeks: Vec<WeekEntry>,
    /// One step per counted week, then the Tax-Free Childcare step.
    pub audit_steps: Vec<AuditStep>,
}

/// A flat-rate amount split per week and per month.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountSplit {
    /// The annual amount.
    pub yearly: Decimal,
    /// The annual amount over the attended weeks (zero for zero weeks).
    pub weekly: Decimal,
    /// The annual amount over twelve months.
    pub monthly: Decimal,
}

impl AmountSplit {
    /// Splits an annual amount across `weeks_per_year` weeks and 12 months.
    pub fn from_yearly(yearly: Decimal, weeks_per_year: u32) -> Self {
        let weekly = if weeks_per_year > 0 {
            yearly / Decimal::from(weeks_per_year)
        } else {
            Decimal::ZERO
        };
        Self {
            yearly,
            weekly,
            monthly: yearly / Decimal::new(12, 0),
        }
    }
}

/// Result of the flat-rate calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardBreakdown {
    /// Booked hours across the year.
    pub total_hours: Decimal,
    /// Funded hours credited for the year (zero when not eligible).
    pub funded_hours: Decimal,
    /// Gross cost, split.
    pub gross_cost: AmountSplit,
    /// Funded-hours saving, split.
    pub govt_funding_savings: AmountSplit,
    /// Tax-Free Childcare saving, split.
    pub tax_free_savings: AmountSplit,
    /// Both savings, split.
    pub total_savings: AmountSplit,
    /// Net cost floored at zero, split.
    pub net_cost: AmountSplit,
    /// Total savings as a percentage of gross cost.
    pub savings_percentage: Decimal,
}
