//! Per-week cost results.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The cost of one week of childcare.
///
/// Produced fresh for every calculation; it has no identity beyond its values.
///
/// `is_term_time` is only set for weeks billed under the funded term-time
/// branch. A term week for a household without funding is reported the same
/// way as a holiday week.
///
/// # Example
///
/// ```
/// use childcare_engine::models::WeekCostResult;
/// use rust_decimal::Decimal;
///
/// let closed = WeekCostResult::unpaid(Decimal::new(5, 0));
/// assert!(closed.is_unpaid);
/// assert_eq!(closed.total, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekCostResult {
    /// What the household pays for the week.
    pub total: Decimal,
    /// Hours billed at the funded-hour surcharge.
    pub funded_hours: Decimal,
    /// Hours billed at the provider's hourly rate.
    pub unfunded_hours: Decimal,
    /// True when the week was billed as a funded term-time week.
    pub is_term_time: bool,
    /// True when every selected day of the week was unpaid.
    pub is_unpaid: bool,
    /// Number of selected days (including half days) that were unpaid.
    pub unpaid_days: Decimal,
}

impl WeekCostResult {
    /// A week in which no selected day is chargeable.
    pub fn unpaid(unpaid_days: Decimal) -> Self {
        Self {
            total: Decimal::ZERO,
            funded_hours: Decimal::ZERO,
            unfunded_hours: Decimal::ZERO,
            is_term_time: false,
            is_unpaid: true,
            unpaid_days,
        }
    }

    /// Total chargeable hours in the week.
    pub fn billed_hours(&self) -> Decimal {
        self.funded_hours + self.unfunded_hours
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_unpaid_week_is_all_zero() {
        let result = WeekCostResult::unpaid(dec("2"));
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.funded_hours, Decimal::ZERO);
        assert_eq!(result.unfunded_hours, Decimal::ZERO);
        assert!(!result.is_term_time);
        assert!(result.is_unpaid);
        assert_eq!(result.unpaid_days, dec("2"));
    }

    #[test]
    fn test_billed_hours_sums_both_kinds() {
        let result = WeekCostResult {
            total: dec("136"),
            funded_hours: dec("30"),
            unfunded_hours: dec("14"),
            is_term_time: true,
            is_unpaid: false,
            unpaid_days: Decimal::ZERO,
        };
        assert_eq!(result.billed_hours(), dec("44"));
    }

    #[test]
    fn test_serializes_amounts_as_strings() {
        let result = WeekCostResult {
            total: dec("102.00"),
            funded_hours: dec("22.5"),
            unfunded_hours: dec("10.5"),
            is_term_time: true,
            is_unpaid: false,
            unpaid_days: dec("1"),
        };
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"total\":\"102.00\""));
        assert!(json.contains("\"funded_hours\":\"22.5\""));
        assert!(json.contains("\"is_term_time\":true"));
    }
}
