//! Flat-rate ("stretched") cost calculation.
//!
//! This mode ignores the calendar: it bills the same hours every attended week
//! and credits a fixed annual allowance of funded hours at the provider's own
//! rate. Unlike calendar mode, the net cost is floored at zero.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::FundingRules;
use crate::models::{AmountSplit, StandardBreakdown, StandardSchedule};

/// Calculates the annual cost of a flat-rate schedule.
///
/// Funded hours are credited in full whenever the household is eligible, even
/// if they exceed the hours booked. The Tax-Free Childcare top-up is then
/// taken from what remains and is not floored, so a negative remainder gives a
/// negative top-up; only the final net cost is clamped.
///
/// # Example
///
/// ```
/// use childcare_engine::calculation::calculate_standard;
/// use childcare_engine::config::FundingRules;
/// use childcare_engine::models::StandardSchedule;
/// use rust_decimal::Decimal;
///
/// let result = calculate_standard(&StandardSchedule::default(), &FundingRules::default());
///
/// // 38 weeks x 4 days x 11 hours
/// assert_eq!(result.total_hours, Decimal::new(1672, 0));
/// assert_eq!(result.funded_hours, Decimal::new(1140, 0));
/// assert!(result.net_cost.yearly >= Decimal::ZERO);
/// ```
pub fn calculate_standard(schedule: &StandardSchedule, rules: &FundingRules) -> StandardBreakdown {
    let weeks = schedule.weeks_per_year;
    let booking = &schedule.schedule;

    let total_hours = Decimal::from(weeks) * booking.total_hours_per_week();
    let gross_cost = total_hours * booking.cost_per_hour;

    let funded_hours = if booking.funding_eligible() {
        rules.standard_funded_hours()
    } else {
        Decimal::ZERO
    };
    let govt_funding_savings = funded_hours * booking.cost_per_hour;

    let tax_free_savings = if booking.tax_free_eligible() {
        ((gross_cost - govt_funding_savings) * rules.tax_free_rate).min(rules.tax_free_annual_cap)
    } else {
        Decimal::ZERO
    };

    let total_savings = govt_funding_savings + tax_free_savings;
    let net_cost = (gross_cost - total_savings).max(Decimal::ZERO);
    let savings_percentage = if gross_cost > Decimal::ZERO {
        total_savings / gross_cost * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    debug!(
        weeks_per_year = weeks,
        total_hours = %total_hours,
        gross_cost = %gross_cost,
        net_cost = %net_cost,
        "Calculated flat-rate cost"
    );

    StandardBreakdown {
        total_hours,
        funded_hours,
        gross_cost: AmountSplit::from_yearly(gross_cost, weeks),
        govt_funding_savings: AmountSplit::from_yearly(govt_funding_savings, weeks),
        tax_free_savings: AmountSplit::from_yearly(tax_free_savings, weeks),
        total_savings: AmountSplit::from_yearly(total_savings, weeks),
        net_cost: AmountSplit::from_yearly(net_cost, weeks),
        savings_percentage,
    }
}
