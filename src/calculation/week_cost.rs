//! Week cost calculation.
//!
//! This module prices a single week of childcare: it prorates booked hours by
//! the week's unpaid days, then bills term weeks with funding as funded hours
//! at the surcharge plus any remainder at the provider's rate, and every other
//! week at the provider's rate throughout.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{Schedule, WeekCostResult};

use super::CalendarClassifier;
use super::attendance::{WeekAttendance, assess_week};

/// Calculates the cost of the week starting `week_start`.
///
/// The week is classified as term or holiday from `week_start` alone, even if
/// a term boundary falls later in the week.
///
/// Funded hours are granted whenever the schedule claims funding in a term
/// week; the income threshold is not checked here. Period aggregation does
/// check it when it totals funding savings, so the two can disagree for a
/// household over the threshold.
///
/// # Example
///
/// ```no_run
/// use childcare_engine::calculation::calculate_week_cost;
/// use childcare_engine::config::ConfigLoader;
/// use childcare_engine::models::Schedule;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::load("./config/uk")?;
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// let result = calculate_week_cost(monday, &Schedule::default(), loader.classifier());
///
/// // 30 funded hours at 1.50 plus 14 hours at 6.50
/// assert_eq!(result.total, Decimal::new(136, 0));
/// # Ok::<(), childcare_engine::error::EngineError>(())
/// ```
pub fn calculate_week_cost(
    week_start: NaiveDate,
    schedule: &Schedule,
    classifier: &CalendarClassifier,
) -> WeekCostResult {
    let attendance = assess_week(week_start, schedule, classifier);
    price_week(week_start, schedule, classifier, attendance)
}

/// Prices a week whose attendance has already been assessed.
pub(crate) fn price_week(
    week_start: NaiveDate,
    schedule: &Schedule,
    classifier: &CalendarClassifier,
    attendance: WeekAttendance,
) -> WeekCostResult {
    let (unpaid_days, paid_days_ratio, adjusted_total_hours) = match attendance {
        WeekAttendance::AllUnpaid { unpaid_days } => {
            return WeekCostResult::unpaid(unpaid_days);
        }
        WeekAttendance::Paid {
            unpaid_days,
            paid_days_ratio,
            adjusted_total_hours,
        } => (unpaid_days, paid_days_ratio, adjusted_total_hours),
    };

    let rules = classifier.rules();

    if classifier.is_term_time(week_start) && schedule.has_govt_funding {
        let funded_hours = funded_hours_for(
            rules.funded_hours_per_week,
            paid_days_ratio,
            adjusted_total_hours,
        );
        let unfunded_hours = (adjusted_total_hours - funded_hours).max(Decimal::ZERO);

        WeekCostResult {
            total: funded_hours * rules.surcharge_per_hour
                + unfunded_hours * schedule.cost_per_hour,
            funded_hours,
            unfunded_hours,
            is_term_time: true,
            is_unpaid: false,
            unpaid_days,
        }
    } else {
        WeekCostResult {
            total: adjusted_total_hours * schedule.cost_per_hour,
            funded_hours: Decimal::ZERO,
            unfunded_hours: adjusted_total_hours,
            is_term_time: false,
            is_unpaid: false,
            unpaid_days,
        }
    }
}

/// The funded-hours cap prorated by attendance, never more than the hours booked.
pub(crate) fn funded_hours_for(
    funded_hours_per_week: Decimal,
    paid_days_ratio: Decimal,
    adjusted_total_hours: Decimal,
) -> Decimal {
    (funded_hours_per_week * paid_days_ratio).min(adjusted_total_hours)
}
