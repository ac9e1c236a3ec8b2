//! Unpaid-day counting and paid-days proration for a single week.
//!
//! Both the week cost calculation and the period aggregation need the same
//! numbers: how many of the selected days are unpaid, and what share of the
//! booked hours is still chargeable. They are computed here once.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::Schedule;

use super::CalendarClassifier;

/// How a schedule's selected days fall in a particular week.
///
/// # Example
///
/// ```
/// use childcare_engine::calculation::WeekAttendance;
/// use rust_decimal::Decimal;
///
/// let attendance = WeekAttendance::Paid {
///     unpaid_days: Decimal::ONE,
///     paid_days_ratio: Decimal::new(75, 2),
///     adjusted_total_hours: Decimal::new(33, 0),
/// };
/// assert!(!attendance.is_all_unpaid());
/// assert_eq!(attendance.unpaid_days(), Decimal::ONE);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekAttendance {
    /// Every selected day is unpaid. Also covers a zero-day schedule.
    AllUnpaid {
        /// Unpaid selected days, including a half day.
        unpaid_days: Decimal,
    },
    /// At least part of one selected day is chargeable.
    Paid {
        /// Unpaid selected days, including a half day.
        unpaid_days: Decimal,
        /// Share of selected days that are chargeable, in (0, 1].
        paid_days_ratio: Decimal,
        /// Booked weekly hours scaled by the paid-days ratio.
        adjusted_total_hours: Decimal,
    },
}

impl WeekAttendance {
    /// Unpaid selected days, whichever branch applies.
    pub fn unpaid_days(&self) -> Decimal {
        match self {
            WeekAttendance::AllUnpaid { unpaid_days } => *unpaid_days,
            WeekAttendance::Paid { unpaid_days, .. } => *unpaid_days,
        }
    }

    /// True when nothing in the week is chargeable.
    pub fn is_all_unpaid(&self) -> bool {
        matches!(self, WeekAttendance::AllUnpaid { .. })
    }
}

/// Counts unpaid selected days for the week starting `week_start`.
///
/// The selected days are the first `floor(days_per_week)` days from
/// `week_start`, plus the next day for a trailing half day. A half day that
/// lands on an unpaid day contributes its fraction.
pub fn count_unpaid_days(
    week_start: NaiveDate,
    days_per_week: Decimal,
    classifier: &CalendarClassifier,
) -> Decimal {
    let whole_days = days_per_week.floor();
    let partial_day = days_per_week - whole_days;
    let full_days = whole_days.to_i64().unwrap_or(0).clamp(0, 7);

    let mut unpaid_days = Decimal::ZERO;
    for offset in 0..full_days {
        if classifier.is_unpaid_day(week_start + Duration::days(offset)) {
            unpaid_days += Decimal::ONE;
        }
    }

    if partial_day > Decimal::ZERO
        && full_days < 7
        && classifier.is_unpaid_day(week_start + Duration::days(full_days))
    {
        unpaid_days += partial_day;
    }

    unpaid_days
}

/// Works out the chargeable share of a week for `schedule`.
///
/// The all-unpaid check runs before the ratio is formed, so a zero-day
/// schedule never divides by zero.
pub fn assess_week(
    week_start: NaiveDate,
    schedule: &Schedule,
    classifier: &CalendarClassifier,
) -> WeekAttendance {
    let unpaid_days = count_unpaid_days(week_start, schedule.days_per_week, classifier);

    if unpaid_days >= schedule.days_per_week {
        return WeekAttendance::AllUnpaid { unpaid_days };
    }

    let paid_days_ratio = (schedule.days_per_week - unpaid_days) / schedule.days_per_week;
    WeekAttendance::Paid {
        unpaid_days,
        paid_days_ratio,
        adjusted_total_hours: schedule.total_hours_per_week() * paid_days_ratio,
    }
}
