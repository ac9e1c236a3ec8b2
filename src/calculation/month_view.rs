//! The displayed month calendar.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::{CalendarDay, CalendarWeek, MonthCalendar, Schedule};

use super::calendar::week_number;
use super::period::{aggregate_month, in_same_month, month_grid, next_month, previous_month};
use super::{CalendarClassifier, calculate_week_cost};

/// Builds the month grid for `anchor`'s month.
///
/// Every row is priced, including padding rows whose Monday falls in a
/// neighbouring month; only rows marked `counts_toward_month` feed the
/// breakdown.
pub fn month_calendar(
    anchor: NaiveDate,
    schedule: &Schedule,
    classifier: &CalendarClassifier,
) -> MonthCalendar {
    let weeks = month_grid(anchor)
        .into_iter()
        .map(|week_start| CalendarWeek {
            week_start,
            week_number: week_number(week_start),
            days: (0..7)
                .map(|offset| {
                    let date = week_start + Duration::days(offset);
                    CalendarDay {
                        date,
                        in_month: in_same_month(date, anchor),
                        is_term_time: classifier.is_term_time(date),
                        is_unpaid: classifier.is_unpaid_day(date),
                        is_bank_holiday: classifier.is_bank_holiday(date),
                        holiday_name: classifier.bank_holiday_name(date).map(str::to_string),
                    }
                })
                .collect(),
            cost: calculate_week_cost(week_start, schedule, classifier),
            counts_toward_month: in_same_month(week_start, anchor),
        })
        .collect();

    MonthCalendar {
        year: anchor.year(),
        month: anchor.month(),
        previous_month: previous_month(anchor),
        next_month: next_month(anchor),
        weeks,
        breakdown: aggregate_month(anchor, schedule, classifier).breakdown,
    }
}
