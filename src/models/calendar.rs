//! The displayed month calendar.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{PeriodBreakdown, WeekCostResult};

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The date of the cell.
    pub date: NaiveDate,
    /// False for padding days from the neighbouring months.
    pub in_month: bool,
    /// True when the day falls inside a school term.
    pub is_term_time: bool,
    /// True for bank holidays and Christmas closure days.
    pub is_unpaid: bool,
    /// True for bank holidays only.
    pub is_bank_holiday: bool,
    /// The bank holiday's name, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

/// One row of the month grid, Monday to Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarWeek {
    /// The Monday the row starts on.
    pub week_start: NaiveDate,
    /// Sunday-start week-of-year number of the Monday.
    pub week_number: u32,
    /// The seven days of the row.
    pub days: Vec<CalendarDay>,
    /// Cost of the week, as shown beside the row.
    pub cost: WeekCostResult,
    /// Whether the row's Monday falls in the displayed month.
    pub counts_toward_month: bool,
}

/// A displayed month: the grid plus the month's breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCalendar {
    /// Calendar year of the displayed month.
    pub year: i32,
    /// Month number, 1 to 12.
    pub month: u32,
    /// The anchor moved back a month, day clamped to that month's length.
    pub previous_month: NaiveDate,
    /// The anchor moved forward a month, day clamped to that month's length.
    pub next_month: NaiveDate,
    /// The grid rows.
    pub weeks: Vec<CalendarWeek>,
    /// Totals for the weeks that count toward the month.
    pub breakdown: PeriodBreakdown,
}
