//! Calculation logic for the childcare cost engine.
//!
//! This module contains the date classification against the reference
//! dataset, the per-week cost with unpaid-day proration and funded hours, the
//! month and year aggregation into gross, savings and net figures, the month
//! calendar view, and the flat-rate calculator.

mod attendance;
mod calendar;
mod month_view;
mod period;
mod standard;
mod week_cost;

pub use attendance::{WeekAttendance, assess_week, count_unpaid_days};
pub use calendar::{CalendarClassifier, is_christmas_period, week_number};
pub use month_view::month_calendar;
pub use period::{
    WEEKS_PER_YEAR, aggregate_month, aggregate_year, first_of_month, last_of_month, month_grid,
    month_week_starts, next_month, previous_month, year_week_starts,
};
pub use standard::calculate_standard;
pub use week_cost::calculate_week_cost;
