//! Core data models for the childcare cost engine.
//!
//! This module contains the schedules fed into the engine and every record it
//! produces.

mod breakdown;
mod calculation_result;
mod calendar;
mod schedule;
mod week_cost;

pub use breakdown::{
    AmountSplit, PeriodBreakdown, PeriodCalculation, PeriodKind, StandardBreakdown, WeekEntry,
};
pub use calculation_result::{AuditStep, AuditTrace, AuditWarning, CostCalculationResult};
pub use calendar::{CalendarDay, CalendarWeek, MonthCalendar};
pub use schedule::{
    MAX_COST_PER_HOUR, MAX_DAYS_PER_WEEK, MAX_HOURS_PER_DAY, MAX_WEEKS_PER_YEAR,
    MIN_HOURS_PER_DAY, Schedule, StandardSchedule,
};
pub use week_cost::WeekCostResult;
