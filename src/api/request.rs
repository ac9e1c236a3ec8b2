//! Request types for the childcare cost engine API.
//!
//! Every schedule field is optional on the wire and falls back to the
//! calculator's usual starting point: four 11-hour days at 6.50 an hour with
//! every eligibility flag set.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::{Schedule, StandardSchedule};

/// Earliest calendar year a request may ask about.
pub const MIN_SUPPORTED_YEAR: i32 = 1900;
/// Latest calendar year a request may ask about.
pub const MAX_SUPPORTED_YEAR: i32 = 9999;

fn check_supported_year(year: i32) -> EngineResult<()> {
    if !(MIN_SUPPORTED_YEAR..=MAX_SUPPORTED_YEAR).contains(&year) {
        return Err(EngineError::InvalidDate {
            message: format!(
                "year {} is outside the supported range {} to {}",
                year, MIN_SUPPORTED_YEAR, MAX_SUPPORTED_YEAR
            ),
        });
    }
    Ok(())
}

/// Schedule fields shared by every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRequest {
    /// Attendance days per week.
    #[serde(default = "default_days_per_week")]
    pub days_per_week: Decimal,
    /// Hours per attendance day.
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: Decimal,
    /// The provider's hourly rate.
    #[serde(default = "default_cost_per_hour")]
    pub cost_per_hour: Decimal,
    /// Whether the household claims the funded hours.
    #[serde(default = "default_flag")]
    pub has_govt_funding: bool,
    /// Whether the household uses Tax-Free Childcare.
    #[serde(default = "default_flag")]
    pub has_tax_free_childcare: bool,
    /// Whether both parents earn under the threshold.
    #[serde(default = "default_flag")]
    pub both_parents_under_100k: bool,
}

fn default_days_per_week() -> Decimal {
    Schedule::default().days_per_week
}

fn default_hours_per_day() -> Decimal {
    Schedule::default().hours_per_day
}

fn default_cost_per_hour() -> Decimal {
    Schedule::default().cost_per_hour
}

fn default_flag() -> bool {
    true
}

impl Default for ScheduleRequest {
    fn default() -> Self {
        Schedule::default().into()
    }
}

impl From<Schedule> for ScheduleRequest {
    fn from(schedule: Schedule) -> Self {
        ScheduleRequest {
            days_per_week: schedule.days_per_week,
            hours_per_day: schedule.hours_per_day,
            cost_per_hour: schedule.cost_per_hour,
            has_govt_funding: schedule.has_govt_funding,
            has_tax_free_childcare: schedule.has_tax_free_childcare,
            both_parents_under_100k: schedule.both_parents_under_100k,
        }
    }
}

impl TryFrom<ScheduleRequest> for Schedule {
    type Error = EngineError;

    fn try_from(req: ScheduleRequest) -> EngineResult<Self> {
        let schedule = Schedule {
            days_per_week: req.days_per_week,
            hours_per_day: req.hours_per_day,
            cost_per_hour: req.cost_per_hour,
            has_govt_funding: req.has_govt_funding,
            has_tax_free_childcare: req.has_tax_free_childcare,
            both_parents_under_100k: req.both_parents_under_100k,
        };
        schedule.validate()?;
        Ok(schedule)
    }
}

/// Request body for the `/week` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekRequest {
    /// The date the week is evaluated from, normally a Monday.
    pub week_start: NaiveDate,
    /// The schedule to price.
    #[serde(default)]
    pub schedule: ScheduleRequest,
}

impl WeekRequest {
    /// The week start, rejected when its year is outside the supported range.
    pub fn checked_week_start(&self) -> EngineResult<NaiveDate> {
        check_supported_year(self.week_start.year())?;
        Ok(self.week_start)
    }
}

/// Request body for the `/month`, `/year` and `/calendar` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRequest {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 to 12. Ignored by `/year`.
    #[serde(default = "default_month")]
    pub month: u32,
    /// The schedule to aggregate.
    #[serde(default)]
    pub schedule: ScheduleRequest,
}

fn default_month() -> u32 {
    1
}

impl PeriodRequest {
    /// The first day of the requested month.
    pub fn anchor(&self) -> EngineResult<NaiveDate> {
        check_supported_year(self.year)?;
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| EngineError::InvalidDate {
            message: format!("no such month: {}-{:02}", self.year, self.month),
        })
    }
}

/// Request body for the `/standard` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardRequest {
    /// Attended weeks per year.
    #[serde(default = "default_weeks_per_year")]
    pub weeks_per_year: u32,
    /// The weekly pattern and eligibility.
    #[serde(default)]
    pub schedule: ScheduleRequest,
}

fn default_weeks_per_year() -> u32 {
    StandardSchedule::default().weeks_per_year
}

impl TryFrom<StandardRequest> for StandardSchedule {
    type Error = EngineError;

    fn try_from(req: StandardRequest) -> EngineResult<Self> {
        let standard = StandardSchedule {
            weeks_per_year: req.weeks_per_year,
            schedule: req.schedule.try_into()?,
        };
        standard.validate()?;
        Ok(standard)
    }
}
