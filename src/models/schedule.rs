//! Weekly childcare schedules.
//!
//! A [`Schedule`] is the household's attendance pattern and eligibility flags.
//! The calculation functions assume the values are already inside the ranges
//! enforced by [`Schedule::validate`]; the input layer is responsible for
//! calling it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Upper bound on attendance days in a week.
pub const MAX_DAYS_PER_WEEK: u32 = 7;
/// Lower bound on hours per attendance day.
pub const MIN_HOURS_PER_DAY: u32 = 4;
/// Upper bound on hours per attendance day.
pub const MAX_HOURS_PER_DAY: u32 = 14;
/// Upper bound on attended weeks per year in flat-rate mode.
pub const MAX_WEEKS_PER_YEAR: u32 = 52;
/// Upper bound on the provider's hourly rate, in pounds.
pub const MAX_COST_PER_HOUR: u32 = 1000;

/// A household's weekly schedule and eligibility.
///
/// # Example
///
/// ```
/// use childcare_engine::models::Schedule;
/// use rust_decimal::Decimal;
///
/// let schedule = Schedule {
///     days_per_week: Decimal::new(35, 1),
///     ..Schedule::default()
/// };
/// assert!(schedule.validate().is_ok());
/// assert_eq!(schedule.total_hours_per_week(), Decimal::new(385, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Attendance days per week, 0 to 7 in half-day steps.
    pub days_per_week: Decimal,
    /// Hours per attendance day, 4 to 14 in half-hour steps.
    pub hours_per_day: Decimal,
    /// The provider's hourly rate, 0 to 1000.
    pub cost_per_hour: Decimal,
    /// Whether the household claims the 30 funded hours.
    pub has_govt_funding: bool,
    /// Whether the household uses Tax-Free Childcare.
    pub has_tax_free_childcare: bool,
    /// Whether both parents earn under the 100k threshold.
    pub both_parents_under_100k: bool,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            days_per_week: Decimal::new(4, 0),
            hours_per_day: Decimal::new(11, 0),
            cost_per_hour: Decimal::new(650, 2),
            has_govt_funding: true,
            has_tax_free_childcare: true,
            both_parents_under_100k: true,
        }
    }
}

impl Schedule {
    /// Booked hours in a week with no unpaid days.
    pub fn total_hours_per_week(&self) -> Decimal {
        self.days_per_week * self.hours_per_day
    }

    /// True when the household qualifies for funded hours.
    pub fn funding_eligible(&self) -> bool {
        self.has_govt_funding && self.both_parents_under_100k
    }

    /// True when the household qualifies for Tax-Free Childcare.
    pub fn tax_free_eligible(&self) -> bool {
        self.has_tax_free_childcare && self.both_parents_under_100k
    }

    /// Checks every numeric field against the ranges the engine relies on.
    pub fn validate(&self) -> EngineResult<()> {
        check_half_steps(
            "days_per_week",
            self.days_per_week,
            Decimal::ZERO,
            Decimal::from(MAX_DAYS_PER_WEEK),
        )?;
        check_half_steps(
            "hours_per_day",
            self.hours_per_day,
            Decimal::from(MIN_HOURS_PER_DAY),
            Decimal::from(MAX_HOURS_PER_DAY),
        )?;
        let max_rate = Decimal::from(MAX_COST_PER_HOUR);
        if self.cost_per_hour < Decimal::ZERO || self.cost_per_hour > max_rate {
            return Err(EngineError::invalid_schedule(
                "cost_per_hour",
                format!("must be between 0 and {}, got {}", max_rate, self.cost_per_hour),
            ));
        }
        Ok(())
    }
}

fn check_half_steps(field: &str, value: Decimal, min: Decimal, max: Decimal) -> EngineResult<()> {
    if value < min || value > max {
        return Err(EngineError::invalid_schedule(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    if !(value * Decimal::TWO).fract().is_zero() {
        return Err(EngineError::invalid_schedule(
            field,
            format!("must be a multiple of 0.5, got {}", value),
        ));
    }
    Ok(())
}

/// Input to the flat-rate calculator: a schedule spread over a number of weeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardSchedule {
    /// Attended weeks per year, 0 to 52.
    pub weeks_per_year: u32,
    /// The weekly pattern and eligibility.
    #[serde(flatten)]
    pub schedule: Schedule,
}

impl Default for StandardSchedule {
    fn default() -> Self {
        Self {
            weeks_per_year: 38,
            schedule: Schedule::default(),
        }
    }
}

impl StandardSchedule {
    /// Validates the week count and the underlying schedule.
    pub fn validate(&self) -> EngineResult<()> {
        if self.weeks_per_year > MAX_WEEKS_PER_YEAR {
            return Err(EngineError::invalid_schedule(
                "weeks_per_year",
                format!(
                    "must be between 0 and {}, got {}",
                    MAX_WEEKS_PER_YEAR, self.weeks_per_year
                ),
            ));
        }
        self.schedule.validate()
    }
}
