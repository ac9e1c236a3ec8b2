//! Month and year aggregation.
//!
//! A month counts the Monday-start grid weeks whose Monday falls in the month.
//! A year counts 52 seven-day steps from 1 January, whatever weekday that is.
//! Each counted week adds its chargeable hours to the gross cost and, when the
//! household is eligible, its funded hours to the funding saving. Tax-Free
//! Childcare is applied once to the folded totals.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{
    AuditStep, PeriodBreakdown, PeriodCalculation, PeriodKind, Schedule, WeekCostResult,
    WeekEntry,
};

use super::CalendarClassifier;
use super::attendance::{WeekAttendance, assess_week};
use super::week_cost::price_week;

/// Number of weeks in a calendar-mode year.
pub const WEEKS_PER_YEAR: i64 = 52;

/// The first day of `date`'s month.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}

/// The last day of `date`'s month.
pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    // 31 days past the 1st always lands in the following month
    first_of_month(first_of_month(date) + Duration::days(31)) - Duration::days(1)
}

/// Moves `anchor` back one month, clamping the day to that month's length.
///
/// # Example
///
/// ```
/// use childcare_engine::calculation::previous_month;
/// use chrono::NaiveDate;
///
/// let anchor = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
/// assert_eq!(previous_month(anchor), NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
/// ```
pub fn previous_month(anchor: NaiveDate) -> NaiveDate {
    let target = first_of_month(first_of_month(anchor) - Duration::days(1));
    with_clamped_day(target, anchor.day())
}

/// Moves `anchor` forward one month, clamping the day to that month's length.
pub fn next_month(anchor: NaiveDate) -> NaiveDate {
    let target = first_of_month(first_of_month(anchor) + Duration::days(31));
    with_clamped_day(target, anchor.day())
}

fn with_clamped_day(month_start: NaiveDate, day: u32) -> NaiveDate {
    let day = day.min(last_of_month(month_start).day());
    month_start + Duration::days(i64::from(day) - 1)
}

fn start_of_monday_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The Mondays of every row in the month grid for `anchor`'s month.
///
/// The grid runs from the Monday on or before the 1st to the Sunday on or
/// after the last day, so the first and last rows may start in the
/// neighbouring months.
pub fn month_grid(anchor: NaiveDate) -> Vec<NaiveDate> {
    let grid_start = start_of_monday_week(first_of_month(anchor));
    let grid_end = last_of_month(anchor);

    let mut rows = Vec::new();
    let mut week_start = grid_start;
    while week_start <= grid_end {
        rows.push(week_start);
        week_start += Duration::days(7);
    }
    rows
}

/// The grid Mondays that fall inside `anchor`'s month.
pub fn month_week_starts(anchor: NaiveDate) -> Vec<NaiveDate> {
    month_grid(anchor)
        .into_iter()
        .filter(|monday| in_same_month(*monday, anchor))
        .collect()
}

/// The 52 week starts of `anchor`'s year: 1 January plus multiples of 7 days.
pub fn year_week_starts(anchor: NaiveDate) -> Vec<NaiveDate> {
    let jan_first = start_of_year(anchor);
    (0..WEEKS_PER_YEAR)
        .map(|i| jan_first + Duration::days(7 * i))
        .collect()
}

pub(crate) fn in_same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn start_of_year(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.ordinal0()))
}

/// Aggregates the weeks counted toward `anchor`'s month.
///
/// The Tax-Free Childcare saving is capped at a twelfth of the annual cap.
///
/// # Example
///
/// ```no_run
/// use childcare_engine::calculation::aggregate_month;
/// use childcare_engine::config::ConfigLoader;
/// use childcare_engine::models::Schedule;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/uk")?;
/// let anchor = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// let month = aggregate_month(anchor, &Schedule::default(), loader.classifier());
///
/// assert_eq!(month.weeks.len(), 4);
/// println!("net cost for January: {}", month.breakdown.net_cost);
/// # Ok::<(), childcare_engine::error::EngineError>(())
/// ```
pub fn aggregate_month(
    anchor: NaiveDate,
    schedule: &Schedule,
    classifier: &CalendarClassifier,
) -> PeriodCalculation {
    let cap = classifier.rules().tax_free_monthly_cap();
    aggregate(
        PeriodKind::Month,
        first_of_month(anchor),
        last_of_month(anchor),
        month_week_starts(anchor),
        schedule,
        classifier,
        cap,
    )
}

/// Aggregates the 52 weeks of `anchor`'s year against the annual cap.
///
/// The result also carries the net cost spread over twelve months.
///
/// The period ends on the last day of the 52nd week, one or two days short of
/// 31 December.
pub fn aggregate_year(
    anchor: NaiveDate,
    schedule: &Schedule,
    classifier: &CalendarClassifier,
) -> PeriodCalculation {
    let jan_first = start_of_year(anchor);
    let cap = classifier.rules().tax_free_annual_cap;
    aggregate(
        PeriodKind::Year,
        jan_first,
        jan_first + Duration::days(7 * WEEKS_PER_YEAR - 1),
        year_week_starts(anchor),
        schedule,
        classifier,
        cap,
    )
}

/// Folds counted weeks into a breakdown.
///
/// Funding savings need the income check as well as the funding flag, which
/// the week price itself does not apply. The net cost is not floored.
fn aggregate(
    kind: PeriodKind,
    period_start: NaiveDate,
    period_end: NaiveDate,
    week_starts: Vec<NaiveDate>,
    schedule: &Schedule,
    classifier: &CalendarClassifier,
    tax_free_cap: Decimal,
) -> PeriodCalculation {
    let rules = classifier.rules();
    let funding_eligible = schedule.funding_eligible();

    let mut gross_cost = Decimal::ZERO;
    let mut govt_funding_savings = Decimal::ZERO;
    let mut billed_total = Decimal::ZERO;
    let mut weeks = Vec::with_capacity(week_starts.len());
    let mut audit_steps = Vec::with_capacity(week_starts.len() + 1);

    for week_start in week_starts {
        let attendance = assess_week(week_start, schedule, classifier);
        let cost = price_week(week_start, schedule, classifier, attendance);
        billed_total += cost.total;

        let (week_gross, week_saving) = match attendance {
            WeekAttendance::AllUnpaid { .. } => (Decimal::ZERO, Decimal::ZERO),
            WeekAttendance::Paid {
                adjusted_total_hours,
                ..
            } => {
                let week_gross = adjusted_total_hours * schedule.cost_per_hour;
                let week_saving = if classifier.is_term_time(week_start) && funding_eligible {
                    cost.funded_hours * (schedule.cost_per_hour - rules.surcharge_per_hour)
                } else {
                    Decimal::ZERO
                };
                (week_gross, week_saving)
            }
        };
        gross_cost += week_gross;
        govt_funding_savings += week_saving;

        audit_steps.push(week_audit_step(
            audit_steps.len() as u32 + 1,
            week_start,
            schedule,
            &attendance,
            &cost,
            week_gross,
            week_saving,
        ));
        weeks.push(WeekEntry { week_start, cost });
    }

    let cost_after_funding = gross_cost - govt_funding_savings;
    let tax_free_savings = if schedule.tax_free_eligible() {
        (cost_after_funding * rules.tax_free_rate).min(tax_free_cap)
    } else {
        Decimal::ZERO
    };
    let net_cost = gross_cost - govt_funding_savings - tax_free_savings;
    let breakdown = PeriodBreakdown {
        gross_cost,
        govt_funding_savings,
        tax_free_savings,
        net_cost,
    };
    let monthly_average = match kind {
        PeriodKind::Year => Some(net_cost / Decimal::new(12, 0)),
        PeriodKind::Month => None,
    };

    audit_steps.push(AuditStep {
        step_number: audit_steps.len() as u32 + 1,
        rule_id: "tax_free_childcare".to_string(),
        rule_name: "Tax-Free Childcare".to_string(),
        input: serde_json::json!({
            "cost_after_funding": cost_after_funding.normalize().to_string(),
            "tax_free_rate": rules.tax_free_rate.normalize().to_string(),
            "cap": tax_free_cap.round_dp(2).normalize().to_string(),
            "eligible": schedule.tax_free_eligible()
        }),
        output: serde_json::json!({
            "tax_free_savings": tax_free_savings.normalize().to_string(),
            "total_savings": breakdown.total_savings().normalize().to_string(),
            "net_cost": net_cost.normalize().to_string()
        }),
        reasoning: if schedule.tax_free_eligible() {
            format!(
                "{} of {} after funding, capped at {} for the {}",
                rules.tax_free_rate.normalize(),
                cost_after_funding.normalize(),
                tax_free_cap.round_dp(2).normalize(),
                kind
            )
        } else {
            "Not eligible for Tax-Free Childcare".to_string()
        },
    });

    debug!(
        period = %kind,
        period_start = %period_start,
        counted_weeks = weeks.len(),
        gross_cost = %gross_cost,
        total_savings = %breakdown.total_savings(),
        net_cost = %net_cost,
        "Aggregated period"
    );

    PeriodCalculation {
        kind,
        period_start,
        period_end,
        breakdown,
        monthly_average,
        billed_total,
        weeks,
        audit_steps,
    }
}

fn week_audit_step(
    step_number: u32,
    week_start: NaiveDate,
    schedule: &Schedule,
    attendance: &WeekAttendance,
    cost: &WeekCostResult,
    week_gross: Decimal,
    week_saving: Decimal,
) -> AuditStep {
    let reasoning = match attendance {
        WeekAttendance::AllUnpaid { unpaid_days } => format!(
            "All selected days unpaid ({} of {}); week not charged",
            unpaid_days.normalize(),
            schedule.days_per_week.normalize()
        ),
        WeekAttendance::Paid { .. } if cost.is_term_time && !schedule.funding_eligible() => format!(
            "Term week: {} funded hours billed at the surcharge, no saving counted without income eligibility",
            cost.funded_hours.normalize()
        ),
        WeekAttendance::Paid { .. } if cost.is_term_time => format!(
            "Term week: {} funded hours save {}",
            cost.funded_hours.normalize(),
            week_saving.normalize()
        ),
        WeekAttendance::Paid {
            adjusted_total_hours,
            ..
        } => format!(
            "Week charged in full: {} hours at {}",
            adjusted_total_hours.normalize(),
            schedule.cost_per_hour.normalize()
        ),
    };

    AuditStep {
        step_number,
        rule_id: "week_cost".to_string(),
        rule_name: "Week Cost".to_string(),
        input: serde_json::json!({
            "week_start": week_start.to_string(),
            "days_per_week": schedule.days_per_week.normalize().to_string(),
            "unpaid_days": attendance.unpaid_days().normalize().to_string()
        }),
        output: serde_json::json!({
            "total": cost.total.normalize().to_string(),
            "funded_hours": cost.funded_hours.normalize().to_string(),
            "unfunded_hours": cost.unfunded_hours.normalize().to_string(),
            "gross_cost": week_gross.normalize().to_string(),
            "govt_funding_saving": week_saving.normalize().to_string()
        }),
        reasoning,
    }
}
