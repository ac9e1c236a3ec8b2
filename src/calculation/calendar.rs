//! Calendar classification against the reference dataset.
//!
//! This module answers the date questions the cost calculation depends on:
//! whether a date is in school term, whether it is a bank holiday, and whether
//! it falls in the fixed Christmas closure. Dates outside the dataset's tables
//! silently classify as "not term, not bank holiday"; nothing here fails.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};

use crate::config::{FundingRules, ReferenceData};

/// Classifies dates against an injected, immutable reference dataset.
///
/// # Example
///
/// ```
/// use childcare_engine::calculation::CalendarClassifier;
/// use childcare_engine::config::{
///     BankHoliday, DatasetMetadata, FundingRules, ReferenceData, TermInterval,
/// };
/// use chrono::NaiveDate;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// let data = ReferenceData::new(
///     DatasetMetadata {
///         code: "demo".to_string(),
///         name: "Demo".to_string(),
///         version: "1".to_string(),
///         source_url: "https://example.invalid".to_string(),
///         coverage_start: d(2026, 1, 1),
///         coverage_end: d(2026, 12, 31),
///     },
///     vec![TermInterval::new(d(2026, 4, 13), d(2026, 5, 22))],
///     vec![BankHoliday { date: d(2026, 5, 4), name: "Early May bank holiday".to_string() }],
///     FundingRules::default(),
/// )
/// .unwrap();
///
/// let classifier = CalendarClassifier::new(data);
/// assert!(classifier.is_term_time(d(2026, 5, 4)));
/// assert!(classifier.is_unpaid_day(d(2026, 5, 4)));
/// assert!(classifier.is_unpaid_day(d(2026, 12, 24)));
/// ```
#[derive(Debug, Clone)]
pub struct CalendarClassifier {
    data: ReferenceData,
    holiday_dates: HashSet<NaiveDate>,
}

impl CalendarClassifier {
    /// Builds a classifier over a validated dataset.
    pub fn new(data: ReferenceData) -> Self {
        let holiday_dates = data.bank_holidays().iter().map(|h| h.date).collect();
        Self {
            data,
            holiday_dates,
        }
    }

    /// Returns the underlying dataset.
    pub fn reference_data(&self) -> &ReferenceData {
        &self.data
    }

    /// Returns the dataset's funding rules.
    pub fn rules(&self) -> &FundingRules {
        self.data.rules()
    }

    /// True iff `date` falls inside any term, bounds included.
    pub fn is_term_time(&self, date: NaiveDate) -> bool {
        self.data.terms().iter().any(|term| term.contains(date))
    }

    /// True iff `date` is in the bank holiday table.
    pub fn is_bank_holiday(&self, date: NaiveDate) -> bool {
        self.holiday_dates.contains(&date)
    }

    /// The name of the bank holiday on `date`, if there is one.
    pub fn bank_holiday_name(&self, date: NaiveDate) -> Option<&str> {
        self.data
            .bank_holidays()
            .iter()
            .find(|h| h.date == date)
            .map(|h| h.name.as_str())
    }

    /// True iff `date` is in the Christmas closure, 24 December to 2 January.
    pub fn is_christmas_period(&self, date: NaiveDate) -> bool {
        is_christmas_period(date)
    }

    /// True for bank holidays and Christmas closure days.
    ///
    /// Independent of term status: a bank holiday in term is both.
    pub fn is_unpaid_day(&self, date: NaiveDate) -> bool {
        self.is_bank_holiday(date) || is_christmas_period(date)
    }

    /// True when `date` lies inside the dataset's declared coverage window.
    ///
    /// The calculations never consult this; it exists so callers can warn
    /// about stale tables.
    pub fn covers(&self, date: NaiveDate) -> bool {
        let metadata = self.data.metadata();
        date >= metadata.coverage_start && date <= metadata.coverage_end
    }
}

/// The fixed Christmas closure: 24-31 December and 1-2 January.
pub fn is_christmas_period(date: NaiveDate) -> bool {
    let day = date.day();
    match date.month() {
        12 => day >= 24,
        1 => day <= 2,
        _ => false,
    }
}

/// Week-of-year number with Sunday-start weeks, where week 1 is the week
/// containing 1 January.
///
/// Late-December dates that share a week with the next 1 January are week 1
/// of the next year.
pub fn week_number(date: NaiveDate) -> u32 {
    let week_start = start_of_sunday_week(date);
    let next_year_start = first_week_start(date.year() + 1);
    let year_start = if date >= next_year_start {
        next_year_start
    } else {
        first_week_start(date.year())
    };
    ((week_start - year_start).num_days() / 7 + 1) as u32
}

fn start_of_sunday_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

fn first_week_start(year: i32) -> NaiveDate {
    // 1 January exists in every year chrono can represent here.
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(NaiveDate::MIN);
    start_of_sunday_week(jan_first)
}
