//! Reference dataset types.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the YAML files of a reference dataset directory, and the validated
//! [`ReferenceData`] aggregate built from them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata identifying a reference dataset.
///
/// The tables are maintained externally and are only valid for a fixed range
/// of years; `coverage_start`/`coverage_end` record that range so callers can
/// tell when the dataset needs refreshing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetMetadata {
    /// Short identifier for the dataset (e.g., "uk-england").
    pub code: String,
    /// Human-readable name of the dataset.
    pub name: String,
    /// Version of the dataset, bumped whenever a table changes.
    pub version: String,
    /// Where the published dates were taken from.
    pub source_url: String,
    /// First date the tables are known to be complete for.
    pub coverage_start: NaiveDate,
    /// Last date the tables are known to be complete for.
    pub coverage_end: NaiveDate,
}

/// A school term, inclusive of both bounds.
///
/// # Example
///
/// ```
/// use childcare_engine::config::TermInterval;
/// use chrono::NaiveDate;
///
/// let term = TermInterval::new(
///     NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 2, 13).unwrap(),
/// );
/// assert!(term.contains(NaiveDate::from_ymd_opt(2026, 2, 13).unwrap()));
/// assert!(!term.contains(NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermInterval {
    /// Optional label such as "Spring 1 2026".
    #[serde(default)]
    pub name: Option<String>,
    /// First day of term.
    pub start: NaiveDate,
    /// Last day of term.
    pub end: NaiveDate,
}

impl TermInterval {
    /// Creates an unnamed term interval.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            name: None,
            start,
            end,
        }
    }

    /// Returns true if `date` falls within the term, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A single bank holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankHoliday {
    /// The date of the bank holiday.
    pub date: NaiveDate,
    /// The name of the bank holiday (e.g., "Easter Monday").
    pub name: String,
}

/// The rate constants behind both calculator modes.
///
/// Defaults are the published UK figures the shipped dataset uses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FundingRules {
    /// Weekly cap on government-funded hours before prorating.
    pub funded_hours_per_week: Decimal,
    /// Charge per funded hour during term time.
    pub surcharge_per_hour: Decimal,
    /// Share of spend topped up by Tax-Free Childcare.
    pub tax_free_rate: Decimal,
    /// Annual Tax-Free Childcare cap.
    pub tax_free_annual_cap: Decimal,
    /// Funded weeks per year assumed by the flat-rate calculator.
    pub standard_funded_weeks: u32,
}

impl Default for FundingRules {
    fn default() -> Self {
        Self {
            funded_hours_per_week: Decimal::new(30, 0),
            surcharge_per_hour: Decimal::new(150, 2),
            tax_free_rate: Decimal::new(20, 2),
            tax_free_annual_cap: Decimal::new(2000, 0),
            standard_funded_weeks: 38,
        }
    }
}

impl FundingRules {
    /// The monthly Tax-Free Childcare cap: the annual cap split evenly over 12 months.
    pub fn tax_free_monthly_cap(&self) -> Decimal {
        self.tax_free_annual_cap / Decimal::new(12, 0)
    }

    /// Funded hours per year in flat-rate mode (30 x 38 by default).
    pub fn standard_funded_hours(&self) -> Decimal {
        self.funded_hours_per_week * Decimal::from(self.standard_funded_weeks)
    }
}

/// term_dates.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct TermDatesConfig {
    /// The terms, in any order.
    pub terms: Vec<TermInterval>,
}

/// bank_holidays.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct BankHolidaysConfig {
    /// The bank holidays, in any order.
    pub bank_holidays: Vec<BankHoliday>,
}

/// A complete, validated reference dataset.
///
/// Terms are kept sorted by start date and are guaranteed not to overlap.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    metadata: DatasetMetadata,
    terms: Vec<TermInterval>,
    bank_holidays: Vec<BankHoliday>,
    rules: FundingRules,
}

impl ReferenceData {
    /// Builds a dataset from its parts, sorting and validating the terms.
    ///
    /// Fails with [`EngineError::InvalidReferenceData`] when a term ends
    /// before it starts or two terms overlap.
    pub fn new(
        metadata: DatasetMetadata,
        terms: Vec<TermInterval>,
        bank_holidays: Vec<BankHoliday>,
        rules: FundingRules,
    ) -> EngineResult<Self> {
        let mut sorted_terms = terms;
        sorted_terms.sort_by(|a, b| a.start.cmp(&b.start));

        for term in &sorted_terms {
            if term.start > term.end {
                return Err(EngineError::InvalidReferenceData {
                    message: format!("term ends {} before it starts {}", term.end, term.start),
                });
            }
        }
        for pair in sorted_terms.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(EngineError::overlapping_terms(pair[0].end, pair[1].start));
            }
        }

        let mut sorted_holidays = bank_holidays;
        sorted_holidays.sort_by(|a, b| a.date.cmp(&b.date));

        Ok(Self {
            metadata,
            terms: sorted_terms,
            bank_holidays: sorted_holidays,
            rules,
        })
    }

    /// Returns the dataset metadata.
    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }

    /// Returns the terms, sorted by start date.
    pub fn terms(&self) -> &[TermInterval] {
        &self.terms
    }

    /// Returns the bank holidays, sorted by date.
    pub fn bank_holidays(&self) -> &[BankHoliday] {
        &self.bank_holidays
    }

    /// Returns the funding rules.
    pub fn rules(&self) -> &FundingRules {
        &self.rules
    }
}
