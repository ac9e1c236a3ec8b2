//! Reference dataset loading.
//!
//! This module provides the [`ConfigLoader`] type for loading a reference
//! dataset from YAML files and handing it to a [`CalendarClassifier`].

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::calculation::CalendarClassifier;
use crate::error::{EngineError, EngineResult};

use super::types::{
    BankHolidaysConfig, DatasetMetadata, FundingRules, ReferenceData, TermDatesConfig,
};

/// Loads and provides access to a reference dataset.
///
/// # Directory Structure
///
/// ```text
/// config/uk/
/// ├── dataset.yaml        # Dataset metadata and coverage window
/// ├── term_dates.yaml     # School terms
/// ├── bank_holidays.yaml  # Bank holidays
/// └── rules.yaml          # Funding rules (optional, defaults apply)
/// ```
///
/// # Example
///
/// ```no_run
/// use childcare_engine::config::ConfigLoader;
/// use chrono::NaiveDate;
///
/// let loader = ConfigLoader::load("./config/uk")?;
/// let monday = NaiveDate::from_ymd_opt(2026, 1, 12).unwrap();
/// assert!(loader.classifier().is_term_time(monday));
/// # Ok::<(), childcare_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    classifier: CalendarClassifier,
}

impl ConfigLoader {
    /// Loads a dataset from the specified directory.
    ///
    /// Returns an error if a required file is missing, contains invalid YAML,
    /// or the terms overlap.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<DatasetMetadata>(&path.join("dataset.yaml"))?;
        let terms = Self::load_yaml::<TermDatesConfig>(&path.join("term_dates.yaml"))?;
        let holidays = Self::load_yaml::<BankHolidaysConfig>(&path.join("bank_holidays.yaml"))?;

        let rules_path = path.join("rules.yaml");
        let rules = if rules_path.exists() {
            Self::load_yaml::<FundingRules>(&rules_path)?
        } else {
            debug!(path = %rules_path.display(), "No rules file, using default funding rules");
            FundingRules::default()
        };

        let data = ReferenceData::new(metadata, terms.terms, holidays.bank_holidays, rules)?;
        debug!(
            dataset = %data.metadata().code,
            version = %data.metadata().version,
            terms = data.terms().len(),
            bank_holidays = data.bank_holidays().len(),
            "Loaded reference dataset"
        );

        Ok(Self {
            classifier: CalendarClassifier::new(data),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the classifier built over the loaded dataset.
    pub fn classifier(&self) -> &CalendarClassifier {
        &self.classifier
    }

    /// Consumes the loader, returning the classifier.
    pub fn into_classifier(self) -> CalendarClassifier {
        self.classifier
    }

    /// Returns the dataset metadata.
    pub fn metadata(&self) -> &DatasetMetadata {
        self.classifier.reference_data().metadata()
    }

    /// Returns the funding rules.
    pub fn rules(&self) -> &FundingRules {
        self.classifier.rules()
    }
}
