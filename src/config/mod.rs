//! Reference dataset loading for the childcare cost engine.
//!
//! The term-date and bank-holiday tables are maintained outside the engine and
//! are valid only for the years they were published for. They are loaded from
//! YAML into a [`ReferenceData`] value and injected into the calendar
//! classifier, so a new academic year means a new dataset, not new code.
//!
//! # Example
//!
//! ```no_run
//! use childcare_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/uk").unwrap();
//! println!("Loaded dataset: {}", loader.metadata().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BankHoliday, BankHolidaysConfig, DatasetMetadata, FundingRules, ReferenceData,
    TermDatesConfig, TermInterval,
};
