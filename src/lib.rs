//! Childcare cost engine for UK households
//!
//! This crate estimates what a weekly childcare schedule costs once term-time
//! funded hours, unpaid bank holidays and Christmas closure days, and the
//! Tax-Free Childcare top-up are taken into account. It prices single weeks,
//! aggregates months and years against a versioned reference dataset, and
//! offers a flat-rate mode that ignores the calendar.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
