//! HTTP API for the childcare cost engine.
//!
//! This module is the input layer: it validates schedules, runs the
//! calculations against the loaded reference dataset, and returns JSON.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{REFERENCE_DATA_OUT_OF_RANGE, create_router};
pub use request::{
    MAX_SUPPORTED_YEAR, MIN_SUPPORTED_YEAR, PeriodRequest, ScheduleRequest, StandardRequest,
    WeekRequest,
};
pub use response::{ApiError, ApiErrorResponse, ReferenceDataResponse};
pub use state::AppState;
