//! HTTP request handlers for the childcare cost engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    aggregate_month, aggregate_year, calculate_standard, calculate_week_cost, month_calendar,
};
use crate::config::ConfigLoader;
use crate::models::{
    AuditTrace, AuditWarning, CostCalculationResult, MonthCalendar, PeriodCalculation,
    PeriodKind, Schedule, StandardBreakdown, StandardSchedule, WeekCostResult,
};

use super::request::{PeriodRequest, StandardRequest, WeekRequest};
use super::response::{ApiError, ApiErrorResponse, ReferenceDataResponse};
use super::state::AppState;

/// Warning code attached when a counted week lies outside the dataset's coverage.
pub const REFERENCE_DATA_OUT_OF_RANGE: &str = "REFERENCE_DATA_OUT_OF_RANGE";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/week", post(week_handler))
        .route("/month", post(month_handler))
        .route("/year", post(year_handler))
        .route("/calendar", post(calendar_handler))
        .route("/standard", post(standard_handler))
        .route("/reference-data", get(reference_data_handler))
        .with_state(state)
}

/// Handler for POST /week.
async fn week_handler(
    State(state): State<AppState>,
    payload: Result<Json<WeekRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing week request");

    let result = parse_body(payload, correlation_id).and_then(|request| {
        price_single_week(state.config(), request, correlation_id)
    });
    respond(correlation_id, result)
}

/// Handler for POST /month.
async fn month_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period = "month", "Processing period request");

    let result = parse_body(payload, correlation_id).and_then(|request| {
        calculate_period(state.config(), request, PeriodKind::Month, correlation_id)
    });
    respond(correlation_id, result)
}

/// Handler for POST /year.
async fn year_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, period = "year", "Processing period request");

    let result = parse_body(payload, correlation_id).and_then(|request| {
        calculate_period(state.config(), request, PeriodKind::Year, correlation_id)
    });
    respond(correlation_id, result)
}

/// Handler for POST /calendar.
async fn calendar_handler(
    State(state): State<AppState>,
    payload: Result<Json<PeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calendar request");

    let result = parse_body(payload, correlation_id)
        .and_then(|request| build_calendar(state.config(), request));
    respond(correlation_id, result)
}

/// Handler for POST /standard.
async fn standard_handler(
    State(state): State<AppState>,
    payload: Result<Json<StandardRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing flat-rate request");

    let result = parse_body(payload, correlation_id).and_then(|request| {
        let schedule: StandardSchedule = request.try_into()?;
        Ok::<StandardBreakdown, ApiErrorResponse>(calculate_standard(
            &schedule,
            state.config().rules(),
        ))
    });
    respond(correlation_id, result)
}

/// Handler for GET /reference-data.
async fn reference_data_handler(State(state): State<AppState>) -> Response {
    let data = state.config().classifier().reference_data();
    json_ok(ReferenceDataResponse {
        dataset: data.metadata().clone(),
        rules: data.rules().clone(),
        terms: data.terms().to_vec(),
        bank_holidays: data.bank_holidays().to_vec(),
    })
}

/// Unwraps the JSON body, turning extractor rejections into API errors.
fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, ApiErrorResponse> {
    let rejection = match payload {
        Ok(Json(request)) => return Ok(request),
        Err(rejection) => rejection,
    };

    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    Err(ApiErrorResponse::bad_request(error))
}

fn respond<T: Serialize>(correlation_id: Uuid, result: Result<T, ApiErrorResponse>) -> Response {
    match result {
        Ok(body) => {
            info!(correlation_id = %correlation_id, "Request completed successfully");
            json_ok(body)
        }
        Err(api_error) => {
            warn!(
                correlation_id = %correlation_id,
                status = api_error.status.as_u16(),
                code = %api_error.error.code,
                "Request rejected"
            );
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn price_single_week(
    config: &ConfigLoader,
    request: WeekRequest,
    correlation_id: Uuid,
) -> Result<WeekCostResult, ApiErrorResponse> {
    let week_start = request.checked_week_start()?;
    let schedule: Schedule = request.schedule.try_into()?;
    let classifier = config.classifier();

    if !classifier.covers(week_start) {
        warn!(
            correlation_id = %correlation_id,
            week_start = %week_start,
            "Week is outside reference data coverage"
        );
    }

    let result = calculate_week_cost(week_start, &schedule, classifier);
    info!(
        correlation_id = %correlation_id,
        week_start = %week_start,
        total = %result.total,
        is_term_time = result.is_term_time,
        is_unpaid = result.is_unpaid,
        "Week priced"
    );
    Ok(result)
}

fn calculate_period(
    config: &ConfigLoader,
    request: PeriodRequest,
    kind: PeriodKind,
    correlation_id: Uuid,
) -> Result<CostCalculationResult, ApiErrorResponse> {
    let anchor = request.anchor()?;
    let schedule: Schedule = request.schedule.try_into()?;

    let start_time = Instant::now();
    let calculation = match kind {
        PeriodKind::Month => aggregate_month(anchor, &schedule, config.classifier()),
        PeriodKind::Year => aggregate_year(anchor, &schedule, config.classifier()),
    };
    let duration_us = start_time.elapsed().as_micros() as u64;

    let warnings = coverage_warnings(config, &calculation);
    if !warnings.is_empty() {
        warn!(
            correlation_id = %correlation_id,
            period_start = %calculation.period_start,
            "Period extends beyond reference data coverage"
        );
    }

    info!(
        correlation_id = %correlation_id,
        period = %kind,
        period_start = %calculation.period_start,
        counted_weeks = calculation.weeks.len(),
        net_cost = %calculation.breakdown.net_cost,
        duration_us,
        "Period calculation completed"
    );

    Ok(CostCalculationResult {
        calculation_id: Uuid::new_v4(),
        timestamp: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        dataset_version: config.metadata().version.clone(),
        period: calculation.kind,
        period_start: calculation.period_start,
        period_end: calculation.period_end,
        breakdown: calculation.breakdown,
        monthly_average: calculation.monthly_average,
        billed_total: calculation.billed_total,
        weeks: calculation.weeks,
        audit_trace: AuditTrace {
            steps: calculation.audit_steps,
            warnings,
            duration_us,
        },
    })
}

/// One warning when any counted week starts outside the dataset's coverage.
fn coverage_warnings(config: &ConfigLoader, calculation: &PeriodCalculation) -> Vec<AuditWarning> {
    let classifier = config.classifier();
    let uncovered: Vec<NaiveDate> = calculation
        .weeks
        .iter()
        .map(|week| week.week_start)
        .filter(|week_start| !classifier.covers(*week_start))
        .collect();

    match uncovered.first() {
        None => vec![],
        Some(first) => {
            let metadata = config.metadata();
            vec![AuditWarning {
                code: REFERENCE_DATA_OUT_OF_RANGE.to_string(),
                message: format!(
                    "{} counted week(s) from {} fall outside dataset {} coverage ({} to {}); term dates and bank holidays may be missing",
                    uncovered.len(),
                    first,
                    metadata.version,
                    metadata.coverage_start,
                    metadata.coverage_end
                ),
                severity: "medium".to_string(),
            }]
        }
    }
}

fn build_calendar(
    config: &ConfigLoader,
    request: PeriodRequest,
) -> Result<MonthCalendar, ApiErrorResponse> {
    let anchor = request.anchor()?;
    let schedule: Schedule = request.schedule.try_into()?;
    Ok(month_calendar(anchor, &schedule, config.classifier()))
}
