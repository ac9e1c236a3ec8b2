//! End-to-end tests for the childcare cost engine API.
//!
//! Every request goes through the router against the shipped `config/uk`
//! dataset. Covers:
//! - Single weeks (term, holiday, bank holiday, closure, zero days)
//! - Month and year breakdowns, including the income threshold
//! - The month calendar
//! - The flat-rate calculator
//! - Coverage warnings
//! - Error cases

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use childcare_engine::api::{AppState, create_router};
use childcare_engine::config::ConfigLoader;

// =============================================================================
// Test Helpers
// =============================================================================

fn create_router_for_test() -> Router {
    let config = ConfigLoader::load("./config/uk").expect("Failed to load config");
    create_router(AppState::new(config))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Reads a Decimal serialized as a JSON string.
fn dec_at(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("decimal serialized as string")).unwrap()
}

async fn send(request: Request<Body>) -> (StatusCode, Value) {
    let response = create_router_for_test().oneshot(request).await.unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
    send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn assert_breakdown(result: &Value, gross: &str, funding: &str, tax_free: &str, net: &str) {
    let breakdown = &result["breakdown"];
    assert_eq!(dec_at(&breakdown["gross_cost"]), decimal(gross), "gross_cost");
    assert_eq!(
        dec_at(&breakdown["govt_funding_savings"]),
        decimal(funding),
        "govt_funding_savings"
    );
    assert_eq!(dec_at(&breakdown["tax_free_savings"]), decimal(tax_free), "tax_free_savings");
    assert_eq!(dec_at(&breakdown["net_cost"]), decimal(net), "net_cost");
}

// =============================================================================
// Single Weeks
// =============================================================================

#[tokio::test]
async fn test_funded_term_week() {
    let (status, result) = post("/week", json!({ "week_start": "2026-01-12" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_at(&result["total"]), decimal("136"));
    assert_eq!(dec_at(&result["funded_hours"]), decimal("30"));
    assert_eq!(dec_at(&result["unfunded_hours"]), decimal("14"));
    assert_eq!(result["is_term_time"], true);
    assert_eq!(result["is_unpaid"], false);
}

#[tokio::test]
async fn test_half_term_week() {
    let (status, result) = post("/week", json!({ "week_start": "2026-02-16" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_at(&result["total"]), decimal("286"));
    assert_eq!(result["is_term_time"], false);
}

#[tokio::test]
async fn test_early_may_bank_holiday_week() {
    let (status, result) = post("/week", json!({ "week_start": "2026-05-04" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_at(&result["total"]), decimal("102"));
    assert_eq!(dec_at(&result["funded_hours"]), decimal("22.5"));
    assert_eq!(dec_at(&result["unpaid_days"]), decimal("1"));
}

#[tokio::test]
async fn test_christmas_closure_week() {
    let (status, result) = post("/week", json!({ "week_start": "2025-12-29" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_at(&result["total"]), Decimal::ZERO);
    assert_eq!(result["is_unpaid"], true);
}

#[tokio::test]
async fn test_zero_days_week() {
    let (status, result) = post(
        "/week",
        json!({ "week_start": "2026-01-12", "schedule": { "days_per_week": 0 } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["is_unpaid"], true);
    assert_eq!(dec_at(&result["total"]), Decimal::ZERO);
    assert_eq!(dec_at(&result["funded_hours"]), Decimal::ZERO);
    assert_eq!(dec_at(&result["unfunded_hours"]), Decimal::ZERO);
}

#[tokio::test]
async fn test_week_price_ignores_income_threshold() {
    let (_, result) = post(
        "/week",
        json!({
            "week_start": "2026-01-12",
            "schedule": { "both_parents_under_100k": false }
        }),
    )
    .await;

    assert_eq!(dec_at(&result["total"]), decimal("136"));
}

// =============================================================================
// Month and Year
// =============================================================================

#[tokio::test]
async fn test_january_2026_month() {
    let (status, result) = post("/month", json!({ "year": 2026, "month": 1 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["period"], "month");
    assert_eq!(result["period_start"], "2026-01-01");
    assert_eq!(result["period_end"], "2026-01-31");
    assert_eq!(result["weeks"].as_array().unwrap().len(), 4);
    assert_breakdown(&result, "1144", "600", "108.8", "435.2");
    assert_eq!(dec_at(&result["billed_total"]), decimal("544"));
    assert_eq!(result["dataset_version"], "2025.1");
    assert!(result.get("monthly_average").is_none());
}

#[tokio::test]
async fn test_april_2026_with_easter_monday() {
    // Easter Monday week is a holiday week with one unpaid day: 33h x 6.50
    let (status, result) = post("/month", json!({ "year": 2026, "month": 4 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["weeks"][0]["week_start"], "2026-04-06");
    assert_eq!(dec_at(&result["weeks"][0]["cost"]["total"]), decimal("214.5"));
    assert_breakdown(&result, "1072.5", "450", "124.5", "498");
}

#[tokio::test]
async fn test_month_over_income_threshold() {
    let (status, result) = post(
        "/month",
        json!({
            "year": 2026,
            "month": 1,
            "schedule": { "both_parents_under_100k": false }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_breakdown(&result, "1144", "0", "0", "1144");
}

#[tokio::test]
async fn test_month_audit_trace() {
    let (_, result) = post("/month", json!({ "year": 2026, "month": 1 })).await;

    let steps = result["audit_trace"]["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 5);
    assert!(steps[..4].iter().all(|s| s["rule_id"] == "week_cost"));
    assert_eq!(steps[4]["rule_id"], "tax_free_childcare");
    assert!(result["audit_trace"]["warnings"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_year_2026_is_consistent() {
    let (status, result) = post("/year", json!({ "year": 2026 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["period"], "year");
    assert_eq!(result["period_start"], "2026-01-01");
    assert_eq!(result["period_end"], "2026-12-30");
    assert_eq!(result["weeks"].as_array().unwrap().len(), 52);

    let breakdown = &result["breakdown"];
    let gross = dec_at(&breakdown["gross_cost"]);
    let funding = dec_at(&breakdown["govt_funding_savings"]);
    let tax_free = dec_at(&breakdown["tax_free_savings"]);
    let net = dec_at(&breakdown["net_cost"]);

    assert!(tax_free <= decimal("2000"));
    assert!(funding > Decimal::ZERO);
    assert_eq!(net, gross - funding - tax_free);
    assert_eq!(dec_at(&result["monthly_average"]), net / decimal("12"));
    // The last step lands on Christmas Eve, a closure week
    assert_eq!(result["weeks"][51]["week_start"], "2026-12-24");
    assert_eq!(result["weeks"][51]["cost"]["is_unpaid"], true);
}

#[tokio::test]
async fn test_year_outside_coverage_warns() {
    let (status, result) = post("/year", json!({ "year": 2031 })).await;

    assert_eq!(status, StatusCode::OK);
    let warnings = result["audit_trace"]["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "REFERENCE_DATA_OUT_OF_RANGE");
    // No term data: nothing is funded
    assert_eq!(dec_at(&result["breakdown"]["govt_funding_savings"]), Decimal::ZERO);
}

// =============================================================================
// Calendar
// =============================================================================

#[tokio::test]
async fn test_calendar_for_january_2026() {
    let (status, result) = post("/calendar", json!({ "year": 2026, "month": 1 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["year"], 2026);
    assert_eq!(result["month"], 1);
    assert_eq!(result["previous_month"], "2025-12-01");
    assert_eq!(result["next_month"], "2026-02-01");

    let weeks = result["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 5);
    assert_eq!(weeks[0]["week_start"], "2025-12-29");
    assert_eq!(weeks[0]["counts_toward_month"], false);
    assert_eq!(weeks[0]["days"][3]["date"], "2026-01-01");
    assert_eq!(weeks[0]["days"][3]["is_bank_holiday"], true);
    assert_eq!(weeks[0]["days"][3]["is_term_time"], false);
    // Spring term is under way by the second row
    assert_eq!(weeks[1]["days"][0]["is_term_time"], true);
    assert_eq!(weeks[2]["week_number"], 3);
    assert_eq!(dec_at(&result["breakdown"]["net_cost"]), decimal("435.2"));
}

// =============================================================================
// Flat Rate
// =============================================================================

#[tokio::test]
async fn test_standard_defaults() {
    let (status, result) = post("/standard", json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_at(&result["total_hours"]), decimal("1672"));
    assert_eq!(dec_at(&result["gross_cost"]["yearly"]), decimal("10868"));
    assert_eq!(dec_at(&result["gross_cost"]["weekly"]), decimal("286"));
    assert_eq!(dec_at(&result["net_cost"]["yearly"]), decimal("2766.4"));
}

#[tokio::test]
async fn test_standard_net_is_floored() {
    let (status, result) = post(
        "/standard",
        json!({ "weeks_per_year": 38, "schedule": { "days_per_week": 1, "hours_per_day": 4 } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(dec_at(&result["net_cost"]["yearly"]), Decimal::ZERO);
}

// =============================================================================
// Reference Data
// =============================================================================

#[tokio::test]
async fn test_reference_data_endpoint() {
    let (status, result) = send(
        Request::builder()
            .method("GET")
            .uri("/reference-data")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["dataset"]["code"], "uk-england");
    assert_eq!(result["terms"].as_array().unwrap().len(), 24);
    assert_eq!(result["bank_holidays"].as_array().unwrap().len(), 32);
    assert_eq!(dec_at(&result["rules"]["surcharge_per_hour"]), decimal("1.5"));
}

// =============================================================================
// Error Cases
// =============================================================================

#[tokio::test]
async fn test_days_above_seven_rejected() {
    let (status, result) = post(
        "/week",
        json!({ "week_start": "2026-01-12", "schedule": { "days_per_week": "7.5" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_quarter_hours_rejected() {
    let (status, result) = post(
        "/month",
        json!({ "year": 2026, "schedule": { "hours_per_day": "8.25" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_too_many_weeks_rejected() {
    let (status, result) = post("/standard", json!({ "weeks_per_year": 53 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_month_13_rejected() {
    let (status, result) = post("/month", json!({ "year": 2026, "month": 13 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_DATE");
}

#[tokio::test]
async fn test_huge_hourly_rate_rejected() {
    let (status, result) = post(
        "/week",
        json!({
            "week_start": "2026-01-12",
            "schedule": { "cost_per_hour": "79228162514264337593543950335" }
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");

    let (status, result) = post(
        "/year",
        json!({ "year": 2026, "schedule": { "cost_per_hour": "1000000000000000000000000000" } }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_year_beyond_supported_range_rejected() {
    for uri in ["/month", "/year", "/calendar"] {
        let (status, result) = post(uri, json!({ "year": 262142, "month": 12 })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(result["code"], "INVALID_DATE", "{}", uri);
    }
}

#[tokio::test]
async fn test_week_start_before_supported_range_rejected() {
    let (status, result) = post("/week", json!({ "week_start": "0001-01-01" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "INVALID_DATE");
}

#[tokio::test]
async fn test_missing_week_start_rejected() {
    let (status, result) = post("/week", json!({ "schedule": {} })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_json_rejected() {
    let (status, result) = send(
        Request::builder()
            .method("POST")
            .uri("/standard")
            .header("Content-Type", "application/json")
            .body(Body::from("{ \"weeks_per_year\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(result["code"], "MALFORMED_JSON");
}
