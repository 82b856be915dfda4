//! Integration tests for the share sacrifice API.
//!
//! This test suite covers:
//! - Yearly value tables for every tier
//! - Reduction month handling and configured defaults
//! - Scenario comparison
//! - Net salary lookup failures
//! - Error cases

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tower::ServiceExt;

use share_sacrifice::api::{AppState, SharedLookup, create_router};
use share_sacrifice::config::ConfigLoader;
use share_sacrifice::error::{EngineError, EngineResult};
use share_sacrifice::lookup::PacedLookup;

// =============================================================================
// Test Helpers
// =============================================================================

/// Deterministic stand-in for the tax calculator: 80% of the whole-euro gross.
fn flat_net_salary(gross: Decimal) -> EngineResult<Decimal> {
    Ok(gross.trunc() * Decimal::new(8, 1))
}

fn create_test_state(lookup: SharedLookup) -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config.into_config(), lookup)
}

fn create_router_for_test() -> Router {
    let lookup: SharedLookup = Arc::new(PacedLookup::new(flat_net_salary, Duration::ZERO));
    create_router(create_test_state(lookup))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

fn row<'a>(table: &'a Value, month: &str) -> &'a Value {
    table["rows"]
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["month"] == month)
        .unwrap_or_else(|| panic!("no row for {}", month))
}

fn assert_money(value: &Value, expected: &str) {
    let actual = decimal(value.as_str().expect("monetary values are strings"));
    assert_eq!(
        actual,
        decimal(expected),
        "Expected {}, got {}",
        expected,
        actual
    );
}

// =============================================================================
// Yearly value
// =============================================================================

#[tokio::test]
async fn test_yearly_value_reduction_month() {
    let (status, table) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({
            "gross": "4166.67",
            "pct": 0.25,
            "price": "50.03",
            "reduction_months": ["APR", "MAY", "JUN"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(table["label"], "pct_0.25");

    let apr = row(&table, "APR");
    assert_money(&apr["pct"], "0.25");
    assert_money(&apr["salaryGross"], "3125.00");
    assert_money(&apr["salaryNet"], "2500.00");
    assert_money(&apr["sharesGross"], "1000.60");
    assert_money(&apr["sharesNet"], "790.47");
    assert_money(&apr["price"], "50.03");
}

#[tokio::test]
async fn test_yearly_value_non_reduction_month() {
    let (status, table) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({
            "gross": "4166.67",
            "pct": 0.25,
            "price": "50.03",
            "reduction_months": ["APR", "MAY", "JUN"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let jan = row(&table, "JAN");
    assert_money(&jan["pct"], "0");
    assert_money(&jan["salaryGross"], "4166.67");
    assert_money(&jan["salaryNet"], "3332.80");
    assert_money(&jan["sharesGross"], "0");
    assert_money(&jan["sharesNet"], "0");
}

#[tokio::test]
async fn test_yearly_value_has_twelve_rows_in_order() {
    let (status, table) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({
            "gross": 3000,
            "pct": 0.5,
            "price": 20,
            "reduction_months": ["DEC", "jan"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let months: Vec<&str> = table["rows"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["month"].as_str().unwrap())
        .collect();
    assert_eq!(
        months,
        vec![
            "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC"
        ]
    );
    assert_money(&row(&table, "JAN")["pct"], "0.5");
    assert_money(&row(&table, "DEC")["pct"], "0.5");
    assert_money(&row(&table, "JUL")["pct"], "0");
}

#[tokio::test]
async fn test_yearly_value_three_quarters_tier() {
    // 2000 * 0.75 * 2.0 = 3000 -> 150 shares at 20
    let (status, table) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({
            "gross": 2000,
            "pct": 0.75,
            "price": 20,
            "reduction_months": ["MAR"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let mar = row(&table, "MAR");
    assert_money(&mar["salaryGross"], "500");
    assert_money(&mar["shares"], "150");
    assert_money(&mar["sharesGross"], "3000");
    assert_money(&mar["sharesNet"], "2370");
}

#[tokio::test]
async fn test_yearly_value_uses_default_reduction_months() {
    let (status, table) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({ "gross": 2000, "pct": 0.5, "price": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    for month in ["APR", "MAY", "JUN"] {
        assert_money(&row(&table, month)["pct"], "0.5");
    }
    assert_money(&row(&table, "JUL")["pct"], "0");
}

#[tokio::test]
async fn test_yearly_value_includes_audit_trace() {
    let (status, table) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({ "gross": 2000, "pct": 0.25, "price": 10, "reduction_months": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let trace = table["audit_trace"].as_array().unwrap();
    assert_eq!(trace.len(), 36);
    assert_eq!(trace[0]["rule_id"], "compensation_split");
    assert_eq!(trace[0]["month"], "JAN");
}

#[tokio::test]
async fn test_yearly_value_is_deterministic() {
    let body = json!({
        "gross": "4166.67",
        "pct": 0.5,
        "price": "50.03",
        "reduction_months": ["APR", "MAY", "JUN"]
    });

    let (_, first) = post_json(create_router_for_test(), "/yearly-value", body.clone()).await;
    let (_, second) = post_json(create_router_for_test(), "/yearly-value", body).await;

    assert_eq!(first, second);
}

// =============================================================================
// Scenario comparison
// =============================================================================

#[tokio::test]
async fn test_scenarios_with_defaults() {
    let (status, comparison) = post_json(create_router_for_test(), "/scenarios", json!({})).await;

    assert_eq!(status, StatusCode::OK);

    let series = comparison["series"].as_array().unwrap();
    assert_eq!(series.len(), 4);
    let labels: Vec<&str> = series
        .iter()
        .map(|s| s["table"]["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["pct_0", "pct_0.25", "pct_0.5", "pct_0.75"]);

    // 50000 / 12 spread evenly
    let gross = decimal(comparison["gross"].as_str().unwrap());
    assert_eq!(gross.round_dp(2), decimal("4166.67"));
}

#[tokio::test]
async fn test_scenarios_cumulative_points() {
    let (status, comparison) = post_json(
        create_router_for_test(),
        "/scenarios",
        json!({
            "gross": "4166.67",
            "price": "50.03",
            "reduction_months": ["APR", "MAY", "JUN"],
            "tiers": [0.25]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);

    let points = comparison["series"][0]["points"].as_array().unwrap();
    assert_eq!(points.len(), 12);

    let apr = &points[3];
    assert_eq!(apr["month"], "APR");
    assert_money(&apr["cumulative_salary_net"], "12498.40");
    assert_money(&apr["cumulative_shares_net"], "790.47");
    assert_money(&apr["cumulative_total_net"], "13288.87");
    assert_money(&apr["shares_to_salary_pct"], "6.32");
}

#[tokio::test]
async fn test_scenarios_unsupported_tier() {
    let (status, error) = post_json(
        create_router_for_test(),
        "/scenarios",
        json!({ "tiers": [0.25, 0.4] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "UNSUPPORTED_TIER");
}

// =============================================================================
// Lookup failures
// =============================================================================

#[tokio::test]
async fn test_lookup_failure_returns_bad_gateway_without_table() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let lookup: SharedLookup = Arc::new(move |gross: Decimal| -> EngineResult<Decimal> {
        if counter.fetch_add(1, Ordering::SeqCst) == 2 {
            return Err(EngineError::LookupFailed {
                gross,
                message: "element 'net_pay' not found in page".to_string(),
            });
        }
        flat_net_salary(gross)
    });
    let router = create_router(create_test_state(lookup));

    let (status, error) = post_json(
        router,
        "/yearly-value",
        json!({ "gross": 2000, "pct": 0.25, "price": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(error["code"], "LOOKUP_FAILED");
    assert!(error["message"].as_str().unwrap().contains("net_pay"));
    assert!(error.get("rows").is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_invalid_request_makes_no_lookup() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let lookup: SharedLookup = Arc::new(move |gross: Decimal| -> EngineResult<Decimal> {
        counter.fetch_add(1, Ordering::SeqCst);
        flat_net_salary(gross)
    });
    let router = create_router(create_test_state(lookup));

    let (status, error) = post_json(
        router,
        "/yearly-value",
        json!({ "gross": 2000, "pct": 0.3, "price": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "UNSUPPORTED_TIER");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

// =============================================================================
// Error cases
// =============================================================================

#[tokio::test]
async fn test_unknown_month_label() {
    let (status, error) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({ "gross": 2000, "pct": 0.25, "price": 10, "reduction_months": ["APR", "FOO"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "UNKNOWN_MONTH");
    assert!(error["message"].as_str().unwrap().contains("FOO"));
}

#[tokio::test]
async fn test_non_positive_price() {
    let (status, error) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({ "gross": 2000, "pct": 0.25, "price": 0 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
    assert!(error["message"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn test_negative_gross() {
    let (status, error) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({ "gross": -100, "pct": 0.25, "price": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_overflowing_gross_is_a_bad_request() {
    let (status, error) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({
            "gross": "70000000000000000000000000000",
            "pct": 0.75,
            "price": "50.03",
            "reduction_months": ["APR"]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "INVALID_INPUT");
    assert!(error["message"].as_str().unwrap().contains("gross"));
}

#[tokio::test]
async fn test_missing_field() {
    let (status, error) = post_json(
        create_router_for_test(),
        "/yearly-value",
        json!({ "gross": 2000, "price": 10 }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "VALIDATION_ERROR");
    assert!(error["message"].as_str().unwrap().contains("pct"));
}

#[tokio::test]
async fn test_malformed_json() {
    let response = create_router_for_test()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/yearly-value")
                .header("Content-Type", "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let error: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(error["code"], "MALFORMED_JSON");
}
