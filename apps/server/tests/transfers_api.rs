use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;
use transfer_scheduler_server::{api::app_router, build_state, config::Config};

async fn build_test_router() -> (Router, TempDir) {
    let tmp = tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: tmp.path().join("test.db").to_string_lossy().to_string(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state, &config), tmp)
}

fn days_from_today(days: i64) -> NaiveDate {
    Local::now().date_naive() + chrono::Duration::days(days)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).to_string())
        })
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

async fn post_transfer(app: &Router, payload: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/transfers")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
    )
    .await
}

fn transfer(source: &str, amount: &str, lead_days: i64) -> Value {
    json!({
        "sourceAccount": source,
        "destinationAccount": "0987654321",
        "amount": amount,
        "executionDate": days_from_today(lead_days).to_string(),
    })
}

#[tokio::test]
async fn health_endpoints_respond() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = get(&app, "/api/v1/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");

    let (status, _) = get(&app, "/api/v1/readyz").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn schedules_same_day_and_future_transfers() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = post_transfer(&app, transfer("1234567890", "100.00", 0)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["fee"], "2.50");
    assert_eq!(body["leadDays"], 0);
    assert_eq!(body["scheduledDate"], days_from_today(0).to_string());

    let (status, body) = post_transfer(&app, transfer("1234567890", "1000.00", 25)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["fee"], "69.00");
    assert_eq!(body["leadDays"], 25);

    let (status, body) = post_transfer(&app, transfer("1234567890", "500.00", 45)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["fee"], "8.50");
}

#[tokio::test]
async fn amounts_are_held_to_two_decimals() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = post_transfer(&app, transfer("1234567890", "150.7", 0)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["amount"], "150.70");
    assert_eq!(body["fee"], "3.77");

    let id = body["id"].as_str().unwrap();
    let (_, fetched) = get(&app, &format!("/api/v1/transfers/{}", id)).await;
    assert_eq!(fetched["amount"], "150.70");

    let (status, body) = post_transfer(&app, transfer("1234567890", "100.005", 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_AMOUNT_PRECISION");

    let (_, all) = get(&app, "/api/v1/transfers").await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn rejections_carry_error_kinds() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = post_transfer(&app, transfer("1234567890", "100.00", 5)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "RULE_REJECTS_TRANSFER");
    assert_eq!(body["code"], 400);

    let (status, body) = post_transfer(&app, transfer("1234567890", "5.00", 5)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "SCHEDULING_REJECTED");

    let (status, body) = post_transfer(&app, transfer("1234567890", "2.99", 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "SCHEDULING_REJECTED");

    let (status, body) = post_transfer(&app, transfer("1234567890", "100.00", 15)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "TRANSFER_NOT_ALLOWED");

    let (status, body) = post_transfer(&app, transfer("1234567890", "100.00", -1)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_DATE");

    let (status, body) = post_transfer(&app, transfer("0987654321", "100.00", 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "SAME_ACCOUNT");

    let (status, body) = post_transfer(&app, transfer("12345", "100.00", 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_ACCOUNT");

    let (status, body) = post_transfer(&app, transfer("1234567890", "0", 0)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_AMOUNT");

    let (_, listed) = get(&app, "/api/v1/transfers").await;
    assert_eq!(listed.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn empty_body_is_missing_payload() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = send(
        &app,
        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/transfers")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_PAYLOAD");

    let (status, body) = post_transfer(&app, Value::Null).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "MISSING_PAYLOAD");
}

#[tokio::test]
async fn lists_and_counts_persisted_transfers() {
    let (app, _tmp) = build_test_router().await;

    let (_, first) = post_transfer(&app, transfer("1111111111", "100.00", 0)).await;
    post_transfer(&app, transfer("1111111111", "200.00", 30)).await;
    post_transfer(&app, transfer("2222222222", "300.00", 41)).await;

    let id = first["id"].as_str().unwrap();
    let (status, fetched) = get(&app, &format!("/api/v1/transfers/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["amount"], "100.00");

    let (status, body) = get(&app, "/api/v1/transfers/unknown-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "TRANSFER_NOT_FOUND");

    let (_, all) = get(&app, "/api/v1/transfers").await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let (_, by_account) = get(&app, "/api/v1/transfers/account/1111111111").await;
    assert_eq!(by_account.as_array().unwrap().len(), 2);

    let (_, count) = get(&app, "/api/v1/transfers/account/1111111111/count").await;
    assert_eq!(count["sourceAccount"], "1111111111");
    assert_eq!(count["count"], 2);

    let executing_on = days_from_today(30);
    let (_, on_date) = get(&app, &format!("/api/v1/transfers/executing/{}", executing_on)).await;
    assert_eq!(on_date.as_array().unwrap().len(), 1);

    let (_, executing) = get(
        &app,
        &format!(
            "/api/v1/transfers/executing?from={}&to={}",
            days_from_today(0),
            days_from_today(50)
        ),
    )
    .await;
    let lead_days: Vec<i64> = executing
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["leadDays"].as_i64().unwrap())
        .collect();
    assert_eq!(lead_days, vec![0, 30, 41]);

    let today = days_from_today(0);
    let (_, scheduled) = get(
        &app,
        &format!("/api/v1/transfers/scheduled?from={}&to={}", today, today),
    )
    .await;
    assert_eq!(scheduled.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn range_queries_validate_bounds() {
    let (app, _tmp) = build_test_router().await;

    let (status, body) = get(
        &app,
        &format!(
            "/api/v1/transfers/executing?from={}&to={}",
            days_from_today(10),
            days_from_today(0)
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_RANGE");

    let (status, body) = get(&app, "/api/v1/transfers/scheduled?from=2025-01-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");

    let (status, body) = get(&app, "/api/v1/transfers/executing/not-a-date").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn quote_does_not_persist() {
    let (app, _tmp) = build_test_router().await;

    let (status, quote) = get(
        &app,
        &format!(
            "/api/v1/transfers/quote?amount=1000.00&executionDate={}",
            days_from_today(25)
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quote["fee"], "69.00");
    assert_eq!(quote["leadDays"], 25);

    let (status, body) = get(
        &app,
        &format!(
            "/api/v1/transfers/quote?amount=100.00&executionDate={}",
            days_from_today(3)
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "RULE_REJECTS_TRANSFER");

    let (status, body) = get(&app, "/api/v1/transfers/quote").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "INVALID_AMOUNT");

    let (_, all) = get(&app, "/api/v1/transfers").await;
    assert_eq!(all.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn fee_rules_are_listed_in_range_order() {
    let (app, _tmp) = build_test_router().await;

    let (status, rules) = get(&app, "/api/v1/fees/rules").await;
    assert_eq!(status, StatusCode::OK);
    let rules = rules.as_array().unwrap();
    assert_eq!(rules.len(), 4);
    assert!(rules[0].as_str().unwrap().starts_with("Same-day"));
    assert!(rules[3].as_str().unwrap().contains("1.7%"));
}

#[tokio::test]
async fn responses_carry_request_id() {
    let (app, _tmp) = build_test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
