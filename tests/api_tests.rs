//! End-to-end tests of the HTTP surface.
//!
//! Requests are driven through the real router with `tower::ServiceExt::oneshot`,
//! so extraction, middleware and error rendering are all exercised.
//!
//! Run with: cargo test --test api_tests
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use payments::config::{AppConfig, ProcessingMode};
use payments::{create_router, AppState};

const VALID_FORM: &str = "currency=USD&value=10.50&customer_id=1234567890";

fn app(mode: ProcessingMode) -> Router {
    let mut config = AppConfig::default();
    config.payments.mode = mode;
    create_router(AppState::new(config))
}

fn form_post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/payments")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.expect("router response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body");
    let json = serde_json::from_slice(&bytes).expect("json body");
    (status, json)
}

#[tokio::test]
async fn valid_payment_is_created() {
    let (status, json) = send(app(ProcessingMode::AlwaysApprove), form_post(VALID_FORM)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["result"], Value::Bool(true));
    let id = json["id"].as_str().expect("id is a string");
    assert_eq!(id.len(), 20);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn ids_are_not_reused() {
    let (_, first) = send(app(ProcessingMode::AlwaysApprove), form_post(VALID_FORM)).await;
    let (_, second) = send(app(ProcessingMode::AlwaysApprove), form_post(VALID_FORM)).await;
    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn missing_any_parameter_is_bad_request() {
    let bodies = [
        "value=10.50&customer_id=1234567890",
        "currency=USD&customer_id=1234567890",
        "currency=USD&value=10.50",
        "",
    ];

    for body in bodies {
        let (status, json) = send(app(ProcessingMode::AlwaysApprove), form_post(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body = {:?}", body);
        assert_eq!(json["result"], Value::Bool(false));
        assert_eq!(json["message"], "missing parameter");
        assert!(json["id"].is_null());
    }
}

#[tokio::test]
async fn negative_value_is_bad_request() {
    for value in ["-1", "-11.11"] {
        let body = format!("currency=USD&value={}&customer_id=1234567890", value);
        let (status, json) = send(app(ProcessingMode::AlwaysApprove), form_post(&body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["result"], Value::Bool(false));
        assert_eq!(json["message"], "invalid value");
        assert!(json["id"].is_null());
    }
}

#[tokio::test]
async fn non_numeric_value_is_bad_request() {
    let (status, json) = send(
        app(ProcessingMode::AlwaysApprove),
        form_post("currency=USD&value=ten&customer_id=1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "invalid value");
}

#[tokio::test]
async fn zero_value_is_accepted() {
    let (status, json) = send(
        app(ProcessingMode::AlwaysApprove),
        form_post("currency=USD&value=0.00&customer_id=1234567890"),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["result"], Value::Bool(true));
}

#[tokio::test]
async fn query_parameters_are_accepted() {
    let request = Request::builder()
        .method("POST")
        .uri(format!("/payments?{}", VALID_FORM))
        .body(Body::empty())
        .expect("request");

    let (status, json) = send(app(ProcessingMode::AlwaysApprove), request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["result"], Value::Bool(true));
}

#[tokio::test]
async fn json_body_is_accepted() {
    let request = Request::builder()
        .method("POST")
        .uri("/payments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            r#"{"currency": "USD", "value": -11.11, "customer_id": 1234567890}"#,
        ))
        .expect("request");

    let (status, json) = send(app(ProcessingMode::AlwaysApprove), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "invalid value");
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/payments")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("[1, 2"))
        .expect("request");

    let (status, json) = send(app(ProcessingMode::AlwaysApprove), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["result"], Value::Bool(false));
    assert_eq!(json["message"], "malformed request body");
}

#[tokio::test]
async fn coin_flip_yields_created_and_declined() {
    let router = app(ProcessingMode::CoinFlip);
    let mut created = 0;
    let mut declined = 0;

    for _ in 0..200 {
        let (status, json) = send(router.clone(), form_post(VALID_FORM)).await;
        match status {
            StatusCode::CREATED => {
                assert_eq!(json["result"], Value::Bool(true));
                assert!(json["id"].is_string());
                created += 1;
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                assert_eq!(json["result"], Value::Bool(false));
                assert_eq!(json["message"], "cannot process payment");
                assert!(json["id"].is_null());
                declined += 1;
            }
            other => panic!("unexpected status {}", other),
        }
    }

    assert!(created > 0 && declined > 0, "created={} declined={}", created, declined);
}

#[tokio::test]
async fn coin_flip_still_validates_first() {
    let (status, json) = send(
        app(ProcessingMode::CoinFlip),
        form_post("currency=USD&value=-1&customer_id=1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "invalid value");
}

#[tokio::test]
async fn health_returns_empty_object() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .expect("request");

    let (status, json) = send(app(ProcessingMode::CoinFlip), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!({}));
}

#[tokio::test]
async fn responses_carry_request_id_and_no_store() {
    let response = app(ProcessingMode::AlwaysApprove)
        .oneshot(form_post(VALID_FORM))
        .await
        .expect("router response");

    let headers = response.headers();
    assert_eq!(headers[header::CACHE_CONTROL], "no-store");
    let request_id = headers["x-request-id"].to_str().expect("ascii header");
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let request = Request::builder()
        .uri("/refunds")
        .body(Body::empty())
        .expect("request");

    let (status, json) = send(app(ProcessingMode::AlwaysApprove), request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["result"], Value::Bool(false));
    assert_eq!(json["message"], "not found");
}
