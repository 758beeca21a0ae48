//! Integration tests for the advice request pipeline.

mod common;

use async_trait::async_trait;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use common::{test_config, CountingAdvisor, TestClient};
use expense_monitor::error::{AppResult, COMMUNICATION_ERROR_MESSAGE};
use expense_monitor::handlers::advice::run_advice;
use expense_monitor::ledger::MSG_NOTHING_TO_ADVISE;
use expense_monitor::models::{Debt, Transaction};
use expense_monitor::server;
use expense_monitor::services::ai_client::{AdviceProvider, CannedAdvisor, CANNED_ADVICE};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tower::ServiceExt;

type Captured = Arc<Mutex<Option<(Option<String>, serde_json::Value)>>>;

/// Start a fake Gemini endpoint that answers every call with `status` and `body`.
async fn mock_endpoint(status: StatusCode, body: &'static str) -> (String, Captured) {
    let captured: Captured = Arc::new(Mutex::new(None));

    let app = Router::new()
        .route(
            "/v1beta/models/:model",
            post(
                move |State(captured): State<Captured>,
                      headers: HeaderMap,
                      Json(request): Json<serde_json::Value>| async move {
                    let key = headers
                        .get("x-goog-api-key")
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    *captured.lock().unwrap() = Some((key, request));
                    (status, body)
                },
            ),
        )
        .with_state(captured.clone());

    let (port, _handle) = server::serve(app, "127.0.0.1", 0).await.unwrap();
    (format!("http://127.0.0.1:{}", port), captured)
}

#[tokio::test]
async fn test_advice_requires_data_and_skips_provider() {
    let advisor = CountingAdvisor::new("unused");
    let client = TestClient::with_advisor(advisor.clone());

    let (status, body) = client.post_form("/advice", &[]).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains(MSG_NOTHING_TO_ADVISE));
    assert_eq!(advisor.call_count(), 0);
}

#[tokio::test]
async fn test_advice_stored_for_dashboard() {
    let advisor = CountingAdvisor::new("Keep saving!");
    let client = TestClient::with_advisor(advisor.clone());
    assert!(client.create_debt("Credit Card", "55000").await);

    let (status, _) = client.post_form("/advice", &[]).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(advisor.call_count(), 1);

    let (_, body) = client.get("/").await;
    assert!(body.contains("Keep saving!"));

    let (status, parsed): (_, Option<serde_json::Value>) = client.get_json("/api/advice").await;
    assert_eq!(status, StatusCode::OK);
    let advice = parsed.unwrap();
    assert_eq!(advice["advice"], "Keep saving!");
    assert_eq!(advice["is_loading"], false);
    assert_eq!(advice["provider"], "counting");
}

#[tokio::test]
async fn test_offline_provider_returns_canned_advice_after_delay() {
    let mut config = test_config(None, "http://127.0.0.1:9");
    config.offline_delay_ms = 50;
    let client = TestClient::from_config(config);
    assert!(client.create_transaction("expense", "Lunch", "10", "Food").await);

    let started = Instant::now();
    let (status, body) = client.post_json("/api/advice", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() >= Duration::from_millis(50));
    let advice: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(advice["advice"], CANNED_ADVICE);
    assert_eq!(advice["provider"], "offline");
}

#[tokio::test]
async fn test_failing_endpoint_yields_generic_communication_error() {
    let (base_url, _) =
        mock_endpoint(StatusCode::INTERNAL_SERVER_ERROR, "boom: quota exceeded").await;
    let client = TestClient::from_config(test_config(Some("secret"), &base_url));
    assert!(client.create_debt("Student Loan", "250000").await);

    let (status, body) = client.post_form("/advice", &[]).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains(COMMUNICATION_ERROR_MESSAGE));
    assert!(!body.contains("quota"));

    let ledger = client.state.ledger().unwrap();
    assert!(!ledger.advice().is_loading);
    assert!(ledger
        .advice()
        .error
        .as_deref()
        .unwrap()
        .contains(COMMUNICATION_ERROR_MESSAGE));
    assert_eq!(ledger.debts().len(), 1);
}

#[tokio::test]
async fn test_malformed_response_yields_communication_error() {
    let (base_url, _) = mock_endpoint(StatusCode::OK, "this is not json").await;
    let client = TestClient::from_config(test_config(Some("secret"), &base_url));
    assert!(client.create_debt("Student Loan", "250000").await);

    let (status, body) = client.post_form("/advice", &[]).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains(COMMUNICATION_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_gemini_request_shape_and_trimmed_response() {
    let (base_url, captured) = mock_endpoint(
        StatusCode::OK,
        r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"  1. Spend less on food.\n"}]}}]}"#,
    )
    .await;
    let client = TestClient::from_config(test_config(Some("secret"), &base_url));
    assert!(client.create_transaction("expense", "Groceries", "3500.50", "Food").await);

    let (status, body) = client.post_json("/api/advice", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::OK);
    let advice: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(advice["advice"], "1. Spend less on food.");
    assert_eq!(advice["provider"], "gemini");

    let (key, request) = captured.lock().unwrap().clone().expect("endpoint not called");
    assert_eq!(key.as_deref(), Some("secret"));
    assert_eq!(request["generationConfig"]["temperature"], 0.5);
    let prompt = request["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("- Groceries (Food): ₹3500.50"));
}

#[tokio::test]
async fn test_second_request_while_busy_is_rejected() {
    let advisor = CountingAdvisor::new("unused");
    let client = TestClient::with_advisor(advisor.clone());
    assert!(client.create_debt("Loan", "100").await);

    let _ticket = client.state.ledger().unwrap().begin_advice().unwrap();

    let (status, _) = client.post_form("/advice", &[]).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(advisor.call_count(), 0);
}

/// Provider that blocks until released, to hold a request in flight.
struct GatedAdvisor {
    gate: Notify,
}

#[async_trait]
impl AdviceProvider for GatedAdvisor {
    async fn advise(&self, _transactions: &[Transaction], _debts: &[Debt]) -> AppResult<String> {
        self.gate.notified().await;
        Ok("Advice for old data".to_string())
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

#[tokio::test]
async fn test_result_discarded_when_data_changes_in_flight() {
    let advisor = Arc::new(GatedAdvisor {
        gate: Notify::new(),
    });
    let client = TestClient::with_advisor(advisor.clone());
    assert!(client.create_debt("Loan", "100").await);

    let router = server::router(client.state.clone());
    let pending = tokio::spawn(async move {
        router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/advice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    });

    while !client.state.ledger().unwrap().advice().is_loading {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    assert!(client.create_transaction("expense", "Lunch", "10", "Food").await);
    advisor.gate.notify_one();

    assert_eq!(pending.await.unwrap(), StatusCode::SEE_OTHER);

    let ledger = client.state.ledger().unwrap();
    assert!(!ledger.advice().is_loading);
    assert!(ledger.advice().advice.is_none());
    assert!(ledger.advice().error.is_none());
}

/// Wait until the ledger reports no advice request in flight.
async fn wait_until_idle(client: &TestClient) {
    let deadline = Instant::now() + Duration::from_secs(2);
    while client.state.ledger().unwrap().advice().is_loading {
        assert!(Instant::now() < deadline, "advice request never settled");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_dropped_request_still_settles_and_frees_busy_flag() {
    let client = TestClient::with_advisor(Arc::new(CannedAdvisor::new(Duration::from_millis(200))));
    assert!(client.create_debt("Loan", "100").await);

    let abandoned =
        tokio::time::timeout(Duration::from_millis(20), run_advice(&client.state)).await;
    assert!(abandoned.is_err());
    assert!(client.state.ledger().unwrap().advice().is_loading);

    wait_until_idle(&client).await;
    assert_eq!(
        client.state.ledger().unwrap().advice().advice.as_deref(),
        Some(CANNED_ADVICE)
    );

    let (status, _) = client.post_form("/advice", &[]).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
}

struct PanickingAdvisor;

#[async_trait]
impl AdviceProvider for PanickingAdvisor {
    async fn advise(&self, _transactions: &[Transaction], _debts: &[Debt]) -> AppResult<String> {
        panic!("advisor exploded");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

#[tokio::test]
async fn test_panicking_provider_reports_communication_error() {
    let client = TestClient::with_advisor(Arc::new(PanickingAdvisor));
    assert!(client.create_debt("Loan", "100").await);

    let (status, body) = client.post_form("/advice", &[]).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains(COMMUNICATION_ERROR_MESSAGE));

    {
        let ledger = client.state.ledger().unwrap();
        assert!(!ledger.advice().is_loading);
        assert!(ledger
            .advice()
            .error
            .as_deref()
            .unwrap()
            .contains(COMMUNICATION_ERROR_MESSAGE));
    }

    // Not 409: the failed request released the busy flag.
    let (status, _) = client.post_form("/advice", &[]).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_api_advice_errors_are_json() {
    let client = TestClient::new();

    let (status, body) = client.post_json("/api/advice", serde_json::json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(error["error"], MSG_NOTHING_TO_ADVISE);
}
