//! Shared test utilities for integration tests.
//!
//! This module provides a `TestClient` that drives the router in-process
//! against a fresh in-memory ledger. Methods are intentionally broad to support
//! various test scenarios across different test files.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use expense_monitor::config::{Config, DEFAULT_AI_MODEL};
use expense_monitor::error::AppResult;
use expense_monitor::ledger::Ledger;
use expense_monitor::models::{Debt, Transaction};
use expense_monitor::server;
use expense_monitor::services::ai_client::{AdviceProvider, CannedAdvisor};
use expense_monitor::state::AppState;
use http_body_util::BodyExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub fn test_config(api_key: Option<&str>, ai_base_url: &str) -> Config {
    Config {
        host: "127.0.0.1".into(),
        port: 0,
        api_key: api_key.map(String::from),
        ai_base_url: ai_base_url.into(),
        ai_model: DEFAULT_AI_MODEL.into(),
        ai_timeout_secs: 2,
        offline_delay_ms: 0,
        seed_demo_data: false,
    }
}

/// Advice provider that counts calls and answers with a fixed string.
pub struct CountingAdvisor {
    pub calls: AtomicUsize,
    pub reply: String,
}

impl CountingAdvisor {
    pub fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AdviceProvider for CountingAdvisor {
    async fn advise(&self, _transactions: &[Transaction], _debts: &[Debt]) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

/// A test client that simulates a browser session, allowing sequential requests
/// against the application.
pub struct TestClient {
    pub state: AppState,
}

impl TestClient {
    /// Create a new test client with an empty ledger and the offline advisor.
    pub fn new() -> Self {
        Self::with_advisor(Arc::new(CannedAdvisor::new(Duration::ZERO)))
    }

    pub fn with_advisor(advisor: Arc<dyn AdviceProvider>) -> Self {
        let state = AppState::new(
            test_config(None, "http://127.0.0.1:9"),
            Ledger::new(),
            advisor,
        );
        Self { state }
    }

    /// Build state exactly as the server does, from a config.
    pub fn from_config(config: Config) -> Self {
        let state = AppState::from_config(config).expect("Failed to build state");
        Self { state }
    }

    pub fn router(&self) -> Router {
        server::router(self.state.clone())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router().oneshot(request).await.unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8_lossy(&body).to_string())
    }

    /// Make a GET request and return status and body.
    pub async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with form data and return status and body.
    pub async fn post_form(&self, uri: &str, form_data: &[(&str, &str)]) -> (StatusCode, String) {
        let body = form_data
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json(&self, uri: &str, json: serde_json::Value) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Get JSON from an endpoint and parse it.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        uri: &str,
    ) -> (StatusCode, Option<T>) {
        let (status, body) = self.get(uri).await;
        let parsed = serde_json::from_str(&body).ok();
        (status, parsed)
    }

    // =========================================================================
    // Helper methods for creating entities through the web forms
    // =========================================================================

    /// Create a transaction via POST and return success status.
    pub async fn create_transaction(
        &self,
        transaction_type: &str,
        description: &str,
        amount: &str,
        category: &str,
    ) -> bool {
        let (status, _) = self
            .post_form(
                "/transactions/create",
                &[
                    ("type", transaction_type),
                    ("description", description),
                    ("amount", amount),
                    ("category", category),
                ],
            )
            .await;
        // Redirect (303) indicates success
        status == StatusCode::SEE_OTHER
    }

    /// Create a debt via POST and return success status.
    pub async fn create_debt(&self, description: &str, amount: &str) -> bool {
        let (status, _) = self
            .post_form(
                "/debts/create",
                &[("description", description), ("amount", amount)],
            )
            .await;
        status == StatusCode::SEE_OTHER
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.state.ledger().unwrap().transactions().to_vec()
    }

    pub fn debts(&self) -> Vec<Debt> {
        self.state.ledger().unwrap().debts().to_vec()
    }
}
