pub mod advice;
pub mod api;
pub mod dashboard;
pub mod debts;
pub mod transactions;

use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        // Pages
        .route("/", get(dashboard::index))
        // Form posts
        .route("/transactions/create", post(transactions::create))
        .route("/transactions/:id/delete", post(transactions::delete))
        .route("/debts/create", post(debts::create))
        .route("/debts/:id/delete", post(debts::delete))
        .route("/advice", post(advice::request))
        // API (JSON)
        .route("/api/summary", get(api::summary))
        .route("/api/spending-by-category", get(api::spending_by_category))
        .route("/api/categories", get(api::categories))
        .route(
            "/api/transactions",
            get(transactions::list_json).post(transactions::create_json),
        )
        .route("/api/transactions/:id", delete(transactions::delete_json))
        .route("/api/debts", get(debts::list_json).post(debts::create_json))
        .route("/api/debts/:id", delete(debts::delete_json))
        .route(
            "/api/advice",
            get(advice::status_json).post(advice::request_json),
        )
        // Health check
        .route("/health", get(health))
}

async fn health() -> &'static str {
    "OK"
}

/// Fallback handler for unmatched routes.
pub async fn fallback_handler() -> (StatusCode, &'static str) {
    (
        StatusCode::NOT_FOUND,
        "The page you're looking for doesn't exist.",
    )
}
