use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Json, Redirect};
use axum::Form;
use tracing::{debug, info};

use crate::error::{ApiResult, AppResult};
use crate::models::{Transaction, TransactionForm};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<TransactionForm>,
) -> AppResult<Redirect> {
    debug!(description = %form.description, amount = %form.amount, "Creating transaction");

    let new_transaction = form.validate()?;
    let transaction = state.ledger()?.add_transaction(new_transaction);
    info!(transaction_id = %transaction.id, "Transaction created via web form");

    Ok(Redirect::to("/"))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Redirect> {
    let removed = state.ledger()?.delete_transaction(&id);
    info!(transaction_id = %id, removed, "Deleting transaction");

    Ok(Redirect::to("/"))
}

pub async fn list_json(State(state): State<AppState>) -> ApiResult<Json<Vec<Transaction>>> {
    Ok(Json(state.ledger()?.transactions().to_vec()))
}

pub async fn create_json(
    State(state): State<AppState>,
    Json(form): Json<TransactionForm>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let new_transaction = form.validate()?;
    let transaction = state.ledger()?.add_transaction(new_transaction);
    info!(transaction_id = %transaction.id, "Transaction created via API");

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn delete_json(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let removed = state.ledger()?.delete_transaction(&id);
    debug!(transaction_id = %id, removed, "Transaction delete via API");

    Ok(StatusCode::NO_CONTENT)
}
