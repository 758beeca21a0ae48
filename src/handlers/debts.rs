use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Json, Redirect};
use axum::Form;
use tracing::{debug, info};

use crate::error::{ApiResult, AppResult};
use crate::models::{Debt, DebtForm};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    Form(form): Form<DebtForm>,
) -> AppResult<Redirect> {
    debug!(description = %form.description, amount = %form.amount, "Creating debt");

    let new_debt = form.validate()?;
    let debt = state.ledger()?.add_debt(new_debt);
    info!(debt_id = %debt.id, "Debt created via web form");

    Ok(Redirect::to("/"))
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Redirect> {
    let removed = state.ledger()?.delete_debt(&id);
    info!(debt_id = %id, removed, "Deleting debt");

    Ok(Redirect::to("/"))
}

pub async fn list_json(State(state): State<AppState>) -> ApiResult<Json<Vec<Debt>>> {
    Ok(Json(state.ledger()?.debts().to_vec()))
}

pub async fn create_json(
    State(state): State<AppState>,
    Json(form): Json<DebtForm>,
) -> ApiResult<(StatusCode, Json<Debt>)> {
    let new_debt = form.validate()?;
    let debt = state.ledger()?.add_debt(new_debt);
    info!(debt_id = %debt.id, "Debt created via API");

    Ok((StatusCode::CREATED, Json(debt)))
}

pub async fn delete_json(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let removed = state.ledger()?.delete_debt(&id);
    debug!(debt_id = %id, removed, "Debt delete via API");

    Ok(StatusCode::NO_CONTENT)
}
