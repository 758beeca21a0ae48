use axum::extract::State;
use axum::response::{Json, Redirect};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::error::{ApiResult, AppError, AppResult};
use crate::ledger::{AdviceOutcome, AdviceTicket};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdviceStatus {
    pub provider: &'static str,
    pub is_loading: bool,
    pub advice: Option<String>,
    pub error: Option<String>,
    pub generation: u64,
}

fn current_status(state: &AppState) -> AppResult<AdviceStatus> {
    let ledger = state.ledger()?;
    let advice = ledger.advice();
    Ok(AdviceStatus {
        provider: state.advisor.name(),
        is_loading: advice.is_loading,
        advice: advice.advice.clone(),
        error: advice.error.clone(),
        generation: advice.generation,
    })
}

/// Snapshot the ledger, ask the provider, and store the answer if still current.
///
/// The provider runs in a detached task that always settles the request, so
/// a dropped caller or a panicking provider cannot leave the ledger busy. The
/// ledger lock is released while the provider runs.
pub async fn run_advice(state: &AppState) -> AppResult<AdviceOutcome> {
    let ticket = {
        let mut ledger = state.ledger()?;
        Arc::new(ledger.begin_advice()?)
    };

    debug!(
        generation = ticket.generation,
        provider = state.advisor.name(),
        "Requesting financial advice"
    );

    let task_state = state.clone();
    tokio::spawn(async move {
        let result = call_provider(&task_state, ticket.clone()).await;
        settle_advice(&task_state, &ticket, result)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Advice task failed: {}", e)))?
}

async fn call_provider(state: &AppState, ticket: Arc<AdviceTicket>) -> AppResult<String> {
    let advisor = state.advisor.clone();
    let generation = ticket.generation;

    tokio::spawn(async move { advisor.advise(&ticket.transactions, &ticket.debts).await })
        .await
        .unwrap_or_else(|e| {
            error!(generation, "Advice provider task failed: {}", e);
            Err(AppError::Communication)
        })
}

fn settle_advice(
    state: &AppState,
    ticket: &AdviceTicket,
    result: AppResult<String>,
) -> AppResult<AdviceOutcome> {
    let outcome = state.ledger()?.finish_advice(ticket, &result);

    match outcome {
        AdviceOutcome::Applied => {
            result?;
            info!(generation = ticket.generation, "Financial advice received");
        }
        AdviceOutcome::Stale => {
            warn!(
                generation = ticket.generation,
                "Discarding advice: data changed while the request was in flight"
            );
        }
        AdviceOutcome::Superseded => {
            warn!(
                generation = ticket.generation,
                "Discarding advice: a newer request was issued"
            );
        }
    }

    Ok(outcome)
}

pub async fn request(State(state): State<AppState>) -> AppResult<Redirect> {
    run_advice(&state).await?;
    Ok(Redirect::to("/"))
}

pub async fn request_json(State(state): State<AppState>) -> ApiResult<Json<AdviceStatus>> {
    run_advice(&state).await?;
    Ok(Json(current_status(&state)?))
}

pub async fn status_json(State(state): State<AppState>) -> ApiResult<Json<AdviceStatus>> {
    Ok(Json(current_status(&state)?))
}
