use axum::extract::State;
use axum::response::Json;

use crate::error::ApiResult;
use crate::models::CategoryVocabulary;
use crate::services::aggregator::{CategoryTotal, Summary};
use crate::state::AppState;

pub async fn summary(State(state): State<AppState>) -> ApiResult<Json<Summary>> {
    Ok(Json(state.ledger()?.summary()))
}

/// Expense totals per category in first-occurrence order, for the chart.
pub async fn spending_by_category(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<CategoryTotal>>> {
    Ok(Json(state.ledger()?.summary().category_breakdown))
}

pub async fn categories() -> Json<CategoryVocabulary> {
    Json(CategoryVocabulary::get())
}
