use askama::Template;
use axum::extract::State;
use axum::response::Html;
use tracing::debug;

use crate::error::{AppResult, RenderHtml};
use crate::models::money::format_money;
use crate::models::{Debt, Transaction, TransactionType};
use crate::services::aggregator::{CategoryTotal, Summary};
use crate::state::AppState;
use crate::VERSION;

/// Totals pre-formatted for display.
pub struct SummaryView {
    pub total_credits: String,
    pub total_expenses: String,
    pub total_debts: String,
    pub net_balance: String,
    pub net_positive: bool,
}

impl From<&Summary> for SummaryView {
    fn from(summary: &Summary) -> Self {
        Self {
            total_credits: format_money(summary.total_credits_cents),
            total_expenses: format_money(summary.total_expenses_cents),
            total_debts: format_money(summary.total_debts_cents),
            net_balance: format_money(summary.net_balance_cents),
            net_positive: summary.is_net_positive(),
        }
    }
}

#[derive(Template)]
#[template(path = "pages/dashboard.html")]
pub struct DashboardTemplate {
    pub title: String,
    pub version: &'static str,
    pub provider: &'static str,
    pub summary: SummaryView,
    pub transactions: Vec<Transaction>,
    pub debts: Vec<Debt>,
    pub breakdown: Vec<CategoryTotal>,
    pub expense_categories: Vec<&'static str>,
    pub credit_categories: Vec<&'static str>,
    pub advice: String,
    pub advice_error: String,
    pub is_loading: bool,
}

pub async fn index(State(state): State<AppState>) -> AppResult<Html<String>> {
    let template = {
        let ledger = state.ledger()?;
        let summary = ledger.summary();
        let advice = ledger.advice();

        debug!(
            transaction_count = summary.transaction_count,
            debt_count = summary.debt_count,
            net_balance_cents = summary.net_balance_cents,
            "Dashboard data loaded"
        );

        DashboardTemplate {
            title: "AI Expense Monitor".into(),
            version: VERSION,
            provider: state.advisor.name(),
            summary: SummaryView::from(&summary),
            transactions: ledger.transactions().to_vec(),
            debts: ledger.debts().to_vec(),
            breakdown: summary.category_breakdown,
            expense_categories: TransactionType::Expense.category_labels(),
            credit_categories: TransactionType::Credit.category_labels(),
            advice: advice.advice.clone().unwrap_or_default(),
            advice_error: advice.error.clone().unwrap_or_default(),
            is_loading: advice.is_loading,
        }
    };

    template.render_html()
}
