use crate::models::money::{format_cents, sum_cents, CURRENCY_SYMBOL};
use crate::models::{Debt, Transaction};

/// Placeholder used for a detail section with no entries.
pub const EMPTY_SECTION: &str = "None";

fn format_line(description: &str, category: Option<&str>, amount_cents: i64) -> String {
    match category {
        Some(category) => format!(
            "- {} ({}): {}{}",
            description,
            category,
            CURRENCY_SYMBOL,
            format_cents(amount_cents)
        ),
        None => format!(
            "- {}: {}{}",
            description,
            CURRENCY_SYMBOL,
            format_cents(amount_cents)
        ),
    }
}

fn format_section(lines: Vec<String>) -> String {
    if lines.is_empty() {
        EMPTY_SECTION.to_string()
    } else {
        lines.join("\n")
    }
}

pub fn format_transactions(transactions: &[&Transaction]) -> String {
    format_section(
        transactions
            .iter()
            .map(|t| format_line(&t.description, Some(t.category()), t.amount_cents))
            .collect(),
    )
}

pub fn format_debts(debts: &[Debt]) -> String {
    format_section(
        debts
            .iter()
            .map(|d| format_line(&d.description, None, d.amount_cents))
            .collect(),
    )
}

/// Build the advisor prompt from the current transactions and debts.
pub fn build_advice_prompt(transactions: &[Transaction], debts: &[Debt]) -> String {
    let (credits, expenses): (Vec<&Transaction>, Vec<&Transaction>) =
        transactions.iter().partition(|t| t.is_credit());

    let total_earned = sum_cents(credits.iter().map(|t| t.amount_cents));
    let total_spent = sum_cents(expenses.iter().map(|t| t.amount_cents));
    let total_debt = sum_cents(debts.iter().map(|d| d.amount_cents));
    let net_balance = total_earned.saturating_sub(total_spent);

    let currency = CURRENCY_SYMBOL;

    format!(
        r#"You are a friendly and insightful financial advisor.
Based on the following financial summary, provide a brief analysis and 2-3 actionable, encouraging tips to help the user improve their financial situation.
All monetary values are in Indian Rupees (INR).
Do not be judgmental. Keep the tone positive and helpful. The output should be a single block of text, formatted for easy reading with clear bullet points or numbered lists for the tips.

FINANCIAL SUMMARY:
- Total Credits (Income): {currency}{earned}
- Total Expenses: {currency}{spent}
- Net Balance: {currency}{net}
- Total Outstanding Debt: {currency}{debt}

CREDIT DETAILS:
{credit_details}

EXPENSE DETAILS:
{expense_details}

DEBT DETAILS:
{debt_details}

Provide your analysis and advice below:"#,
        earned = format_cents(total_earned),
        spent = format_cents(total_spent),
        net = format_cents(net_balance),
        debt = format_cents(total_debt),
        credit_details = format_transactions(&credits),
        expense_details = format_transactions(&expenses),
        debt_details = format_debts(debts),
    )
}
