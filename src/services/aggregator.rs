use serde::Serialize;

use crate::models::money::{cents_to_decimal, format_cents, sum_cents};
use crate::models::{Debt, Transaction};

/// Chart palette, assigned by breakdown position and wrapping around.
pub const CATEGORY_COLORS: [&str; 8] = [
    "#EF4444", "#3B82F6", "#8B5CF6", "#F59E0B", "#EC4899", "#10B981", "#F97316", "#6366F1",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total_cents: i64,
    pub total: f64,
    pub color: &'static str,
}

impl CategoryTotal {
    pub fn total_display(&self) -> String {
        format_cents(self.total_cents)
    }
}

/// Derived totals over the full transaction and debt collections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_credits_cents: i64,
    pub total_expenses_cents: i64,
    pub total_debts_cents: i64,
    pub net_balance_cents: i64,
    pub transaction_count: usize,
    pub debt_count: usize,
    pub category_breakdown: Vec<CategoryTotal>,
}

impl Summary {
    pub fn compute(transactions: &[Transaction], debts: &[Debt]) -> Self {
        let total_credits_cents = sum_cents(
            transactions
                .iter()
                .filter(|t| t.is_credit())
                .map(|t| t.amount_cents),
        );
        let total_expenses_cents = sum_cents(
            transactions
                .iter()
                .filter(|t| t.is_expense())
                .map(|t| t.amount_cents),
        );
        let total_debts_cents = sum_cents(debts.iter().map(|d| d.amount_cents));

        Self {
            total_credits_cents,
            total_expenses_cents,
            total_debts_cents,
            net_balance_cents: total_credits_cents.saturating_sub(total_expenses_cents),
            transaction_count: transactions.len(),
            debt_count: debts.len(),
            category_breakdown: spending_by_category(transactions),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transaction_count == 0 && self.debt_count == 0
    }

    pub fn is_net_positive(&self) -> bool {
        self.net_balance_cents >= 0
    }
}

/// Expense totals per category label, in order of first occurrence.
pub fn spending_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<(&'static str, i64)> = Vec::new();

    for transaction in transactions.iter().filter(|t| t.is_expense()) {
        let category = transaction.category();
        match totals.iter_mut().find(|(name, _)| *name == category) {
            Some(entry) => entry.1 = entry.1.saturating_add(transaction.amount_cents),
            None => totals.push((category, transaction.amount_cents)),
        }
    }

    totals
        .into_iter()
        .enumerate()
        .map(|(index, (category, total_cents))| CategoryTotal {
            category: category.to_string(),
            total_cents,
            total: cents_to_decimal(total_cents),
            color: CATEGORY_COLORS[index % CATEGORY_COLORS.len()],
        })
        .collect()
}
