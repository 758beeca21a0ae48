use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::category::{TransactionKind, TransactionType};
use crate::models::money::{cents_to_decimal, format_cents, format_money};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub description: String,
    pub amount_cents: i64,
    #[serde(flatten)]
    pub kind: TransactionKind,
    pub date: NaiveDate,
}

impl Transaction {
    pub fn transaction_type(&self) -> TransactionType {
        self.kind.transaction_type()
    }

    pub fn category(&self) -> &'static str {
        self.kind.category_label()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    pub fn is_credit(&self) -> bool {
        self.kind.is_credit()
    }

    pub fn amount(&self) -> f64 {
        cents_to_decimal(self.amount_cents)
    }

    pub fn amount_display(&self) -> String {
        format_cents(self.amount_cents)
    }

    /// Signed for display: expenses are shown as outgoing.
    pub fn amount_formatted(&self) -> String {
        if self.is_expense() {
            format_money(-self.amount_cents)
        } else {
            format!("+{}", format_money(self.amount_cents))
        }
    }

    pub fn date_display(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

/// A validated transaction that has not yet been assigned an id or date.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub description: String,
    pub amount_cents: i64,
    pub kind: TransactionKind,
}
