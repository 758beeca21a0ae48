use serde::{Deserialize, Serialize};

use crate::models::money::{cents_to_decimal, format_cents, format_money};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    pub id: String,
    pub description: String,
    pub amount_cents: i64,
}

impl Debt {
    pub fn amount(&self) -> f64 {
        cents_to_decimal(self.amount_cents)
    }

    pub fn amount_display(&self) -> String {
        format_cents(self.amount_cents)
    }

    pub fn amount_formatted(&self) -> String {
        format_money(self.amount_cents)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDebt {
    pub description: String,
    pub amount_cents: i64,
}
