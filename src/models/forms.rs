//! Raw form input and its validation into domain values.
//!
//! Every field arrives as a string so that a missing or malformed value
//! produces a user-facing message instead of a deserialization rejection.
//! Amounts posted as JSON may also be plain numbers.

use std::fmt;

use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::category::{TransactionKind, TransactionType};
use crate::models::debt::NewDebt;
use crate::models::money::{cents_from_decimal, MAX_AMOUNT_CENTS};
use crate::models::transaction::NewTransaction;

pub const MSG_TRANSACTION_FIELDS: &str = "Please fill in all fields.";
pub const MSG_TRANSACTION_AMOUNT: &str = "Please enter a valid, positive amount.";
pub const MSG_DEBT_FIELDS: &str = "Please provide a description and amount.";
pub const MSG_DEBT_AMOUNT: &str = "Please enter a valid amount.";

/// An amount as submitted: form text, or a JSON number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    fn is_blank(&self) -> bool {
        match self {
            RawAmount::Number(_) => false,
            RawAmount::Text(text) => text.trim().is_empty(),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            RawAmount::Number(value) => Some(*value),
            RawAmount::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl Default for RawAmount {
    fn default() -> Self {
        RawAmount::Text(String::new())
    }
}

impl From<&str> for RawAmount {
    fn from(text: &str) -> Self {
        RawAmount::Text(text.to_string())
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        RawAmount::Number(value)
    }
}

impl fmt::Display for RawAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawAmount::Number(value) => write!(f, "{}", value),
            RawAmount::Text(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: RawAmount,
    #[serde(default)]
    pub category: String,
    #[serde(rename = "type", default)]
    pub transaction_type: String,
}

impl TransactionForm {
    pub fn validate(&self) -> AppResult<NewTransaction> {
        let description = self.description.trim();
        if description.is_empty() || self.amount.is_blank() {
            return Err(AppError::Validation(MSG_TRANSACTION_FIELDS.into()));
        }

        let amount_cents = parse_positive_cents(&self.amount)
            .ok_or_else(|| AppError::Validation(MSG_TRANSACTION_AMOUNT.into()))?;

        let transaction_type: TransactionType =
            self.transaction_type.parse().map_err(|_| {
                AppError::Validation(format!(
                    "Unknown transaction type '{}'.",
                    self.transaction_type.trim()
                ))
            })?;

        let kind = TransactionKind::parse(transaction_type, &self.category).ok_or_else(|| {
            AppError::Validation(format!(
                "'{}' is not a valid {} category.",
                self.category.trim(),
                transaction_type.as_str()
            ))
        })?;

        Ok(NewTransaction {
            description: description.to_string(),
            amount_cents,
            kind,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DebtForm {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: RawAmount,
}

impl DebtForm {
    pub fn validate(&self) -> AppResult<NewDebt> {
        let description = self.description.trim();
        if description.is_empty() || self.amount.is_blank() {
            return Err(AppError::Validation(MSG_DEBT_FIELDS.into()));
        }

        let amount_cents = parse_positive_cents(&self.amount)
            .ok_or_else(|| AppError::Validation(MSG_DEBT_AMOUNT.into()))?;

        Ok(NewDebt {
            description: description.to_string(),
            amount_cents,
        })
    }
}

/// Parse a decimal amount that is strictly positive after rounding to cents
/// and no larger than [`MAX_AMOUNT_CENTS`].
fn parse_positive_cents(raw: &RawAmount) -> Option<i64> {
    let amount = raw.as_f64()?;
    if !amount.is_finite() || amount * 100.0 > MAX_AMOUNT_CENTS as f64 {
        return None;
    }
    let cents = cents_from_decimal(amount);
    (1..=MAX_AMOUNT_CENTS).contains(&cents).then_some(cents)
}
