use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Expense,
    Credit,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "expense",
            Self::Credit => "credit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Credit => "Credit",
        }
    }

    /// Ordered category labels allowed for this type.
    pub fn category_labels(&self) -> Vec<&'static str> {
        match self {
            Self::Expense => ExpenseCategory::ALL.iter().map(|c| c.label()).collect(),
            Self::Credit => CreditCategory::ALL.iter().map(|c| c.label()).collect(),
        }
    }
}

impl FromStr for TransactionType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "credit" => Ok(Self::Credit),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseCategory {
    Food,
    Transport,
    Shopping,
    Utilities,
    Entertainment,
    Health,
    #[serde(rename = "Debt Payment")]
    DebtPayment,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 8] = [
        Self::Food,
        Self::Transport,
        Self::Shopping,
        Self::Utilities,
        Self::Entertainment,
        Self::Health,
        Self::DebtPayment,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Transport => "Transport",
            Self::Shopping => "Shopping",
            Self::Utilities => "Utilities",
            Self::Entertainment => "Entertainment",
            Self::Health => "Health",
            Self::DebtPayment => "Debt Payment",
            Self::Other => "Other",
        }
    }
}

impl FromStr for ExpenseCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreditCategory {
    Salary,
    Freelance,
    Gift,
    Bonus,
    Other,
}

impl CreditCategory {
    pub const ALL: [CreditCategory; 5] = [
        Self::Salary,
        Self::Freelance,
        Self::Gift,
        Self::Bonus,
        Self::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary",
            Self::Freelance => "Freelance",
            Self::Gift => "Gift",
            Self::Bonus => "Bonus",
            Self::Other => "Other",
        }
    }
}

impl FromStr for CreditCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
            .ok_or(())
    }
}

/// A transaction's type together with a category that is valid for it.
///
/// Serialized flat as `{"type": "expense", "category": "Food"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "category", rename_all = "snake_case")]
pub enum TransactionKind {
    Expense(ExpenseCategory),
    Credit(CreditCategory),
}

impl TransactionKind {
    /// Resolve a type/category pair, rejecting categories outside the type's vocabulary.
    pub fn parse(transaction_type: TransactionType, category: &str) -> Option<Self> {
        match transaction_type {
            TransactionType::Expense => category.parse().ok().map(Self::Expense),
            TransactionType::Credit => category.parse().ok().map(Self::Credit),
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Expense(_) => TransactionType::Expense,
            Self::Credit(_) => TransactionType::Credit,
        }
    }

    pub fn category_label(&self) -> &'static str {
        match self {
            Self::Expense(c) => c.label(),
            Self::Credit(c) => c.label(),
        }
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense(_))
    }

    pub fn is_credit(&self) -> bool {
        matches!(self, Self::Credit(_))
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.transaction_type().label(),
            self.category_label()
        )
    }
}

/// The fixed category vocabulary, as exposed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryVocabulary {
    pub expense: Vec<&'static str>,
    pub credit: Vec<&'static str>,
}

impl CategoryVocabulary {
    pub fn get() -> Self {
        Self {
            expense: TransactionType::Expense.category_labels(),
            credit: TransactionType::Credit.category_labels(),
        }
    }
}
