pub mod category;
pub mod debt;
pub mod forms;
pub mod money;
pub mod transaction;

pub use category::{
    CategoryVocabulary, CreditCategory, ExpenseCategory, TransactionKind, TransactionType,
};
pub use debt::{Debt, NewDebt};
pub use forms::{DebtForm, RawAmount, TransactionForm};
pub use transaction::{NewTransaction, Transaction};
