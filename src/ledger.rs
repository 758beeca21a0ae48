//! In-memory session state: the transaction and debt collections plus the
//! status of the advice request.
//!
//! Collections are kept newest-first. Every successful mutation bumps a data
//! revision; every advice request gets a new generation. A finished request is
//! only applied when both still match, so a slow response can never overwrite
//! newer state.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    CreditCategory, Debt, ExpenseCategory, NewDebt, NewTransaction, Transaction, TransactionKind,
};
use crate::services::aggregator::Summary;

pub const MSG_NOTHING_TO_ADVISE: &str = "Add some transactions or debts before getting advice.";

/// What the dashboard shows about the most recent advice request.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdviceState {
    pub is_loading: bool,
    pub advice: Option<String>,
    pub error: Option<String>,
    pub generation: u64,
}

/// Snapshot handed to the advice provider while the ledger lock is released.
#[derive(Debug, Clone)]
pub struct AdviceTicket {
    pub generation: u64,
    revision: u64,
    pub transactions: Vec<Transaction>,
    pub debts: Vec<Debt>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceOutcome {
    /// Result stored for display.
    Applied,
    /// Data changed while the request was in flight; result dropped.
    Stale,
    /// A newer request was issued; result dropped.
    Superseded,
}

#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    debts: Vec<Debt>,
    advice: AdviceState,
    revision: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger pre-filled with a month of sample activity.
    pub fn with_demo_data() -> Self {
        let mut ledger = Self::new();
        let date = |d: u32| NaiveDate::from_ymd_opt(2024, 7, d).unwrap_or_default();

        // Inserted oldest first so the newest ends up at the front.
        let samples = [
            (
                "Electricity Bill",
                225_025,
                TransactionKind::Expense(ExpenseCategory::Utilities),
                25,
            ),
            (
                "Freelance Project",
                1_500_000,
                TransactionKind::Credit(CreditCategory::Freelance),
                26,
            ),
            (
                "Monthly train pass",
                150_000,
                TransactionKind::Expense(ExpenseCategory::Transport),
                27,
            ),
            (
                "Groceries from Market",
                350_050,
                TransactionKind::Expense(ExpenseCategory::Food),
                28,
            ),
            (
                "Monthly Salary",
                7_500_000,
                TransactionKind::Credit(CreditCategory::Salary),
                28,
            ),
        ];
        for (description, amount_cents, kind, day) in samples {
            ledger.add_transaction_on(
                NewTransaction {
                    description: description.to_string(),
                    amount_cents,
                    kind,
                },
                date(day),
            );
        }

        let debts = [("Credit Card", 5_500_000), ("Student Loan", 25_000_000)];
        for (description, amount_cents) in debts {
            ledger.add_debt(NewDebt {
                description: description.to_string(),
                amount_cents,
            });
        }

        info!(
            transactions = ledger.transactions.len(),
            debts = ledger.debts.len(),
            "Loaded demo data"
        );
        ledger
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn debts(&self) -> &[Debt] {
        &self.debts
    }

    pub fn advice(&self) -> &AdviceState {
        &self.advice
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn summary(&self) -> Summary {
        Summary::compute(&self.transactions, &self.debts)
    }

    /// Record a transaction dated today.
    pub fn add_transaction(&mut self, new: NewTransaction) -> Transaction {
        self.add_transaction_on(new, Local::now().date_naive())
    }

    pub fn add_transaction_on(&mut self, new: NewTransaction, date: NaiveDate) -> Transaction {
        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            description: new.description,
            amount_cents: new.amount_cents,
            kind: new.kind,
            date,
        };
        debug!(
            id = %transaction.id,
            kind = %transaction.kind,
            amount_cents = transaction.amount_cents,
            "Adding transaction"
        );
        self.transactions.insert(0, transaction.clone());
        self.revision += 1;
        transaction
    }

    /// Remove a transaction. Unknown ids are ignored and reported as `false`.
    pub fn delete_transaction(&mut self, id: &str) -> bool {
        let before = self.transactions.len();
        self.transactions.retain(|t| t.id != id);
        let removed = self.transactions.len() != before;
        if removed {
            self.revision += 1;
        }
        debug!(id, removed, "Deleting transaction");
        removed
    }

    pub fn add_debt(&mut self, new: NewDebt) -> Debt {
        let debt = Debt {
            id: Uuid::new_v4().to_string(),
            description: new.description,
            amount_cents: new.amount_cents,
        };
        debug!(id = %debt.id, amount_cents = debt.amount_cents, "Adding debt");
        self.debts.insert(0, debt.clone());
        self.revision += 1;
        debt
    }

    pub fn delete_debt(&mut self, id: &str) -> bool {
        let before = self.debts.len();
        self.debts.retain(|d| d.id != id);
        let removed = self.debts.len() != before;
        if removed {
            self.revision += 1;
        }
        debug!(id, removed, "Deleting debt");
        removed
    }

    /// Start an advice request, marking the ledger busy until it is finished.
    pub fn begin_advice(&mut self) -> AppResult<AdviceTicket> {
        if self.transactions.is_empty() && self.debts.is_empty() {
            self.advice.error = Some(MSG_NOTHING_TO_ADVISE.to_string());
            return Err(AppError::Precondition(MSG_NOTHING_TO_ADVISE.to_string()));
        }
        if self.advice.is_loading {
            return Err(AppError::Busy);
        }

        self.advice.generation += 1;
        self.advice.is_loading = true;
        self.advice.advice = None;
        self.advice.error = None;

        Ok(AdviceTicket {
            generation: self.advice.generation,
            revision: self.revision,
            transactions: self.transactions.clone(),
            debts: self.debts.clone(),
        })
    }

    /// Store the provider's answer if the ticket is still the current request.
    pub fn finish_advice(
        &mut self,
        ticket: &AdviceTicket,
        result: &AppResult<String>,
    ) -> AdviceOutcome {
        if ticket.generation != self.advice.generation {
            return AdviceOutcome::Superseded;
        }

        self.advice.is_loading = false;

        if ticket.revision != self.revision {
            return AdviceOutcome::Stale;
        }

        match result {
            Ok(advice) => {
                self.advice.advice = Some(advice.clone());
                self.advice.error = None;
            }
            Err(e) => {
                self.advice.advice = None;
                self.advice.error = Some(format!("Failed to get financial advice: {}", e));
            }
        }
        AdviceOutcome::Applied
    }
}
