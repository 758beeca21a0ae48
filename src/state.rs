use std::sync::{Arc, Mutex, MutexGuard};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::ledger::Ledger;
use crate::services::ai_client::{select_provider, AdviceProvider};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ledger: Arc<Mutex<Ledger>>,
    pub advisor: Arc<dyn AdviceProvider>,
}

impl AppState {
    /// Build state from config, choosing the advice provider once.
    pub fn from_config(config: Config) -> AppResult<Self> {
        let advisor = select_provider(&config)?;
        let ledger = if config.seed_demo_data {
            Ledger::with_demo_data()
        } else {
            Ledger::new()
        };
        Ok(Self::new(config, ledger, advisor))
    }

    pub fn new(config: Config, ledger: Ledger, advisor: Arc<dyn AdviceProvider>) -> Self {
        Self {
            config: Arc::new(config),
            ledger: Arc::new(Mutex::new(ledger)),
            advisor,
        }
    }

    /// Lock the ledger. Never hold the guard across an `.await`.
    pub fn ledger(&self) -> AppResult<MutexGuard<'_, Ledger>> {
        self.ledger
            .lock()
            .map_err(|_| AppError::Internal("Ledger lock poisoned".into()))
    }
}
