use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{Debt, Transaction};
use crate::services::advice_prompt::build_advice_prompt;

pub const ADVICE_TEMPERATURE: f64 = 0.5;

/// Returned by [`CannedAdvisor`] when no API credential is configured.
pub const CANNED_ADVICE: &str = "This is a sample AI advice because the API key is not configured. \n\n1. **Maximize Income:** Your freelance project is a great income source. \n2. **Manage Debts:** Consider a plan to tackle the credit card debt first. \n3. **Review Spending:** Analyze your expense categories to find potential savings.";

/// Source of financial advice for a set of transactions and debts.
#[async_trait]
pub trait AdviceProvider: Send + Sync {
    async fn advise(&self, transactions: &[Transaction], debts: &[Debt]) -> AppResult<String>;

    /// Short identifier shown in the UI and logs.
    fn name(&self) -> &'static str;
}

/// Pick the provider once at startup based on credential presence.
pub fn select_provider(config: &Config) -> AppResult<Arc<dyn AdviceProvider>> {
    match config.api_key.as_deref() {
        Some(api_key) => {
            info!(
                model = %config.ai_model,
                base_url = %config.ai_base_url,
                "Using Gemini advice provider"
            );
            Ok(Arc::new(GeminiAdvisor::new(
                api_key,
                &config.ai_base_url,
                &config.ai_model,
                Duration::from_secs(config.ai_timeout_secs),
            )?))
        }
        None => {
            info!("No API key configured, using canned advice provider");
            Ok(Arc::new(CannedAdvisor::new(Duration::from_millis(
                config.offline_delay_ms,
            ))))
        }
    }
}

/// Offline stand-in that answers with [`CANNED_ADVICE`] after a fixed delay.
#[derive(Debug, Clone)]
pub struct CannedAdvisor {
    delay: Duration,
}

impl CannedAdvisor {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl AdviceProvider for CannedAdvisor {
    async fn advise(&self, transactions: &[Transaction], debts: &[Debt]) -> AppResult<String> {
        debug!(
            transaction_count = transactions.len(),
            debt_count = debts.len(),
            delay_ms = self.delay.as_millis() as u64,
            "Returning canned advice"
        );
        tokio::time::sleep(self.delay).await;
        Ok(CANNED_ADVICE.to_string())
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

/// Why a Gemini call failed. Only ever logged; callers see [`AppError::Communication`].
#[derive(Error, Debug)]
enum AdvisorFailure {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response contained no text")]
    EmptyResponse,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Client for the Google Generative Language `generateContent` endpoint.
pub struct GeminiAdvisor {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl GeminiAdvisor {
    pub fn new(api_key: &str, base_url: &str, model: &str, timeout: Duration) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    async fn generate(&self, prompt: String) -> Result<String, AdvisorFailure> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt) }],
            }],
            generation_config: GenerationConfig {
                temperature: ADVICE_TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AdvisorFailure::Status { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(AdvisorFailure::EmptyResponse);
        }
        Ok(text.to_string())
    }
}

#[async_trait]
impl AdviceProvider for GeminiAdvisor {
    async fn advise(&self, transactions: &[Transaction], debts: &[Debt]) -> AppResult<String> {
        let prompt = build_advice_prompt(transactions, debts);

        debug!(
            model = %self.model,
            transaction_count = transactions.len(),
            debt_count = debts.len(),
            prompt_chars = prompt.chars().count(),
            "Sending advice request to Gemini"
        );

        self.generate(prompt).await.map_err(|e| {
            error!(model = %self.model, error = %e, "Error calling Gemini API");
            AppError::Communication
        })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
