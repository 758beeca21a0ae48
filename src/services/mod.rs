pub mod advice_prompt;
pub mod aggregator;
pub mod ai_client;
