use std::env;

pub const DEFAULT_AI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Advice endpoint credential. `None` selects the offline provider.
    pub api_key: Option<String>,
    pub ai_base_url: String,
    pub ai_model: String,
    pub ai_timeout_secs: u64,
    pub offline_delay_ms: u64,
    pub seed_demo_data: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_key = env::var("API_KEY")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        Self {
            host: env::var("EXPENSE_MONITOR_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("EXPENSE_MONITOR_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(7070),
            api_key,
            ai_base_url: env::var("EXPENSE_MONITOR_AI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_AI_BASE_URL.into()),
            ai_model: env::var("EXPENSE_MONITOR_AI_MODEL")
                .unwrap_or_else(|_| DEFAULT_AI_MODEL.into()),
            ai_timeout_secs: env::var("EXPENSE_MONITOR_AI_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            offline_delay_ms: env::var("EXPENSE_MONITOR_OFFLINE_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            seed_demo_data: env::var("EXPENSE_MONITOR_SEED_DEMO")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_address() {
        let config = Config {
            host: "127.0.0.1".into(),
            port: 8080,
            api_key: None,
            ai_base_url: DEFAULT_AI_BASE_URL.into(),
            ai_model: DEFAULT_AI_MODEL.into(),
            ai_timeout_secs: 60,
            offline_delay_ms: 1000,
            seed_demo_data: false,
        };
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert!(!config.has_api_key());
    }
}
