use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` disables meal-text parsing.
    pub openai: Option<OpenAiConfig>,
    /// Upper bound for the `days` query parameter.
    pub max_history_days: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port = match std::env::var("APP_PORT") {
            Ok(v) => v.parse::<u16>()?,
            Err(_) => 8080,
        };
        let openai = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .map(|api_key| OpenAiConfig {
                api_key,
                model: std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into()),
                base_url: std::env::var("OPENAI_BASE_URL")
                    .unwrap_or_else(|_| "https://api.openai.com/v1".into()),
            });
        let max_history_days = std::env::var("MAX_HISTORY_DAYS")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|d| *d > 0)
            .unwrap_or(90);
        Ok(Self {
            host,
            port,
            openai,
            max_history_days,
        })
    }
}
