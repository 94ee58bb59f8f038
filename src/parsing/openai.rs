use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::{normalize::normalize_items, NutritionParser, ParseError};
use crate::config::OpenAiConfig;
use crate::nutrition::FoodItem;

const TEMPERATURE: f32 = 0.3;

pub const PARSE_MEAL_PROMPT: &str = "You are a nutrition expert. Parse the following food description into individual items.
For each item, estimate: calories, protein (grams), and fiber (grams).
Be conservative with portions if not specified (assume standard serving sizes).
Return ONLY a valid JSON array with this exact format, no other text:
[
  {
    \"name\": \"food name\",
    \"calories\": number,
    \"protein\": number,
    \"fiber\": number,
    \"quantity\": \"optional portion size\"
  }
]

User input: ";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions backed parser.
pub struct OpenAiParser {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiParser {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl NutritionParser for OpenAiParser {
    async fn parse(&self, text: &str) -> Result<Vec<FoodItem>, ParseError> {
        let prompt = format!("{PARSE_MEAL_PROMPT}{text}");
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: TEMPERATURE,
        };

        let resp = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            error!(%status, body = %body, "chat completion failed");
            return Err(ParseError::Transport(format!("status {status}")));
        }

        let chat: ChatResponse = resp.json().await?;
        // an empty answer means "no items", not an error
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_else(|| "[]".to_string());
        debug!(chars = content.len(), "chat completion received");

        normalize_items(&content).inspect_err(|e| {
            error!(error = %e, content = %content, "could not read nutrition answer");
        })
    }
}
