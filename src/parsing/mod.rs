pub mod dto;
pub mod handlers;
pub mod normalize;
pub mod openai;

use async_trait::async_trait;
use axum::{routing::post, Router};
use thiserror::Error;

use crate::nutrition::FoodItem;
use crate::state::AppState;

pub use openai::OpenAiParser;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("meal parsing is not configured")]
    NotConfigured,
    #[error("nutrition service request failed: {0}")]
    Transport(String),
    #[error("nutrition service returned an unusable answer: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ParseError {
    fn from(e: reqwest::Error) -> Self {
        ParseError::Transport(e.to_string())
    }
}

/// Turns a free-text meal description into food items.
#[async_trait]
pub trait NutritionParser: Send + Sync {
    async fn parse(&self, text: &str) -> Result<Vec<FoodItem>, ParseError>;
}

/// Used when no API key is configured.
pub struct DisabledParser;

#[async_trait]
impl NutritionParser for DisabledParser {
    async fn parse(&self, _text: &str) -> Result<Vec<FoodItem>, ParseError> {
        Err(ParseError::NotConfigured)
    }
}

pub fn router() -> Router<AppState> {
    Router::new().route("/parse-meal", post(handlers::parse_meal))
}
