use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, instrument};

use super::dto::{ParseMealRequest, ParseMealResponse};
use super::ParseError;
use crate::extractors::UserId;
use crate::state::AppState;

/// POST /parse-meal { text }
#[instrument(skip(state, req))]
pub async fn parse_meal(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(req): Json<ParseMealRequest>,
) -> Result<Json<ParseMealResponse>, (StatusCode, String)> {
    let text = req.text.trim();
    if text.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "text is required".into()));
    }

    match state.parser.parse(text).await {
        Ok(items) => Ok(Json(ParseMealResponse { items })),
        Err(ParseError::NotConfigured) => Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "meal parsing is not configured".into(),
        )),
        Err(e) => {
            error!(error = %e, %user_id, "parse_meal failed");
            Err((StatusCode::BAD_GATEWAY, "Failed to parse meal".into()))
        }
    }
}
