use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, instrument, warn};

use super::dto::{GoalSuggestions, UserSettings};
use super::suggestions::suggest_goals;
use crate::extractors::UserId;
use crate::state::AppState;

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    error!(error = %e, "settings request failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
}

/// GET /settings; defaults when the user never saved any.
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<UserSettings>, (StatusCode, String)> {
    let settings = state.settings.current(user_id).await.map_err(internal)?;
    Ok(Json(settings))
}

/// PUT /settings
#[instrument(skip(state, settings))]
pub async fn put_settings(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(settings): Json<UserSettings>,
) -> Result<Json<UserSettings>, (StatusCode, String)> {
    if let Err(e) = settings.validate() {
        warn!(error = %e, %user_id, "rejected settings");
        return Err((StatusCode::BAD_REQUEST, e.to_string()));
    }
    let saved = state
        .settings
        .save(user_id, settings)
        .await
        .map_err(internal)?;
    Ok(Json(saved))
}

/// GET /settings/suggestions, computed from the saved body metrics.
#[instrument(skip(state))]
pub async fn get_suggestions(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<GoalSuggestions>, (StatusCode, String)> {
    let settings = state.settings.current(user_id).await.map_err(internal)?;
    Ok(Json(suggest_goals(&settings)))
}
