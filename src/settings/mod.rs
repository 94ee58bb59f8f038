pub mod dto;
pub mod handlers;
pub mod provider;
pub mod suggestions;

use axum::{routing::get, Router};

use crate::state::AppState;

pub use dto::UserSettings;
pub use provider::SettingsHub;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/settings",
            get(handlers::get_settings).put(handlers::put_settings),
        )
        .route("/settings/suggestions", get(handlers::get_suggestions))
}
