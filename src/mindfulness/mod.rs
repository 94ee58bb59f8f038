//! Calm and hunger awareness across meals.

pub mod handlers;
pub mod metrics;
pub mod report;
pub mod series;

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/mindfulness", get(handlers::get_mindfulness))
}
