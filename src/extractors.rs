use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;

use crate::state::AppState;

/// Header carrying the caller's user id. Identity is established upstream;
/// this service only keys records by it.
pub const USER_HEADER: &str = "x-user-id";

/// Extracts the user id every meal and settings record is keyed by.
pub struct UserId(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for UserId {
    type Rejection = (StatusCode, String);

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw = parts
            .headers
            .get(USER_HEADER)
            .and_then(|h| h.to_str().ok())
            .ok_or((StatusCode::UNAUTHORIZED, format!("missing {USER_HEADER} header")))?;

        let id = Uuid::parse_str(raw.trim())
            .map_err(|_| (StatusCode::BAD_REQUEST, format!("{USER_HEADER} is not a valid UUID")))?;

        Ok(UserId(id))
    }
}
