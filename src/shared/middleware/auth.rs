use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use serde_json::json;

use crate::shared::services::AppState;

/// Caller identity extracted from a Bearer access token.
///
/// A token passes only if its signature verifies AND its access uuid is
/// still live in the token store, so logout and bulk revocation take
/// effect immediately regardless of the signed expiry.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub access_uuid: String,
}

fn unauthorized(message: &str) -> (StatusCode, axum::Json<serde_json::Value>) {
    (
        StatusCode::UNAUTHORIZED,
        axum::Json(json!({ "error": message })),
    )
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = (StatusCode, axum::Json<serde_json::Value>);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("Authorization")
            .ok_or_else(|| unauthorized("Missing authorization header"))?
            .to_str()
            .map_err(|_| unauthorized("Invalid authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| unauthorized("Invalid authorization format. Expected: 'Bearer <token>'"))?;

        let token_service = &state.auth_state.token_service;

        let claims = token_service
            .validate_token(token)
            .map_err(|_| unauthorized("Invalid or expired token"))?;

        // Store membership check: a signed but revoked token is rejected
        // here.
        let stored_user = token_service
            .fetch_user(&claims.access_uuid)
            .await
            .map_err(|err| <(StatusCode, axum::Json<serde_json::Value>)>::from(err))?;

        match stored_user {
            Some(user_id) if user_id == claims.user_id => Ok(AuthenticatedUser {
                user_id,
                access_uuid: claims.access_uuid,
            }),
            _ => Err(unauthorized("Token has been revoked")),
        }
    }
}
