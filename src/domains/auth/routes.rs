// Auth domain routes
use axum::{
    Router,
    routing::{get, post},
};

use crate::domains::auth::handlers::auth_handler;
use crate::shared::services::AppState;

/// Login entry points.
pub fn create_session_router() -> Router<AppState> {
    Router::new()
        .route("/oauth/google", get(auth_handler::oauth_google))
        .route("/me", get(auth_handler::me))
}

/// Token lifecycle entry points.
pub fn create_token_router() -> Router<AppState> {
    Router::new()
        .route("/refresh", post(auth_handler::refresh))
        .route("/logout", post(auth_handler::logout))
}
