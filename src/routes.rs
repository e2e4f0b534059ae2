// Routes module: combines all domain routers
use axum::{Json, Router, routing::get};
use serde_json::json;

use crate::domains::auth::routes::{create_session_router, create_token_router};
use crate::domains::blog::routes::create_blog_router;
use crate::domains::comment::routes::create_comment_router;
use crate::shared::services::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/v1/blog", create_blog_router())
        .nest("/v1/comment", create_comment_router())
        .nest("/v1/session", create_session_router())
        .nest("/v1/token", create_token_router())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
