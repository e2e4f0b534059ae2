// Comment domain routes
use axum::{
    Router,
    routing::{get, post},
};

use crate::domains::comment::handlers::comment_handler;
use crate::shared::services::AppState;

pub fn create_comment_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(comment_handler::create_comment).get(comment_handler::get_comments),
        )
        .route(
            "/:id",
            get(comment_handler::get_comment)
                .put(comment_handler::update_comment)
                .delete(comment_handler::delete_comment),
        )
}
