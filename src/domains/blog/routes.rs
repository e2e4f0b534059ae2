// Blog domain routes
use axum::{
    Router,
    routing::{get, post},
};

use crate::domains::blog::handlers::blog_handler;
use crate::shared::services::AppState;

pub fn create_blog_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(blog_handler::create_blog).get(blog_handler::get_blogs),
        )
        .route(
            "/:id",
            get(blog_handler::get_blog).put(blog_handler::update_blog),
        )
}
