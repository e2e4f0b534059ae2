use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::domains::blog::models::{
    Blog, BlogResponse, CreateBlogRequest, GetBlogResponse, GetBlogsRequest, UpdateBlogRequest,
};
use crate::shared::errors::ServiceError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;

/// Create blog handler. The author comes from the access token, never the
/// request body.
#[utoipa::path(
    post,
    path = "/v1/blog",
    request_body = CreateBlogRequest,
    responses(
        (status = 200, description = "Blog created successfully", body = Blog),
        (status = 400, description = "Invalid parameter"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Blogs",
    security(("BearerAuth" = []))
)]
pub async fn create_blog(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreateBlogRequest>,
) -> Result<Json<Blog>, (StatusCode, Json<serde_json::Value>)> {
    let blog = app_state
        .blog_state
        .blog_service
        .create_blog(&authenticated_user.user_id, request)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(blog))
}

/// Blog listing handler.
#[utoipa::path(
    get,
    path = "/v1/blog",
    params(
        ("from" = Option<i32>, Query, description = "Offset, default 0"),
        ("size" = Option<i32>, Query, description = "Page size, 0 to 10, default 10"),
        ("category" = Option<String>, Query, description = "Category filter, 'all' for no filter"),
        ("sort" = Option<String>, Query, description = "Accepted but ignored")
    ),
    responses(
        (status = 200, description = "Blogs retrieved successfully", body = [BlogResponse]),
        (status = 400, description = "Invalid parameter"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Blogs"
)]
pub async fn get_blogs(
    State(app_state): State<AppState>,
    Query(request): Query<GetBlogsRequest>,
) -> Result<Json<Vec<BlogResponse>>, (StatusCode, Json<serde_json::Value>)> {
    let blogs = app_state
        .blog_state
        .blog_service
        .get_blogs(request)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(blogs))
}

/// Single blog handler: the blog, its author, and its comment tree.
#[utoipa::path(
    get,
    path = "/v1/blog/{id}",
    params(
        ("id" = String, Path, description = "Blog ID")
    ),
    responses(
        (status = 200, description = "Blog retrieved successfully", body = GetBlogResponse),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Blogs"
)]
pub async fn get_blog(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GetBlogResponse>, (StatusCode, Json<serde_json::Value>)> {
    let response = app_state
        .blog_state
        .blog_service
        .get_blog(&id)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(response))
}

/// Update blog handler. Requires the caller's Update grant on the blog.
#[utoipa::path(
    put,
    path = "/v1/blog/{id}",
    params(
        ("id" = String, Path, description = "Blog ID")
    ),
    request_body = UpdateBlogRequest,
    responses(
        (status = 200, description = "Blog updated successfully", body = Blog),
        (status = 400, description = "Invalid parameter"),
        (status = 401, description = "Unauthorized or no permission"),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Blogs",
    security(("BearerAuth" = []))
)]
pub async fn update_blog(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateBlogRequest>,
) -> Result<Json<Blog>, (StatusCode, Json<serde_json::Value>)> {
    let blog = app_state
        .blog_state
        .blog_service
        .update_blog(&id, &authenticated_user.user_id, request)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(blog))
}
