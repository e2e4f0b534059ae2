use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::json;

use crate::domains::comment::models::{Comment, CreateCommentRequest, UpdateCommentRequest};
use crate::shared::errors::ServiceError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;

#[derive(Debug, Deserialize)]
pub struct GetCommentsQuery {
    pub blog_id: String,
}

/// Create comment handler.
#[utoipa::path(
    post,
    path = "/v1/comment",
    request_body = CreateCommentRequest,
    responses(
        (status = 200, description = "Comment created successfully", body = Comment),
        (status = 400, description = "Invalid parameter (empty content or unknown blog/parent)"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Comments",
    security(("BearerAuth" = []))
)]
pub async fn create_comment(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<CreateCommentRequest>,
) -> Result<Json<Comment>, (StatusCode, Json<serde_json::Value>)> {
    let comment = app_state
        .comment_state
        .comment_service
        .create_comment(&authenticated_user.user_id, request)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(comment))
}

/// Comments of one blog, as flat rows.
#[utoipa::path(
    get,
    path = "/v1/comment",
    params(
        ("blog_id" = String, Query, description = "Blog ID")
    ),
    responses(
        (status = 200, description = "Comments retrieved successfully", body = [Comment]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Comments"
)]
pub async fn get_comments(
    State(app_state): State<AppState>,
    Query(query): Query<GetCommentsQuery>,
) -> Result<Json<Vec<Comment>>, (StatusCode, Json<serde_json::Value>)> {
    let comments = app_state
        .comment_state
        .comment_service
        .get_comments(&query.blog_id)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(comments))
}

/// Single comment handler.
#[utoipa::path(
    get,
    path = "/v1/comment/{id}",
    params(
        ("id" = String, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment retrieved successfully", body = Comment),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Comments"
)]
pub async fn get_comment(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Comment>, (StatusCode, Json<serde_json::Value>)> {
    let comment = app_state
        .comment_state
        .comment_service
        .get_comment(&id)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(comment))
}

/// Update comment handler. Requires the caller's Update grant.
#[utoipa::path(
    put,
    path = "/v1/comment/{id}",
    params(
        ("id" = String, Path, description = "Comment ID")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated successfully", body = Comment),
        (status = 400, description = "Invalid parameter"),
        (status = 401, description = "Unauthorized or no permission"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Comments",
    security(("BearerAuth" = []))
)]
pub async fn update_comment(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<String>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Json<Comment>, (StatusCode, Json<serde_json::Value>)> {
    let comment = app_state
        .comment_state
        .comment_service
        .update_comment(&id, &authenticated_user.user_id, request)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(comment))
}

/// Delete comment handler. Requires the caller's Delete grant; removes the
/// immediate replies and the comment's permission grants.
#[utoipa::path(
    delete,
    path = "/v1/comment/{id}",
    params(
        ("id" = String, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted successfully"),
        (status = 401, description = "Unauthorized or no permission"),
        (status = 404, description = "Comment not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Comments",
    security(("BearerAuth" = []))
)]
pub async fn delete_comment(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .comment_state
        .comment_service
        .delete_comment(&id, &authenticated_user.user_id)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(json!({ "message": "Comment deleted successfully" })))
}
