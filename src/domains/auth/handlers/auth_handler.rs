use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use serde::Deserialize;
use serde_json::json;

use crate::domains::auth::models::{
    CreateUserRequest, LogoutRequest, RefreshRequest, TokenPairResponse, UserResponse,
};
use crate::shared::errors::ServiceError;
use crate::shared::middleware::auth::AuthenticatedUser;
use crate::shared::services::AppState;

#[derive(Debug, Deserialize)]
pub struct OauthCallbackQuery {
    pub code: String,
}

/// Google OAuth callback: exchange the code, upsert the user, issue a token
/// pair, and send the browser back to the frontend with the pair in the
/// query string.
#[utoipa::path(
    get,
    path = "/v1/session/oauth/google",
    params(
        ("code" = String, Query, description = "Authorization code from Google")
    ),
    responses(
        (status = 303, description = "Redirect to frontend with token pair"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn oauth_google(
    State(app_state): State<AppState>,
    Query(query): Query<OauthCallbackQuery>,
) -> Result<Redirect, (StatusCode, Json<serde_json::Value>)> {
    let auth_state = &app_state.auth_state;

    let google_token = auth_state
        .google_client
        .exchange_code(&query.code)
        .await
        .map_err(|err| {
            <(StatusCode, Json<serde_json::Value>)>::from(ServiceError::internal(err))
        })?;

    let profile = auth_state
        .google_client
        .fetch_user(&google_token.access_token)
        .await
        .map_err(|err| {
            <(StatusCode, Json<serde_json::Value>)>::from(ServiceError::internal(err))
        })?;

    let user = auth_state
        .user_service
        .create_user(CreateUserRequest {
            id: profile.id,
            name: profile.name,
            email: profile.email,
            role: "user".to_string(),
            provider: "google".to_string(),
            picture: profile.picture,
        })
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let tokens = auth_state
        .token_service
        .create_token(&user.id)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    let target = format!(
        "{}/?access_token={}&refresh_token={}",
        app_state.auth_state.frontend_origin,
        tokens.access_token,
        tokens.refresh_token
    );

    Ok(Redirect::to(&target))
}

/// Current-user handler: the profile behind the presented access token.
#[utoipa::path(
    get,
    path = "/v1/session/me",
    responses(
        (status = 200, description = "Caller's profile", body = UserResponse),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth",
    security(("BearerAuth" = []))
)]
pub async fn me(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
) -> Result<Json<UserResponse>, (StatusCode, Json<serde_json::Value>)> {
    let user = app_state
        .auth_state
        .user_service
        .get_user(&authenticated_user.user_id)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(UserResponse::from(user)))
}

/// Refresh handler: redeem a refresh token (single-use) for a new pair.
#[utoipa::path(
    post,
    path = "/v1/token/refresh",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair issued", body = TokenPairResponse),
        (status = 400, description = "Invalid, expired, or already redeemed refresh token"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    State(app_state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenPairResponse>, (StatusCode, Json<serde_json::Value>)> {
    let tokens = app_state
        .auth_state
        .token_service
        .refresh(&request.refresh_token)
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(TokenPairResponse::from(tokens)))
}

/// Logout handler: revoke the caller's access uuid and, when supplied, the
/// refresh uuid.
#[utoipa::path(
    post,
    path = "/v1/token/logout",
    request_body = LogoutRequest,
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Unauthorized (missing or invalid token)"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Auth",
    security(("BearerAuth" = []))
)]
pub async fn logout(
    State(app_state): State<AppState>,
    authenticated_user: AuthenticatedUser,
    Json(request): Json<LogoutRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    app_state
        .auth_state
        .token_service
        .logout(
            &authenticated_user.access_uuid,
            request.refresh_token.as_deref(),
        )
        .await
        .map_err(|e: ServiceError| -> (StatusCode, Json<serde_json::Value>) { e.into() })?;

    Ok(Json(json!({ "message": "Logged out successfully" })))
}
