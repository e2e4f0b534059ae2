use axum::Router;
use axum::http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use blog_server::routes::create_router;
use blog_server::shared::config::Config;
use blog_server::shared::database::{Database, connect_redis};
use blog_server::shared::services::AppState;

// Import models for OpenAPI schema
use blog_server::domains::auth::models::{LogoutRequest, RefreshRequest, TokenPairResponse, UserResponse};
use blog_server::domains::blog::models::{
    Blog, BlogResponse, CreateBlogRequest, GetBlogResponse, GetBlogsRequest, UpdateBlogRequest,
};
use blog_server::domains::comment::models::{
    Comment, CommentNode, CreateCommentRequest, UpdateCommentRequest,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        blog_server::domains::blog::handlers::blog_handler::create_blog,
        blog_server::domains::blog::handlers::blog_handler::get_blogs,
        blog_server::domains::blog::handlers::blog_handler::get_blog,
        blog_server::domains::blog::handlers::blog_handler::update_blog,
        blog_server::domains::comment::handlers::comment_handler::create_comment,
        blog_server::domains::comment::handlers::comment_handler::get_comments,
        blog_server::domains::comment::handlers::comment_handler::get_comment,
        blog_server::domains::comment::handlers::comment_handler::update_comment,
        blog_server::domains::comment::handlers::comment_handler::delete_comment,
        blog_server::domains::auth::handlers::auth_handler::oauth_google,
        blog_server::domains::auth::handlers::auth_handler::me,
        blog_server::domains::auth::handlers::auth_handler::refresh,
        blog_server::domains::auth::handlers::auth_handler::logout
    ),
    components(schemas(
        Blog,
        BlogResponse,
        GetBlogResponse,
        GetBlogsRequest,
        CreateBlogRequest,
        UpdateBlogRequest,
        Comment,
        CommentNode,
        CreateCommentRequest,
        UpdateCommentRequest,
        RefreshRequest,
        LogoutRequest,
        TokenPairResponse,
        UserResponse
    )),
    modifiers(
        &SecurityAddon
    ),
    tags(
        (name = "Blogs", description = "Blog API endpoints"),
        (name = "Comments", description = "Comment API endpoints"),
        (name = "Auth", description = "Session and token API endpoints")
    ),
    info(
        title = "Blog API Server",
        description = "Blogging platform backend with permission-gated content and token sessions",
        version = "1.0.0"
    )
)]
struct ApiDoc;

// Security scheme so Swagger UI offers an "Authorize" button.
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                utoipa::openapi::security::SecurityScheme::Http(
                    utoipa::openapi::security::HttpBuilder::new()
                        .scheme(utoipa::openapi::security::HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();

    let db = Database::new(&config.database_url)
        .await
        .expect("Failed to connect to database");

    db.initialize()
        .await
        .expect("Failed to run database migrations");

    let redis = connect_redis(&config.redis_url)
        .await
        .expect("Failed to connect to redis");

    let app_state = AppState::new(db, redis, &config).expect("Failed to initialize AppState");

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .frontend_origin
                .parse::<HeaderValue>()
                .expect("Invalid FRONTEND_ORIGIN"),
        )
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::AUTHORIZATION,
            axum::http::header::ACCEPT,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .merge(create_router())
        .merge(SwaggerUi::new("/api").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .with_state(app_state);

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind listen address");

    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
