use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domains::auth::models::UserResponse;
use crate::domains::comment::models::CommentNode;

/// Valid blog categories. `"all"` is accepted by the listing endpoint only
/// and means "no filter".
pub const CATEGORIES: [&str; 6] = ["art", "science", "technology", "cinema", "design", "food"];

pub fn is_valid_category(category: &str) -> bool {
    CATEGORIES.contains(&category)
}

/// A blog row. Ownership is recorded in `user_id` but is not itself
/// authoritative; mutation rights come from permission grants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Blog {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub picture: Option<String>,
    pub time_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

// Params for repositories
#[derive(Debug, Clone)]
pub struct GetBlogsParams {
    pub from: i32,
    pub size: i32,
    /// Regex-style predicate; empty matches everything.
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct CreateBlogParams {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub picture: Option<String>,
    pub time_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UpdateBlogParams {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub last_updated: DateTime<Utc>,
}

// Requests for services
#[derive(Debug, Deserialize, ToSchema)]
pub struct GetBlogsRequest {
    #[serde(default)]
    pub from: i32,
    #[serde(default = "default_page_size")]
    pub size: i32,
    /// Accepted but currently ignored by the listing query.
    #[serde(default)]
    pub sort: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
}

fn default_page_size() -> i32 {
    10
}

fn default_category() -> String {
    "all".to_string()
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBlogRequest {
    #[schema(example = "My first post")]
    pub title: String,
    pub content: String,
    #[schema(example = "art")]
    pub category: String,
    pub picture: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBlogRequest {
    pub title: String,
    pub content: String,
    /// Not empty-checked on update, unlike create.
    #[serde(default)]
    pub category: String,
}

// Responses for services
#[derive(Debug, Serialize, ToSchema)]
pub struct BlogResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: String,
    pub picture: Option<String>,
    /// Author's public profile, joined in-process.
    pub user: UserResponse,
    pub time_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl BlogResponse {
    pub fn from_parts(blog: Blog, user: UserResponse) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            category: blog.category,
            picture: blog.picture,
            user,
            time_created: blog.time_created,
            last_updated: blog.last_updated,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GetBlogResponse {
    pub blog: BlogResponse,
    /// One-level comment tree: roots carrying their immediate children.
    pub comments: Vec<CommentNode>,
}
