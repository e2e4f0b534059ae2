use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A comment row. A root comment carries its own id in `parent_id`; the
/// self-reference is the "no parent" sentinel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Comment {
    pub id: String,
    pub blog_id: String,
    pub user_id: String,
    pub parent_id: String,
    pub content: String,
    pub time_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

impl Comment {
    pub fn is_root(&self) -> bool {
        self.id == self.parent_id
    }
}

// Params for repositories
#[derive(Debug, Clone)]
pub struct CreateCommentParams {
    pub id: String,
    pub blog_id: String,
    pub user_id: String,
    pub parent_id: String,
    pub content: String,
    pub time_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct UpdateCommentParams {
    pub id: String,
    pub content: String,
    pub last_updated: DateTime<Utc>,
}

// Requests for services
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCommentRequest {
    pub blog_id: String,
    /// Absent or empty means a root comment.
    #[serde(default)]
    pub parent_id: Option<String>,
    pub content: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCommentRequest {
    pub content: String,
}

/// A root comment with its immediate children attached. The tree is one
/// level deep by design; replies to replies stay grouped by their immediate
/// parent id.
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentNode {
    pub id: String,
    pub blog_id: String,
    pub user_id: String,
    pub parent_id: String,
    pub content: String,
    pub time_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
    pub comments: Vec<Comment>,
}

impl CommentNode {
    pub fn from_root(comment: Comment) -> Self {
        Self {
            id: comment.id,
            blog_id: comment.blog_id,
            user_id: comment.user_id,
            parent_id: comment.parent_id,
            content: comment.content,
            time_created: comment.time_created,
            last_updated: comment.last_updated,
            comments: Vec::new(),
        }
    }
}
