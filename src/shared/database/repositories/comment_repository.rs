use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};

use crate::domains::comment::models::{Comment, CreateCommentParams, UpdateCommentParams};
use crate::shared::database::repositories::RepoError;

const COMMENT_COLUMNS: &str = "id, blog_id, user_id, parent_id, content, time_created, last_updated";

/// Comment repository; same connection-capability contract as the blog
/// repository.
pub struct CommentRepository;

impl CommentRepository {
    pub async fn get(conn: &mut PgConnection, id: &str) -> Result<Comment, RepoError> {
        let row = sqlx::query(&format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"))
            .bind(id)
            .fetch_one(conn)
            .await?;

        Ok(row_to_comment(&row))
    }

    pub async fn get_for_update(conn: &mut PgConnection, id: &str) -> Result<Comment, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1 FOR NO KEY UPDATE"
        ))
        .bind(id)
        .fetch_one(conn)
        .await?;

        Ok(row_to_comment(&row))
    }

    /// All comments of one blog, in store scan order. Zero rows is a normal
    /// outcome, not an error.
    pub async fn list_for_blog(
        conn: &mut PgConnection,
        blog_id: &str,
    ) -> Result<Vec<Comment>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE blog_id = $1"
        ))
        .bind(blog_id)
        .fetch_all(conn)
        .await?;

        Ok(rows.iter().map(row_to_comment).collect())
    }

    /// Locking scan of the immediate children of `parent_id` (the parent's
    /// own self-referencing row included). Concurrent mutations of these rows
    /// serialize behind the caller's transaction.
    pub async fn list_children_for_update(
        conn: &mut PgConnection,
        parent_id: &str,
    ) -> Result<Vec<Comment>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE parent_id = $1 FOR UPDATE"
        ))
        .bind(parent_id)
        .fetch_all(conn)
        .await?;

        Ok(rows.iter().map(row_to_comment).collect())
    }

    pub async fn create(
        conn: &mut PgConnection,
        params: &CreateCommentParams,
    ) -> Result<Comment, RepoError> {
        let row = sqlx::query(&format!(
            "INSERT INTO comments (id, blog_id, user_id, parent_id, content, time_created, last_updated)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(&params.id)
        .bind(&params.blog_id)
        .bind(&params.user_id)
        .bind(&params.parent_id)
        .bind(&params.content)
        .bind(params.time_created)
        .bind(params.last_updated)
        .fetch_one(conn)
        .await?;

        Ok(row_to_comment(&row))
    }

    pub async fn update(
        conn: &mut PgConnection,
        params: &UpdateCommentParams,
    ) -> Result<Comment, RepoError> {
        let row = sqlx::query(&format!(
            "UPDATE comments SET content = $2, last_updated = $3
             WHERE id = $1
             RETURNING {COMMENT_COLUMNS}"
        ))
        .bind(&params.id)
        .bind(&params.content)
        .bind(params.last_updated)
        .fetch_one(conn)
        .await?;

        Ok(row_to_comment(&row))
    }

    pub async fn delete(conn: &mut PgConnection, id: &str) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;

        Ok(())
    }
}

fn row_to_comment(row: &PgRow) -> Comment {
    Comment {
        id: row.get("id"),
        blog_id: row.get("blog_id"),
        user_id: row.get("user_id"),
        parent_id: row.get("parent_id"),
        content: row.get("content"),
        time_created: row.get("time_created"),
        last_updated: row.get("last_updated"),
    }
}
