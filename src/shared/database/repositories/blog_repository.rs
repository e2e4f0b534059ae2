use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};

use crate::domains::blog::models::{Blog, CreateBlogParams, GetBlogsParams, UpdateBlogParams};
use crate::shared::database::repositories::RepoError;

const BLOG_COLUMNS: &str = "id, user_id, title, content, category, picture, time_created, last_updated";

/// Blog repository.
///
/// Every method takes a `&mut PgConnection`, which both a pooled connection
/// and an open transaction hand out; the caller decides the transaction
/// boundary.
pub struct BlogRepository;

impl BlogRepository {
    pub async fn get(conn: &mut PgConnection, id: &str) -> Result<Blog, RepoError> {
        let row = sqlx::query(&format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1"))
            .bind(id)
            .fetch_one(conn)
            .await?;

        Ok(row_to_blog(&row))
    }

    /// Locking read; blocks concurrent writers of the row until the caller's
    /// transaction ends. Key-preserving readers are not blocked.
    pub async fn get_for_update(conn: &mut PgConnection, id: &str) -> Result<Blog, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1 FOR NO KEY UPDATE"
        ))
        .bind(id)
        .fetch_one(conn)
        .await?;

        Ok(row_to_blog(&row))
    }

    /// Offset/limit listing. The category predicate is a regex match, so an
    /// empty pattern matches every row.
    pub async fn list(
        conn: &mut PgConnection,
        params: &GetBlogsParams,
    ) -> Result<Vec<Blog>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE category ~ $3 OFFSET $1 LIMIT $2"
        ))
        .bind(params.from)
        .bind(params.size)
        .bind(&params.category)
        .fetch_all(conn)
        .await?;

        Ok(rows.iter().map(row_to_blog).collect())
    }

    pub async fn create(
        conn: &mut PgConnection,
        params: &CreateBlogParams,
    ) -> Result<Blog, RepoError> {
        let row = sqlx::query(&format!(
            "INSERT INTO blogs (id, user_id, title, content, category, picture, time_created, last_updated)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(&params.id)
        .bind(&params.user_id)
        .bind(&params.title)
        .bind(&params.content)
        .bind(&params.category)
        .bind(&params.picture)
        .bind(params.time_created)
        .bind(params.last_updated)
        .fetch_one(conn)
        .await?;

        Ok(row_to_blog(&row))
    }

    pub async fn update(
        conn: &mut PgConnection,
        params: &UpdateBlogParams,
    ) -> Result<Blog, RepoError> {
        let row = sqlx::query(&format!(
            "UPDATE blogs SET title = $2, content = $3, category = $4, last_updated = $5
             WHERE id = $1
             RETURNING {BLOG_COLUMNS}"
        ))
        .bind(&params.id)
        .bind(&params.title)
        .bind(&params.content)
        .bind(&params.category)
        .bind(params.last_updated)
        .fetch_one(conn)
        .await?;

        Ok(row_to_blog(&row))
    }
}

fn row_to_blog(row: &PgRow) -> Blog {
    Blog {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        content: row.get("content"),
        category: row.get("category"),
        picture: row.get("picture"),
        time_created: row.get("time_created"),
        last_updated: row.get("last_updated"),
    }
}
