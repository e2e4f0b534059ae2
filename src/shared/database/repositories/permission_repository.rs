use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};

use crate::shared::database::repositories::RepoError;

/// A permission grant. Its presence is the sole authorization signal; no
/// grant means no authorization, regardless of resource ownership.
#[derive(Debug, Clone)]
pub struct Permission {
    pub id: i32,
    pub user_id: String,
    /// Blog or comment id; the resource kind is implicit from caller context.
    pub resource_id: String,
    pub action: String,
}

#[derive(Debug, Clone)]
pub struct CreatePermissionParams {
    pub user_id: String,
    pub resource_id: String,
    pub action: String,
}

/// Grant actions. Grants are additive-only in normal flow: created with the
/// resource, consulted before mutation, removed when the resource goes away.
pub const ACTION_UPDATE: &str = "Update";
pub const ACTION_DELETE: &str = "Delete";

pub struct PermissionRepository;

impl PermissionRepository {
    /// Look up a grant by its full (user, resource, action) tuple. Absence
    /// surfaces as `RepoError::NotFound`.
    pub async fn get(
        conn: &mut PgConnection,
        user_id: &str,
        resource_id: &str,
        action: &str,
    ) -> Result<Permission, RepoError> {
        let row = sqlx::query(
            "SELECT id, user_id, resource_id, action FROM permissions
             WHERE user_id = $1 AND resource_id = $2 AND action = $3",
        )
        .bind(user_id)
        .bind(resource_id)
        .bind(action)
        .fetch_one(conn)
        .await?;

        Ok(row_to_permission(&row))
    }

    /// First grant recorded for a resource, regardless of user or action.
    /// Used to find the canonical holder of a blog's Update grant.
    pub async fn get_by_resource(
        conn: &mut PgConnection,
        resource_id: &str,
    ) -> Result<Permission, RepoError> {
        let row = sqlx::query(
            "SELECT id, user_id, resource_id, action FROM permissions WHERE resource_id = $1",
        )
        .bind(resource_id)
        .fetch_one(conn)
        .await?;

        Ok(row_to_permission(&row))
    }

    pub async fn create(
        conn: &mut PgConnection,
        params: &CreatePermissionParams,
    ) -> Result<Permission, RepoError> {
        let row = sqlx::query(
            "INSERT INTO permissions (user_id, resource_id, action)
             VALUES ($1, $2, $3)
             RETURNING id, user_id, resource_id, action",
        )
        .bind(&params.user_id)
        .bind(&params.resource_id)
        .bind(&params.action)
        .fetch_one(conn)
        .await?;

        Ok(row_to_permission(&row))
    }

    /// Remove every grant recorded for a resource.
    pub async fn delete_by_resource(
        conn: &mut PgConnection,
        resource_id: &str,
    ) -> Result<(), RepoError> {
        sqlx::query("DELETE FROM permissions WHERE resource_id = $1")
            .bind(resource_id)
            .execute(conn)
            .await?;

        Ok(())
    }
}

fn row_to_permission(row: &PgRow) -> Permission {
    Permission {
        id: row.get("id"),
        user_id: row.get("user_id"),
        resource_id: row.get("resource_id"),
        action: row.get("action"),
    }
}
