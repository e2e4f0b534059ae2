use sqlx::postgres::PgRow;
use sqlx::{PgConnection, Row};

use crate::domains::auth::models::{CreateUserParams, User};
use crate::shared::database::repositories::RepoError;

const USER_COLUMNS: &str = "id, name, email, role, provider, picture, time_created, last_updated";

pub struct UserRepository;

impl UserRepository {
    pub async fn get(conn: &mut PgConnection, id: &str) -> Result<User, RepoError> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_one(conn)
            .await?;

        Ok(row_to_user(&row))
    }

    pub async fn create(
        conn: &mut PgConnection,
        params: &CreateUserParams,
    ) -> Result<User, RepoError> {
        let row = sqlx::query(&format!(
            "INSERT INTO users (id, name, email, role, provider, picture, time_created, last_updated)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(&params.id)
        .bind(&params.name)
        .bind(&params.email)
        .bind(&params.role)
        .bind(&params.provider)
        .bind(&params.picture)
        .bind(params.time_created)
        .bind(params.last_updated)
        .fetch_one(conn)
        .await?;

        Ok(row_to_user(&row))
    }
}

fn row_to_user(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: row.get("role"),
        provider: row.get("provider"),
        picture: row.get("picture"),
        time_created: row.get("time_created"),
        last_updated: row.get("last_updated"),
    }
}
