// All repositories module
pub mod blog_repository;
pub mod comment_repository;
pub mod permission_repository;
pub mod token_repository;
pub mod user_repository;

// Re-export all repositories for convenience
pub use blog_repository::*;
pub use comment_repository::*;
pub use permission_repository::*;
pub use token_repository::*;
pub use user_repository::*;

use thiserror::Error;

/// Store-layer errors, classified at the source.
///
/// Services never compare against driver sentinels; the repository layer
/// tags absence and constraint violations before an error crosses the
/// service boundary.
#[derive(Error, Debug)]
pub enum RepoError {
    /// The requested row does not exist
    #[error("row not found")]
    NotFound,

    /// A uniqueness or foreign-key constraint rejected the statement
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Any other database fault
    #[error(transparent)]
    Database(sqlx::Error),

    /// Any key-value store fault
    #[error(transparent)]
    Redis(#[from] redis::RedisError),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound,
            sqlx::Error::Database(db_err) => {
                // SQLSTATE class 23 covers integrity constraint violations
                if db_err.code().map_or(false, |code| code.starts_with("23")) {
                    RepoError::Conflict(db_err.message().to_string())
                } else {
                    RepoError::Database(sqlx::Error::Database(db_err))
                }
            }
            other => RepoError::Database(other),
        }
    }
}
