use chrono::Utc;

use crate::domains::auth::models::{CreateUserParams, CreateUserRequest, User};
use crate::shared::database::{Database, RepoError, UserRepository};
use crate::shared::errors::ServiceError;

/// User service: profile reads plus the get-or-create used by OAuth login.
#[derive(Clone)]
pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn get_user(&self, id: &str) -> Result<User, ServiceError> {
        let mut conn = self
            .db
            .pool()
            .acquire()
            .await
            .map_err(ServiceError::internal)?;

        UserRepository::get(&mut conn, id)
            .await
            .map_err(|err| match err {
                RepoError::NotFound => ServiceError::UserNotFound,
                other => ServiceError::internal(other),
            })
    }

    /// Idempotent login upsert: an existing user is returned as-is, a new
    /// one is created from the provider profile.
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User, ServiceError> {
        let mut conn = self
            .db
            .pool()
            .acquire()
            .await
            .map_err(ServiceError::internal)?;

        match UserRepository::get(&mut conn, &request.id).await {
            Ok(user) => Ok(user),
            Err(RepoError::NotFound) => {
                let now = Utc::now();
                let params = CreateUserParams {
                    id: request.id,
                    name: request.name,
                    email: request.email,
                    role: request.role,
                    provider: request.provider,
                    picture: request.picture,
                    time_created: now,
                    last_updated: now,
                };

                UserRepository::create(&mut conn, &params)
                    .await
                    .map_err(ServiceError::internal)
            }
            Err(other) => Err(ServiceError::internal(other)),
        }
    }
}
