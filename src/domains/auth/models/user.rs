use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user row. The id is the OAuth provider's subject id, so login is a
/// get-or-create keyed by it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub provider: String,
    pub picture: Option<String>,
    pub time_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUserParams {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub provider: String,
    pub picture: Option<String>,
    pub time_created: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub provider: String,
    pub picture: Option<String>,
}

/// Public profile fields embedded in blog responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub picture: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            picture: user.picture,
        }
    }
}
