use anyhow::Result;
use redis::aio::ConnectionManager;

use crate::domains::auth::services::state::AuthState;
use crate::domains::blog::services::state::BlogState;
use crate::domains::comment::services::state::CommentState;
use crate::shared::config::Config;
use crate::shared::database::Database;

/// Application state combining all domain states. Constructed once at
/// startup from the shared connections; everything inside is cheap to
/// clone per request.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub auth_state: AuthState,
    pub blog_state: BlogState,
    pub comment_state: CommentState,
}

impl AppState {
    pub fn new(db: Database, redis: ConnectionManager, config: &Config) -> Result<Self> {
        let auth_state = AuthState::new(db.clone(), redis, config)?;
        let blog_state = BlogState::new(db.clone());
        let comment_state = CommentState::new(db.clone());

        Ok(Self {
            db,
            auth_state,
            blog_state,
            comment_state,
        })
    }
}
