use chrono::{DateTime, Utc};
use redis::aio::ConnectionManager;

use crate::shared::database::repositories::RepoError;

/// Token store backed by Redis.
///
/// Layout: `token_uuid -> user_id` with a TTL matching the signed token's
/// expiry, plus `user_id -> set of outstanding token uuids` for bulk
/// revocation. Single-key operations are atomic; nothing here spans keys
/// atomically.
#[derive(Clone)]
pub struct TokenRepository {
    redis: ConnectionManager,
}

impl TokenRepository {
    pub fn new(redis: ConnectionManager) -> Self {
        Self { redis }
    }

    /// Bind a token uuid to a user until `expires_at`.
    pub async fn store_token(
        &self,
        token_uuid: &str,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), RepoError> {
        let ttl = (expires_at - Utc::now()).num_seconds().max(1);
        let mut conn = self.redis.clone();

        let _: () = redis::cmd("SET")
            .arg(token_uuid)
            .arg(user_id)
            .arg("EX")
            .arg(ttl)
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    /// The user a live token uuid belongs to; `None` once expired or revoked.
    pub async fn fetch_user(&self, token_uuid: &str) -> Result<Option<String>, RepoError> {
        let mut conn = self.redis.clone();

        let user_id: Option<String> = redis::cmd("GET")
            .arg(token_uuid)
            .query_async(&mut conn)
            .await?;

        Ok(user_id)
    }

    /// Delete a token uuid, returning how many keys were removed. A zero
    /// count means the uuid was already gone (expired or redeemed).
    pub async fn delete_token(&self, token_uuid: &str) -> Result<u64, RepoError> {
        let mut conn = self.redis.clone();

        let deleted: u64 = redis::cmd("DEL")
            .arg(token_uuid)
            .query_async(&mut conn)
            .await?;

        Ok(deleted)
    }

    /// Record a token uuid in the user's outstanding-token set.
    pub async fn add_user_token(&self, user_id: &str, token_uuid: &str) -> Result<(), RepoError> {
        let mut conn = self.redis.clone();

        let _: i64 = redis::cmd("SADD")
            .arg(user_id)
            .arg(token_uuid)
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    /// Revoke every outstanding token of a user, then drop the set itself.
    pub async fn revoke_all(&self, user_id: &str) -> Result<u64, RepoError> {
        let mut conn = self.redis.clone();

        let token_uuids: Vec<String> = redis::cmd("SMEMBERS")
            .arg(user_id)
            .query_async(&mut conn)
            .await?;

        let mut revoked = 0;
        for token_uuid in &token_uuids {
            revoked += self.delete_token(token_uuid).await?;
        }

        let _: u64 = redis::cmd("DEL")
            .arg(user_id)
            .query_async(&mut conn)
            .await?;

        Ok(revoked)
    }
}
