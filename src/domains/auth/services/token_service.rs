use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::domains::auth::models::{AccessClaims, RefreshClaims, TokenDetails};
use crate::domains::auth::services::JwtService;
use crate::shared::database::TokenRepository;
use crate::shared::errors::ServiceError;

/// Session-token lifecycle manager.
///
/// Issues signed access/refresh pairs whose uuids are mirrored into the
/// token store, and enforces single-use refresh rotation by deleting the
/// redeemed refresh uuid before issuing a replacement pair.
#[derive(Clone)]
pub struct TokenService {
    jwt: JwtService,
    token_repo: TokenRepository,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(
        jwt: JwtService,
        token_repo: TokenRepository,
        access_ttl_secs: i64,
        refresh_ttl_secs: i64,
    ) -> Self {
        Self {
            jwt,
            token_repo,
            access_ttl: Duration::seconds(access_ttl_secs),
            refresh_ttl: Duration::seconds(refresh_ttl_secs),
        }
    }

    /// Issue a fresh token pair for a user.
    ///
    /// Signing happens before any store write, so a signing failure leaves
    /// the store untouched. If the refresh uuid cannot be stored after the
    /// access uuid was, the access entry is deleted again: the caller never
    /// observes a half-issued pair.
    pub async fn create_token(&self, user_id: &str) -> Result<TokenDetails, ServiceError> {
        let access_uuid = Uuid::new_v4().to_string();
        let refresh_uuid = Uuid::new_v4().to_string();

        let now = Utc::now();
        let access_expires_at = now + self.access_ttl;
        let refresh_expires_at = now + self.refresh_ttl;

        let access_token = self.jwt.sign_access_token(&AccessClaims {
            authorized: true,
            user_id: user_id.to_string(),
            access_uuid: access_uuid.clone(),
            exp: access_expires_at.timestamp(),
        })?;

        let refresh_token = self.jwt.sign_refresh_token(&RefreshClaims {
            user_id: user_id.to_string(),
            refresh_uuid: refresh_uuid.clone(),
            exp: refresh_expires_at.timestamp(),
        })?;

        self.token_repo
            .store_token(&access_uuid, user_id, access_expires_at)
            .await
            .map_err(ServiceError::internal)?;

        if let Err(err) = self
            .token_repo
            .store_token(&refresh_uuid, user_id, refresh_expires_at)
            .await
        {
            // Compensate so no orphaned access entry survives.
            if let Err(cleanup_err) = self.token_repo.delete_token(&access_uuid).await {
                tracing::warn!(
                    error = %cleanup_err,
                    "failed to clean up access uuid after refresh store failure"
                );
            }
            return Err(ServiceError::internal(err));
        }

        // Bulk-revocation set membership is advisory; the TTL-bound uuid
        // keys stay authoritative.
        for uuid in [&access_uuid, &refresh_uuid] {
            if let Err(err) = self.token_repo.add_user_token(user_id, uuid).await {
                tracing::warn!(error = %err, "failed to record token uuid in user set");
            }
        }

        Ok(TokenDetails {
            access_token,
            refresh_token,
            access_uuid,
            refresh_uuid,
            access_expires: access_expires_at.timestamp(),
            refresh_expires: refresh_expires_at.timestamp(),
        })
    }

    /// Redeem a refresh token for a new pair. Single-use: the refresh uuid
    /// is deleted first, and a zero delete count (already redeemed or
    /// expired) fails the attempt.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenDetails, ServiceError> {
        let claims = self.jwt.decode_refresh_token(refresh_token)?;

        let deleted = self
            .token_repo
            .delete_token(&claims.refresh_uuid)
            .await
            .map_err(ServiceError::internal)?;
        if deleted == 0 {
            return Err(ServiceError::InvalidParameter);
        }

        // The old access token deliberately stays valid until its own TTL.
        self.create_token(&claims.user_id).await
    }

    /// Crypto-only validation of an access token. Store membership is the
    /// auth extractor's concern.
    pub fn validate_token(&self, token: &str) -> Result<AccessClaims, ServiceError> {
        self.jwt.decode_access_token(token)
    }

    /// The user a live access uuid belongs to, if any.
    pub async fn fetch_user(&self, access_uuid: &str) -> Result<Option<String>, ServiceError> {
        self.token_repo
            .fetch_user(access_uuid)
            .await
            .map_err(ServiceError::internal)
    }

    /// Revoke the caller's access uuid and, when the refresh token is
    /// supplied, its refresh uuid as well.
    pub async fn logout(
        &self,
        access_uuid: &str,
        refresh_token: Option<&str>,
    ) -> Result<(), ServiceError> {
        self.token_repo
            .delete_token(access_uuid)
            .await
            .map_err(ServiceError::internal)?;

        if let Some(refresh_token) = refresh_token {
            let claims = self.jwt.decode_refresh_token(refresh_token)?;
            self.token_repo
                .delete_token(&claims.refresh_uuid)
                .await
                .map_err(ServiceError::internal)?;
        }

        Ok(())
    }

    /// Revoke every outstanding token of a user at once, returning how many
    /// store entries were removed.
    pub async fn revoke_all(&self, user_id: &str) -> Result<u64, ServiceError> {
        self.token_repo
            .revoke_all(user_id)
            .await
            .map_err(ServiceError::internal)
    }
}
