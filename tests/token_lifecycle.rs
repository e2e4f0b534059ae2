// =====================================================
// Token lifecycle integration tests (live Redis)
// =====================================================

mod common;
use common::*;

use blog_server::shared::errors::ServiceError;

/// Issuing a pair leaves both uuids live in the store, and the signed
/// access token validates and resolves back to its user.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn create_token_issues_live_pair() {
    let service = setup_token_service().await;

    let pair = service.create_token("user-a").await.unwrap();

    let claims = service.validate_token(&pair.access_token).unwrap();
    assert!(claims.authorized);
    assert_eq!(claims.user_id, "user-a");
    assert_eq!(claims.access_uuid, pair.access_uuid);

    assert_eq!(
        service.fetch_user(&pair.access_uuid).await.unwrap(),
        Some("user-a".to_string())
    );
    assert_eq!(
        service.fetch_user(&pair.refresh_uuid).await.unwrap(),
        Some("user-a".to_string())
    );
}

/// A refresh token can be redeemed at most once.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn refresh_is_single_use() {
    let service = setup_token_service().await;

    let pair = service.create_token("user-b").await.unwrap();

    let rotated = service.refresh(&pair.refresh_token).await.unwrap();
    assert_ne!(rotated.access_uuid, pair.access_uuid);
    assert_ne!(rotated.refresh_uuid, pair.refresh_uuid);

    // Replay of the redeemed token fails.
    assert!(matches!(
        service.refresh(&pair.refresh_token).await,
        Err(ServiceError::InvalidParameter)
    ));
}

/// The old access token stays valid after a refresh; only the refresh uuid
/// is consumed.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn refresh_leaves_old_access_token_live() {
    let service = setup_token_service().await;

    let pair = service.create_token("user-c").await.unwrap();
    service.refresh(&pair.refresh_token).await.unwrap();

    assert_eq!(
        service.fetch_user(&pair.access_uuid).await.unwrap(),
        Some("user-c".to_string())
    );
    assert!(service.validate_token(&pair.access_token).is_ok());
}

#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn garbage_refresh_token_is_invalid_parameter() {
    let service = setup_token_service().await;

    assert!(matches!(
        service.refresh("not-a-jwt").await,
        Err(ServiceError::InvalidParameter)
    ));
}

/// Bulk revocation through the per-user set kills every outstanding pair.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn revoke_all_kills_every_outstanding_token() {
    let service = setup_token_service().await;

    let first = service.create_token("user-e").await.unwrap();
    let second = service.create_token("user-e").await.unwrap();

    let revoked = service.revoke_all("user-e").await.unwrap();
    assert!(revoked >= 4, "expected both pairs revoked, got {revoked}");

    for uuid in [
        &first.access_uuid,
        &first.refresh_uuid,
        &second.access_uuid,
        &second.refresh_uuid,
    ] {
        assert_eq!(service.fetch_user(uuid).await.unwrap(), None);
    }
}

/// Logout revokes the access uuid immediately, and the refresh uuid too
/// when the refresh token is supplied.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn logout_revokes_store_entries() {
    let service = setup_token_service().await;

    let pair = service.create_token("user-d").await.unwrap();

    service
        .logout(&pair.access_uuid, Some(&pair.refresh_token))
        .await
        .unwrap();

    // The signature still verifies, but the store entries are gone; the
    // auth extractor's membership check is what locks revoked tokens out.
    assert!(service.validate_token(&pair.access_token).is_ok());
    assert_eq!(service.fetch_user(&pair.access_uuid).await.unwrap(), None);
    assert!(matches!(
        service.refresh(&pair.refresh_token).await,
        Err(ServiceError::InvalidParameter)
    ));
}
