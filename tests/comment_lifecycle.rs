// =====================================================
// Comment lifecycle integration tests (live PostgreSQL)
// =====================================================

mod common;
use common::*;

use blog_server::domains::blog::models::CreateBlogRequest;
use blog_server::domains::blog::services::BlogService;
use blog_server::domains::comment::models::{CreateCommentRequest, UpdateCommentRequest};
use blog_server::domains::comment::services::CommentService;
use blog_server::shared::database::{
    ACTION_DELETE, ACTION_UPDATE, Database, PermissionRepository, RepoError,
};
use blog_server::shared::errors::ServiceError;

async fn create_blog(db: &Database, author_id: &str) -> String {
    BlogService::new(db.clone())
        .create_blog(
            author_id,
            CreateBlogRequest {
                title: "T".to_string(),
                content: "C".to_string(),
                category: "art".to_string(),
                picture: None,
            },
        )
        .await
        .expect("create_blog failed")
        .id
}

fn comment_request(blog_id: &str, parent_id: Option<&str>, content: &str) -> CreateCommentRequest {
    CreateCommentRequest {
        blog_id: blog_id.to_string(),
        parent_id: parent_id.map(str::to_string),
        content: content.to_string(),
    }
}

/// A comment with no parent is a root: parent_id equals its own id, and
/// creation writes three grants (author Update+Delete, blog owner Delete).
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn root_comment_gets_self_parent_and_three_grants() {
    let db = setup_db().await;
    let owner = create_test_user(&db, "owner").await;
    let commenter = create_test_user(&db, "commenter").await;
    let blog_id = create_blog(&db, &owner.id).await;
    let service = CommentService::new(db.clone());

    let comment = service
        .create_comment(&commenter.id, comment_request(&blog_id, None, "hi"))
        .await
        .expect("create_comment failed");

    assert_eq!(comment.parent_id, comment.id);

    let mut conn = db.pool().acquire().await.unwrap();
    PermissionRepository::get(&mut conn, &commenter.id, &comment.id, ACTION_UPDATE)
        .await
        .expect("author Update grant missing");
    PermissionRepository::get(&mut conn, &commenter.id, &comment.id, ACTION_DELETE)
        .await
        .expect("author Delete grant missing");
    PermissionRepository::get(&mut conn, &owner.id, &comment.id, ACTION_DELETE)
        .await
        .expect("blog owner Delete grant missing");
}

/// An unknown blog id breaks the foreign key and comes back as the caller's
/// mistake, not a server fault.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn comment_on_unknown_blog_is_invalid_parameter() {
    let db = setup_db().await;
    let commenter = create_test_user(&db, "commenter").await;
    let service = CommentService::new(db);

    let result = service
        .create_comment(&commenter.id, comment_request("no-such-blog", None, "hi"))
        .await;

    assert!(matches!(result, Err(ServiceError::InvalidParameter)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn update_comment_without_grant_is_no_permission() {
    let db = setup_db().await;
    let owner = create_test_user(&db, "owner").await;
    let commenter = create_test_user(&db, "commenter").await;
    let stranger = create_test_user(&db, "stranger").await;
    let blog_id = create_blog(&db, &owner.id).await;
    let service = CommentService::new(db);

    let comment = service
        .create_comment(&commenter.id, comment_request(&blog_id, None, "hi"))
        .await
        .unwrap();

    let result = service
        .update_comment(
            &comment.id,
            &stranger.id,
            UpdateCommentRequest {
                content: "edited".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::NoPermission)));
}

/// End-to-end scenario: blog by U1, root comment by U2, reply by U3, tree
/// shape, then deletion by the blog owner through the grant written at
/// comment creation.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn blog_owner_deletes_comment_thread_one_level() {
    let db = setup_db().await;
    let u1 = create_test_user(&db, "u1").await;
    let u2 = create_test_user(&db, "u2").await;
    let u3 = create_test_user(&db, "u3").await;
    let blog_id = create_blog(&db, &u1.id).await;
    let blog_service = BlogService::new(db.clone());
    let comment_service = CommentService::new(db.clone());

    let c1 = comment_service
        .create_comment(&u2.id, comment_request(&blog_id, None, "hi"))
        .await
        .unwrap();
    let c2 = comment_service
        .create_comment(&u3.id, comment_request(&blog_id, Some(&c1.id), "reply"))
        .await
        .unwrap();

    let response = blog_service.get_blog(&blog_id).await.unwrap();
    assert_eq!(response.comments.len(), 1);
    assert_eq!(response.comments[0].id, c1.id);
    assert_eq!(response.comments[0].comments.len(), 1);
    assert_eq!(response.comments[0].comments[0].id, c2.id);

    // U1 holds Delete on c1 via the blog-owner grant.
    comment_service
        .delete_comment(&c1.id, &u1.id)
        .await
        .expect("delete_comment failed for blog owner");

    // The reply is gone; the root row itself is not touched by the
    // parent_id-scoped deletion.
    assert!(matches!(
        comment_service.get_comment(&c2.id).await,
        Err(ServiceError::CommentNotFound)
    ));
    comment_service
        .get_comment(&c1.id)
        .await
        .expect("root comment row should survive its own deletion pass");

    // c1's permission rows are gone.
    let mut conn = db.pool().acquire().await.unwrap();
    let grant = PermissionRepository::get_by_resource(&mut conn, &c1.id).await;
    assert!(matches!(grant, Err(RepoError::NotFound)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn delete_comment_without_grant_is_no_permission() {
    let db = setup_db().await;
    let owner = create_test_user(&db, "owner").await;
    let commenter = create_test_user(&db, "commenter").await;
    let stranger = create_test_user(&db, "stranger").await;
    let blog_id = create_blog(&db, &owner.id).await;
    let service = CommentService::new(db.clone());

    let comment = service
        .create_comment(&commenter.id, comment_request(&blog_id, None, "hi"))
        .await
        .unwrap();

    let result = service.delete_comment(&comment.id, &stranger.id).await;
    assert!(matches!(result, Err(ServiceError::NoPermission)));

    // Nothing was deleted.
    service.get_comment(&comment.id).await.unwrap();
}

/// A comment id with no rows and no grants fails at the grant check.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn delete_missing_comment_is_no_permission() {
    let db = setup_db().await;
    let user = create_test_user(&db, "user").await;
    let service = CommentService::new(db);

    let result = service.delete_comment("no-such-comment", &user.id).await;
    assert!(matches!(result, Err(ServiceError::NoPermission)));
}
