// =====================================================
// Blog lifecycle integration tests (live PostgreSQL)
// =====================================================

mod common;
use common::*;

use blog_server::domains::blog::models::{CreateBlogRequest, GetBlogsRequest, UpdateBlogRequest};
use blog_server::domains::blog::services::BlogService;
use blog_server::shared::database::{ACTION_UPDATE, PermissionRepository};
use blog_server::shared::errors::ServiceError;

fn create_request(title: &str, content: &str, category: &str) -> CreateBlogRequest {
    CreateBlogRequest {
        title: title.to_string(),
        content: content.to_string(),
        category: category.to_string(),
        picture: None,
    }
}

/// Creating a blog writes the author's Update grant in the same commit.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn create_blog_writes_update_grant() {
    let db = setup_db().await;
    let author = create_test_user(&db, "author").await;
    let service = BlogService::new(db.clone());

    let blog = service
        .create_blog(&author.id, create_request("T", "C", "art"))
        .await
        .expect("create_blog failed");

    let mut conn = db.pool().acquire().await.unwrap();
    let grant = PermissionRepository::get(&mut conn, &author.id, &blog.id, ACTION_UPDATE)
        .await
        .expect("Update grant missing after create_blog");
    assert_eq!(grant.resource_id, blog.id);
}

#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn create_blog_rejects_empty_title_and_bad_category() {
    let db = setup_db().await;
    let author = create_test_user(&db, "author").await;
    let service = BlogService::new(db);

    assert!(matches!(
        service
            .create_blog(&author.id, create_request("", "C", "art"))
            .await,
        Err(ServiceError::InvalidParameter)
    ));
    assert!(matches!(
        service
            .create_blog(&author.id, create_request("T", "C", "sports"))
            .await,
        Err(ServiceError::InvalidParameter)
    ));
}

/// A user without an Update grant gets NoPermission, never NotFound, when
/// the blog exists.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn update_blog_without_grant_is_no_permission() {
    let db = setup_db().await;
    let author = create_test_user(&db, "author").await;
    let stranger = create_test_user(&db, "stranger").await;
    let service = BlogService::new(db);

    let blog = service
        .create_blog(&author.id, create_request("T", "C", "art"))
        .await
        .unwrap();

    let result = service
        .update_blog(
            &blog.id,
            &stranger.id,
            UpdateBlogRequest {
                title: "T2".to_string(),
                content: "C2".to_string(),
                category: "art".to_string(),
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::NoPermission)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn update_blog_missing_is_not_found() {
    let db = setup_db().await;
    let author = create_test_user(&db, "author").await;
    let service = BlogService::new(db);

    let result = service
        .update_blog(
            "no-such-blog",
            &author.id,
            UpdateBlogRequest {
                title: "T".to_string(),
                content: "C".to_string(),
                category: String::new(),
            },
        )
        .await;

    assert!(matches!(result, Err(ServiceError::BlogNotFound)));
}

/// The grant holder can update, and the refreshed row comes back.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn update_blog_by_grant_holder_succeeds() {
    let db = setup_db().await;
    let author = create_test_user(&db, "author").await;
    let service = BlogService::new(db);

    let blog = service
        .create_blog(&author.id, create_request("T", "C", "art"))
        .await
        .unwrap();

    let updated = service
        .update_blog(
            &blog.id,
            &author.id,
            UpdateBlogRequest {
                title: "T2".to_string(),
                content: "C2".to_string(),
                category: "design".to_string(),
            },
        )
        .await
        .expect("update_blog failed for grant holder");

    assert_eq!(updated.title, "T2");
    assert_eq!(updated.category, "design");
    assert!(updated.last_updated >= blog.last_updated);
}

/// "all" lists across categories; a concrete category filters to it.
#[tokio::test]
#[ignore = "requires PostgreSQL and Redis"]
async fn get_blogs_category_all_is_unfiltered() {
    let db = setup_db().await;
    let author = create_test_user(&db, "author").await;
    let service = BlogService::new(db);

    service
        .create_blog(&author.id, create_request("T", "C", "art"))
        .await
        .unwrap();
    service
        .create_blog(&author.id, create_request("T", "C", "food"))
        .await
        .unwrap();

    // "all" applies no category predicate; the page bound still holds.
    let all = service
        .get_blogs(GetBlogsRequest {
            from: 0,
            size: 10,
            sort: None,
            category: "all".to_string(),
        })
        .await
        .unwrap();
    assert!(!all.is_empty());
    assert!(all.len() <= 10);

    let art_only = service
        .get_blogs(GetBlogsRequest {
            from: 0,
            size: 10,
            sort: None,
            category: "art".to_string(),
        })
        .await
        .unwrap();
    assert!(art_only.iter().all(|b| b.category == "art"));
}
