use chrono::Utc;
use uuid::Uuid;

use crate::domains::auth::models::UserResponse;
use crate::domains::blog::models::{
    Blog, BlogResponse, CreateBlogParams, CreateBlogRequest, GetBlogResponse, GetBlogsParams,
    GetBlogsRequest, UpdateBlogParams, UpdateBlogRequest, is_valid_category,
};
use crate::domains::comment::services::build_comment_tree;
use crate::shared::database::{
    ACTION_UPDATE, BlogRepository, CommentRepository, CreatePermissionParams, Database,
    PermissionRepository, RepoError, UserRepository, begin_tx, finish_tx,
};
use crate::shared::errors::ServiceError;

const MAX_PAGE_SIZE: i32 = 10;

/// Blog use cases. Reads run on pooled connections; every mutation couples
/// its content write with its permission bookkeeping in one transaction.
#[derive(Clone)]
pub struct BlogService {
    db: Database,
}

impl BlogService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// One blog with its author profile and one-level comment tree.
    pub async fn get_blog(&self, id: &str) -> Result<GetBlogResponse, ServiceError> {
        let mut conn = self
            .db
            .pool()
            .acquire()
            .await
            .map_err(ServiceError::internal)?;

        let blog = BlogRepository::get(&mut conn, id)
            .await
            .map_err(|err| match err {
                RepoError::NotFound => ServiceError::BlogNotFound,
                other => ServiceError::internal(other),
            })?;

        // Zero comments is a normal outcome.
        let comments = CommentRepository::list_for_blog(&mut conn, id)
            .await
            .map_err(ServiceError::internal)?;

        let author = UserRepository::get(&mut conn, &blog.user_id)
            .await
            .map_err(ServiceError::internal)?;

        Ok(GetBlogResponse {
            blog: BlogResponse::from_parts(blog, UserResponse::from(author)),
            comments: build_comment_tree(comments),
        })
    }

    /// Paginated listing with author profiles joined in-process.
    pub async fn get_blogs(
        &self,
        request: GetBlogsRequest,
    ) -> Result<Vec<BlogResponse>, ServiceError> {
        validate_listing(&request)?;

        // "all" means no filter; the predicate is a regex match, so the
        // empty pattern matches every row.
        let category = if request.category == "all" {
            String::new()
        } else {
            request.category
        };

        let mut conn = self
            .db
            .pool()
            .acquire()
            .await
            .map_err(ServiceError::internal)?;

        let blogs = BlogRepository::list(
            &mut conn,
            &GetBlogsParams {
                from: request.from,
                size: request.size,
                category,
            },
        )
        .await
        .map_err(ServiceError::internal)?;

        // Author fetch per row, not a SQL join.
        let mut responses = Vec::with_capacity(blogs.len());
        for blog in blogs {
            let author = UserRepository::get(&mut conn, &blog.user_id)
                .await
                .map_err(ServiceError::internal)?;
            responses.push(BlogResponse::from_parts(blog, UserResponse::from(author)));
        }

        Ok(responses)
    }

    /// Insert a blog and its author's Update grant atomically.
    pub async fn create_blog(
        &self,
        user_id: &str,
        request: CreateBlogRequest,
    ) -> Result<Blog, ServiceError> {
        if request.title.is_empty() || request.content.is_empty() {
            return Err(ServiceError::InvalidParameter);
        }
        if !is_valid_category(&request.category) {
            return Err(ServiceError::InvalidParameter);
        }

        let now = Utc::now();
        let params = CreateBlogParams {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: request.title,
            content: request.content,
            category: request.category,
            picture: request.picture,
            time_created: now,
            last_updated: now,
        };

        let mut tx = begin_tx(&self.db).await?;

        let result = async {
            let blog = BlogRepository::create(&mut tx, &params)
                .await
                .map_err(ServiceError::internal)?;

            PermissionRepository::create(
                &mut tx,
                &CreatePermissionParams {
                    user_id: user_id.to_string(),
                    resource_id: blog.id.clone(),
                    action: ACTION_UPDATE.to_string(),
                },
            )
            .await
            .map_err(ServiceError::internal)?;

            Ok(blog)
        }
        .await;

        finish_tx(tx, result).await
    }

    /// Lock the row, require the caller's Update grant, then write.
    pub async fn update_blog(
        &self,
        id: &str,
        user_id: &str,
        request: UpdateBlogRequest,
    ) -> Result<Blog, ServiceError> {
        // Category is deliberately not empty-checked here.
        if request.title.is_empty() || request.content.is_empty() {
            return Err(ServiceError::InvalidParameter);
        }

        let mut tx = begin_tx(&self.db).await?;

        let result = async {
            let blog = BlogRepository::get_for_update(&mut tx, id)
                .await
                .map_err(|err| match err {
                    RepoError::NotFound => ServiceError::BlogNotFound,
                    other => ServiceError::internal(other),
                })?;

            // Grant presence is the authorization signal; ownership of the
            // row is not consulted.
            PermissionRepository::get(&mut tx, user_id, &blog.id, ACTION_UPDATE)
                .await
                .map_err(|err| match err {
                    RepoError::NotFound => ServiceError::NoPermission,
                    other => ServiceError::internal(other),
                })?;

            BlogRepository::update(
                &mut tx,
                &UpdateBlogParams {
                    id: blog.id,
                    title: request.title,
                    content: request.content,
                    category: request.category,
                    last_updated: Utc::now(),
                },
            )
            .await
            .map_err(ServiceError::internal)
        }
        .await;

        finish_tx(tx, result).await
    }
}

fn validate_listing(request: &GetBlogsRequest) -> Result<(), ServiceError> {
    if request.from < 0 || request.size < 0 || request.size > MAX_PAGE_SIZE {
        return Err(ServiceError::InvalidParameter);
    }
    if request.category != "all" && !is_valid_category(&request.category) {
        return Err(ServiceError::InvalidParameter);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(from: i32, size: i32, category: &str) -> GetBlogsRequest {
        GetBlogsRequest {
            from,
            size,
            sort: None,
            category: category.to_string(),
        }
    }

    #[test]
    fn listing_bounds_are_enforced() {
        assert!(matches!(
            validate_listing(&listing(-1, 10, "all")),
            Err(ServiceError::InvalidParameter)
        ));
        assert!(matches!(
            validate_listing(&listing(0, 11, "all")),
            Err(ServiceError::InvalidParameter)
        ));
        assert!(validate_listing(&listing(0, 10, "all")).is_ok());
        assert!(validate_listing(&listing(0, 0, "art")).is_ok());
    }

    #[test]
    fn unknown_category_is_rejected() {
        assert!(matches!(
            validate_listing(&listing(0, 10, "sports")),
            Err(ServiceError::InvalidParameter)
        ));
    }
}
