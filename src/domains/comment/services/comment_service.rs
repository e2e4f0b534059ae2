use chrono::Utc;
use uuid::Uuid;

use crate::domains::comment::models::{
    Comment, CreateCommentParams, CreateCommentRequest, UpdateCommentParams, UpdateCommentRequest,
};
use crate::shared::database::{
    ACTION_DELETE, ACTION_UPDATE, CommentRepository, CreatePermissionParams, Database,
    PermissionRepository, RepoError, begin_tx, finish_tx,
};
use crate::shared::errors::ServiceError;

/// Comment use cases. Creation writes three permission grants together with
/// the row; deletion removes the one-level reply group and the resource's
/// grants, all in one transaction.
#[derive(Clone)]
pub struct CommentService {
    db: Database,
}

impl CommentService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn get_comment(&self, id: &str) -> Result<Comment, ServiceError> {
        let mut conn = self
            .db
            .pool()
            .acquire()
            .await
            .map_err(ServiceError::internal)?;

        CommentRepository::get(&mut conn, id)
            .await
            .map_err(|err| match err {
                RepoError::NotFound => ServiceError::CommentNotFound,
                other => ServiceError::internal(other),
            })
    }

    pub async fn get_comments(&self, blog_id: &str) -> Result<Vec<Comment>, ServiceError> {
        let mut conn = self
            .db
            .pool()
            .acquire()
            .await
            .map_err(ServiceError::internal)?;

        CommentRepository::list_for_blog(&mut conn, blog_id)
            .await
            .map_err(ServiceError::internal)
    }

    /// Insert a comment plus its three grants: author Update, author Delete,
    /// and a Delete grant for whoever holds the blog's grant.
    pub async fn create_comment(
        &self,
        user_id: &str,
        request: CreateCommentRequest,
    ) -> Result<Comment, ServiceError> {
        if request.content.is_empty() {
            return Err(ServiceError::InvalidParameter);
        }

        let id = Uuid::new_v4().to_string();
        // No parent means a root comment; the self-reference is the "no
        // parent" sentinel.
        let parent_id = match request.parent_id {
            Some(parent_id) if !parent_id.is_empty() => parent_id,
            _ => id.clone(),
        };

        let now = Utc::now();
        let params = CreateCommentParams {
            id,
            blog_id: request.blog_id,
            user_id: user_id.to_string(),
            parent_id,
            content: request.content,
            time_created: now,
            last_updated: now,
        };

        let mut tx = begin_tx(&self.db).await?;

        let result = async {
            let comment = CommentRepository::create(&mut tx, &params)
                .await
                .map_err(|err| match err {
                    // A broken foreign key (unknown blog or parent) is the
                    // caller's mistake, not a server fault.
                    RepoError::Conflict(_) => ServiceError::InvalidParameter,
                    other => ServiceError::internal(other),
                })?;

            // The blog's first grant names the canonical owner. A blog row
            // without one is a data fault, not caller input.
            let blog_grant = PermissionRepository::get_by_resource(&mut tx, &comment.blog_id)
                .await
                .map_err(ServiceError::internal)?;

            let grants = [
                (user_id, ACTION_UPDATE),
                (user_id, ACTION_DELETE),
                (blog_grant.user_id.as_str(), ACTION_DELETE),
            ];
            for (grantee, action) in grants {
                PermissionRepository::create(
                    &mut tx,
                    &CreatePermissionParams {
                        user_id: grantee.to_string(),
                        resource_id: comment.id.clone(),
                        action: action.to_string(),
                    },
                )
                .await
                .map_err(ServiceError::internal)?;
            }

            Ok(comment)
        }
        .await;

        finish_tx(tx, result).await
    }

    /// Lock the row, require the caller's Update grant, then write.
    pub async fn update_comment(
        &self,
        id: &str,
        user_id: &str,
        request: UpdateCommentRequest,
    ) -> Result<Comment, ServiceError> {
        if request.content.is_empty() {
            return Err(ServiceError::InvalidParameter);
        }

        let mut tx = begin_tx(&self.db).await?;

        let result = async {
            let comment = CommentRepository::get_for_update(&mut tx, id)
                .await
                .map_err(|err| match err {
                    RepoError::NotFound => ServiceError::CommentNotFound,
                    other => ServiceError::internal(other),
                })?;

            PermissionRepository::get(&mut tx, user_id, &comment.id, ACTION_UPDATE)
                .await
                .map_err(|err| match err {
                    RepoError::NotFound => ServiceError::NoPermission,
                    other => ServiceError::internal(other),
                })?;

            CommentRepository::update(
                &mut tx,
                &UpdateCommentParams {
                    id: comment.id,
                    content: request.content,
                    last_updated: Utc::now(),
                },
            )
            .await
            .map_err(ServiceError::internal)
        }
        .await;

        finish_tx(tx, result).await
    }

    /// Delete a comment's immediate replies and its permission grants.
    ///
    /// The locking scan covers every row whose parent_id names the target,
    /// which for a root comment includes the target's own self-referencing
    /// row; that row itself is left in place. One level only, matching the
    /// one-level tree model.
    pub async fn delete_comment(&self, id: &str, user_id: &str) -> Result<(), ServiceError> {
        let mut tx = begin_tx(&self.db).await?;

        let result = async {
            let children = CommentRepository::list_children_for_update(&mut tx, id)
                .await
                .map_err(ServiceError::internal)?;

            // A missing comment has no grants, so it fails here as
            // NoPermission rather than via the (empty) scan above.
            PermissionRepository::get(&mut tx, user_id, id, ACTION_DELETE)
                .await
                .map_err(|err| match err {
                    RepoError::NotFound => ServiceError::NoPermission,
                    other => ServiceError::internal(other),
                })?;

            for child in &children {
                if child.id == id {
                    continue;
                }
                CommentRepository::delete(&mut tx, &child.id)
                    .await
                    .map_err(ServiceError::internal)?;
            }

            PermissionRepository::delete_by_resource(&mut tx, id)
                .await
                .map_err(ServiceError::internal)?;

            Ok(())
        }
        .await;

        finish_tx(tx, result).await
    }
}
