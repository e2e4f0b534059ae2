use crate::domains::comment::services::CommentService;
use crate::shared::database::Database;

/// Comment domain state.
#[derive(Clone)]
pub struct CommentState {
    pub comment_service: CommentService,
}

impl CommentState {
    pub fn new(db: Database) -> Self {
        Self {
            comment_service: CommentService::new(db),
        }
    }
}
