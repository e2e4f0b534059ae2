use crate::domains::blog::services::BlogService;
use crate::shared::database::Database;

/// Blog domain state.
#[derive(Clone)]
pub struct BlogState {
    pub blog_service: BlogService,
}

impl BlogState {
    pub fn new(db: Database) -> Self {
        Self {
            blog_service: BlogService::new(db),
        }
    }
}
