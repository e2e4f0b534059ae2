// Comment domain services
pub mod comment_service;
pub mod comment_tree;
pub mod state;

pub use comment_service::*;
pub use comment_tree::*;
pub use state::*;
