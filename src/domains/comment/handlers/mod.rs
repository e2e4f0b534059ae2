// Comment domain handlers
pub mod comment_handler;

pub use comment_handler::*;
