// Blog domain handlers
pub mod blog_handler;

pub use blog_handler::*;
