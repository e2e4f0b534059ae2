// Blog domain services
pub mod blog_service;
pub mod state;

pub use blog_service::*;
pub use state::*;
