// Domain modules
pub mod auth;
pub mod blog;
pub mod comment;
