// Auth domain models
pub mod token;
pub mod user;

pub use token::*;
pub use user::*;
