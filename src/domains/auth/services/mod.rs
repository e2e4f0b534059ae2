// Auth domain services
pub mod jwt_service;
pub mod state;
pub mod token_service;
pub mod user_service;

pub use jwt_service::*;
pub use state::*;
pub use token_service::*;
pub use user_service::*;
