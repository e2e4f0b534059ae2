// Database module
pub mod connection;
pub mod redis;
pub mod repositories;
pub mod transaction;

pub use connection::*;
pub use repositories::*;
pub use self::redis::*;
pub use transaction::*;
