// External API clients
pub mod google;

pub use google::*;
