// Blog domain models
pub mod blog;

pub use blog::*;
