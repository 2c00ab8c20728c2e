pub mod cache;
pub mod image;
pub mod rate_limit;
pub mod search;
