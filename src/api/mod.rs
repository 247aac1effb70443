pub mod board;
pub mod cache;
pub mod client;
pub mod error;
pub mod questions;
pub mod roster;

pub use cache::{clear_cache, CacheConfig};
pub use client::{build_url, BackendClient};
pub use error::ApiError;
