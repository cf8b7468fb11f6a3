//! Request and response types for the FOFA API

/// Search endpoint types
pub mod search;

pub use search::{AssetFilter, SearchParams, SearchResponse};
