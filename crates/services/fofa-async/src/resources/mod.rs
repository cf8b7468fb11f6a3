//! API resources exposed by the client

/// Search endpoint resource
pub mod search;
