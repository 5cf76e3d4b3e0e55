//! Streaming HTTP retrieval for images and checksum manifests.

mod http;

pub use http::{HttpFetcher, ProgressFn, DEFAULT_REDIRECT_LIMIT};
