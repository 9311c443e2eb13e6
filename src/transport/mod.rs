//! Network side of the search engine: the HTTP client for the search service
//! and the dispatcher that runs requests on a background runtime.

mod dispatch;
mod http;

pub use dispatch::Dispatcher;
pub use http::{DEFAULT_BASE_URL, HttpBackend, decode_payload};

use async_trait::async_trait;

use crate::search::{FetchError, FetchPayload, FetchRequest};

/// Answers one facet request.
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchPayload, FetchError>;
}
