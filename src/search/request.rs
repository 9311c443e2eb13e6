//! Requests, payloads and errors exchanged between controllers and the
//! transport.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use vidscout_stream::{Generation, StreamEnvelope};

use super::facet::Facet;
use super::model::{DescriptionResult, FacetResponse, ResultPage, TitleResult};

/// Identity of a request for cancellation and caching purposes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchKey {
    pub facet: Facet,
    pub query: String,
    /// Language filter; only ever set for the segments facet.
    pub language: Option<String>,
}

impl FetchKey {
    #[must_use]
    pub fn new(facet: Facet, query: impl Into<String>, language: Option<String>) -> Self {
        let language = match facet {
            Facet::Segments => language.filter(|language| !language.is_empty()),
            Facet::Titles | Facet::Descriptions => None,
        };
        Self {
            facet,
            query: query.into(),
            language,
        }
    }
}

/// A single network request for one facet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub key: FetchKey,
    pub limit: u32,
    pub offset: u64,
}

/// Successful response body, tagged by facet.
#[derive(Debug, Clone)]
pub enum FetchPayload {
    Segments(ResultPage),
    Titles(FacetResponse<TitleResult>),
    Descriptions(FacetResponse<DescriptionResult>),
}

impl FetchPayload {
    #[must_use]
    pub fn facet(&self) -> Facet {
        match self {
            FetchPayload::Segments(_) => Facet::Segments,
            FetchPayload::Titles(_) => Facet::Titles,
            FetchPayload::Descriptions(_) => Facet::Descriptions,
        }
    }
}

/// Failures reported for a single facet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request was superseded. Never shown to the user.
    #[error("request cancelled")]
    Cancelled,
    #[error("network error: {0}")]
    Network(String),
    #[error("server error ({status}){}", detail_suffix(.message))]
    Server { status: u16, message: Option<String> },
    #[error("invalid response from server: {0}")]
    InvalidBody(String),
}

fn detail_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|message| format!(": {message}"))
        .unwrap_or_default()
}

impl FetchError {
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

/// Completion delivered back to the event loop for one request.
pub type FetchEnvelope = StreamEnvelope<Facet, Result<FetchPayload, FetchError>>;

/// Executes requests off the event loop and reports completions as
/// [`FetchEnvelope`]s tagged with the given generation.
pub trait FetchExecutor {
    /// Start a request. Cancelling the returned token abandons it; a cancelled
    /// request may still complete, and its envelope is then discarded.
    fn execute(&mut self, id: Generation, request: FetchRequest) -> CancellationToken;
}
