use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::trace;
use url::Url;

use super::SearchBackend;
use crate::search::{
    DescriptionResult, ErrorBody, Facet, FacetResponse, FetchError, FetchPayload, FetchRequest,
    ResultPage, SegmentsResponse, TitleResult,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

const USER_AGENT: &str = concat!("vidscout/", env!("CARGO_PKG_VERSION"));

/// Client for the search service's REST endpoints.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut base = Url::parse(base_url)
            .with_context(|| format!("invalid service base URL '{base_url}'"))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, base })
    }

    /// Full request URL for `request`, query parameters included.
    pub fn request_url(&self, request: &FetchRequest) -> Result<Url, FetchError> {
        let facet = request.key.facet;
        let mut url = self
            .base
            .join(facet.endpoint())
            .map_err(|error| FetchError::Network(error.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", &request.key.query);
            pairs.append_pair("limit", &request.limit.to_string());
            if facet == Facet::Segments {
                pairs.append_pair("offset", &request.offset.to_string());
                if let Some(language) = &request.key.language {
                    pairs.append_pair("language", language);
                }
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl SearchBackend for HttpBackend {
    async fn fetch(&self, request: &FetchRequest) -> Result<FetchPayload, FetchError> {
        let url = self.request_url(request)?;
        trace!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(network_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(network_error)?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|body| body.message());
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }
        decode_payload(request.key.facet, &body)
    }
}

fn network_error(error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Network("request timed out".into())
    } else {
        FetchError::Network(error.to_string())
    }
}

/// Decode a successful response body for `facet`.
///
/// A segments body whose pagination block is missing or malformed still
/// decodes; the page is flagged and pagination stops there.
pub fn decode_payload(facet: Facet, body: &[u8]) -> Result<FetchPayload, FetchError> {
    let invalid = |error: serde_json::Error| FetchError::InvalidBody(error.to_string());
    Ok(match facet {
        Facet::Segments => {
            let response: SegmentsResponse = serde_json::from_slice(body).map_err(invalid)?;
            FetchPayload::Segments(ResultPage::from(response))
        }
        Facet::Titles => {
            let response: FacetResponse<TitleResult> =
                serde_json::from_slice(body).map_err(invalid)?;
            FetchPayload::Titles(response)
        }
        Facet::Descriptions => {
            let response: FacetResponse<DescriptionResult> =
                serde_json::from_slice(body).map_err(invalid)?;
            FetchPayload::Descriptions(response)
        }
    })
}
