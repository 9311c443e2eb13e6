//! Wire types returned by the search service and the page shape built from them.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier that the service may send as a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultId {
    Number(i64),
    Text(String),
}

impl Default for ResultId {
    fn default() -> Self {
        ResultId::Text(String::new())
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultId::Number(value) => write!(f, "{value}"),
            ResultId::Text(value) => f.write_str(value),
        }
    }
}

fn available() -> bool {
    true
}

/// A transcript segment matching the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub id: ResultId,
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub video_title: Option<String>,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default)]
    pub end_time: f64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "available")]
    pub is_available: bool,
}

/// A video whose title matches the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleResult {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default = "available")]
    pub is_available: bool,
}

/// A video whose description matches the query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionResult {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub channel_name: Option<String>,
    #[serde(default = "available")]
    pub is_available: bool,
}

/// Response body of the segments endpoint. Pagination is kept as raw JSON so
/// that a malformed block never fails the whole response.
#[derive(Debug, Clone, Deserialize)]
pub struct SegmentsResponse {
    #[serde(default)]
    pub data: Vec<Segment>,
    #[serde(default)]
    pub pagination: Value,
    #[serde(default)]
    pub available_languages: Vec<String>,
}

/// Response body of the titles and descriptions endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct FacetResponse<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T> FacetResponse<T> {
    /// Server-reported total, falling back to the number of rows returned.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total_count.unwrap_or(self.data.len() as u64)
    }
}

/// Error body the service sends with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<Value>,
}

impl ErrorBody {
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Validated pagination block of a segments page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
    pub has_more: bool,
}

#[derive(Deserialize)]
struct RawPagination {
    total: Option<u64>,
    limit: Option<u64>,
    offset: Option<u64>,
    has_more: Option<bool>,
}

impl Pagination {
    /// Validate a raw pagination block against the number of items it came
    /// with. Returns `None` for anything missing, mistyped or inconsistent.
    #[must_use]
    pub fn parse(raw: &Value, item_count: usize) -> Option<Self> {
        let RawPagination {
            total,
            limit,
            offset,
            has_more,
        } = serde_json::from_value(raw.clone()).ok()?;
        let pagination = Self {
            total: total?,
            limit: limit?,
            offset: offset?,
            has_more: has_more?,
        };
        if pagination.limit == 0 {
            return None;
        }
        if !pagination.has_more
            && pagination.offset.saturating_add(item_count as u64) > pagination.total
        {
            return None;
        }
        Some(pagination)
    }

    /// Offset of the page following this one.
    #[must_use]
    pub fn next_offset(&self) -> u64 {
        self.offset.saturating_add(self.limit)
    }
}

/// One fetched page of transcript segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage {
    pub items: Vec<Segment>,
    /// `None` when the service sent missing or malformed pagination fields.
    pub pagination: Option<Pagination>,
    pub available_languages: Vec<String>,
}

impl ResultPage {
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.pagination.is_some_and(|pagination| pagination.has_more)
    }

    #[must_use]
    pub fn is_malformed(&self) -> bool {
        self.pagination.is_none()
    }
}

impl From<SegmentsResponse> for ResultPage {
    fn from(response: SegmentsResponse) -> Self {
        let pagination = Pagination::parse(&response.pagination, response.data.len());
        Self {
            items: response.data,
            pagination,
            available_languages: response.available_languages,
        }
    }
}
