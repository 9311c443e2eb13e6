use std::time::Instant;

use tracing::{debug, warn};
use vidscout_stream::Generation;

use super::RequestSlot;
use crate::search::cache::FreshnessCache;
use crate::search::facet::Facet;
use crate::search::limits::{CACHE_CAPACITY, FACET_FRESHNESS, FACET_RESULT_LIMIT};
use crate::search::model::{DescriptionResult, FacetResponse, TitleResult};
use crate::search::request::{FetchError, FetchExecutor, FetchKey, FetchPayload, FetchRequest};

/// Row type of a single-shot facet.
pub trait FacetItem: Clone {
    const FACET: Facet;

    /// Extract this facet's response from a payload, if it belongs to it.
    fn from_payload(payload: FetchPayload) -> Option<FacetResponse<Self>>;

    fn is_available(&self) -> bool;
}

impl FacetItem for TitleResult {
    const FACET: Facet = Facet::Titles;

    fn from_payload(payload: FetchPayload) -> Option<FacetResponse<Self>> {
        match payload {
            FetchPayload::Titles(response) => Some(response),
            _ => None,
        }
    }

    fn is_available(&self) -> bool {
        self.is_available
    }
}

impl FacetItem for DescriptionResult {
    const FACET: Facet = Facet::Descriptions;

    fn from_payload(payload: FetchPayload) -> Option<FacetResponse<Self>> {
        match payload {
            FetchPayload::Descriptions(response) => Some(response),
            _ => None,
        }
    }

    fn is_available(&self) -> bool {
        self.is_available
    }
}

#[derive(Debug, Clone)]
pub enum FacetState<T> {
    /// Disabled, or enabled without a valid query.
    Idle,
    Loading,
    Ready(FacetResponse<T>),
    Failed(FetchError),
}

/// Fetch lifecycle of a facet answered by a single capped request.
pub struct FacetController<T> {
    key: Option<FetchKey>,
    state: FacetState<T>,
    slot: RequestSlot,
    cache: FreshnessCache<FacetResponse<T>>,
}

impl<T: FacetItem> Default for FacetController<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: FacetItem> FacetController<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(FreshnessCache::new(CACHE_CAPACITY, FACET_FRESHNESS))
    }

    #[must_use]
    pub fn with_cache(cache: FreshnessCache<FacetResponse<T>>) -> Self {
        Self {
            key: None,
            state: FacetState::Idle,
            slot: RequestSlot::default(),
            cache,
        }
    }

    /// Point the controller at a new key, or disable it with `None`.
    ///
    /// An unchanged key is a no-op. A changed key cancels the outstanding
    /// request and is answered from the cache while fresh. Returns whether the
    /// visible state changed.
    pub fn sync(
        &mut self,
        key: Option<FetchKey>,
        now: Instant,
        executor: &mut dyn FetchExecutor,
    ) -> bool {
        if key == self.key {
            return false;
        }
        self.slot.cancel();
        self.key = key;
        let Some(key) = self.key.clone() else {
            self.state = FacetState::Idle;
            return true;
        };

        if let Some(cached) = self.cache.get_fresh(&key, now) {
            debug!(facet = %T::FACET, query = %key.query, "serving cached results");
            self.state = FacetState::Ready(cached.clone());
            return true;
        }

        self.state = FacetState::Loading;
        self.issue(key, executor);
        true
    }

    /// Fetch the current key again, ignoring the cache. Results already on
    /// screen stay there until the new response lands.
    pub fn refetch(&mut self, executor: &mut dyn FetchExecutor) -> bool {
        let Some(key) = self.key.clone() else {
            return false;
        };
        self.issue(key, executor);
        true
    }

    fn issue(&mut self, key: FetchKey, executor: &mut dyn FetchExecutor) {
        let request = FetchRequest {
            key,
            limit: FACET_RESULT_LIMIT,
            offset: 0,
        };
        self.slot.issue(executor, request);
        if !matches!(self.state, FacetState::Ready(_)) {
            self.state = FacetState::Loading;
        }
    }

    /// Apply a completion. Stale generations are dropped. Returns whether the
    /// visible state changed.
    pub fn apply(
        &mut self,
        id: Generation,
        result: Result<FetchPayload, FetchError>,
        now: Instant,
    ) -> bool {
        if self.slot.complete(T::FACET, id).is_none() {
            return false;
        }
        let Some(key) = self.key.clone() else {
            return false;
        };

        match result.map(T::from_payload) {
            Ok(Some(response)) => {
                debug!(
                    facet = %T::FACET,
                    query = %key.query,
                    total = response.total(),
                    "search results received"
                );
                self.cache.insert(key, response.clone(), now);
                self.state = FacetState::Ready(response);
            }
            Ok(None) => {
                warn!(facet = %T::FACET, "completion carried another facet's payload");
                self.state = FacetState::Failed(FetchError::InvalidBody(
                    "unexpected payload for facet".into(),
                ));
            }
            Err(error) if error.is_cancelled() => {
                if matches!(self.state, FacetState::Loading) {
                    self.state = FacetState::Idle;
                }
            }
            Err(error) => {
                warn!(facet = %T::FACET, query = %key.query, %error, "search request failed");
                self.state = FacetState::Failed(error);
            }
        }
        true
    }

    #[must_use]
    pub fn state(&self) -> &FacetState<T> {
        &self.state
    }

    #[must_use]
    pub fn key(&self) -> Option<&FetchKey> {
        self.key.as_ref()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    #[must_use]
    pub fn data(&self) -> &[T] {
        match &self.state {
            FacetState::Ready(response) => &response.data,
            _ => &[],
        }
    }

    /// Server-reported match count.
    #[must_use]
    pub fn total(&self) -> u64 {
        match &self.state {
            FacetState::Ready(response) => response.total(),
            _ => 0,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, FacetState::Loading)
    }

    /// True while any request is outstanding, including a refresh of shown data.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.slot.is_busy()
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self.state, FacetState::Failed(_))
    }

    #[must_use]
    pub fn error(&self) -> Option<&FetchError> {
        match &self.state {
            FacetState::Failed(error) => Some(error),
            _ => None,
        }
    }
}
