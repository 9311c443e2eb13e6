use std::time::Instant;

use tracing::{debug, warn};
use vidscout_stream::Generation;

use super::RequestSlot;
use crate::search::cache::FreshnessCache;
use crate::search::facet::Facet;
use crate::search::limits::{CACHE_CAPACITY, PAGE_SIZE, SEGMENTS_FRESHNESS};
use crate::search::model::Segment;
use crate::search::pagination::{Exhaustion, PageState, Paginator};
use crate::search::request::{FetchError, FetchExecutor, FetchKey, FetchPayload, FetchRequest};

/// Fetch lifecycle of the paginated transcript segments facet.
pub struct SegmentsController {
    key: Option<FetchKey>,
    pager: Paginator,
    slot: RequestSlot,
    cache: FreshnessCache<Paginator>,
}

impl Default for SegmentsController {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentsController {
    #[must_use]
    pub fn new() -> Self {
        Self::with_cache(FreshnessCache::new(CACHE_CAPACITY, SEGMENTS_FRESHNESS))
    }

    #[must_use]
    pub fn with_cache(cache: FreshnessCache<Paginator>) -> Self {
        Self {
            key: None,
            pager: Paginator::new(),
            slot: RequestSlot::default(),
            cache,
        }
    }

    /// Point the controller at a new key, or disable it with `None`.
    ///
    /// A changed key discards the accumulated set. A fresh cache entry
    /// restores every page fetched for that key without a network call.
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
            self.pager.reset();
            return true;
        };

        if let Some(cached) = self.cache.get_fresh(&key, now) {
            debug!(
                query = %key.query,
                items = cached.len(),
                "restoring cached transcript pages"
            );
            self.pager = cached.clone();
            return true;
        }

        self.start(key, executor);
        true
    }

    /// Fetch the current key again from the first page, ignoring the cache.
    pub fn refetch(&mut self, executor: &mut dyn FetchExecutor) -> bool {
        let Some(key) = self.key.clone() else {
            return false;
        };
        self.start(key, executor);
        true
    }

    fn start(&mut self, key: FetchKey, executor: &mut dyn FetchExecutor) {
        let offset = self.pager.start();
        self.slot.issue(
            executor,
            FetchRequest {
                key,
                limit: PAGE_SIZE,
                offset,
            },
        );
    }

    /// Request the page after the most recent one.
    ///
    /// Refused while any request is outstanding, once exhausted, and while
    /// disabled, so repeated calls never produce concurrent requests.
    pub fn fetch_next_page(&mut self, executor: &mut dyn FetchExecutor) -> bool {
        if self.slot.is_busy() {
            return false;
        }
        let Some(key) = self.key.clone() else {
            return false;
        };
        let Some(offset) = self.pager.begin_next() else {
            return false;
        };
        self.slot.issue(
            executor,
            FetchRequest {
                key,
                limit: PAGE_SIZE,
                offset,
            },
        );
        true
    }

    /// Apply a completion. Stale generations are dropped. Returns whether the
    /// visible state changed.
    pub fn apply(
        &mut self,
        id: Generation,
        result: Result<FetchPayload, FetchError>,
        now: Instant,
    ) -> bool {
        let Some(offset) = self.slot.complete(Facet::Segments, id) else {
            return false;
        };
        let Some(key) = self.key.clone() else {
            return false;
        };

        match result {
            Ok(FetchPayload::Segments(page)) => {
                if page.is_malformed() {
                    warn!(
                        query = %key.query,
                        offset,
                        "segments page carried malformed pagination; stopping"
                    );
                }
                self.pager.accept(page);
                debug!(
                    query = %key.query,
                    offset,
                    accumulated = self.pager.len(),
                    state = ?self.pager.state(),
                    "transcript page received"
                );
                // The freshness window runs from the first page.
                if self.pager.pages_loaded() == 1 {
                    self.cache.insert(key, self.pager.clone(), now);
                } else if self.pager.is_settled() {
                    self.cache.update(key, self.pager.clone(), now);
                }
            }
            Ok(other) => {
                warn!(facet = %other.facet(), "segments completion carried another facet's payload");
                self.pager
                    .fail(FetchError::InvalidBody("unexpected payload for facet".into()));
            }
            Err(error) if error.is_cancelled() => self.pager.abandon(),
            Err(error) => {
                warn!(query = %key.query, offset, %error, "transcript request failed");
                self.pager.fail(error);
            }
        }
        true
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
    pub fn data(&self) -> &[Segment] {
        self.pager.items()
    }

    #[must_use]
    pub fn pages(&self) -> &Paginator {
        &self.pager
    }

    #[must_use]
    pub fn state(&self) -> &PageState {
        self.pager.state()
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        if self.pager.pages_loaded() == 0 {
            0
        } else {
            self.pager.total()
        }
    }

    /// True while the first page is loading; next-page loads do not count.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pager.is_loading_first()
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.pager.first_page_error().is_some()
    }

    #[must_use]
    pub fn error(&self) -> Option<&FetchError> {
        self.pager.first_page_error()
    }

    #[must_use]
    pub fn next_page_error(&self) -> Option<&FetchError> {
        self.pager.next_page_error()
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.pager.has_next_page()
    }

    #[must_use]
    pub fn is_fetching_next_page(&self) -> bool {
        self.pager.is_fetching_next_page()
    }

    #[must_use]
    pub fn cap_reached(&self) -> bool {
        self.pager.cap_reached()
    }

    #[must_use]
    pub fn approaching_cap(&self) -> bool {
        self.pager.approaching_cap()
    }

    /// End of results as the rendering layer sees it. Malformed pagination is
    /// reported the same way as an ordinary end.
    #[must_use]
    pub fn reached_end(&self) -> bool {
        matches!(
            self.pager.exhaustion(),
            Some(Exhaustion::EndOfResults | Exhaustion::Malformed)
        )
    }

    #[must_use]
    pub fn available_languages(&self) -> &[String] {
        self.pager.available_languages()
    }
}
