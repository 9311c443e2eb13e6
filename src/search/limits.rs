//! Numeric limits shared by the search engine.

use std::num::NonZeroUsize;
use std::time::Duration;

/// Input inactivity required before a query is considered settled.
pub const DEBOUNCE: Duration = Duration::from_millis(300);
/// Shortest query that is sent to the service.
pub const MIN_QUERY_CHARS: usize = 2;
/// Longest query accepted by the input field.
pub const MAX_QUERY_CHARS: usize = 500;

/// Segments requested per page.
pub const PAGE_SIZE: u32 = 20;
/// Hard ceiling on accumulated transcript segments.
pub const MAX_RESULTS: usize = 1_000;
/// Width of the "approaching cap" window below [`MAX_RESULTS`].
pub const APPROACHING_CAP_WINDOW: usize = 50;
/// Accumulated length at which the "approaching cap" signal starts.
pub const APPROACHING_CAP_THRESHOLD: usize = MAX_RESULTS - APPROACHING_CAP_WINDOW;

/// Results fetched for the single-shot title and description facets.
pub const FACET_RESULT_LIMIT: u32 = 50;

/// Distance ahead of the sentinel at which the next page is requested.
pub const SCROLL_LOOKAHEAD: u32 = 400;

/// Freshness window for cached segment pages.
pub const SEGMENTS_FRESHNESS: Duration = Duration::from_secs(2 * 60);
/// Freshness window for cached title and description results.
pub const FACET_FRESHNESS: Duration = Duration::from_secs(5 * 60);
/// Cached keys kept per facet before the least recently used one is evicted.
pub const CACHE_CAPACITY: NonZeroUsize = NonZeroUsize::new(64).unwrap();
