//! Page accumulation for the transcript segments facet.

use super::limits::{APPROACHING_CAP_THRESHOLD, MAX_RESULTS};
use super::model::{Pagination, ResultPage, Segment};
use super::request::FetchError;

/// Why no further pages will be requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exhaustion {
    /// The service reported no more results.
    EndOfResults,
    /// The accumulated set reached [`MAX_RESULTS`].
    CapReached,
    /// The last page carried missing or invalid pagination fields.
    Malformed,
}

/// Lifecycle of the accumulated result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Idle,
    LoadingFirst,
    Ready,
    LoadingNext,
    Exhausted(Exhaustion),
    /// The first page failed; nothing is accumulated.
    Failed(FetchError),
}

/// State machine that accumulates segment pages up to the result cap.
#[derive(Debug, Clone)]
pub struct Paginator {
    state: PageState,
    items: Vec<Segment>,
    last_page: Option<Pagination>,
    pages_loaded: usize,
    available_languages: Vec<String>,
    next_page_error: Option<FetchError>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: PageState::Idle,
            items: Vec::new(),
            last_page: None,
            pages_loaded: 0,
            available_languages: Vec::new(),
            next_page_error: None,
        }
    }

    /// Drop everything and return to `Idle`.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Drop everything and wait for the first page. Returns its offset.
    pub fn start(&mut self) -> u64 {
        self.reset();
        self.state = PageState::LoadingFirst;
        0
    }

    /// Move to `LoadingNext` and return the cursor of the next page, or `None`
    /// when the engine is not `Ready`.
    pub fn begin_next(&mut self) -> Option<u64> {
        if self.state != PageState::Ready {
            return None;
        }
        let cursor = self.last_page?.next_offset();
        self.state = PageState::LoadingNext;
        self.next_page_error = None;
        Some(cursor)
    }

    /// Append a fetched page. Pages arriving while nothing is loading are ignored.
    pub fn accept(&mut self, page: ResultPage) {
        if !self.is_loading() {
            return;
        }
        let ResultPage {
            items,
            pagination,
            available_languages,
        } = page;

        let room = MAX_RESULTS.saturating_sub(self.items.len());
        self.items.extend(items.into_iter().take(room));
        self.pages_loaded += 1;
        self.last_page = pagination;
        if !available_languages.is_empty() || self.pages_loaded == 1 {
            self.available_languages = available_languages;
        }

        self.state = if self.items.len() >= MAX_RESULTS {
            PageState::Exhausted(Exhaustion::CapReached)
        } else {
            match pagination {
                None => PageState::Exhausted(Exhaustion::Malformed),
                Some(pagination) if pagination.has_more => PageState::Ready,
                Some(_) => PageState::Exhausted(Exhaustion::EndOfResults),
            }
        };
    }

    /// Record a failed fetch. A failed next page keeps what was accumulated
    /// and returns to `Ready` so loading more can be retried.
    pub fn fail(&mut self, error: FetchError) {
        match self.state {
            PageState::LoadingFirst => self.state = PageState::Failed(error),
            PageState::LoadingNext => {
                self.state = PageState::Ready;
                self.next_page_error = Some(error);
            }
            _ => {}
        }
    }

    /// Abandon an in-flight page without recording an error.
    pub fn abandon(&mut self) {
        match self.state {
            PageState::LoadingFirst => self.state = PageState::Idle,
            PageState::LoadingNext => self.state = PageState::Ready,
            _ => {}
        }
    }

    #[must_use]
    pub fn state(&self) -> &PageState {
        &self.state
    }

    #[must_use]
    pub fn items(&self) -> &[Segment] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    #[must_use]
    pub fn available_languages(&self) -> &[String] {
        &self.available_languages
    }

    /// Server-reported total, or the accumulated length when pagination was unusable.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.last_page
            .map(|pagination| pagination.total)
            .unwrap_or(self.items.len() as u64)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::LoadingFirst | PageState::LoadingNext)
    }

    #[must_use]
    pub fn is_loading_first(&self) -> bool {
        self.state == PageState::LoadingFirst
    }

    #[must_use]
    pub fn is_fetching_next_page(&self) -> bool {
        self.state == PageState::LoadingNext
    }

    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.state == PageState::Ready
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self.state, PageState::Ready | PageState::Exhausted(_))
    }

    #[must_use]
    pub fn exhaustion(&self) -> Option<Exhaustion> {
        match self.state {
            PageState::Exhausted(reason) => Some(reason),
            _ => None,
        }
    }

    #[must_use]
    pub fn cap_reached(&self) -> bool {
        self.exhaustion() == Some(Exhaustion::CapReached)
    }

    /// True while the accumulated length is within the last window below the cap.
    #[must_use]
    pub fn approaching_cap(&self) -> bool {
        (APPROACHING_CAP_THRESHOLD..MAX_RESULTS).contains(&self.items.len())
    }

    #[must_use]
    pub fn first_page_error(&self) -> Option<&FetchError> {
        match &self.state {
            PageState::Failed(error) => Some(error),
            _ => None,
        }
    }

    #[must_use]
    pub fn next_page_error(&self) -> Option<&FetchError> {
        self.next_page_error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::model::ResultId;

    fn segment(index: usize) -> Segment {
        Segment {
            id: ResultId::Number(index as i64),
            video_id: format!("video-{}", index / 10),
            video_title: None,
            channel_name: None,
            text: format!("segment {index}"),
            start_time: index as f64,
            end_time: index as f64 + 1.0,
            language: Some("en".into()),
            is_available: true,
        }
    }

    fn page(offset: usize, count: usize, total: u64, limit: u64) -> ResultPage {
        let has_more = (offset + count) < total as usize;
        ResultPage {
            items: (offset..offset + count).map(segment).collect(),
            pagination: Some(Pagination {
                total,
                limit,
                offset: offset as u64,
                has_more,
            }),
            available_languages: vec!["en".into()],
        }
    }

    #[test]
    fn walks_through_pages_until_end_of_results() {
        let mut paginator = Paginator::new();
        assert_eq!(paginator.start(), 0);
        assert!(paginator.begin_next().is_none());
        paginator.accept(page(0, 20, 47, 20));
        assert!(paginator.has_next_page());
        assert_eq!(paginator.begin_next(), Some(20));
        paginator.accept(page(20, 20, 47, 20));
        assert_eq!(paginator.begin_next(), Some(40));
        paginator.accept(page(40, 7, 47, 20));
        assert_eq!(paginator.len(), 47);
        assert_eq!(paginator.exhaustion(), Some(Exhaustion::EndOfResults));
        assert!(!paginator.has_next_page());
        assert_eq!(paginator.pages_loaded(), 3);
    }

    #[test]
    fn begin_next_is_refused_while_loading() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.accept(page(0, 20, 100, 20));
        assert_eq!(paginator.begin_next(), Some(20));
        assert_eq!(paginator.begin_next(), None);
        assert!(paginator.is_fetching_next_page());
    }

    #[test]
    fn cursor_follows_the_most_recent_page() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.accept(page(0, 25, 200, 25));
        assert_eq!(paginator.begin_next(), Some(25));
    }

    #[test]
    fn cap_truncates_and_exhausts_even_with_more_available() {
        let mut paginator = Paginator::new();
        paginator.start();
        let mut offset = 0;
        paginator.accept(page(offset, 30, 5_000, 30));
        while let Some(cursor) = paginator.begin_next() {
            offset = cursor as usize;
            paginator.accept(page(offset, 30, 5_000, 30));
            assert!(paginator.len() <= MAX_RESULTS);
        }
        assert_eq!(paginator.len(), MAX_RESULTS);
        assert!(paginator.cap_reached());
        assert!(!paginator.approaching_cap());
        assert!(paginator.begin_next().is_none());
    }

    #[test]
    fn approaching_cap_window() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.accept(page(0, 949, 5_000, 949));
        assert!(!paginator.approaching_cap());
        paginator.begin_next();
        paginator.accept(page(949, 1, 5_000, 1));
        assert!(paginator.approaching_cap());
        assert!(paginator.has_next_page());
    }

    #[test]
    fn malformed_pagination_stops_but_keeps_items() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.accept(page(0, 20, 60, 20));
        paginator.begin_next();
        let mut broken = page(20, 20, 60, 20);
        broken.pagination = None;
        paginator.accept(broken);
        assert_eq!(paginator.len(), 40);
        assert_eq!(paginator.exhaustion(), Some(Exhaustion::Malformed));
        assert!(!paginator.cap_reached());
        assert_eq!(paginator.total(), 40);
    }

    #[test]
    fn failed_next_page_returns_to_ready() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.accept(page(0, 20, 60, 20));
        paginator.begin_next();
        paginator.fail(FetchError::Network("reset".into()));
        assert!(paginator.has_next_page());
        assert_eq!(paginator.len(), 20);
        assert!(paginator.next_page_error().is_some());
        assert_eq!(paginator.begin_next(), Some(20));
        assert!(paginator.next_page_error().is_none());
    }

    #[test]
    fn failed_first_page_is_reported() {
        let mut paginator = Paginator::new();
        paginator.start();
        paginator.fail(FetchError::Network("refused".into()));
        assert!(paginator.first_page_error().is_some());
        assert!(paginator.is_empty());
        assert!(!paginator.has_next_page());
    }

    #[test]
    fn pages_outside_loading_states_are_ignored() {
        let mut paginator = Paginator::new();
        paginator.accept(page(0, 20, 40, 20));
        assert!(paginator.is_empty());
        assert_eq!(paginator.state(), &PageState::Idle);
    }
}
