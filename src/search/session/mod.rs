//! The search session: one query fanned out to every enabled facet.
//!
//! A session is owned by the event loop and mutated through `&mut self`.
//! Network work happens behind a [`FetchExecutor`]; its completions come back
//! through [`SearchSession::apply`].

use std::time::Instant;

use tracing::{debug, info};

use super::controller::{FacetController, FacetItem, SegmentsController};
use super::facet::Facet;
use super::location::{LinkSync, Location, MemoryLocation, SearchState};
use super::model::{DescriptionResult, Segment, TitleResult};
use super::query::{QueryDebouncer, ValidQuery, validate};
use super::request::{FetchEnvelope, FetchError, FetchExecutor, FetchKey};
use super::status::{Announcer, FacetSummary, synthesize};
use super::store::{Store, SubscriptionId};
use super::viewport::{ViewportGeometry, ViewportTrigger};

#[cfg(test)]
mod tests;

pub struct SearchSession<L = MemoryLocation> {
    executor: Box<dyn FetchExecutor>,
    link: LinkSync<L>,
    debouncer: QueryDebouncer,
    query: Option<ValidQuery>,
    state: Store<SearchState>,
    titles: FacetController<TitleResult>,
    descriptions: FacetController<DescriptionResult>,
    segments: SegmentsController,
    trigger: ViewportTrigger,
    announcer: Announcer,
}

impl<L: Location> SearchSession<L> {
    /// Restore the filters encoded in `location` and start searching
    /// immediately if they carry a valid query.
    pub fn new(executor: Box<dyn FetchExecutor>, location: L, now: Instant) -> Self {
        let link = LinkSync::new(location);
        let initial = link.initial_state();
        let mut session = Self {
            executor,
            debouncer: QueryDebouncer::new(&initial.query),
            query: validate(&initial.query).ok(),
            state: Store::new(initial),
            link,
            titles: FacetController::new(),
            descriptions: FacetController::new(),
            segments: SegmentsController::new(),
            trigger: ViewportTrigger::default(),
            announcer: Announcer::default(),
        };
        session.refresh(now);
        session
    }

    /// Record an edit of the query input. Returns `false` when the text was
    /// refused for being too long.
    pub fn input(&mut self, text: &str, now: Instant) -> bool {
        self.debouncer.input(text, now)
    }

    /// Advance the clock. Settles the pending edit once the input is idle and
    /// fans the settled query out. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(settled) = self.debouncer.poll(now) else {
            return false;
        };
        let settled = settled.to_string();
        self.query = match validate(&settled) {
            Ok(query) => Some(query),
            Err(reason) => {
                if !settled.is_empty() {
                    debug!(%reason, "settled query not searchable");
                }
                None
            }
        };
        self.update_state(|state| state.query = settled);
        self.refresh(now);
        true
    }

    /// Flip a facet on or off. Disabling the last enabled facet is refused.
    pub fn toggle_facet(&mut self, facet: Facet, now: Instant) -> bool {
        let mut enabled = self.state.get().enabled;
        if !enabled.toggle(facet) {
            debug!(%facet, "refusing to disable the last enabled facet");
            return false;
        }
        self.update_state(|state| state.enabled = enabled);
        self.refresh(now);
        true
    }

    /// Restrict transcript matches to one language, or lift the restriction.
    pub fn set_language(&mut self, language: Option<String>, now: Instant) -> bool {
        let language = language.filter(|language| !language.trim().is_empty());
        if self.state.get().language == language {
            return false;
        }
        self.update_state(|state| state.language = language);
        self.refresh(now);
        true
    }

    /// Step through "any language" followed by each language the service
    /// offered for the current query.
    pub fn cycle_language(&mut self, now: Instant) -> bool {
        let languages = self.segments.available_languages();
        let next = match &self.state.get().language {
            None => languages.first().cloned(),
            Some(current) => match languages.iter().position(|language| language == current) {
                Some(index) => languages.get(index + 1).cloned(),
                None => None,
            },
        };
        self.set_language(next, now)
    }

    pub fn set_include_unavailable(&mut self, include: bool) -> bool {
        if self.state.get().include_unavailable == include {
            return false;
        }
        self.update_state(|state| state.include_unavailable = include);
        true
    }

    /// Route a completion to the facet that issued it.
    pub fn apply(&mut self, envelope: FetchEnvelope, now: Instant) -> bool {
        let changed = match envelope.kind {
            Facet::Titles => self.titles.apply(envelope.id, envelope.payload, now),
            Facet::Descriptions => self.descriptions.apply(envelope.id, envelope.payload, now),
            Facet::Segments => self.segments.apply(envelope.id, envelope.payload, now),
        };
        if changed {
            self.announce();
        }
        changed
    }

    /// Request the next transcript page. The viewport trigger stays torn
    /// down until the page lands.
    pub fn fetch_next_page(&mut self) -> bool {
        let issued = self.segments.fetch_next_page(self.executor.as_mut());
        if issued {
            self.trigger.disarm();
        }
        issued
    }

    /// Report where the transcript sentinel sits (`None` when it is not
    /// rendered). Requests the next page when it comes into view.
    pub fn viewport_changed(&mut self, geometry: Option<ViewportGeometry>) -> bool {
        let armed = self.segments.has_next_page();
        if self.trigger.observe(armed, geometry) {
            debug!(loaded = self.segments.data().len(), "transcript sentinel in view");
            return self.fetch_next_page();
        }
        false
    }

    /// Fetch a facet again, bypassing the cache.
    pub fn refetch(&mut self, facet: Facet) -> bool {
        let executor = self.executor.as_mut();
        let issued = match facet {
            Facet::Titles => self.titles.refetch(executor),
            Facet::Descriptions => self.descriptions.refetch(executor),
            Facet::Segments => self.segments.refetch(executor),
        };
        if issued {
            self.announce();
        }
        issued
    }

    /// Retry whatever failed for `facet`. A failed transcript continuation is
    /// retried from where it stopped rather than from the first page.
    pub fn retry(&mut self, facet: Facet) -> bool {
        if facet == Facet::Segments && self.segments.next_page_error().is_some() {
            return self.fetch_next_page();
        }
        self.refetch(facet)
    }

    fn update_state(&mut self, edit: impl FnOnce(&mut SearchState)) {
        let mut next = self.state.get().clone();
        edit(&mut next);
        if self.state.set(next) && self.link.sync(self.state.get()) {
            debug!(link = %self.state.get().to_query_string(), "shareable link updated");
        }
    }

    fn key_for(&self, facet: Facet) -> Option<FetchKey> {
        let state = self.state.get();
        if !state.enabled.contains(facet) {
            return None;
        }
        let query = self.query.as_ref()?;
        Some(FetchKey::new(facet, query.as_str(), state.language.clone()))
    }

    /// Point every controller at its current key.
    fn refresh(&mut self, now: Instant) {
        let titles = self.key_for(Facet::Titles);
        let descriptions = self.key_for(Facet::Descriptions);
        let segments = self.key_for(Facet::Segments);
        let executor = self.executor.as_mut();
        self.titles.sync(titles, now, executor);
        self.descriptions.sync(descriptions, now, executor);
        if self.segments.sync(segments, now, executor) {
            self.trigger.disarm();
        }
        self.link.sync(self.state.get());
        self.announce();
    }

    fn summary(&self, facet: Facet) -> FacetSummary {
        let (loading, errored, count) = match facet {
            Facet::Titles => (
                self.titles.is_loading(),
                self.titles.is_error(),
                self.titles.total(),
            ),
            Facet::Descriptions => (
                self.descriptions.is_loading(),
                self.descriptions.is_error(),
                self.descriptions.total(),
            ),
            Facet::Segments => (
                self.segments.is_loading(),
                self.segments.is_error(),
                self.segments.total(),
            ),
        };
        FacetSummary {
            facet,
            loading,
            errored,
            count,
        }
    }

    /// Status sentence for the current state.
    #[must_use]
    pub fn status(&self) -> String {
        let enabled: Vec<FacetSummary> = self
            .state
            .get()
            .enabled
            .iter()
            .map(|facet| self.summary(facet))
            .collect();
        synthesize(self.query.as_ref().map(ValidQuery::as_str), &enabled)
    }

    fn announce(&mut self) {
        let status = self.status();
        if let Some(status) = self.announcer.announce(status) {
            if !status.is_empty() {
                info!(%status, "search status");
            }
        }
    }

    /// Last status emitted to listeners.
    #[must_use]
    pub fn announcement(&self) -> &str {
        self.announcer.current()
    }

    pub fn subscribe_status(&mut self, listener: impl FnMut(&String) + 'static) -> SubscriptionId {
        self.announcer.subscribe(listener)
    }

    pub fn subscribe_state(
        &mut self,
        listener: impl FnMut(&SearchState) + 'static,
    ) -> SubscriptionId {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe_status(&mut self, id: SubscriptionId) -> bool {
        self.announcer.unsubscribe(id)
    }

    pub fn unsubscribe_state(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }

    #[must_use]
    pub fn state(&self) -> &SearchState {
        self.state.get()
    }

    #[must_use]
    pub fn raw_query(&self) -> &str {
        self.debouncer.raw()
    }

    #[must_use]
    pub fn settled_query(&self) -> &str {
        self.debouncer.settled()
    }

    /// The query currently sent to the service, if the settled text is valid.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_ref().map(ValidQuery::as_str)
    }

    /// When the pending edit settles, for scheduling the next tick.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    #[must_use]
    pub fn titles(&self) -> &FacetController<TitleResult> {
        &self.titles
    }

    #[must_use]
    pub fn descriptions(&self) -> &FacetController<DescriptionResult> {
        &self.descriptions
    }

    #[must_use]
    pub fn segments(&self) -> &SegmentsController {
        &self.segments
    }

    #[must_use]
    pub fn link(&self) -> &L {
        self.link.location()
    }

    /// Error to show for a facet, if its section should offer a retry.
    #[must_use]
    pub fn facet_error(&self, facet: Facet) -> Option<&FetchError> {
        match facet {
            Facet::Titles => self.titles.error(),
            Facet::Descriptions => self.descriptions.error(),
            Facet::Segments => self.segments.error().or(self.segments.next_page_error()),
        }
    }

    #[must_use]
    pub fn is_loading(&self, facet: Facet) -> bool {
        match facet {
            Facet::Titles => self.titles.is_loading(),
            Facet::Descriptions => self.descriptions.is_loading(),
            Facet::Segments => self.segments.is_loading() || self.segments.is_fetching_next_page(),
        }
    }

    /// Whether every enabled facet settled without a single match.
    #[must_use]
    pub fn is_empty_result(&self) -> bool {
        self.query.is_some()
            && self.state.get().enabled.iter().all(|facet| {
                let summary = self.summary(facet);
                !summary.loading && !summary.errored && summary.count == 0
            })
    }

    #[must_use]
    pub fn visible_titles(&self) -> Vec<&TitleResult> {
        self.visible(self.titles.data())
    }

    #[must_use]
    pub fn visible_descriptions(&self) -> Vec<&DescriptionResult> {
        self.visible(self.descriptions.data())
    }

    /// Accumulated transcript matches, hiding unavailable videos unless the
    /// filter asks for them.
    #[must_use]
    pub fn visible_segments(&self) -> Vec<&Segment> {
        let include = self.state.get().include_unavailable;
        self.segments
            .data()
            .iter()
            .filter(|segment| include || segment.is_available)
            .collect()
    }

    fn visible<'a, T: FacetItem>(&self, items: &'a [T]) -> Vec<&'a T> {
        let include = self.state.get().include_unavailable;
        items
            .iter()
            .filter(|item| include || item.is_available())
            .collect()
    }
}
