//! State owned by the terminal front end.

use std::sync::mpsc::Receiver;
use std::time::Instant;

use throbber_widgets_tui::ThrobberState;

use super::input::SearchInput;
use super::outcome::{SearchOutcome, SearchSelection};
use super::theme::Theme;
use crate::search::{Facet, FetchEnvelope, SearchSession, ViewportGeometry};

/// Selection and scroll position of one result section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ListView {
    pub selected: usize,
    pub offset: usize,
    /// Rows available to results on the last draw.
    pub height: usize,
}

impl ListView {
    /// Keep the selection inside `len` rows and visible in the window.
    pub(crate) fn clamp(&mut self, len: usize) {
        if len == 0 {
            *self = Self {
                height: self.height,
                ..Self::default()
            };
            return;
        }
        self.selected = self.selected.min(len - 1);
        self.follow_selection();
        self.offset = self.offset.min(len - 1);
    }

    pub(crate) fn follow_selection(&mut self) {
        let height = self.height.max(1);
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ListViews {
    titles: ListView,
    descriptions: ListView,
    segments: ListView,
}

impl ListViews {
    pub(crate) fn get(&self, facet: Facet) -> ListView {
        match facet {
            Facet::Titles => self.titles,
            Facet::Descriptions => self.descriptions,
            Facet::Segments => self.segments,
        }
    }

    pub(crate) fn get_mut(&mut self, facet: Facet) -> &mut ListView {
        match facet {
            Facet::Titles => &mut self.titles,
            Facet::Descriptions => &mut self.descriptions,
            Facet::Segments => &mut self.segments,
        }
    }
}

/// Everything the event loop needs between frames.
pub struct App<'a> {
    pub(crate) session: SearchSession,
    updates: Receiver<FetchEnvelope>,
    pub(crate) search_input: SearchInput<'a>,
    pub(crate) focus: Facet,
    pub(crate) views: ListViews,
    pub theme: Theme,
    pub(crate) input_title: Option<String>,
    pub(crate) throbber_state: ThrobberState,
    /// Sentinel geometry measured by the last draw.
    pub(crate) segments_view: Option<ViewportGeometry>,
}

impl<'a> App<'a> {
    /// Wrap a session whose executor reports completions on `updates`.
    pub fn new(session: SearchSession, updates: Receiver<FetchEnvelope>) -> Self {
        let search_input = SearchInput::new(session.raw_query());
        let focus = session
            .state()
            .enabled
            .iter()
            .next()
            .unwrap_or(Facet::Titles);
        Self {
            session,
            updates,
            search_input,
            focus,
            views: ListViews::default(),
            theme: Theme::default(),
            input_title: None,
            throbber_state: ThrobberState::default(),
            segments_view: None,
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    pub fn set_input_title(&mut self, title: Option<String>) {
        self.input_title = title;
    }

    #[must_use]
    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    /// Apply every completion that arrived since the last frame.
    pub(crate) fn pump_results(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for envelope in self.updates.try_iter() {
            changed |= self.session.apply(envelope, now);
        }
        if changed {
            self.clamp_views();
        }
        changed
    }

    /// Advance the debounce clock.
    pub(crate) fn tick(&mut self, now: Instant) -> bool {
        let changed = self.session.tick(now);
        if changed {
            self.clamp_views();
        }
        changed
    }

    /// Feed the sentinel position from the last draw to the session.
    pub(crate) fn report_viewport(&mut self) -> bool {
        self.session.viewport_changed(self.segments_view)
    }

    pub(crate) fn visible_len(&self, facet: Facet) -> usize {
        match facet {
            Facet::Titles => self.session.visible_titles().len(),
            Facet::Descriptions => self.session.visible_descriptions().len(),
            Facet::Segments => self.session.visible_segments().len(),
        }
    }

    pub(crate) fn clamp_views(&mut self) {
        for facet in Facet::ALL {
            let len = self.visible_len(facet);
            self.views.get_mut(facet).clamp(len);
        }
        self.ensure_focus_enabled();
    }

    pub(crate) fn ensure_focus_enabled(&mut self) {
        let enabled = self.session.state().enabled;
        if !enabled.contains(self.focus)
            && let Some(first) = enabled.iter().next()
        {
            self.focus = first;
        }
    }

    /// Result under the cursor in the focused section.
    pub(crate) fn current_selection(&self) -> Option<SearchSelection> {
        let selected = self.views.get(self.focus).selected;
        match self.focus {
            Facet::Titles => self
                .session
                .visible_titles()
                .get(selected)
                .map(|title| SearchSelection::Title((*title).clone())),
            Facet::Descriptions => self
                .session
                .visible_descriptions()
                .get(selected)
                .map(|description| SearchSelection::Description((*description).clone())),
            Facet::Segments => self
                .session
                .visible_segments()
                .get(selected)
                .map(|segment| SearchSelection::Segment((*segment).clone())),
        }
    }

    pub(crate) fn outcome(&self, accepted: bool) -> SearchOutcome {
        SearchOutcome {
            accepted,
            query: self.search_input.text().to_string(),
            link: self.session.link().href().to_string(),
            selection: if accepted {
                self.current_selection()
            } else {
                None
            },
        }
    }
}
