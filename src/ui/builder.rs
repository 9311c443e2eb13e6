use std::sync::mpsc::Receiver;
use std::time::Instant;

use anyhow::Result;

use super::App;
use super::outcome::SearchOutcome;
use super::theme::Theme;
use crate::search::{FetchEnvelope, FetchExecutor, MemoryLocation, SearchSession};

/// Builder for an interactive search session.
pub struct SearchUi {
    executor: Box<dyn FetchExecutor>,
    updates: Receiver<FetchEnvelope>,
    location: MemoryLocation,
    theme: Option<Theme>,
    input_title: Option<String>,
}

impl SearchUi {
    /// `executor` must report its completions on `updates`.
    pub fn new(
        executor: Box<dyn FetchExecutor>,
        updates: Receiver<FetchEnvelope>,
        location: MemoryLocation,
    ) -> Self {
        Self {
            executor,
            updates,
            location,
            theme: None,
            input_title: None,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    #[must_use]
    pub fn with_input_title(mut self, title: impl Into<String>) -> Self {
        self.input_title = Some(title.into());
        self
    }

    /// Restore the link, start any search it encodes and hand the terminal
    /// to the event loop.
    pub fn run(self) -> Result<SearchOutcome> {
        let mut app = self.into_app(Instant::now());
        app.run()
    }

    pub(crate) fn into_app<'a>(self, now: Instant) -> App<'a> {
        let session = SearchSession::new(self.executor, self.location, now);
        let mut app = App::new(session, self.updates);
        if let Some(theme) = self.theme {
            app.set_theme(theme);
        }
        app.set_input_title(self.input_title);
        app
    }
}
