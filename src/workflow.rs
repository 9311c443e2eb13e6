use std::sync::Arc;
use std::sync::mpsc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use vidscout::search::{DEFAULT_LINK_BASE, MemoryLocation};
use vidscout::transport::{Dispatcher, HttpBackend};
use vidscout::ui::{SearchOutcome, SearchUi, theme};

use crate::settings::ResolvedConfig;

/// One interactive search session wired to the configured service.
pub(crate) struct SearchWorkflow {
    search_ui: SearchUi,
}

impl SearchWorkflow {
    pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
        if let Some(path) = vidscout::logging::initialize() {
            info!(log = %path.display(), base_url = %config.base_url, "starting vidscout");
        }
        Ok(Self {
            search_ui: build_ui(config)?,
        })
    }

    pub(crate) fn run(self) -> Result<SearchOutcome> {
        self.search_ui.run()
    }
}

fn build_ui(config: ResolvedConfig) -> Result<SearchUi> {
    let ResolvedConfig {
        base_url,
        timeout,
        link,
        theme: theme_name,
        input_title,
    } = config;

    let (tx, rx) = mpsc::channel();
    let backend = HttpBackend::new(&base_url, timeout)?;
    let dispatcher = Dispatcher::new(Arc::new(backend), tx)?;
    let location = MemoryLocation::from_link(&link, DEFAULT_LINK_BASE)
        .with_context(|| format!("invalid search link '{link}'"))?;

    let mut ui = SearchUi::new(Box::new(dispatcher), rx, location);
    if let Some(name) = theme_name {
        match theme::by_name(&name) {
            Some(theme) => ui = ui.with_theme(theme),
            None => warn!(theme = %name, "unknown theme; keeping the default"),
        }
    }
    if let Some(title) = input_title {
        ui = ui.with_input_title(title);
    }
    Ok(ui)
}
