//! File-backed tracing setup.
//!
//! The terminal belongs to the UI, so events go to `<data dir>/vidscout.log`.
//! Directives come from `VIDSCOUT_LOG` and default to `vidscout=info`.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

use crate::app_dirs;

pub const LOG_ENV: &str = "VIDSCOUT_LOG";
pub const LOG_FILE: &str = "vidscout.log";
const DEFAULT_DIRECTIVES: &str = "vidscout=info";

/// Install the global subscriber. Best effort: returns the log path when
/// logging is active and `None` when the file could not be opened or a
/// subscriber is already installed.
pub fn initialize() -> Option<PathBuf> {
    let dir = app_dirs::get_data_dir().ok()?;
    fs::create_dir_all(&dir).ok()?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);
    tracing_subscriber::registry()
        .with(filter_from(env::var(LOG_ENV).ok().as_deref()))
        .with(layer)
        .try_init()
        .ok()?;
    Some(path)
}

/// Unparseable directives fall back to the default rather than failing.
fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}
