//! Faceted search client for video transcript corpora.
//!
//! [`search`] holds the synchronous aggregation and pagination engine,
//! [`transport`] talks to the search service, and [`ui`] drives both from a
//! terminal.

pub mod app_dirs;
pub mod logging;
pub mod search;
pub mod transport;
pub mod ui;
