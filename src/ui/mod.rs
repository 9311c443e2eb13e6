//! Interactive terminal UI for a [`SearchSession`](crate::search::SearchSession).
//!
//! [`SearchUi`] wires a session to the terminal. The remaining submodules
//! implement the event loop, key handling, and rendering.

mod actions;
mod builder;
pub mod components;
pub mod input;
mod outcome;
pub mod render;
mod runtime;
mod state;
pub mod theme;

pub use builder::SearchUi;
pub use outcome::{SearchOutcome, SearchSelection};
pub use state::App;
pub use theme::Theme;
