//! Widgets composed by the frame renderer.

pub mod results;
pub mod tabs;

pub use results::{SegmentsFooter, format_timestamp};
pub use tabs::{InputContext, ProgressState, TabContext, render_input_with_tabs};
