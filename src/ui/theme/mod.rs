//! Colour themes for the terminal UI.

mod builtins;

use ratatui::style::{Color, Modifier, Style};

pub use builtins::{PAPER, SLATE, SOLARIZED};

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "slate";

/// Styles for each kind of text the UI draws.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Section headers and the focused tab.
    pub header: Style,
    pub row_highlight: Style,
    pub prompt: Style,
    /// Placeholder text, hints and unavailable results.
    pub empty: Style,
    pub highlight: Style,
    pub error: Style,
}

impl Theme {
    /// Style for results the service marked as no longer available.
    #[must_use]
    pub fn unavailable_style(&self) -> Style {
        self.empty.add_modifier(Modifier::CROSSED_OUT)
    }

    #[must_use]
    pub fn tab_inactive_style(&self) -> Style {
        Style::new()
            .fg(self.text_colour())
            .bg(self.row_highlight.bg.unwrap_or(Color::Reset))
    }

    #[must_use]
    pub fn tab_highlight_style(&self) -> Style {
        self.header
            .fg(self.text_colour())
            .add_modifier(Modifier::BOLD)
    }

    /// Tab style for a facet that is switched off.
    #[must_use]
    pub fn tab_disabled_style(&self) -> Style {
        self.empty.bg(self.row_highlight.bg.unwrap_or(Color::Reset))
    }

    fn text_colour(&self) -> Color {
        self.header.fg.unwrap_or(Color::Reset)
    }
}

impl Default for Theme {
    fn default() -> Self {
        SLATE
    }
}

/// Lookup a theme by case-insensitive name.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
    let name = name.trim();
    builtins::DEFINITIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|(_, theme)| *theme)
}

/// Names of the bundled themes, sorted.
#[must_use]
pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = builtins::DEFINITIONS.iter().map(|(name, _)| *name).collect();
    names.sort_unstable();
    names
}
