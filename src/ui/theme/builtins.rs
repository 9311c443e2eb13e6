use ratatui::style::{Color, Modifier, Style};

use super::Theme;

const fn rgb(r: u8, g: u8, b: u8) -> Style {
    Style::new().fg(Color::Rgb(r, g, b))
}

/// Dark default: cool greys with an amber cursor.
pub const SLATE: Theme = Theme {
    header: rgb(203, 213, 225).bg(Color::Rgb(30, 36, 50)),
    row_highlight: rgb(251, 191, 36).bg(Color::Rgb(45, 55, 72)),
    prompt: rgb(125, 211, 252),
    empty: rgb(100, 116, 139),
    highlight: rgb(253, 224, 71).add_modifier(Modifier::BOLD),
    error: rgb(239, 68, 68),
};

/// Light terminals.
pub const PAPER: Theme = Theme {
    header: rgb(41, 37, 36).bg(Color::Rgb(245, 240, 230)),
    row_highlight: rgb(124, 45, 18).bg(Color::Rgb(231, 222, 204)),
    prompt: rgb(29, 78, 216),
    empty: rgb(120, 113, 108),
    highlight: rgb(180, 83, 9).add_modifier(Modifier::BOLD),
    error: rgb(185, 28, 28),
};

pub const SOLARIZED: Theme = Theme {
    header: rgb(238, 232, 213).bg(Color::Rgb(0, 43, 54)),
    row_highlight: rgb(181, 137, 0).bg(Color::Rgb(7, 54, 66)),
    prompt: rgb(38, 139, 210),
    empty: rgb(88, 110, 117),
    highlight: rgb(203, 75, 22).add_modifier(Modifier::BOLD),
    error: rgb(220, 50, 47),
};

pub(super) const DEFINITIONS: &[(&str, Theme)] = &[
    ("paper", PAPER),
    ("slate", SLATE),
    ("solarized", SOLARIZED),
];
