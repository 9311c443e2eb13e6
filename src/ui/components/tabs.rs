use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};
use throbber_widgets_tui::{Throbber, ThrobberState};
use unicode_width::UnicodeWidthStr;

use crate::search::{EnabledFacets, Facet};
use crate::ui::input::SearchInput;
use crate::ui::theme::Theme;

/// Query box inputs for [`render_input_with_tabs`].
pub struct InputContext<'a> {
    pub search_input: &'a SearchInput<'a>,
    pub input_title: Option<&'a str>,
    pub area: Rect,
    pub theme: &'a Theme,
}

/// One tab per facet, right of the query box.
pub struct TabContext {
    pub enabled: EnabledFacets,
    pub focus: Facet,
    /// Settled match counts in [`Facet::ALL`] order.
    pub counts: [Option<u64>; 3],
}

/// Spinner drawn at the right edge of the query while requests are in flight.
pub struct ProgressState<'a> {
    pub busy: Option<&'a ThrobberState>,
}

const DEFAULT_PROMPT: &str = "Search";
const BUSY_LABEL: &str = "Searching";

/// Render the input row with tabs at the right.
pub fn render_input_with_tabs(
    frame: &mut ratatui::Frame,
    input: InputContext<'_>,
    tabs: TabContext,
    progress: ProgressState<'_>,
) {
    let InputContext {
        search_input,
        input_title,
        area,
        theme,
    } = input;

    let prompt = format!("{} > ", input_title.unwrap_or(DEFAULT_PROMPT));
    let labels = tab_labels(&tabs);
    let tabs_width = labels
        .iter()
        .map(|label| label.width() as u16 + 1)
        .sum::<u16>()
        .saturating_add(1);

    let [prompt_area, input_area, tabs_area] = Layout::horizontal([
        Constraint::Length(prompt.width() as u16),
        Constraint::Min(1),
        Constraint::Length(tabs_width),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(prompt).style(theme.prompt),
        prompt_area,
    );
    search_input.render(frame, input_area);
    render_progress(frame, input_area, search_input.text(), progress, theme);

    let tabs_inner = Rect {
        x: tabs_area.x.saturating_add(1),
        width: tabs_area.width.saturating_sub(1),
        ..tabs_area
    };
    let selected = Facet::ALL
        .iter()
        .position(|facet| *facet == tabs.focus)
        .unwrap_or(0);
    let titles: Vec<Line<'static>> = Facet::ALL
        .iter()
        .zip(labels)
        .map(|(facet, label)| {
            let style = if tabs.enabled.contains(*facet) {
                theme.tab_inactive_style()
            } else {
                theme.tab_disabled_style()
            };
            Line::from(label).style(style)
        })
        .collect();

    let widget = Tabs::new(titles)
        .select(selected)
        .divider("")
        .padding("", " ")
        .highlight_style(theme.tab_highlight_style());
    frame.render_widget(widget, tabs_inner);
}

fn tab_labels(tabs: &TabContext) -> Vec<String> {
    Facet::ALL
        .iter()
        .zip(tabs.counts)
        .enumerate()
        .map(|(index, (facet, count))| match count {
            Some(count) if tabs.enabled.contains(*facet) => {
                format!(" F{} {} {count} ", index + 1, facet.label())
            }
            _ => format!(" F{} {} ", index + 1, facet.label()),
        })
        .collect()
}

fn render_progress(
    frame: &mut ratatui::Frame,
    area: Rect,
    typed: &str,
    progress: ProgressState<'_>,
    theme: &Theme,
) {
    let Some(state) = progress.busy else {
        return;
    };
    if area.is_empty() {
        return;
    }

    let style = theme.empty;
    let spinner = Throbber::default().style(style).throbber_style(style);
    let line = Line::from(vec![
        spinner.to_symbol_span(state),
        Span::styled(BUSY_LABEL, style),
    ]);

    // Keep clear of the typed text and the cursor cell after it.
    let width = line.width() as u16;
    let earliest = area.x.saturating_add(typed.width() as u16 + 3);
    let x = area.right().saturating_sub(width).max(earliest);
    if x < area.right() {
        let available = area.right() - x;
        frame
            .buffer_mut()
            .set_line(x, area.y, &line, available.min(width));
    }
}
