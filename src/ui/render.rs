use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use super::App;
use super::components::results::{description_line, segment_line, title_line};
use super::components::{
    InputContext, ProgressState, SegmentsFooter, TabContext, render_input_with_tabs,
};
use crate::search::{Facet, MIN_QUERY_CHARS, ViewportGeometry};

/// Length units per terminal row reported to the viewport trigger.
pub const ROW_UNITS: u32 = 20;

impl<'a> App<'a> {
    /// Render the full frame and record where the transcript sentinel landed.
    pub fn draw(&mut self, frame: &mut Frame) {
        let [input_row, body, status_row, link_row] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        self.draw_input(frame, input_row);

        let enabled: Vec<Facet> = self.session.state().enabled.iter().collect();
        let sections = Layout::vertical(enabled.iter().map(|facet| match facet {
            Facet::Segments => Constraint::Fill(2),
            _ => Constraint::Fill(1),
        }))
        .split(body);

        self.segments_view = None;
        for (facet, area) in enabled.iter().zip(sections.iter()) {
            self.draw_section(frame, *area, *facet);
        }

        self.draw_status(frame, status_row);
        let link = Line::from(vec![
            Span::styled("Link: ", self.theme.empty),
            Span::raw(self.session.link().href().to_string()),
        ]);
        frame.render_widget(Paragraph::new(link), link_row);
    }

    fn draw_input(&self, frame: &mut Frame, area: Rect) {
        let state = self.session.state();
        let loading = state
            .enabled
            .iter()
            .any(|facet| self.session.is_loading(facet));
        let counts = Facet::ALL.map(|facet| self.settled_count(facet));
        render_input_with_tabs(
            frame,
            InputContext {
                search_input: &self.search_input,
                input_title: self.input_title.as_deref(),
                area,
                theme: &self.theme,
            },
            TabContext {
                enabled: state.enabled,
                focus: self.focus,
                counts,
            },
            ProgressState {
                busy: loading.then_some(&self.throbber_state),
            },
        );
    }

    /// Match count for a facet that has results to show.
    fn settled_count(&self, facet: Facet) -> Option<u64> {
        self.session.query()?;
        let (ready, total) = match facet {
            Facet::Titles => (
                !self.session.titles().is_loading() && !self.session.titles().is_error(),
                self.session.titles().total(),
            ),
            Facet::Descriptions => (
                !self.session.descriptions().is_loading()
                    && !self.session.descriptions().is_error(),
                self.session.descriptions().total(),
            ),
            Facet::Segments => (
                !self.session.segments().is_loading() && !self.session.segments().is_error(),
                self.session.segments().total(),
            ),
        };
        ready.then_some(total)
    }

    fn draw_section(&mut self, frame: &mut Frame, area: Rect, facet: Facet) {
        let focused = facet == self.focus;
        let title_style = if focused {
            self.theme.header
        } else {
            self.theme.prompt
        };
        let title = match self.settled_count(facet) {
            Some(count) => format!(" {} ({count}) ", facet.label()),
            None => format!(" {} ", facet.label()),
        };
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(self.theme.empty)
            .title(Line::styled(title, title_style));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if let Some(message) = self.section_message(facet) {
            self.views.get_mut(facet).height = inner.height as usize;
            let mut lines = vec![message];
            // Hidden transcript rows still page; keep the footer and sentinel.
            if facet == Facet::Segments
                && !self.session.segments().data().is_empty()
                && let Some(footer) = SegmentsFooter::for_controller(self.session.segments())
            {
                lines.push(footer.line(&self.theme));
                self.segments_view = Some(ViewportGeometry {
                    start: 0,
                    len: u32::from(inner.height) * ROW_UNITS,
                    sentinel: ROW_UNITS,
                });
            }
            frame.render_widget(Paragraph::new(lines), inner);
            return;
        }

        let footer = match facet {
            Facet::Segments => SegmentsFooter::for_controller(self.session.segments()),
            _ => None,
        };
        let rows = (inner.height as usize).saturating_sub(usize::from(footer.is_some()));
        let len = self.visible_len(facet);
        let view = {
            let view = self.views.get_mut(facet);
            view.height = rows;
            view.clamp(len);
            *view
        };

        let theme = &self.theme;
        let window = view.offset..len.min(view.offset + rows);
        let mut lines: Vec<Line<'static>> = match facet {
            Facet::Titles => self.session.visible_titles()[window.clone()]
                .iter()
                .map(|title| title_line(title, theme))
                .collect(),
            Facet::Descriptions => self.session.visible_descriptions()[window.clone()]
                .iter()
                .map(|description| description_line(description, theme))
                .collect(),
            Facet::Segments => self.session.visible_segments()[window.clone()]
                .iter()
                .map(|segment| segment_line(segment, theme))
                .collect(),
        };
        if focused && let Some(line) = lines.get_mut(view.selected - view.offset) {
            *line = line.clone().style(theme.row_highlight);
        }
        if let Some(footer) = &footer {
            lines.push(footer.line(theme));
        }
        frame.render_widget(Paragraph::new(lines), inner);

        if facet == Facet::Segments && len > 0 {
            self.segments_view = Some(ViewportGeometry {
                start: view.offset as u32 * ROW_UNITS,
                len: rows as u32 * ROW_UNITS,
                sentinel: len as u32 * ROW_UNITS,
            });
        }
    }

    /// Text shown instead of rows while a section has none to show.
    fn section_message(&self, facet: Facet) -> Option<Line<'static>> {
        self.session.query()?;
        let error = match facet {
            Facet::Segments => self.session.segments().error(),
            _ => self.session.facet_error(facet),
        };
        if let Some(error) = error {
            return Some(Line::styled(
                format!(
                    "{} search failed: {error}. Press Ctrl-R to retry",
                    facet.label()
                ),
                self.theme.error,
            ));
        }
        if self.visible_len(facet) > 0 {
            return None;
        }
        let muted = self.theme.empty;
        if self.session.is_loading(facet) {
            return Some(Line::styled("Searching...", muted));
        }
        let hidden = match facet {
            Facet::Titles => self.session.titles().data().len(),
            Facet::Descriptions => self.session.descriptions().data().len(),
            Facet::Segments => self.session.segments().data().len(),
        };
        if hidden > 0 {
            return Some(Line::styled(
                format!(
                    "All {} matches are unavailable. Press F5 to show them",
                    facet.noun()
                ),
                muted,
            ));
        }
        Some(Line::styled(format!("No {} matches", facet.noun()), muted))
    }

    fn draw_status(&self, frame: &mut Frame, area: Rect) {
        let state = self.session.state();
        let filters = format!(
            "F4 language: {}  F5 unavailable: {} ",
            state.language.as_deref().unwrap_or("any"),
            if state.include_unavailable {
                "shown"
            } else {
                "hidden"
            },
        );
        let [status_area, filters_area] = Layout::horizontal([
            Constraint::Min(1),
            Constraint::Length(filters.len() as u16),
        ])
        .areas(area);

        let announcement = self.session.announcement();
        let status = if !announcement.is_empty() {
            Line::styled(announcement.to_string(), Style::default())
        } else if self.session.query().is_none() {
            Line::styled(
                format!("Type at least {MIN_QUERY_CHARS} characters to search"),
                self.theme.empty,
            )
        } else {
            Line::default()
        };
        frame.render_widget(Paragraph::new(status), status_area);
        frame.render_widget(
            Paragraph::new(Line::styled(filters, self.theme.empty)),
            filters_area,
        );
    }
}
