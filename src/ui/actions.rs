use std::time::Instant;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::App;
use super::outcome::SearchOutcome;
use crate::search::Facet;

impl<'a> App<'a> {
    pub(crate) fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Option<SearchOutcome> {
        match key.code {
            KeyCode::Esc => return Some(self.outcome(false)),
            KeyCode::Enter => return Some(self.outcome(true)),
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::F(1) => self.toggle(Facet::Titles, now),
            KeyCode::F(2) => self.toggle(Facet::Descriptions, now),
            KeyCode::F(3) => self.toggle(Facet::Segments, now),
            KeyCode::F(4) => {
                if self.session.cycle_language(now) {
                    self.clamp_views();
                }
            }
            KeyCode::F(5) => {
                let include = !self.session.state().include_unavailable;
                self.session.set_include_unavailable(include);
                self.clamp_views();
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if !self.session.retry(self.focus) {
                    debug!(facet = %self.focus, "nothing to retry");
                }
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-self.page_rows()),
            KeyCode::PageDown => self.move_selection(self.page_rows()),
            _ => {
                if self.search_input.input(key) {
                    let text = self.search_input.text().to_string();
                    self.session.input(&text, now);
                }
            }
        }
        None
    }

    pub(crate) fn handle_paste(&mut self, text: &str, now: Instant) {
        if self.search_input.paste(text) {
            let text = self.search_input.text().to_string();
            self.session.input(&text, now);
        }
    }

    fn toggle(&mut self, facet: Facet, now: Instant) {
        if self.session.toggle_facet(facet, now) {
            self.clamp_views();
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let enabled: Vec<Facet> = self.session.state().enabled.iter().collect();
        let Some(current) = enabled.iter().position(|facet| *facet == self.focus) else {
            self.ensure_focus_enabled();
            return;
        };
        let next = if forward {
            (current + 1) % enabled.len()
        } else {
            (current + enabled.len() - 1) % enabled.len()
        };
        self.focus = enabled[next];
    }

    fn page_rows(&self) -> isize {
        self.views.get(self.focus).height.max(1) as isize
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.visible_len(self.focus);
        if len == 0 {
            return;
        }
        let view = self.views.get_mut(self.focus);
        view.selected = view.selected.saturating_add_signed(delta).min(len - 1);
        view.follow_selection();
    }
}
