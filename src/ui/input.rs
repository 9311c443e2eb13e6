use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;
use tui_textarea::{CursorMove, TextArea};

use crate::search::MAX_QUERY_CHARS;

/// Single-line query field. Text beyond the query limit is never inserted.
#[derive(Debug, Clone)]
pub struct SearchInput<'a> {
    textarea: TextArea<'a>,
}

impl<'a> SearchInput<'a> {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        let initial: String = initial.chars().take(MAX_QUERY_CHARS).collect();
        let mut textarea = TextArea::new(vec![initial]);
        textarea.set_cursor_line_style(Style::default());
        textarea.move_cursor(CursorMove::End);
        Self { textarea }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        self.textarea
            .lines()
            .first()
            .map(String::as_str)
            .unwrap_or_default()
    }

    fn char_count(&self) -> usize {
        self.text().chars().count()
    }

    /// Apply an editing key. Returns whether the text changed.
    pub fn input(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Tab | KeyCode::BackTab => return false,
            KeyCode::Char('m' | 'j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return false;
            }
            KeyCode::Char(_)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    && self.char_count() >= MAX_QUERY_CHARS =>
            {
                return false;
            }
            _ => {}
        }
        let before = self.text().to_string();
        self.textarea.input(key);
        self.text() != before
    }

    /// Insert pasted text, dropping line breaks and whatever exceeds the limit.
    pub fn paste(&mut self, text: &str) -> bool {
        let room = MAX_QUERY_CHARS.saturating_sub(self.char_count());
        let cleaned: String = text
            .chars()
            .map(|ch| if ch == '\n' || ch == '\r' { ' ' } else { ch })
            .take(room)
            .collect();
        if cleaned.is_empty() {
            return false;
        }
        self.textarea.insert_str(cleaned)
    }

    pub fn render(&self, frame: &mut ratatui::Frame, area: Rect) {
        frame.render_widget(&self.textarea, area);
    }
}
