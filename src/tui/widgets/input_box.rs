//! The editable input line.
//!
//! Holds the buffer and the cursor; emits high-level events back to the
//! orchestrator. Cursor positioning is a separate operation from content
//! drawing because focus can be requested without a content change.

use std::io;

use crate::tui::event::TuiEvent;
use crate::tui::geometry::Layout;
use crate::tui::palette::Style;
use crate::tui::surface::Surface;
use crate::tui::widgets::Widget;

/// High-level events emitted by the input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Enter was pressed. `None` means the line was empty.
    Committed(Option<String>),
    /// The visible content or cursor moved; a repaint is due.
    Edited,
}

pub struct InputBox {
    layout: Layout,
    content: String,
    cursor: usize,
}

impl InputBox {
    pub fn new(layout: Layout) -> Self {
        Self { layout, content: String::new(), cursor: 0 }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Inserts printable ASCII at the cursor; anything else is dropped.
    pub fn insert(&mut self, text: &str) {
        for c in text.chars().filter(|c| (' '..='~').contains(c)) {
            self.content.insert(self.cursor, c);
            self.cursor += 1;
        }
    }

    pub fn delete_backward(&mut self, n: usize) {
        let start = self.cursor.saturating_sub(n);
        self.content.drain(start..self.cursor);
        self.cursor = start;
    }

    pub fn move_cursor(&mut self, delta: i32) {
        let moved = i64::try_from(self.cursor).unwrap_or(i64::MAX) + i64::from(delta);
        self.cursor = moved.clamp(0, self.content.len() as i64) as usize;
    }

    pub fn move_to_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.content.len();
    }

    /// Takes the committed line, if any, and resets buffer and cursor.
    pub fn commit(&mut self) -> Option<String> {
        self.cursor = 0;
        let content = std::mem::take(&mut self.content);
        if content.is_empty() { None } else { Some(content) }
    }

    pub fn handle_key(&mut self, key: &TuiEvent) -> Option<InputEvent> {
        match key {
            TuiEvent::Char(c) => {
                self.insert(&c.to_string());
                Some(InputEvent::Edited)
            }
            TuiEvent::Delete => {
                if self.cursor > 0 {
                    self.delete_backward(1);
                    Some(InputEvent::Edited)
                } else {
                    None
                }
            }
            TuiEvent::Left => {
                self.move_cursor(-1);
                Some(InputEvent::Edited)
            }
            TuiEvent::Right => {
                self.move_cursor(1);
                Some(InputEvent::Edited)
            }
            TuiEvent::Home => {
                self.move_to_start();
                Some(InputEvent::Edited)
            }
            TuiEvent::End => {
                self.move_to_end();
                Some(InputEvent::Edited)
            }
            TuiEvent::Enter => Some(InputEvent::Committed(self.commit())),
            _ => None,
        }
    }

    /// Places the terminal cursor at the edit position. Separate from
    /// `draw` so focus can be restored without repainting.
    pub fn focus(&self, surface: &mut dyn Surface) -> io::Result<()> {
        let rect = self.layout.resolve(surface.dims());
        let offset = (self.cursor as u16).min(rect.w.saturating_sub(1));
        surface.move_cursor(rect.x + offset, rect.y)?;
        surface.show_cursor()
    }
}

impl Widget for InputBox {
    fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        let rect = self.layout.resolve(surface.dims());
        let mut visible: String = self.content.chars().take(rect.w as usize).collect();
        visible.push_str(&" ".repeat(rect.w as usize - visible.chars().count()));
        surface.print(rect.x, rect.y, &visible, Style::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestSurface;

    fn input_box() -> InputBox {
        InputBox::new(Layout::new((0, 0), (10, 1)))
    }

    #[test]
    fn test_insert_and_delete() {
        let mut input = input_box();

        assert_eq!(input.handle_key(&TuiEvent::Char('a')), Some(InputEvent::Edited));
        assert_eq!(input.handle_key(&TuiEvent::Char('b')), Some(InputEvent::Edited));
        assert_eq!(input.content(), "ab");

        assert_eq!(input.handle_key(&TuiEvent::Delete), Some(InputEvent::Edited));
        assert_eq!(input.content(), "a");
        assert_eq!(input.cursor(), 1);
    }

    #[test]
    fn test_delete_at_start_is_a_no_op() {
        let mut input = input_box();
        assert_eq!(input.handle_key(&TuiEvent::Delete), None);
        assert_eq!(input.content(), "");
    }

    #[test]
    fn test_insert_at_cursor_position() {
        let mut input = input_box();
        input.insert("ac");
        input.move_cursor(-1);
        input.insert("b");
        assert_eq!(input.content(), "abc");
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let mut input = input_box();
        input.insert("ab");
        input.move_cursor(-10);
        assert_eq!(input.cursor(), 0);
        input.move_cursor(10);
        assert_eq!(input.cursor(), 2);
    }

    #[test]
    fn test_home_and_end() {
        let mut input = input_box();
        input.insert("abc");
        input.handle_key(&TuiEvent::Home);
        assert_eq!(input.cursor(), 0);
        input.handle_key(&TuiEvent::End);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_unprintable_input_is_dropped() {
        let mut input = input_box();
        input.insert("a\tb\néc");
        assert_eq!(input.content(), "abc");
    }

    #[test]
    fn test_commit_round_trip() {
        let mut input = input_box();
        input.insert("abc");

        assert_eq!(
            input.handle_key(&TuiEvent::Enter),
            Some(InputEvent::Committed(Some("abc".to_string())))
        );
        assert_eq!(input.content(), "");
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_empty_commit_yields_the_sentinel() {
        let mut input = input_box();
        assert_eq!(
            input.handle_key(&TuiEvent::Enter),
            Some(InputEvent::Committed(None))
        );
    }

    #[test]
    fn test_draw_truncates_and_pads() {
        let mut input = input_box();
        input.insert("hello");

        let mut surface = TestSurface::new(10, 1);
        input.draw(&mut surface).unwrap();
        assert_eq!(surface.row(0), "hello     ");

        input.insert(" wide world");
        input.draw(&mut surface).unwrap();
        assert_eq!(surface.row(0), "hello wide");
    }

    #[test]
    fn test_focus_follows_the_cursor() {
        let mut input = InputBox::new(Layout::new((2, 0), (6, 1)));
        input.insert("ab");

        let mut surface = TestSurface::new(10, 1);
        input.focus(&mut surface).unwrap();
        assert_eq!(surface.cursor, (4, 0));
        assert!(surface.cursor_visible);
    }

    #[test]
    fn test_focus_is_clamped_to_the_widget() {
        let mut input = InputBox::new(Layout::new((0, 0), (4, 1)));
        input.insert("abcdefgh");

        let mut surface = TestSurface::new(10, 1);
        input.focus(&mut surface).unwrap();
        assert_eq!(surface.cursor, (3, 0));
    }
}
