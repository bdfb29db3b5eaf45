//! Scrolling styled-text region.

use std::io;

use crate::tui::geometry::Layout;
use crate::tui::palette::{Color, Style};
use crate::tui::surface::Surface;
use crate::tui::widgets::Widget;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}

/// A block of styled lines inside a rectangle. When the content is taller
/// than the rectangle, the newest lines win; that is all the scrolling
/// the message log ever needs.
pub struct Text {
    layout: Layout,
    halign: HAlign,
    valign: VAlign,
    lines: Vec<(Color, String)>,
}

impl Text {
    pub fn new(layout: Layout) -> Self {
        Self::aligned(layout, HAlign::Left, VAlign::Top)
    }

    pub fn aligned(layout: Layout, halign: HAlign, valign: VAlign) -> Self {
        Self { layout, halign, valign, lines: Vec::new() }
    }

    pub fn set_lines(&mut self, lines: Vec<(Color, String)>) {
        self.lines = lines;
    }

    /// Replaces the content with a single-color text, split on newlines.
    pub fn set_plain(&mut self, text: &str, color: Color) {
        self.lines = text.split('\n').map(|l| (color, l.to_string())).collect();
    }

    /// Every row of the rectangle exactly as it will be printed: aligned,
    /// clipped, and space-filled so a redraw erases whatever was there.
    fn layout_rows(&self, w: u16, h: u16) -> Vec<(Color, String)> {
        let w = w as usize;
        let h = h as usize;

        let start = self.lines.len().saturating_sub(h);
        let visible = &self.lines[start..];
        let top = match self.valign {
            VAlign::Top => 0,
            VAlign::Middle => (h - visible.len()) / 2,
            VAlign::Bottom => h - visible.len(),
        };

        let mut rows = vec![(Color::White, " ".repeat(w)); h];
        for (i, (color, line)) in visible.iter().enumerate() {
            let clipped: String = line.trim_end().chars().take(w).collect();
            let pad = w - clipped.chars().count();
            let row = match self.halign {
                HAlign::Left => format!("{clipped}{}", " ".repeat(pad)),
                HAlign::Right => format!("{}{clipped}", " ".repeat(pad)),
                HAlign::Center => {
                    let left = pad / 2;
                    format!("{}{clipped}{}", " ".repeat(left), " ".repeat(pad - left))
                }
            };
            rows[top + i] = (*color, row);
        }
        rows
    }
}

impl Widget for Text {
    fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        let rect = self.layout.resolve(surface.dims());
        for (i, (color, row)) in self.layout_rows(rect.w, rect.h).iter().enumerate() {
            surface.print(rect.x, rect.y + i as u16, row, Style::plain(*color))?;
        }
        Ok(())
    }
}
