//! Bordering rules with box-drawing junctions.

use std::io;

use crate::tui::geometry::{Layout, Rect};
use crate::tui::palette::{Color, Style};
use crate::tui::surface::Surface;
use crate::tui::widgets::Widget;

/// Horizontal and vertical rules at configurable offsets, with the right
/// box-drawing glyph wherever two rules cross. Offsets below zero anchor
/// to the far edge.
pub struct Frame {
    layout: Layout,
    title: Option<String>,
    hlines: Vec<i32>,
    vlines: Vec<i32>,
}

impl Frame {
    /// A plain border around the layout.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            title: None,
            hlines: vec![0, -1],
            vlines: vec![0, -1],
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_hlines(mut self, hlines: Vec<i32>) -> Self {
        self.hlines = hlines;
        self
    }

    pub fn with_vlines(mut self, vlines: Vec<i32>) -> Self {
        self.vlines = vlines;
        self
    }

    fn draw_title(&self, surface: &mut dyn Surface, rect: Rect, row: u16, title: &str) -> io::Result<()> {
        let title: String = format!(" {title} ").chars().take(rect.w as usize).collect();
        let x = (rect.w as i64 - title.chars().count() as i64).max(0) / 2;
        surface.print(rect.x + x as u16, rect.y + row, &title, Style::bold(Color::White))
    }
}

/// Resolves a rule offset inside an extent. A rule outside the widget is
/// a programming error, caught here rather than smeared on the screen.
fn resolve_rule(offset: i32, extent: u16) -> u16 {
    let resolved = if offset < 0 {
        i64::from(extent) + i64::from(offset)
    } else {
        i64::from(offset)
    };
    assert!(
        (0..i64::from(extent)).contains(&resolved),
        "rule offset {offset} out of bound ({resolved} outside [0, {}])",
        i64::from(extent) - 1
    );
    resolved as u16
}

/// Glyph for a crossing at `(x, y)` inside a `w`×`h` rectangle.
fn junction(x: u16, y: u16, w: u16, h: u16) -> char {
    let (left, right) = (x == 0, x + 1 == w);
    let (top, bottom) = (y == 0, y + 1 == h);
    match (left, right, top, bottom) {
        (true, _, true, _) => '┌',
        (_, true, true, _) => '┐',
        (true, _, _, true) => '└',
        (_, true, _, true) => '┘',
        (true, _, _, _) => '├',
        (_, true, _, _) => '┤',
        (_, _, true, _) => '┬',
        (_, _, _, true) => '┴',
        _ => '┼',
    }
}

impl Widget for Frame {
    fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        let rect = self.layout.resolve(surface.dims());
        let rows: Vec<u16> = self.hlines.iter().map(|&o| resolve_rule(o, rect.h)).collect();
        let cols: Vec<u16> = self.vlines.iter().map(|&o| resolve_rule(o, rect.w)).collect();

        let rule = "─".repeat(rect.w as usize);
        for &row in &rows {
            surface.print(rect.x, rect.y + row, &rule, Style::default())?;
        }
        for &col in &cols {
            for y in 0..rect.h {
                surface.print(rect.x + col, rect.y + y, "│", Style::default())?;
            }
            for &row in &rows {
                let glyph = junction(col, row, rect.w, rect.h);
                surface.print(rect.x + col, rect.y + row, &glyph.to_string(), Style::default())?;
            }
        }

        if let Some(title) = &self.title {
            let top = rows.iter().min().copied().unwrap_or(0);
            self.draw_title(surface, rect, top, title)?;
        }
        Ok(())
    }
}
