//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::io;

use crate::core::state::App;
use crate::tui::palette::{Color, Style};
use crate::tui::surface::Surface;

/// Creates a fresh App in its startup state.
pub fn test_app() -> App {
    App::new()
}

/// An in-memory character grid standing in for the real terminal, so
/// widget tests can assert on what actually lands on screen.
pub struct TestSurface {
    w: u16,
    h: u16,
    cells: Vec<Vec<char>>,
    colors: Vec<Vec<Color>>,
    pub cursor: (u16, u16),
    pub cursor_visible: bool,
}

impl TestSurface {
    pub fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![vec![' '; w as usize]; h as usize],
            colors: vec![vec![Color::White; w as usize]; h as usize],
            cursor: (0, 0),
            cursor_visible: false,
        }
    }

    /// One row as a string, exactly as displayed.
    pub fn row(&self, y: u16) -> String {
        self.cells[y as usize].iter().collect()
    }

    pub fn color_at(&self, x: u16, y: u16) -> Color {
        self.colors[y as usize][x as usize]
    }

    /// The whole grid, rows joined by newlines.
    pub fn snapshot(&self) -> String {
        (0..self.h).map(|y| self.row(y)).collect::<Vec<_>>().join("\n")
    }
}

impl Surface for TestSurface {
    fn dims(&self) -> (u16, u16) {
        (self.w, self.h)
    }

    fn print(&mut self, x: u16, y: u16, text: &str, style: Style) -> io::Result<()> {
        for (i, c) in text.chars().enumerate() {
            let col = x as usize + i;
            if col < self.w as usize && (y as usize) < self.h as usize {
                self.cells[y as usize][col] = c;
                self.colors[y as usize][col] = style.color;
            }
        }
        Ok(())
    }

    fn clear_all(&mut self) -> io::Result<()> {
        self.cells = vec![vec![' '; self.w as usize]; self.h as usize];
        self.colors = vec![vec![Color::White; self.w as usize]; self.h as usize];
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.cursor = (x, y);
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.cursor_visible = true;
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.cursor_visible = false;
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
