//! Fixed terminal palette.
//!
//! Every color the console can show, resolved to a crossterm color once,
//! here — not looked up by name at draw time.

use crossterm::style::Color as TermColor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

impl Color {
    pub fn term(self) -> TermColor {
        match self {
            Color::Black => TermColor::Black,
            Color::Red => TermColor::DarkRed,
            Color::Green => TermColor::DarkGreen,
            Color::Yellow => TermColor::DarkYellow,
            Color::Blue => TermColor::DarkBlue,
            Color::Magenta => TermColor::DarkMagenta,
            Color::Cyan => TermColor::DarkCyan,
            Color::White => TermColor::Grey,
            Color::BrightBlack => TermColor::DarkGrey,
            Color::BrightRed => TermColor::Red,
            Color::BrightGreen => TermColor::Green,
            Color::BrightYellow => TermColor::Yellow,
            Color::BrightBlue => TermColor::Blue,
            Color::BrightMagenta => TermColor::Magenta,
            Color::BrightCyan => TermColor::Cyan,
            Color::BrightWhite => TermColor::White,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub color: Color,
    pub bold: bool,
}

impl Style {
    pub fn plain(color: Color) -> Self {
        Self { color, bold: false }
    }

    pub fn bold(color: Color) -> Self {
        Self { color, bold: true }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::plain(Color::White)
    }
}
