//! The drawing surface.
//!
//! Exactly one owner writes to the terminal at a time; widgets receive a
//! `&mut dyn Surface` from that owner for the duration of their own draw
//! and never keep one. The crossterm implementation queues everything and
//! flushes once per draw pass, so partially drawn frames never reach the
//! terminal.

use std::io::{self, Stdout, Write, stdout};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};

use crate::tui::palette::Style;

pub trait Surface {
    /// Current terminal dimensions, read fresh on every call.
    fn dims(&self) -> (u16, u16);

    /// Puts styled text at an absolute cell position.
    fn print(&mut self, x: u16, y: u16, text: &str, style: Style) -> io::Result<()>;

    fn clear_all(&mut self) -> io::Result<()>;

    fn move_cursor(&mut self, x: u16, y: u16) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;

    fn hide_cursor(&mut self) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

pub struct TerminalSurface {
    out: Stdout,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self { out: stdout() }
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for TerminalSurface {
    fn dims(&self) -> (u16, u16) {
        terminal::size().unwrap_or((80, 24))
    }

    fn print(&mut self, x: u16, y: u16, text: &str, style: Style) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y), SetForegroundColor(style.color.term()))?;
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        queue!(self.out, Print(text), SetAttribute(Attribute::Reset), ResetColor)
    }

    fn clear_all(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y))
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Show)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        queue!(self.out, Hide)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
