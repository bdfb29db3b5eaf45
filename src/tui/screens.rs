//! The two fixed screen compositions.

use std::io;

use crate::tui::geometry::Layout;
use crate::tui::surface::Surface;
use crate::tui::widgets::{Frame, HAlign, InputBox, Text, VAlign, Widget};

/// The working console: bordered frame with a divider above the input
/// line, the scrolling journal in between.
pub struct ConsoleScreen {
    frame: Frame,
    pub log: Text,
    pub input: InputBox,
}

impl ConsoleScreen {
    pub fn new(title: &str) -> Self {
        Self {
            frame: Frame::new(Layout::new((0, 0), (0, 0)))
                .with_hlines(vec![0, -3, -1])
                .with_title(title),
            log: Text::new(Layout::new((2, 1), (-4, -4))),
            input: InputBox::new(Layout::new((2, -1), (-4, 1))),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        self.frame.draw(surface)?;
        self.log.draw(surface)?;
        self.input.draw(surface)
    }
}

/// Full-screen message shown while the console is unusable.
pub struct ErrorScreen {
    frame: Frame,
    pub text: Text,
}

impl ErrorScreen {
    pub fn new(title: &str) -> Self {
        Self {
            frame: Frame::new(Layout::new((0, 0), (0, 0))).with_title(title),
            text: Text::aligned(
                Layout::new((0.5, 0.5), (0.5, 0.5)),
                HAlign::Center,
                VAlign::Middle,
            ),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        self.frame.draw(surface)?;
        self.text.draw(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestSurface;
    use crate::tui::palette::Color;

    #[test]
    fn test_console_screen_composition() {
        let mut screen = ConsoleScreen::new("bus console");
        screen.log.set_lines(vec![(Color::Cyan, "hello".to_string())]);
        screen.input.insert("0x2a hi");

        let mut surface = TestSurface::new(40, 10);
        screen.draw(&mut surface).unwrap();

        assert!(surface.row(0).contains(" bus console "));
        assert!(surface.row(1).starts_with("│ hello"));
        assert!(surface.row(7).starts_with("├"));
        assert!(surface.row(8).starts_with("│ 0x2a hi"));
        assert!(surface.row(9).starts_with("└"));
    }

    #[test]
    fn test_log_region_clears_between_borders() {
        let mut screen = ConsoleScreen::new("t");
        screen.log.set_lines(vec![(Color::White, "x".repeat(60))]);

        let mut surface = TestSurface::new(40, 10);
        screen.draw(&mut surface).unwrap();
        // The log is clipped with one blank cell before the right border.
        assert!(surface.row(1).ends_with("xx │"), "{:?}", surface.row(1));
    }

    #[test]
    fn test_error_screen_centers_its_message() {
        let mut screen = ErrorScreen::new("bus console");
        screen.text.set_plain("Starting...", Color::White);

        let mut surface = TestSurface::new(40, 12);
        screen.draw(&mut surface).unwrap();

        let middle = surface.row(5);
        assert!(middle.contains("Starting..."), "{middle:?}");
        assert!(surface.row(0).contains(" bus console "));
    }
}
