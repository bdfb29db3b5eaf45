//! Transient overlay notifications.
//!
//! The [`Poster`] widget paints whatever message it currently holds; the
//! [`PosterGate`] runs display cycles, one at a time. A cycle queues on a
//! fair mutex, publishes its message to the orchestrator, holds it for the
//! configured duration, then publishes the empty string to clear the
//! overlay. A second cycle therefore appears only after the first one's
//! full window has elapsed.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use tokio::sync::Mutex;
use tokio::sync::mpsc::UnboundedSender;

use crate::tui::geometry::Layout;
use crate::tui::palette::{Color, Style};
use crate::tui::surface::Surface;
use crate::tui::widgets::Widget;

pub struct Poster {
    anchor: (i32, i32),
    color: Color,
    content: String,
}

impl Poster {
    pub fn new(anchor: (i32, i32), color: Color) -> Self {
        Self { anchor, color, content: String::new() }
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn is_clear(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl Widget for Poster {
    fn draw(&self, surface: &mut dyn Surface) -> io::Result<()> {
        if self.is_clear() {
            return Ok(());
        }
        // The rectangle depends on the content, so it is recomputed on
        // every draw.
        let padded = format!(" {} ", self.content);
        let width = padded.chars().count() as i32;
        let rect = Layout::new(self.anchor, (width, 1)).resolve(surface.dims());
        surface.print(rect.x, rect.y, &padded, Style::plain(self.color))
    }
}

/// Serializes poster display cycles, first come first served.
pub struct PosterGate {
    gate: Arc<Mutex<()>>,
    duration: Duration,
}

impl PosterGate {
    pub fn new(duration: Duration) -> Self {
        Self { gate: Arc::new(Mutex::new(())), duration }
    }

    /// Queues one display cycle and returns immediately. The message and
    /// the clearing empty string arrive on `updates` in their own time.
    pub fn spawn_cycle(&self, message: String, updates: UnboundedSender<String>) {
        let gate = self.gate.clone();
        let duration = self.duration;
        tokio::spawn(async move {
            let _held = gate.lock().await;
            if updates.send(message).is_err() {
                return;
            }
            tokio::time::sleep(duration).await;
            if updates.send(String::new()).is_err() {
                warn!("Poster cycle outlived the orchestrator");
            }
        });
    }
}
