//! Append-only message journal.
//!
//! Every line the operator sees in the log region is an [`Entry`]. Entries
//! are created once and never removed, only scrolled out of view. The one
//! mutation the journal permits is resolving a pending outgoing entry
//! through the [`EntryHandle`] returned at append time: the handle cannot
//! be cloned, so only the code path that created an entry can resolve it,
//! and only once.

use chrono::{DateTime, Local};
use std::fmt;

use crate::tui::palette::Color;

/// Permission to resolve one pending outgoing entry.
///
/// Deliberately neither `Clone` nor `Copy`: `Journal::ack` and
/// `Journal::fail` consume it.
#[derive(Debug, PartialEq, Eq)]
pub struct EntryHandle(usize);

/// Lifecycle of an outgoing message awaiting its send result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendState {
    Pending,
    Acked,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Outgoing {
        destination: u8,
        message: String,
        state: SendState,
        stamp: DateTime<Local>,
    },
    Incoming {
        source: u8,
        message: String,
        stamp: DateTime<Local>,
    },
    Error {
        text: String,
        stamp: DateTime<Local>,
    },
    Warning {
        text: String,
        stamp: DateTime<Local>,
    },
}

impl Entry {
    pub fn color(&self) -> Color {
        match self {
            Entry::Outgoing { state: SendState::Pending, .. } => Color::BrightBlack,
            Entry::Outgoing { state: SendState::Acked, .. } => Color::Green,
            Entry::Outgoing { state: SendState::Failed(_), .. } => Color::Red,
            Entry::Incoming { .. } => Color::Cyan,
            Entry::Error { .. } => Color::Red,
            Entry::Warning { .. } => Color::Yellow,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Outgoing { destination, message, state, stamp } => {
                write!(
                    f,
                    "{} - 0x{:02x} < '{}'",
                    stamp.format("%H:%M:%S"),
                    destination,
                    message
                )?;
                match state {
                    SendState::Pending => write!(f, " ..."),
                    SendState::Acked => Ok(()),
                    SendState::Failed(reason) => write!(f, " -> FAIL: {reason}"),
                }
            }
            Entry::Incoming { source, message, stamp } => {
                write!(f, "{} - 0x{:02x} > '{}'", stamp.format("%H:%M:%S"), source, message)
            }
            Entry::Error { text, stamp } => {
                write!(f, "{} - ERROR: {}", stamp.format("%H:%M:%S"), text)
            }
            Entry::Warning { text, stamp } => {
                write!(f, "{} - WARNING: {}", stamp.format("%H:%M:%S"), text)
            }
        }
    }
}

/// The append-only log. Render order is append order, always.
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<Entry>,
}

impl Journal {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a pending outgoing entry and hands back the one token that
    /// can resolve it.
    pub fn outgoing(&mut self, destination: u8, message: String) -> EntryHandle {
        self.entries.push(Entry::Outgoing {
            destination,
            message,
            state: SendState::Pending,
            stamp: Local::now(),
        });
        EntryHandle(self.entries.len() - 1)
    }

    pub fn incoming(&mut self, source: u8, message: String) {
        self.entries.push(Entry::Incoming { source, message, stamp: Local::now() });
    }

    pub fn error(&mut self, text: String) {
        self.entries.push(Entry::Error { text, stamp: Local::now() });
    }

    pub fn warning(&mut self, text: String) {
        self.entries.push(Entry::Warning { text, stamp: Local::now() });
    }

    pub fn ack(&mut self, handle: EntryHandle) {
        if let Entry::Outgoing { state, .. } = &mut self.entries[handle.0] {
            *state = SendState::Acked;
        }
    }

    pub fn fail(&mut self, handle: EntryHandle, reason: String) {
        if let Entry::Outgoing { state, .. } = &mut self.entries[handle.0] {
            *state = SendState::Failed(reason);
        }
    }

    /// Every entry as a styled display line, in append order.
    pub fn lines(&self) -> Vec<(Color, String)> {
        self.entries.iter().map(|e| (e.color(), e.to_string())).collect()
    }
}
