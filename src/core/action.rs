//! # Actions
//!
//! Everything that can happen in the console becomes an `Action`.
//! The operator commits a line? That's `Action::Submit`.
//! The bus delivers a message? That's `Action::Inbound`.
//!
//! The `update()` function applies an action to the state and answers with
//! the one `Effect` the orchestrator must carry out. No side effects here;
//! I/O happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use crate::bus::SendOutcome;
use crate::core::journal::EntryHandle;
use crate::core::parse::parse_command;
use crate::core::state::{App, Screen};

/// What the poster shows when a committed line cannot be parsed.
pub const INVALID_ENTRY: &str = "INVALID ENTRY";

#[derive(Debug)]
pub enum Action {
    /// The input line was committed. `None` is the empty-line sentinel.
    Submit(Option<String>),
    /// A message arrived from the bus.
    Inbound { source: u8, payload: Vec<u8> },
    /// A send task finished and reports the bus verdict.
    Resolved { handle: EntryHandle, outcome: SendOutcome },
    /// The bus transport is connected and usable.
    BusReady,
    /// The bus transport failed; the text replaces the screen.
    BusDown(String),
    /// The operator asked to leave.
    Quit,
}

#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Spawn a send task for a freshly appended pending entry.
    Dispatch { handle: EntryHandle, destination: u8, payload: Vec<u8> },
    /// Run a poster cycle with this message.
    Notify(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit(None) => Effect::Notify(INVALID_ENTRY.to_string()),
        Action::Submit(Some(line)) => match parse_command(&line) {
            Ok((destination, message)) => {
                let payload = message.clone().into_bytes();
                let handle = app.journal.outgoing(destination, message);
                Effect::Dispatch { handle, destination, payload }
            }
            Err(e) => {
                log::debug!("Rejected input line: {}", e);
                Effect::Notify(INVALID_ENTRY.to_string())
            }
        },
        Action::Inbound { source, payload } => {
            // Payload bytes are only decoded for display.
            app.journal.incoming(source, payload.escape_ascii().to_string());
            Effect::None
        }
        Action::Resolved { handle, outcome } => {
            match outcome {
                SendOutcome::Success => app.journal.ack(handle),
                SendOutcome::Failure(reason) => app.journal.fail(handle, reason.to_string()),
            }
            Effect::None
        }
        Action::BusReady => {
            if app.had_fault {
                app.journal.warning("bus link restored".to_string());
            }
            app.screen = Screen::Console;
            Effect::None
        }
        Action::BusDown(text) => {
            app.had_fault = true;
            app.journal.error(text.clone());
            app.error_text = text;
            app.screen = Screen::Error;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}
