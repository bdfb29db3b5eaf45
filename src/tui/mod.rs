//! # TUI Orchestrator
//!
//! The terminal-facing layer and the single draw authority. One task owns
//! the surface; the keyboard stream, the bus listener, send tasks and
//! poster cycles all feed it over channels and never touch the terminal
//! themselves, so box-drawing and text can never interleave.
//!
//! ## Redraw strategy
//!
//! - Screen-state change, resize, poster clear: full clear + redraw of the
//!   active screen.
//! - Journal change: repaint the log region only.
//! - Input edit: repaint the input line only.
//! - The input cursor is re-focused after every paint.

mod event;
pub mod geometry;
pub mod palette;
mod screens;
pub mod surface;
pub mod widgets;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::task::AbortHandle;

use crate::bus::{
    BusClient, BusEvent, DaemonClient, FailureReason, LoopbackClient, SendOutcome,
};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::journal::EntryHandle;
use crate::core::state::{App, Screen};
use crate::tui::event::TuiEvent;
use crate::tui::palette::Color;
use crate::tui::screens::{ConsoleScreen, ErrorScreen};
use crate::tui::surface::{Surface, TerminalSurface};
use crate::tui::widgets::{InputEvent, Poster, PosterGate, Widget};

/// Near-bottom, near-left; the row above the input divider.
const POSTER_ANCHOR: (i32, i32) = (2, -2);
const LISTEN_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Raw mode + alternate screen for the process lifetime. Restoration runs
/// on every exit path, including unwinding.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn acquire() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        info!("Terminal acquired (raw mode, alternate screen)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        // Best-effort: failing to restore must never stop the process from
        // exiting.
        if let Err(e) = disable_raw_mode() {
            warn!("Failed to disable raw mode: {}", e);
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, Show) {
            warn!("Failed to leave alternate screen: {}", e);
        }
    }
}

/// Build a bus client from the resolved transport name.
pub fn build_client(config: &ResolvedConfig) -> Arc<dyn BusClient> {
    match config.transport.as_str() {
        "loopback" => Arc::new(LoopbackClient::new()),
        _ => Arc::new(DaemonClient::new(config.socket.clone())),
    }
}

/// Everything the draw authority owns.
struct Orchestrator {
    app: App,
    console: ConsoleScreen,
    error: ErrorScreen,
    poster: Poster,
    poster_gate: PosterGate,
    surface: TerminalSurface,
    client: Arc<dyn BusClient>,
    action_tx: UnboundedSender<Action>,
    poster_tx: UnboundedSender<String>,
    send_tasks: Vec<AbortHandle>,
}

impl Orchestrator {
    /// Clear the terminal and repaint the active screen from scratch.
    fn draw_all(&mut self) -> io::Result<()> {
        self.surface.hide_cursor()?;
        self.surface.clear_all()?;
        match self.app.screen {
            Screen::Console => {
                self.console.log.set_lines(self.app.journal.lines());
                self.console.draw(&mut self.surface)?;
            }
            Screen::Error => {
                self.error.text.set_plain(&self.app.error_text, Color::White);
                self.error.draw(&mut self.surface)?;
            }
        }
        self.poster.draw(&mut self.surface)?;
        self.focus()
    }

    fn draw_log(&mut self) -> io::Result<()> {
        if self.app.screen == Screen::Console {
            self.surface.hide_cursor()?;
            self.console.log.set_lines(self.app.journal.lines());
            self.console.log.draw(&mut self.surface)?;
        }
        self.focus()
    }

    fn draw_input(&mut self) -> io::Result<()> {
        self.surface.hide_cursor()?;
        self.console.input.draw(&mut self.surface)?;
        self.focus()
    }

    fn draw_poster(&mut self) -> io::Result<()> {
        self.surface.hide_cursor()?;
        self.poster.draw(&mut self.surface)?;
        self.focus()
    }

    /// Put the terminal cursor where it belongs and push the queued frame
    /// out in one flush.
    fn focus(&mut self) -> io::Result<()> {
        match self.app.screen {
            Screen::Console => self.console.input.focus(&mut self.surface)?,
            Screen::Error => self.surface.hide_cursor()?,
        }
        self.surface.flush()
    }

    /// Routes one key. Returns true when the operator asked to leave.
    fn handle_key(&mut self, key: TuiEvent) -> io::Result<bool> {
        if matches!(key, TuiEvent::Escape | TuiEvent::Quit) {
            return Ok(true);
        }
        if self.app.screen != Screen::Console {
            return Ok(false);
        }
        match self.console.input.handle_key(&key) {
            Some(InputEvent::Committed(line)) => {
                self.draw_input()?;
                self.apply(Action::Submit(line))
            }
            Some(InputEvent::Edited) => {
                self.draw_input()?;
                Ok(false)
            }
            None => Ok(false),
        }
    }

    /// Runs one action through the reducer, repaints what changed, and
    /// carries out the resulting effect.
    fn apply(&mut self, action: Action) -> io::Result<bool> {
        debug!("Applying {:?}", action);
        let screen_before = self.app.screen;
        let effect = update(&mut self.app, action);
        if self.app.screen != screen_before {
            self.draw_all()?;
        } else {
            self.draw_log()?;
        }
        self.perform(effect)
    }

    fn perform(&mut self, effect: Effect) -> io::Result<bool> {
        match effect {
            Effect::None => Ok(false),
            Effect::Quit => Ok(true),
            Effect::Notify(message) => {
                self.poster_gate.spawn_cycle(message, self.poster_tx.clone());
                Ok(false)
            }
            Effect::Dispatch { handle, destination, payload } => {
                self.spawn_send(handle, destination, payload);
                Ok(false)
            }
        }
    }

    /// One short-lived task per outbound message. The task owns the entry
    /// handle and reports back over the action channel; it never touches
    /// the journal or the terminal itself.
    fn spawn_send(&mut self, handle: EntryHandle, destination: u8, payload: Vec<u8>) {
        self.send_tasks.retain(|t| !t.is_finished());
        let client = self.client.clone();
        let tx = self.action_tx.clone();
        let task = tokio::spawn(async move {
            let outcome = match client.send(destination, &payload).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Send to 0x{:02x} failed: {}", destination, e);
                    SendOutcome::Failure(FailureReason::Connection)
                }
            };
            if tx.send(Action::Resolved { handle, outcome }).is_err() {
                warn!("Send result dropped: orchestrator gone");
            }
        });
        self.send_tasks.push(task.abort_handle());
    }
}

/// Supervises the bus listener: forwards its events as actions, reports
/// every stream end as a fault, and retries until the orchestrator goes
/// away.
async fn listen_bus(client: Arc<dyn BusClient>, tx: UnboundedSender<Action>) {
    loop {
        let (event_tx, mut event_rx) = mpsc::channel::<BusEvent>(32);
        let mut listening = client.listen(event_tx);
        let fault = loop {
            tokio::select! {
                outcome = &mut listening => break match outcome {
                    Ok(()) => "bus stream closed".to_string(),
                    Err(e) => e.to_string(),
                },
                Some(event) = event_rx.recv() => {
                    let action = match event {
                        BusEvent::Ready => Action::BusReady,
                        BusEvent::Inbound { source, payload } => {
                            Action::Inbound { source, payload }
                        }
                    };
                    if tx.send(action).is_err() {
                        return;
                    }
                }
            }
        };
        warn!("Bus listener stopped: {}", fault);
        if tx.send(Action::BusDown(fault)).is_err() {
            return;
        }
        tokio::time::sleep(LISTEN_RETRY_DELAY).await;
    }
}

pub async fn run(config: ResolvedConfig) -> io::Result<()> {
    let client = build_client(&config);
    info!("Using bus transport: {}", client.name());

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (poster_tx, mut poster_rx) = mpsc::unbounded_channel::<String>();

    let mut orchestrator = Orchestrator {
        app: App::new(),
        console: ConsoleScreen::new(&config.title),
        error: ErrorScreen::new(&config.title),
        poster: Poster::new(POSTER_ANCHOR, Color::Red),
        poster_gate: PosterGate::new(config.poster_duration),
        surface: TerminalSurface::new(),
        client: client.clone(),
        action_tx: action_tx.clone(),
        poster_tx,
        send_tasks: Vec::new(),
    };

    let _guard = TerminalModeGuard::acquire()?;
    orchestrator.draw_all()?;

    let listener = tokio::spawn(listen_bus(client, action_tx));
    let mut keys = EventStream::new();

    loop {
        let quit = tokio::select! {
            maybe_event = keys.next() => match maybe_event {
                Some(Ok(Event::Resize(_, _))) => {
                    orchestrator.draw_all()?;
                    false
                }
                Some(Ok(terminal_event)) => match event::decode(&terminal_event) {
                    Some(key) => orchestrator.handle_key(key)?,
                    None => false,
                },
                Some(Err(e)) => {
                    warn!("Key stream error: {}", e);
                    false
                }
                None => true,
            },
            Some(action) = action_rx.recv() => orchestrator.apply(action)?,
            Some(content) = poster_rx.recv() => {
                let clearing = content.is_empty();
                orchestrator.poster.set_content(content);
                if clearing {
                    orchestrator.draw_all()?;
                } else {
                    orchestrator.draw_poster()?;
                }
                false
            }
        };
        if quit {
            break;
        }
    }

    // Cooperative shutdown: nothing may outlive the draw authority.
    listener.abort();
    for task in orchestrator.send_tasks.drain(..) {
        task.abort();
    }
    info!("Shutting down");
    Ok(())
}
