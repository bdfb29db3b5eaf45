use std::fmt;

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use super::types::{BusEvent, SendOutcome};

/// Errors that can occur in a bus transport.
/// Transport trouble only; a NAK from the bus is a [`SendOutcome`],
/// not an error.
#[derive(Debug)]
pub enum BusError {
    /// Transport misconfigured (bad socket path). Not recoverable.
    Config(String),
    /// Could not reach the daemon.
    Connect(String),
    /// Connection-level I/O failure mid-stream.
    Io(String),
    /// The daemon answered something this transport cannot interpret.
    Protocol(String),
    /// The event channel was closed (orchestrator dropped the receiver).
    ChannelClosed,
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::Config(msg) => write!(f, "config error: {msg}"),
            BusError::Connect(msg) => write!(f, "cannot reach bus daemon: {msg}"),
            BusError::Io(msg) => write!(f, "bus I/O error: {msg}"),
            BusError::Protocol(msg) => write!(f, "daemon protocol error: {msg}"),
            BusError::ChannelClosed => write!(f, "channel closed"),
        }
    }
}

impl std::error::Error for BusError {}

#[async_trait]
pub trait BusClient: Send + Sync {
    /// Returns the name of the transport.
    fn name(&self) -> &str;

    /// Streams bus events into the channel until the connection drops.
    ///
    /// Sends [`BusEvent::Ready`] once the bus is usable, then one
    /// [`BusEvent::Inbound`] per message. Returning `Ok` means the stream
    /// ended cleanly; either way the caller decides whether to listen
    /// again.
    async fn listen(&self, sender: Sender<BusEvent>) -> Result<(), BusError>;

    /// Sends one message and waits for the bus verdict.
    async fn send(&self, destination: u8, payload: &[u8]) -> Result<SendOutcome, BusError>;
}
