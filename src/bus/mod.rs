//! Bus transport abstraction.
//!
//! The console never touches the wire itself: everything it knows about
//! the field bus arrives through the [`BusClient`] trait — an inbound
//! event stream and an outbound send with a verdict. Framing, addressing
//! and retries belong to whatever sits behind the trait.

mod client;
pub mod transports;
mod types;

pub use client::{BusClient, BusError};
pub use transports::{DaemonClient, LoopbackClient};
pub use types::{BusEvent, FailureReason, SendOutcome};
