//! In-process simulated bus.
//!
//! Echoes every acknowledged send back as inbound traffic from the
//! addressed device after a short delay, so the console can be exercised
//! without a daemon. Destination 0x00 never acknowledges, which keeps the
//! failure path reachable too.

use std::time::Duration;

use async_trait::async_trait;
use log::warn;
use tokio::sync::broadcast;
use tokio::sync::mpsc::Sender;

use crate::bus::{BusClient, BusError, BusEvent, FailureReason, SendOutcome};

const ECHO_DELAY: Duration = Duration::from_millis(150);
const DEAD_DESTINATION: u8 = 0x00;

pub struct LoopbackClient {
    echoes: broadcast::Sender<(u8, Vec<u8>)>,
}

impl LoopbackClient {
    pub fn new() -> Self {
        let (echoes, _) = broadcast::channel(32);
        Self { echoes }
    }
}

impl Default for LoopbackClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BusClient for LoopbackClient {
    fn name(&self) -> &str {
        "loopback"
    }

    async fn listen(&self, sender: Sender<BusEvent>) -> Result<(), BusError> {
        let mut echoes = self.echoes.subscribe();
        sender
            .send(BusEvent::Ready)
            .await
            .map_err(|_| BusError::ChannelClosed)?;
        loop {
            match echoes.recv().await {
                Ok((source, payload)) => {
                    sender
                        .send(BusEvent::Inbound { source, payload })
                        .await
                        .map_err(|_| BusError::ChannelClosed)?;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!("Loopback dropped {} echoes", n);
                }
                Err(broadcast::error::RecvError::Closed) => return Ok(()),
            }
        }
    }

    async fn send(&self, destination: u8, payload: &[u8]) -> Result<SendOutcome, BusError> {
        tokio::time::sleep(ECHO_DELAY).await;
        if destination == DEAD_DESTINATION {
            return Ok(SendOutcome::Failure(FailureReason::Timeout));
        }
        let _ = self.echoes.send((destination, payload.to_vec()));
        Ok(SendOutcome::Success)
    }
}
