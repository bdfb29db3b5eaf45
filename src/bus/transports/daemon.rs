//! Unix-socket adapter to the bus daemon.
//!
//! The daemon owns framing, addressing and retries on the wire; this
//! transport only speaks its line protocol:
//!
//! - listening: one long-lived connection. `LISTEN` is answered with `OK`,
//!   then the daemon streams `MSG <src> <payload>` lines as messages
//!   arrive on the bus.
//! - sending: one connection per message. `SEND <dest> <payload>` is
//!   answered with `ACK` or `NAK <REASON>`.

use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, warn};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::sync::mpsc::Sender;

use crate::bus::{BusClient, BusError, BusEvent, FailureReason, SendOutcome};

pub struct DaemonClient {
    socket: PathBuf,
}

impl DaemonClient {
    pub fn new(socket: impl Into<PathBuf>) -> Self {
        Self { socket: socket.into() }
    }

    async fn connect(&self) -> Result<UnixStream, BusError> {
        UnixStream::connect(&self.socket).await.map_err(|e| {
            BusError::Connect(format!("{}: {}", self.socket.display(), e))
        })
    }
}

/// `MSG <src> <payload>` → `(src, payload)`. The payload runs to the end
/// of the line and may be empty.
fn parse_msg_line(line: &str) -> Option<(u8, Vec<u8>)> {
    let rest = line.strip_prefix("MSG ")?;
    let (source, payload) = match rest.split_once(' ') {
        Some((source, payload)) => (source, payload),
        None => (rest, ""),
    };
    let source = source.parse::<u8>().ok()?;
    Some((source, payload.as_bytes().to_vec()))
}

#[async_trait]
impl BusClient for DaemonClient {
    fn name(&self) -> &str {
        "daemon"
    }

    async fn listen(&self, sender: Sender<BusEvent>) -> Result<(), BusError> {
        let stream = self.connect().await?;
        let (read, mut write) = stream.into_split();
        write
            .write_all(b"LISTEN\n")
            .await
            .map_err(|e| BusError::Io(e.to_string()))?;

        let mut lines = BufReader::new(read).lines();
        let greeting = lines
            .next_line()
            .await
            .map_err(|e| BusError::Io(e.to_string()))?
            .ok_or_else(|| BusError::Protocol("daemon closed before greeting".to_string()))?;
        if greeting.trim() != "OK" {
            return Err(BusError::Protocol(format!("unexpected listen reply: {greeting}")));
        }

        debug!("Listening on {}", self.socket.display());
        sender
            .send(BusEvent::Ready)
            .await
            .map_err(|_| BusError::ChannelClosed)?;

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| BusError::Io(e.to_string()))?
        {
            match parse_msg_line(&line) {
                Some((source, payload)) => {
                    sender
                        .send(BusEvent::Inbound { source, payload })
                        .await
                        .map_err(|_| BusError::ChannelClosed)?;
                }
                None => warn!("Daemon sent an unparseable line: {:?}", line),
            }
        }
        Ok(())
    }

    async fn send(&self, destination: u8, payload: &[u8]) -> Result<SendOutcome, BusError> {
        let stream = self.connect().await?;
        let mut stream = BufReader::new(stream);

        let request = format!("SEND {} {}\n", destination, String::from_utf8_lossy(payload));
        stream
            .get_mut()
            .write_all(request.as_bytes())
            .await
            .map_err(|e| BusError::Io(e.to_string()))?;

        let mut reply = String::new();
        stream
            .read_line(&mut reply)
            .await
            .map_err(|e| BusError::Io(e.to_string()))?;

        let reply = reply.trim();
        debug!("Send to 0x{:02x} answered: {}", destination, reply);
        match reply {
            "ACK" => Ok(SendOutcome::Success),
            "" => Err(BusError::Protocol("daemon closed without a verdict".to_string())),
            nak => match nak.strip_prefix("NAK") {
                Some(code) => {
                    let code = code.trim();
                    let code = if code.is_empty() { "NAK" } else { code };
                    Ok(SendOutcome::Failure(FailureReason::from_code(code)))
                }
                None => Err(BusError::Protocol(format!("unexpected send reply: {nak}"))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::UnixListener;

    fn socket_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("buscon-{}-{}.sock", std::process::id(), name));
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn test_parse_msg_line() {
        assert_eq!(parse_msg_line("MSG 5 ping"), Some((5, b"ping".to_vec())));
        assert_eq!(parse_msg_line("MSG 5 two words"), Some((5, b"two words".to_vec())));
        assert_eq!(parse_msg_line("MSG 5"), Some((5, Vec::new())));
        assert_eq!(parse_msg_line("MSG 999 x"), None);
        assert_eq!(parse_msg_line("PING"), None);
    }

    #[tokio::test]
    async fn test_listen_streams_inbound_messages() {
        let path = socket_path("listen");
        let daemon = UnixListener::bind(&path).unwrap();

        tokio::spawn(async move {
            let (stream, _) = daemon.accept().await.unwrap();
            let (read, mut write) = stream.into_split();
            let mut lines = BufReader::new(read).lines();
            assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("LISTEN"));
            write.write_all(b"OK\nMSG 5 ping\nbogus\nMSG 9 pong\n").await.unwrap();
        });

        let client = DaemonClient::new(&path);
        let (tx, mut rx) = tokio::sync::mpsc::channel(8);
        let listener = tokio::spawn(async move { client.listen(tx).await });

        assert_eq!(rx.recv().await, Some(BusEvent::Ready));
        assert_eq!(
            rx.recv().await,
            Some(BusEvent::Inbound { source: 5, payload: b"ping".to_vec() })
        );
        // The bogus line is skipped, not fatal.
        assert_eq!(
            rx.recv().await,
            Some(BusEvent::Inbound { source: 9, payload: b"pong".to_vec() })
        );

        // Daemon hangs up → the stream ends cleanly.
        assert!(listener.await.unwrap().is_ok());
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_send_maps_ack_and_nak() {
        let path = socket_path("send");
        let daemon = UnixListener::bind(&path).unwrap();

        tokio::spawn(async move {
            for reply in [b"ACK\n".as_slice(), b"NAK TIMEOUT\n".as_slice()] {
                let (stream, _) = daemon.accept().await.unwrap();
                let (read, mut write) = stream.into_split();
                let mut lines = BufReader::new(read).lines();
                let request = lines.next_line().await.unwrap().unwrap();
                assert!(request.starts_with("SEND 42 "));
                write.write_all(reply).await.unwrap();
            }
        });

        let client = DaemonClient::new(&path);
        assert_eq!(client.send(42, b"hello").await.unwrap(), SendOutcome::Success);
        assert_eq!(
            client.send(42, b"hello").await.unwrap(),
            SendOutcome::Failure(FailureReason::Timeout)
        );
        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_connect_failure_is_an_error_not_a_verdict() {
        let client = DaemonClient::new("/nonexistent/busd.sock");
        assert!(matches!(client.send(1, b"x").await, Err(BusError::Connect(_))));
    }
}
