use std::fmt;

/// Events a transport reports while listening on the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusEvent {
    /// The transport is connected and the bus is usable.
    Ready,
    /// A message arrived from the bus.
    Inbound { source: u8, payload: Vec<u8> },
}

/// Verdict of one outbound send, as reported by the bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Success,
    Failure(FailureReason),
}

/// Why the bus rejected an outbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The addressed device never acknowledged.
    Timeout,
    /// The medium was occupied.
    Busy,
    /// The device refused the message.
    Rejected,
    /// The transport itself failed before a bus verdict arrived.
    Connection,
    /// A daemon NAK code this transport does not know.
    Other(String),
}

impl FailureReason {
    /// Maps a daemon NAK code to a reason.
    pub fn from_code(code: &str) -> Self {
        match code {
            "TIMEOUT" => FailureReason::Timeout,
            "BUSY" => FailureReason::Busy,
            "REJECTED" => FailureReason::Rejected,
            other => FailureReason::Other(other.to_string()),
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Timeout => write!(f, "TIMEOUT"),
            FailureReason::Busy => write!(f, "BUSY"),
            FailureReason::Rejected => write!(f, "REJECTED"),
            FailureReason::Connection => write!(f, "CONNECTION"),
            FailureReason::Other(code) => write!(f, "{code}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_nak_codes_round_trip() {
        for code in ["TIMEOUT", "BUSY", "REJECTED"] {
            assert_eq!(FailureReason::from_code(code).to_string(), code);
        }
    }

    #[test]
    fn test_unknown_nak_code_is_preserved() {
        let reason = FailureReason::from_code("CRC");
        assert_eq!(reason, FailureReason::Other("CRC".to_string()));
        assert_eq!(reason.to_string(), "CRC");
    }
}
