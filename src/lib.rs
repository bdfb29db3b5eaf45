//! Buscon library exports for testing

use clap::ValueEnum;

pub mod bus;
pub mod core;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// How the console reaches the bus.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// Unix-socket connection to the bus daemon.
    #[default]
    Daemon,
    /// In-process simulated bus, no daemon required.
    Loopback,
}

impl Transport {
    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Daemon => "daemon",
            Transport::Loopback => "loopback",
        }
    }
}
