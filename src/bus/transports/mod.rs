mod daemon;
mod loopback;

pub use daemon::DaemonClient;
pub use loopback::LoopbackClient;
