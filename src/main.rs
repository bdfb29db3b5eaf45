mod bus;
mod core;
#[cfg(test)]
mod test_support;
mod tui;

use buscon::Transport;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "buscon", about = "Operator console for a field bus")]
struct Args {
    /// Bus transport to use
    #[arg(short, long, value_enum)]
    transport: Option<Transport>,

    /// Path to the bus daemon socket
    #[arg(short, long)]
    socket: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - stdout belongs to the screen, so logs go to
    // buscon.log in the current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("buscon.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = core::config::load_config().unwrap_or_else(|e| {
        log::warn!("Falling back to default config: {}", e);
        core::config::BusconConfig::default()
    });
    let config = core::config::resolve(
        &file_config,
        args.transport.map(Transport::as_str),
        args.socket.as_deref(),
    );

    log::info!("buscon starting up with transport: {}", config.transport);

    tui::run(config).await
}
