//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.buscon/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BusconConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub daemon: DaemonConfig,
    #[serde(default)]
    pub console: ConsoleConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub transport: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DaemonConfig {
    pub socket: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ConsoleConfig {
    pub poster_duration_ms: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TRANSPORT: &str = "daemon";
pub const DEFAULT_TITLE: &str = "bus console";
pub const DEFAULT_DAEMON_SOCKET: &str = "/run/busd.sock";
pub const DEFAULT_POSTER_DURATION_MS: u64 = 2000;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub transport: String,
    pub title: String,
    pub socket: PathBuf,
    pub poster_duration: Duration,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.buscon/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".buscon").join("config.toml"))
}

/// Load config from `~/.buscon/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `BusconConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<BusconConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(BusconConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(BusconConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: BusconConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Buscon Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# transport = "daemon"          # "daemon" or "loopback"
# title = "bus console"

# [daemon]
# socket = "/run/busd.sock"     # Or set BUSCON_SOCKET env var

# [console]
# poster_duration_ms = 2000     # How long a notification stays on screen
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env
/// vars → CLI.
///
/// `cli_transport` and `cli_socket` are from CLI flags (None = not
/// specified).
pub fn resolve(
    config: &BusconConfig,
    cli_transport: Option<&str>,
    cli_socket: Option<&Path>,
) -> ResolvedConfig {
    // Transport: CLI → env → config → default
    let transport = cli_transport
        .map(|s| s.to_string())
        .or_else(|| std::env::var("BUSCON_TRANSPORT").ok())
        .or_else(|| config.general.transport.clone())
        .unwrap_or_else(|| DEFAULT_TRANSPORT.to_string());

    // Daemon socket: CLI → env → config → default
    let socket = cli_socket
        .map(Path::to_path_buf)
        .or_else(|| std::env::var("BUSCON_SOCKET").ok().map(PathBuf::from))
        .or_else(|| config.daemon.socket.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DAEMON_SOCKET));

    let title = config
        .general
        .title
        .clone()
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    let poster_duration = Duration::from_millis(
        config.console.poster_duration_ms.unwrap_or(DEFAULT_POSTER_DURATION_MS),
    );

    ResolvedConfig { transport, title, socket, poster_duration }
}
