use std::{
    fs,
    net::{IpAddr, Ipv4Addr},
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::codec::WireFormat;
use crate::errors::ConfigError;
use crate::state::store::DEFAULT_MAILBOX_CAPACITY;

/// Environment variable that points at an explicit config file.
pub const CONFIG_PATH_ENV: &str = "TIMESTORE_CONFIG";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    /// Address to bind the HTTP listener to.
    pub host: IpAddr,

    /// HTTP port to listen on.
    pub port: u16,

    /// Log level for tracing (e.g. "info", "debug").
    pub log_level: String,

    pub server_version: String,

    /// Body format used by /setTime and /getTime.
    pub wire_format: WireFormat,

    /// Bound on each of the store's request queues.
    pub mailbox_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            log_level: "info".to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
            wire_format: WireFormat::Text,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
        }
    }
}

impl AppConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let file = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str::<AppConfig>(&file).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Find config.json: `$TIMESTORE_CONFIG` if set, otherwise next to the
    /// executable, otherwise one directory above it.
    pub fn locate() -> Result<PathBuf, ConfigError> {
        if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(explicit));
        }

        let exe_path = std::env::current_exe().map_err(|source| ConfigError::Read {
            path: "<current executable>".to_string(),
            source,
        })?;
        let exe_dir = exe_path.parent().unwrap_or(Path::new("."));

        let candidates = [
            exe_dir.join("config.json"),
            exe_dir.join("..").join("config.json"),
        ];

        candidates
            .iter()
            .find(|p| p.exists())
            .cloned()
            .ok_or_else(|| {
                ConfigError::NotFound(
                    candidates
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                )
            })
    }

    pub fn level_filter(&self) -> LevelFilter {
        match self.log_level.to_lowercase().as_str() {
            "trace" => LevelFilter::TRACE,
            "debug" => LevelFilter::DEBUG,
            "info" => LevelFilter::INFO,
            "warn" => LevelFilter::WARN,
            "error" => LevelFilter::ERROR,
            _ => LevelFilter::INFO,
        }
    }
}
