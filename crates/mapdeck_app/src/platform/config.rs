use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use mapdeck_engine::{BackendSettings, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::logging::LogDestination;

pub const DEFAULT_CONFIG_FILE: &str = "mapdeck.ron";

#[derive(Debug, Parser)]
#[command(name = "mapdeck", about = "Operator console for the course mapper and downloader")]
pub struct Cli {
    /// Backend base URL, overriding the config file.
    #[arg(long)]
    pub server: Option<String>,
    /// Path to the RON config file.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,
    /// Where log output goes.
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub log: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:8000".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
            log: LogDestination::File,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("invalid server url {url:?}: {reason}")]
    ServerUrl { url: String, reason: String },
}

/// Reads the config file. A missing file yields defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: BackendSettings,
    pub log: LogDestination,
}

/// Applies command-line overrides on top of the file config.
pub fn resolve(cli: &Cli, file: AppConfig) -> Result<ResolvedConfig, ConfigError> {
    let raw_url = cli.server.clone().unwrap_or(file.server_url);
    let base_url = Url::parse(&raw_url).map_err(|err| ConfigError::ServerUrl {
        url: raw_url.clone(),
        reason: err.to_string(),
    })?;
    if !matches!(base_url.scheme(), "http" | "https") {
        return Err(ConfigError::ServerUrl {
            url: raw_url,
            reason: "scheme must be http or https".to_string(),
        });
    }

    let mut backend = BackendSettings::new(base_url);
    backend.connect_timeout = Duration::from_secs(file.connect_timeout_secs);
    backend.request_timeout = Duration::from_secs(file.request_timeout_secs);

    Ok(ResolvedConfig {
        backend,
        log: cli.log.unwrap_or(file.log),
    })
}
