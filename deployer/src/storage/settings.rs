//! Settings file management

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::DeployError;
use crate::filesys::file::File;
use crate::logs::LogLevel;

/// avdeploy settings, read from an optional JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Emit logs as JSON
    #[serde(default)]
    pub log_json: bool,

    /// AppVeyor API configuration
    #[serde(default)]
    pub api: ApiSettings,

    /// Deployment polling configuration
    #[serde(default)]
    pub polling: PollingSettings,

    /// Directory holding the group records; the working directory when unset
    #[serde(default)]
    pub groups_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Info,
            log_json: false,
            api: ApiSettings::default(),
            polling: PollingSettings::default(),
            groups_dir: None,
        }
    }
}

impl Settings {
    /// Read settings from `file`, falling back to defaults when it does not exist
    pub async fn load_or_default(file: &File) -> Result<Self, DeployError> {
        if !file.exists().await {
            debug!("No settings file at {:?}, using defaults", file.path());
            return Ok(Self::default());
        }

        file.read_json::<Settings>().await.map_err(|e| {
            DeployError::ConfigError(format!("invalid settings file {:?}: {}", file.path(), e))
        })
    }
}

/// AppVeyor API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL for the AppVeyor API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://ci.appveyor.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Polling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingSettings {
    /// Seconds between two status queries of one deployment
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,

    /// Consecutive failed status queries before giving up on a deployment;
    /// `null` retries forever
    #[serde(default = "default_max_query_failures")]
    pub max_query_failures: Option<u32>,

    /// Give up waiting on a deployment after this many seconds; `null` waits forever
    #[serde(default)]
    pub wait_timeout_secs: Option<u64>,
}

fn default_interval_secs() -> u64 {
    5
}

fn default_max_query_failures() -> Option<u32> {
    Some(5)
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_query_failures: default_max_query_failures(),
            wait_timeout_secs: None,
        }
    }
}
