//! eventdesk configuration.
//!
//! Settings come from `~/.config/eventdesk/config.toml`, then `EVENTDESK_*`
//! environment variables. Front ends may override on top of that.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{EventDeskError, EventDeskResult};

static DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// Base URL of the Event Store REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: default_api_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn config_path() -> EventDeskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| EventDeskError::Config("Could not determine config directory".into()))?
            .join("eventdesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load settings, creating a commented default config file on first run.
    pub fn load() -> EventDeskResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::from_sources(&config_path, true)
    }

    fn from_sources(path: &Path, with_env: bool) -> EventDeskResult<Self> {
        let mut builder = Config::builder().add_source(File::from(path).required(false));
        if with_env {
            builder = builder.add_source(Environment::with_prefix("EVENTDESK").try_parsing(true));
        }

        let settings: Settings = builder
            .build()
            .map_err(|e| EventDeskError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| EventDeskError::Config(e.to_string()))?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> EventDeskResult<()> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(EventDeskError::Config(format!(
                "api_url must be an http(s) URL, got \"{}\"",
                self.api_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(EventDeskError::Config("timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    /// Replace the API URL, e.g. from a command-line flag.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> EventDeskResult<Self> {
        self.api_url = api_url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> EventDeskResult<()> {
        let contents = format!(
            "\
# eventdesk configuration

# Where the Event Store API lives:
# api_url = \"{DEFAULT_API_URL}\"

# Seconds to wait for each request:
# timeout_secs = {DEFAULT_TIMEOUT_SECS}
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                EventDeskError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| EventDeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
