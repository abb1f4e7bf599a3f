use crate::transcription::{Credentials, TranscriptionConfig};
use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable prefix, e.g. `STREAM_SCRIBE_SMTP__HOST`
pub const ENV_PREFIX: &str = "STREAM_SCRIBE";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transcription: TranscriptionConfig,
    pub credentials: Credentials,
    pub smtp: SmtpConfig,
    pub download: DownloadConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Also used as the sender address
    pub username: String,
    pub password: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
        }
    }
}

impl SmtpConfig {
    /// Submission address as `host:port`
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    pub output_dir: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            output_dir: ".".to_string(),
        }
    }
}

impl Config {
    /// Load `path` (any extension the config crate knows, optional) and
    /// overlay `STREAM_SCRIBE_*` environment variables.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to load config from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }
}
