use super::heartbeat::DEFAULT_HEARTBEAT_INTERVAL;
use super::upload::DEFAULT_CHUNK_SIZE;
use base64::Engine;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Streaming recognize endpoint (broadband US English model)
pub const DEFAULT_ENDPOINT: &str =
    "wss://stream.watsonplatform.net/speech-to-text/api/v1/recognize?model=en-US_BroadbandModel";

/// Configuration for a transcription session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// WebSocket URL of the recognize endpoint
    pub endpoint: String,

    /// Bytes per binary audio frame
    /// Default: 2048
    pub chunk_size: usize,

    /// Interval between keep-alive messages once the upload is done
    /// Default: 5000 ms (the service drops sockets idle for ~30 s)
    pub heartbeat_interval_ms: u64,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            heartbeat_interval_ms: DEFAULT_HEARTBEAT_INTERVAL.as_millis() as u64,
        }
    }
}

impl TranscriptionConfig {
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms.max(1))
    }
}

/// HTTP Basic credentials for the upgrade request
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// base64 of `username:password`, the value after `Basic `
    pub fn basic_auth(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        base64::engine::general_purpose::STANDARD.encode(raw)
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_encoding() {
        let creds = Credentials::new("Aladdin", "open sesame");
        assert_eq!(creds.basic_auth(), "QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
    }

    #[test]
    fn test_defaults_match_service_limits() {
        let config = TranscriptionConfig::default();

        assert_eq!(config.chunk_size, 2048);
        assert_eq!(config.heartbeat_interval(), Duration::from_secs(5));
        assert!(config.endpoint.starts_with("wss://"));
    }

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::new("user", "hunter2");
        let rendered = format!("{:?}", creds);

        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
    }
}
