use serde::{Deserialize, Serialize};

/// Configuration handshake sent right after the socket opens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRequest {
    pub action: String,

    #[serde(rename = "content-type")]
    pub content_type: String,

    pub continuous: bool,
    pub word_confidence: bool,
    pub timestamps: bool,
    pub profanity_filter: bool,
    pub interim_results: bool,

    /// -1 disables the service's inactivity timeout
    pub inactivity_timeout: i32,
}

impl Default for StartRequest {
    fn default() -> Self {
        Self {
            action: "start".to_string(),
            content_type: "audio/flac".to_string(),
            continuous: true,
            word_confidence: true,
            timestamps: true,
            profanity_filter: false,
            interim_results: false,
            inactivity_timeout: -1,
        }
    }
}

/// Keep-alive message sent by the heartbeat task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NoOp {
    pub action: String,
}

impl Default for NoOp {
    fn default() -> Self {
        Self {
            action: "no-op".to_string(),
        }
    }
}

/// Error report pushed by the service before it closes the session
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ServiceErrorMessage {
    pub error: String,
}
