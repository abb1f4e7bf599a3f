use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Failure of a transcription session
///
/// Every kind is terminal: the session is torn down and no partial result is
/// returned.
#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    /// Dial, upgrade handshake, or mid-session network failure
    #[error("connection error: {0}")]
    Connection(String),

    /// The local audio file could not be opened or read
    #[error("cannot access audio file {path}: {source}")]
    FileAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A send over the connection failed
    #[error("stream error: {0}")]
    Stream(#[source] BoxError),

    /// An inbound message did not match the result shape
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service reported an error on the session
    #[error("service error: {0}")]
    Service(String),
}

impl TranscribeError {
    pub(crate) fn stream<E>(err: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::Stream(Box::new(err))
    }
}
