//! Streaming speech-to-text client
//!
//! A transcription opens one WebSocket to the recognize endpoint and:
//! - sends the `start` configuration handshake
//! - uploads the audio file as 2048-byte binary frames, then an empty frame
//! - keeps the socket alive with periodic `no-op` messages
//! - reads results until one carries at least one segment

mod config;
mod error;
mod heartbeat;
mod messages;
mod reader;
mod result;
mod session;
mod upload;

pub use config::{Credentials, TranscriptionConfig, DEFAULT_ENDPOINT};
pub use error::TranscribeError;
pub use heartbeat::{Heartbeat, DEFAULT_HEARTBEAT_INTERVAL};
pub use messages::{NoOp, StartRequest};
pub use reader::read_terminal_result;
pub use result::{get_transcript, Alternative, ResultSegment, TranscriptionResult};
pub use session::{transcribe, transcribe_text, TranscriptionSession};
pub use upload::{upload_audio, UploadStats, DEFAULT_CHUNK_SIZE};
