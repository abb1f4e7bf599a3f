pub mod config;
pub mod download;
pub mod email;
pub mod transcription;

pub use config::{Config, DownloadConfig, SmtpConfig};
pub use download::download_file;
pub use email::send_email;
pub use transcription::{
    get_transcript, transcribe, transcribe_text, Credentials, TranscribeError, TranscriptionConfig,
    TranscriptionResult, TranscriptionSession,
};
