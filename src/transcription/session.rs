use super::config::{Credentials, TranscriptionConfig};
use super::error::TranscribeError;
use super::heartbeat::Heartbeat;
use super::messages::StartRequest;
use super::reader::read_terminal_result;
use super::result::{get_transcript, TranscriptionResult};
use super::upload::upload_audio;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use std::path::Path;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, Message>;
type WsSource = SplitStream<WsStream>;

/// Upper bound on the polite close handshake at teardown
const CLOSE_TIMEOUT: Duration = Duration::from_secs(2);

/// One streaming exchange with the speech-to-text service.
///
/// The session owns the socket exclusively. Dropping it at any point closes
/// the connection; [`run`](Self::run) consumes it.
pub struct TranscriptionSession {
    config: TranscriptionConfig,
    sink: WsSink,
    stream: WsSource,
}

impl TranscriptionSession {
    /// Connect with Basic auth and send the `start` handshake
    pub async fn open(
        config: TranscriptionConfig,
        credentials: &Credentials,
    ) -> Result<Self, TranscribeError> {
        info!("Connecting to speech-to-text endpoint {}", config.endpoint);

        let mut request = config
            .endpoint
            .as_str()
            .into_client_request()
            .map_err(|e| TranscribeError::Connection(format!("invalid endpoint: {}", e)))?;

        let auth = HeaderValue::from_str(&format!("Basic {}", credentials.basic_auth()))
            .map_err(|e| TranscribeError::Connection(format!("invalid credentials: {}", e)))?;
        request.headers_mut().insert(AUTHORIZATION, auth);

        let (ws, response) = connect_async(request)
            .await
            .map_err(|e| TranscribeError::Connection(e.to_string()))?;

        info!("Connected (HTTP {})", response.status());

        let (mut sink, stream) = ws.split();

        let start = serde_json::to_string(&StartRequest::default())
            .map_err(TranscribeError::stream)?;
        sink.send(Message::text(start))
            .await
            .map_err(TranscribeError::stream)?;

        debug!("Sent start handshake");

        Ok(Self {
            config,
            sink,
            stream,
        })
    }

    /// Upload the audio file and wait for the first non-empty result.
    ///
    /// The heartbeat runs from the end of the upload until this returns. It is
    /// stopped and the socket closed on every exit path.
    pub async fn run(self, audio_path: impl AsRef<Path>) -> Result<TranscriptionResult, TranscribeError> {
        let Self {
            config,
            mut sink,
            mut stream,
        } = self;

        upload_audio(&mut sink, audio_path, config.chunk_size).await?;

        let heartbeat = Heartbeat::spawn(sink, config.heartbeat_interval());
        let outcome = read_terminal_result(&mut stream).await;

        if let Some(mut sink) = heartbeat.stop().await {
            match tokio::time::timeout(CLOSE_TIMEOUT, sink.close()).await {
                Ok(Ok(())) => debug!("Connection closed"),
                Ok(Err(e)) => debug!("Close handshake failed: {}", e),
                Err(_) => debug!("Close handshake timed out"),
            }
        }

        outcome
    }
}

/// Transcribe one audio file, returning the terminal structured result
pub async fn transcribe(
    config: &TranscriptionConfig,
    credentials: &Credentials,
    audio_path: impl AsRef<Path>,
) -> Result<TranscriptionResult, TranscribeError> {
    TranscriptionSession::open(config.clone(), credentials)
        .await?
        .run(audio_path)
        .await
}

/// Transcribe one audio file and extract the plain-text transcript
pub async fn transcribe_text(
    config: &TranscriptionConfig,
    credentials: &Credentials,
    audio_path: impl AsRef<Path>,
) -> Result<String, TranscribeError> {
    let result = transcribe(config, credentials, audio_path).await?;
    Ok(get_transcript(&result))
}
