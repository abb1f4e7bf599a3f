use super::error::TranscribeError;
use super::messages::ServiceErrorMessage;
use super::result::TranscriptionResult;
use futures::{Stream, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// Read until the first result that carries at least one segment.
///
/// Results with empty `results` (status messages, acknowledgements) are
/// discarded. Control frames are skipped. A close frame or the end of the
/// stream is a connection error.
pub async fn read_terminal_result<St, E>(stream: &mut St) -> Result<TranscriptionResult, TranscribeError>
where
    St: Stream<Item = Result<Message, E>> + Unpin,
    E: std::fmt::Display,
{
    let mut discarded = 0usize;

    loop {
        let msg = match stream.next().await {
            Some(Ok(msg)) => msg,
            Some(Err(e)) => return Err(TranscribeError::Connection(e.to_string())),
            None => {
                return Err(TranscribeError::Connection(
                    "connection ended before a final result".to_string(),
                ))
            }
        };

        let payload: &[u8] = match &msg {
            Message::Text(text) => text.as_bytes(),
            Message::Binary(data) => &data[..],
            Message::Close(frame) => {
                let reason = frame
                    .as_ref()
                    .map(|f| format!("{} {}", f.code, f.reason))
                    .unwrap_or_else(|| "no close frame".to_string());
                return Err(TranscribeError::Connection(format!(
                    "connection closed by peer ({})",
                    reason
                )));
            }
            Message::Ping(_) | Message::Pong(_) | Message::Frame(_) => continue,
        };

        if let Ok(report) = serde_json::from_slice::<ServiceErrorMessage>(payload) {
            warn!("Service reported an error: {}", report.error);
            return Err(TranscribeError::Service(report.error));
        }

        let result: TranscriptionResult = serde_json::from_slice(payload)?;
        if result.is_terminal() {
            info!(
                "Received final result (index {}, {} segments, {} messages discarded)",
                result.result_index,
                result.results.len(),
                discarded
            );
            return Ok(result);
        }

        discarded += 1;
        debug!("Discarding result without segments");
    }
}
