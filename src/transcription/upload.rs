use super::error::TranscribeError;
use futures::{Sink, SinkExt};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info};

/// Bytes per binary audio frame
pub const DEFAULT_CHUNK_SIZE: usize = 2048;

/// Summary of a finished upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadStats {
    /// Non-empty data frames sent (excludes the end-of-audio sentinel)
    pub frames: usize,
    pub bytes: u64,
}

/// Stream an audio file as binary frames, then send the empty end-of-audio frame.
///
/// The service treats the empty frame as the end of the audio stream, so it is
/// always sent after the last chunk. A failed send aborts the upload without
/// rollback.
pub async fn upload_audio<S>(
    sink: &mut S,
    path: impl AsRef<Path>,
    chunk_size: usize,
) -> Result<UploadStats, TranscribeError>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let path = path.as_ref();
    let file_error = |source| TranscribeError::FileAccess {
        path: path.display().to_string(),
        source,
    };

    info!("Uploading audio file: {}", path.display());
    let mut file = File::open(path).await.map_err(file_error)?;

    let mut buffer = vec![0u8; chunk_size.max(1)];
    let mut stats = UploadStats { frames: 0, bytes: 0 };

    loop {
        let n = fill_chunk(&mut file, &mut buffer).await.map_err(file_error)?;
        if n == 0 {
            break;
        }

        sink.send(Message::binary(buffer[..n].to_vec()))
            .await
            .map_err(TranscribeError::stream)?;

        stats.frames += 1;
        stats.bytes += n as u64;
        debug!("Sent audio frame {} ({} bytes)", stats.frames, n);
    }

    sink.send(Message::binary(Vec::new()))
        .await
        .map_err(TranscribeError::stream)?;

    info!(
        "File uploaded ({} frames, {} bytes)",
        stats.frames, stats.bytes
    );

    Ok(stats)
}

/// Read until the buffer is full or the reader is exhausted.
///
/// Returns the number of bytes read; 0 means end of file.
async fn fill_chunk<R>(reader: &mut R, buffer: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buffer.len() {
        let n = reader.read(&mut buffer[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}
