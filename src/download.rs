use anyhow::{bail, Context, Result};
use reqwest::Url;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::info;

/// Last `/`-separated path segment of `url`, used as the local file name
pub fn file_name_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;

    let name = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .unwrap_or_default();

    if name.is_empty() {
        bail!("URL has no file name: {}", url);
    }

    Ok(name.to_string())
}

/// Download `url` into `dest_dir`, named after the URL's last path segment.
///
/// The response body is written verbatim. Returns the path of the new file.
pub async fn download_file(url: &str, dest_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let name = file_name_from_url(url)?;
    let path = dest_dir.as_ref().join(&name);

    info!("Downloading {} to {}", url, path.display());

    let mut response = reqwest::get(url)
        .await
        .with_context(|| format!("Failed to fetch {}", url))?
        .error_for_status()
        .with_context(|| format!("Server rejected request for {}", url))?;

    let mut file = File::create(&path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let mut written = 0u64;

    while let Some(chunk) = response
        .chunk()
        .await
        .context("Failed to read response body")?
    {
        file.write_all(&chunk)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written += chunk.len() as u64;
    }

    file.flush().await?;

    info!("Downloaded {} bytes to {}", written, path.display());

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_is_last_segment() {
        let name = file_name_from_url("https://cdn.example.com/shows/ep42/episode.mp3").unwrap();
        assert_eq!(name, "episode.mp3");
    }

    #[test]
    fn test_query_is_not_part_of_name() {
        let name = file_name_from_url("https://cdn.example.com/a/b.flac?token=abc#t=3").unwrap();
        assert_eq!(name, "b.flac");
    }

    #[test]
    fn test_trailing_slash_has_no_name() {
        assert!(file_name_from_url("https://cdn.example.com/shows/").is_err());
        assert!(file_name_from_url("https://cdn.example.com").is_err());
    }

    #[test]
    fn test_relative_url_is_rejected() {
        assert!(file_name_from_url("episode.mp3").is_err());
    }
}
