// Integration tests for the HTTP download helper
//
// Files are served by an in-process axum server and written into a
// temporary directory.

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use std::fs;
use std::net::SocketAddr;
use stream_scribe::download_file;
use tempfile::TempDir;

fn episode_bytes() -> Vec<u8> {
    (0..10_000u32).map(|i| (i % 256) as u8).collect()
}

async fn spawn_server() -> Result<SocketAddr> {
    let app = Router::new()
        .route("/shows/episode-42.flac", get(|| async { episode_bytes() }))
        .route("/notes.txt", get(|| async { "meeting notes\n" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    Ok(addr)
}

#[tokio::test]
async fn test_download_writes_body_under_last_segment() -> Result<()> {
    let addr = spawn_server().await?;
    let temp_dir = TempDir::new()?;

    let url = format!("http://{}/shows/episode-42.flac", addr);
    let path = download_file(&url, temp_dir.path()).await?;

    assert_eq!(path, temp_dir.path().join("episode-42.flac"));
    assert_eq!(fs::read(&path)?, episode_bytes());

    Ok(())
}

#[tokio::test]
async fn test_download_overwrites_existing_file() -> Result<()> {
    let addr = spawn_server().await?;
    let temp_dir = TempDir::new()?;
    fs::write(temp_dir.path().join("notes.txt"), "stale contents that are longer")?;

    let path = download_file(&format!("http://{}/notes.txt", addr), temp_dir.path()).await?;

    assert_eq!(fs::read_to_string(path)?, "meeting notes\n");

    Ok(())
}

#[tokio::test]
async fn test_download_error_status_leaves_no_file() -> Result<()> {
    let addr = spawn_server().await?;
    let temp_dir = TempDir::new()?;

    let result = download_file(&format!("http://{}/missing.mp3", addr), temp_dir.path()).await;

    assert!(result.is_err(), "404 should fail the download");
    assert!(!temp_dir.path().join("missing.mp3").exists());

    Ok(())
}

#[tokio::test]
async fn test_download_rejects_url_without_file_name() -> Result<()> {
    let temp_dir = TempDir::new()?;

    let result = download_file("http://127.0.0.1:9/shows/", temp_dir.path()).await;

    assert!(result.is_err());
    assert_eq!(fs::read_dir(temp_dir.path())?.count(), 0);

    Ok(())
}
