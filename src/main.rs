use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stream_scribe::{download_file, get_transcript, send_email, transcribe, Config};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stream-scribe", version, about = "Streaming transcription, mail and download helpers")]
struct Cli {
    /// Config file (extension optional); STREAM_SCRIBE_* variables override it
    #[arg(short, long, default_value = "config/stream-scribe")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transcribe a FLAC file with the streaming speech-to-text service
    Transcribe {
        file: PathBuf,

        /// Print the full structured result instead of the plain transcript
        #[arg(long)]
        json: bool,
    },

    /// Send a plain-text email through the configured SMTP server
    SendEmail {
        #[arg(long = "to", required = true)]
        to: Vec<String>,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        body: String,
    },

    /// Download a URL into a file named after its last path segment
    Download {
        url: String,

        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let cfg = Config::load(&cli.config)?;

    match cli.command {
        Command::Transcribe { file, json } => {
            let result = transcribe(&cfg.transcription, &cfg.credentials, &file)
                .await
                .with_context(|| format!("Failed to transcribe {}", file.display()))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", get_transcript(&result));
            }
        }
        Command::SendEmail { to, subject, body } => {
            send_email(&cfg.smtp, &to, &subject, &body).await?;
        }
        Command::Download { url, output_dir } => {
            let dir = output_dir.unwrap_or_else(|| PathBuf::from(&cfg.download.output_dir));
            let path = download_file(&url, &dir).await?;
            info!("Saved {}", path.display());
        }
    }

    Ok(())
}
