use crate::config::SmtpConfig;
use anyhow::{bail, Context, Result};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

/// Build a plain-text message with `From`, `To` and `Subject` headers
pub fn build_message(from: &str, to: &[String], subject: &str, body: &str) -> Result<Message> {
    if to.is_empty() {
        bail!("No recipients given");
    }

    let sender: Mailbox = from
        .parse()
        .with_context(|| format!("Invalid sender address: {}", from))?;

    let mut builder = Message::builder()
        .from(sender)
        .subject(subject)
        .header(ContentType::TEXT_PLAIN);

    for rcpt in to {
        let mailbox: Mailbox = rcpt
            .parse()
            .with_context(|| format!("Invalid recipient address: {}", rcpt))?;
        builder = builder.to(mailbox);
    }

    builder
        .body(body.to_string())
        .context("Failed to build email message")
}

/// Submit an email over STARTTLS, authenticating as `smtp.username`.
///
/// The sender address is the SMTP username.
pub async fn send_email(smtp: &SmtpConfig, to: &[String], subject: &str, body: &str) -> Result<()> {
    let message = build_message(&smtp.username, to, subject, body)?;
    let address = smtp.address();

    info!("Submitting email to {} recipient(s) via {}", to.len(), address);

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)
        .with_context(|| format!("Failed to set up SMTP relay {}", address))?
        .port(smtp.port)
        .credentials(Credentials::new(smtp.username.clone(), smtp.password.clone()))
        .build();

    transport
        .send(message)
        .await
        .with_context(|| format!("Failed to submit email via {}", address))?;

    info!("Email submitted: {}", subject);

    Ok(())
}
