use super::messages::NoOp;
use futures::{Sink, SinkExt};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, info};

/// Interval between keep-alive messages; must stay below the service's
/// ~30 second idle window.
pub const DEFAULT_HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

/// Background task that keeps an idle socket open with `no-op` messages.
///
/// The task owns the send half of the connection. It stops when [`stop`] is
/// called or the handle is dropped, whichever comes first.
///
/// [`stop`]: Heartbeat::stop
pub struct Heartbeat<S> {
    stop_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<S>>,
}

impl<S> Heartbeat<S>
where
    S: Sink<Message> + Unpin + Send + 'static,
    S::Error: std::fmt::Display,
{
    /// Spawn the heartbeat task; the first no-op goes out one interval from now
    pub fn spawn(sink: S, interval: Duration) -> Self {
        let (stop_tx, stop_rx) = oneshot::channel();
        let handle = tokio::spawn(run(sink, interval, stop_rx));

        info!("Heartbeat started (every {:?})", interval);

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Signal the task to stop and wait for it, returning the send half
    pub async fn stop(mut self) -> Option<S> {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }

        let handle = self.handle.take()?;
        match handle.await {
            Ok(sink) => Some(sink),
            Err(e) => {
                error!("Heartbeat task panicked: {}", e);
                None
            }
        }
    }
}

impl<S> Drop for Heartbeat<S> {
    fn drop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn run<S>(mut sink: S, interval: Duration, mut stop_rx: oneshot::Receiver<()>) -> S
where
    S: Sink<Message> + Unpin,
    S::Error: std::fmt::Display,
{
    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let payload = match serde_json::to_string(&NoOp::default()) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Failed to encode no-op message: {}", e);
            return sink;
        }
    };

    loop {
        tokio::select! {
            biased;

            // A dropped sender counts as a stop signal too
            _ = &mut stop_rx => break,

            _ = ticker.tick() => {
                // A send stalled on a backed-up socket must not delay stop
                let sent = tokio::select! {
                    biased;
                    _ = &mut stop_rx => break,
                    sent = sink.send(Message::text(payload.clone())) => sent,
                };

                // The read loop reports the dead connection; nothing to surface here
                if let Err(e) = sent {
                    debug!("Heartbeat send failed, stopping: {}", e);
                    break;
                }
                debug!("Sent no-op heartbeat");
            }
        }
    }

    info!("Heartbeat stopped");
    sink
}
