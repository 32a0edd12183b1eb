// livetail - app/stream.rs
//
// Live subscription to the server-sent-event log endpoint.
//
// Architecture:
//   - `StreamManager` lives on the UI thread; `run_stream_worker` runs on a
//     background thread driving a current-thread tokio runtime.
//   - An `Arc<AtomicBool>` cancel flag allows the UI to stop the stream.
//   - Entries and status changes are sent as `StreamEvent` messages over an
//     mpsc channel; the UI thread drains the channel each frame.
//   - At most one subscription is live at a time: `start()` always stops the
//     previous one first, replacing the channel so a stale worker can never
//     deliver into the new session.
//
// Failure handling: any transport failure (request error, non-success
// status, broken stream, or clean end-of-stream) enters a fixed 5-second
// retry countdown with one notification per second, then reconnects.
// Retries continue forever at the same interval. Entries emitted by the
// server during a disconnect window are lost; the endpoint offers no
// resume mechanism and none is invented here.
//
// A payload that fails to decode is skipped with a warning instead of
// tearing the stream down; one bad line must not kill the session.

use crate::core::model::{LogEntry, StreamEvent};
use crate::util::constants::{
    RETRY_DELAY_SECS, RETRY_TICK_MS, STREAM_CANCEL_CHECK_INTERVAL_MS,
};
use crate::util::error::StreamError;
use eventsource_stream::Eventsource;
use futures_util::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

// =============================================================================
// StreamManager
// =============================================================================

/// Manages the live log subscription on a background thread.
///
/// The manager lives on the UI thread and exposes a start/stop/poll
/// interface; all mutable application state stays with the caller.
pub struct StreamManager {
    /// Channel receiver for the UI to poll stream events.
    progress_rx: Option<mpsc::Receiver<StreamEvent>>,
    /// Cancel flag shared with the background thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl StreamManager {
    pub fn new() -> Self {
        Self {
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Open a subscription to `url`.
    ///
    /// Any previous subscription is stopped first: its cancel flag is set
    /// and its receiver dropped, so sends from the old worker fail and the
    /// old thread exits without touching the new session.
    pub fn start(&mut self, url: &str) {
        self.stop();

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));

        self.progress_rx = Some(rx);
        self.cancel_flag = Some(Arc::clone(&cancel));

        let url = url.to_string();
        tracing::info!(url = %url, "Log stream starting");
        std::thread::spawn(move || {
            run_stream_worker(url, tx, cancel);
        });
    }

    /// Request the background worker to stop and release the channel.
    pub fn stop(&mut self) {
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::SeqCst);
        }
        self.cancel_flag = None;
        self.progress_rx = None;
    }

    /// Returns `true` if a subscription worker is currently active.
    pub fn is_active(&self) -> bool {
        self.cancel_flag.is_some()
    }

    /// Drain up to `budget` pending stream events without blocking.
    pub fn poll_events(&self, budget: usize) -> Vec<StreamEvent> {
        let mut events = Vec::new();
        if let Some(ref rx) = self.progress_rx {
            while events.len() < budget {
                match rx.try_recv() {
                    Ok(ev) => events.push(ev),
                    Err(_) => break,
                }
            }
        }
        events
    }
}

impl Default for StreamManager {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Background worker
// =============================================================================

/// Thread entry point: builds a current-thread runtime and drives the
/// subscribe/countdown loop until cancelled.
fn run_stream_worker(url: String, tx: mpsc::Sender<StreamEvent>, cancel: Arc<AtomicBool>) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!(error = %e, "Cannot build stream runtime");
            let _ = tx.send(StreamEvent::Disconnected {
                reason: format!("runtime error: {e}"),
            });
            return;
        }
    };

    runtime.block_on(stream_loop(url, tx, cancel));
}

/// Reconnect loop: subscribe, and on any failure count down
/// `RETRY_DELAY_SECS` seconds (one notification per second) before the
/// next attempt. Exits only on cancellation or a closed channel.
async fn stream_loop(url: String, tx: mpsc::Sender<StreamEvent>, cancel: Arc<AtomicBool>) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                // UI channel closed — exit silently.
                return;
            }
        };
    }

    let client = match reqwest::Client::builder().build() {
        Ok(c) => c,
        Err(e) => {
            let err = StreamError::Client { source: e };
            tracing::error!(error = %err, "Stream worker cannot start");
            send!(StreamEvent::Disconnected {
                reason: err.to_string(),
            });
            return;
        }
    };

    loop {
        if cancel.load(Ordering::SeqCst) {
            return;
        }

        match subscribe(&client, &url, &tx, &cancel).await {
            // Cancelled or channel closed mid-subscription.
            Ok(()) => return,
            Err(err) => {
                tracing::warn!(url = %url, error = %err, "Log stream disconnected");
                send!(StreamEvent::Disconnected {
                    reason: err.to_string(),
                });
            }
        }

        // Countdown: 5, 4, 3, 2, 1 — one notification per second, then retry.
        for remaining in (1..=RETRY_DELAY_SECS).rev() {
            send!(StreamEvent::RetryCountdown {
                secs_remaining: remaining,
            });
            tokio::time::sleep(Duration::from_millis(RETRY_TICK_MS)).await;
            if cancel.load(Ordering::SeqCst) {
                return;
            }
        }
    }
}

/// One subscription attempt: open the request, decode the byte stream as
/// server-sent events, and forward entries until the stream breaks.
///
/// Returns `Ok(())` only when cancelled or when the UI channel has closed;
/// every transport outcome, including a clean end-of-stream, is an error
/// so the caller enters the retry path.
async fn subscribe(
    client: &reqwest::Client,
    url: &str,
    tx: &mpsc::Sender<StreamEvent>,
    cancel: &AtomicBool,
) -> Result<(), StreamError> {
    let response = client
        .get(url)
        .header(reqwest::header::ACCEPT, "text/event-stream")
        .send()
        .await
        .map_err(|e| StreamError::Request {
            url: url.to_string(),
            source: e,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(StreamError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    if tx
        .send(StreamEvent::Connected {
            url: url.to_string(),
        })
        .is_err()
    {
        return Ok(());
    }
    tracing::info!(url = %url, "Log stream connected");

    let mut events = Box::pin(response.bytes_stream().eventsource());

    loop {
        // Wake periodically so cancellation is honoured even on a quiet stream.
        let item = tokio::select! {
            item = events.next() => item,
            () = tokio::time::sleep(Duration::from_millis(STREAM_CANCEL_CHECK_INTERVAL_MS)) => {
                if cancel.load(Ordering::SeqCst) {
                    return Ok(());
                }
                continue;
            }
        };

        let Some(item) = item else {
            break;
        };
        if cancel.load(Ordering::SeqCst) {
            return Ok(());
        }

        match item {
            Ok(event) => match LogEntry::parse_event_data(&event.data) {
                Ok(entry) => {
                    if tx.send(StreamEvent::Entry { entry }).is_err() {
                        return Ok(());
                    }
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Skipping undecodable log event");
                    if tx
                        .send(StreamEvent::ParseError {
                            reason: err.to_string(),
                        })
                        .is_err()
                    {
                        return Ok(());
                    }
                }
            },
            Err(e) => return Err(StreamError::Transport { source: e }),
        }
    }

    Err(StreamError::Ended {
        url: url.to_string(),
    })
}
