//! Activity Event Dispatch
//!
//! Fans a decoded payload out onto the consumer sink from a spawned task,
//! bounded by a deadline. A panic in the fan-out task or a missed deadline is
//! reported on the sink as a [`DispatchError`] and never reaches the caller.
//!
//! On timeout the fan-out task is aborted. Abort is cooperative (the task
//! yields between deliveries), so one event that was already being delivered
//! can still land on the sink after the timeout error.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinError;
use tracing::{debug, error, instrument, warn};

use super::events::Delivery;
use super::payload::ActivityPayload;
use super::types::{DispatchError, SinkClosed};

/// Default deadline for one fan-out.
pub const DEFAULT_DISPATCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Destination of dispatched events and errors.
pub trait EventSink: Clone + Send + Sync + 'static {
    /// Post one item. Fails once the consumer has gone away.
    fn deliver(&self, item: Delivery) -> Result<(), SinkClosed>;

    /// Whether the consumer has gone away.
    fn is_closed(&self) -> bool;
}

impl EventSink for mpsc::UnboundedSender<Delivery> {
    fn deliver(&self, item: Delivery) -> Result<(), SinkClosed> {
        self.send(item).map_err(|_| SinkClosed)
    }

    fn is_closed(&self) -> bool {
        mpsc::UnboundedSender::is_closed(self)
    }
}

/// How a single dispatch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Payload was addressed to a single user and not fanned out.
    Skipped,
    /// Every event was delivered.
    Completed { delivered: usize },
    /// The consumer went away part way through.
    SinkClosed,
    /// The fan-out task panicked.
    Panicked,
    /// The deadline elapsed first.
    TimedOut,
}

#[derive(Debug, Clone)]
pub struct Dispatcher<S> {
    sink: S,
    timeout: Duration,
}

impl<S: EventSink> Dispatcher<S> {
    pub const fn new(sink: S, timeout: Duration) -> Self {
        Self { sink, timeout }
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Post an error on the sink, logging if nobody is listening.
    pub fn report(&self, err: DispatchError) {
        if self.sink.deliver(Err(err)).is_err() {
            warn!("Event sink closed, dropping dispatch error");
        }
    }

    /// Fan a payload out onto the sink.
    ///
    /// Waits at most `timeout` for the fan-out task.
    #[instrument(
        name = "webhook.dispatch",
        skip_all,
        fields(events = payload.event_count(), timeout = ?self.timeout)
    )]
    pub async fn dispatch(&self, payload: ActivityPayload) -> DispatchOutcome {
        // User-addressed envelopes are not fanned out. This mirrors the
        // upstream receiver; whether those envelopes should also produce member
        // events is still undecided.
        if let Some(for_user_id) = payload.for_user_id.as_deref() {
            debug!(for_user_id, "Skipping fan-out for user-addressed payload");
            return DispatchOutcome::Skipped;
        }

        let mut handle = tokio::spawn(fan_out(payload, self.sink.clone()));

        match tokio::time::timeout(self.timeout, &mut handle).await {
            Ok(Ok(Ok(delivered))) => {
                debug!(delivered, "Fan-out completed");
                DispatchOutcome::Completed { delivered }
            }
            Ok(Ok(Err(SinkClosed))) => {
                warn!("Event sink closed during fan-out");
                DispatchOutcome::SinkClosed
            }
            Ok(Err(e)) => {
                let message = join_error_message(e);
                error!(error = %message, "Fan-out task panicked");
                self.report(DispatchError::Panicked(message));
                DispatchOutcome::Panicked
            }
            Err(_) => {
                handle.abort();
                warn!("Fan-out did not finish before the deadline");
                self.report(DispatchError::TimedOut(self.timeout));
                DispatchOutcome::TimedOut
            }
        }
    }
}

async fn fan_out<S: EventSink>(payload: ActivityPayload, sink: S) -> Result<usize, SinkClosed> {
    let mut delivered = 0;

    for event in payload.into_events() {
        sink.deliver(Ok(event))?;
        delivered += 1;
        tokio::task::yield_now().await;
    }

    Ok(delivered)
}

fn join_error_message(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let panic = err.into_panic();
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
