//! RealtimeEventBridge - best-effort push channel with bounded reconnect.
//!
//! Owns the connection lifecycle `Disconnected -> Connecting -> Connected`
//! and feeds decoded events into the injected `QueueEventHandler`. The
//! bridge never owns session state; it is an optimization for latency, and
//! the system stays correct when it never connects.
//!
//! Reconnection is bounded: after `max_reconnect_attempts` consecutive
//! failures the bridge stays `Disconnected` until `connect` is called
//! again (which also resets the attempt counter). Backoff grows linearly
//! with the attempt number. `disconnect` closes the channel and cancels
//! any pending backoff timer.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::RealtimeConfig;
use crate::domain::foundation::{ServiceGroupId, StateMachine};
use crate::domain::realtime::ConnectionState;
use crate::ports::{EventChannel, QueueEventHandler, RealtimeTransport};

use super::messages::{decode_event, subscribe_message};

struct RunHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// Bridge between the realtime push channel and the event handler funnel.
pub struct RealtimeEventBridge {
    transport: Arc<dyn RealtimeTransport>,
    handler: Arc<dyn QueueEventHandler>,
    config: RealtimeConfig,
    state: Arc<watch::Sender<ConnectionState>>,
    run: Mutex<Option<RunHandle>>,
}

impl RealtimeEventBridge {
    pub fn new(
        transport: Arc<dyn RealtimeTransport>,
        handler: Arc<dyn QueueEventHandler>,
        config: RealtimeConfig,
    ) -> Self {
        let (state, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            transport,
            handler,
            config,
            state: Arc::new(state),
            run: Mutex::new(None),
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Watch connection state changes (for UI indicators and tests).
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state.subscribe()
    }

    /// Start (or restart) the bridge against the given service group.
    ///
    /// Any previous run is shut down first; the reconnect attempt counter
    /// starts fresh, so re-enabling after an exhausted budget works.
    pub async fn connect(&self, group: ServiceGroupId) {
        self.disconnect().await;

        if !self.config.enabled {
            debug!("realtime channel disabled by configuration");
            return;
        }

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_loop(
            self.transport.clone(),
            self.handler.clone(),
            self.config.clone(),
            self.state.clone(),
            group,
            shutdown_rx,
        ));

        *self.run.lock().await = Some(RunHandle {
            shutdown: shutdown_tx,
            task,
        });
    }

    /// Stop the bridge: close the channel and cancel any pending
    /// reconnect timer.
    pub async fn disconnect(&self) {
        if let Some(run) = self.run.lock().await.take() {
            let _ = run.shutdown.send(true);
            // Backstop in case the run loop is parked on I/O: aborting
            // drops the channel (closing the socket) and the backoff sleep.
            run.task.abort();
            let _ = run.task.await;
        }
        set_state(&self.state, ConnectionState::Disconnected);
    }
}

fn set_state(state: &watch::Sender<ConnectionState>, next: ConnectionState) {
    state.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        if !current.can_transition_to(&next) {
            warn!(from = %current, to = %next, "unexpected connection state transition");
        }
        *current = next;
        true
    });
}

/// Sleeps out the backoff before the next attempt.
///
/// Returns false when the retry budget is exhausted or shutdown was
/// signalled; the caller then stops reconnecting.
async fn wait_backoff(
    config: &RealtimeConfig,
    failures: u32,
    shutdown: &mut watch::Receiver<bool>,
) -> bool {
    if failures >= config.max_reconnect_attempts {
        warn!(failures, "reconnect budget exhausted; staying disconnected");
        return false;
    }

    let delay = config.backoff_delay(failures);
    debug!(delay_secs = delay.as_secs(), "scheduling reconnect");
    tokio::select! {
        _ = shutdown.changed() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

async fn run_loop(
    transport: Arc<dyn RealtimeTransport>,
    handler: Arc<dyn QueueEventHandler>,
    config: RealtimeConfig,
    state: Arc<watch::Sender<ConnectionState>>,
    group: ServiceGroupId,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut failures: u32 = 0;

    loop {
        set_state(&state, ConnectionState::Connecting);

        let connected = tokio::select! {
            _ = shutdown.changed() => break,
            result = transport.connect(&group) => result,
        };

        let mut channel = match connected {
            Ok(channel) => channel,
            Err(err) => {
                warn!(group = %group, attempt = failures + 1, error = %err, "realtime connect failed");
                set_state(&state, ConnectionState::Disconnected);
                failures += 1;
                if !wait_backoff(&config, failures, &mut shutdown).await {
                    break;
                }
                continue;
            }
        };

        // Transport connection and logical subscription are established
        // together: the subscribe frame goes out before anything else.
        if let Err(err) = channel.send(&subscribe_message(&group)).await {
            warn!(group = %group, error = %err, "subscribe handshake failed");
            set_state(&state, ConnectionState::Disconnected);
            failures += 1;
            if !wait_backoff(&config, failures, &mut shutdown).await {
                break;
            }
            continue;
        }

        info!(group = %group, "realtime channel connected");
        set_state(&state, ConnectionState::Connected);
        failures = 0;

        let stopped = read_frames(channel.as_mut(), handler.as_ref(), &mut shutdown).await;
        set_state(&state, ConnectionState::Disconnected);

        if stopped {
            break;
        }

        // Connection lost mid-stream counts toward the budget so a
        // backend that accepts and immediately drops does not hot-loop.
        failures += 1;
        if !wait_backoff(&config, failures, &mut shutdown).await {
            break;
        }
    }

    set_state(&state, ConnectionState::Disconnected);
}

/// Pumps frames into the handler until the channel drops or shutdown.
///
/// Returns true when stopped by shutdown, false on connection loss.
async fn read_frames(
    channel: &mut dyn EventChannel,
    handler: &dyn QueueEventHandler,
    shutdown: &mut watch::Receiver<bool>,
) -> bool {
    loop {
        let frame = tokio::select! {
            _ = shutdown.changed() => return true,
            frame = channel.next() => frame,
        };

        match frame {
            Some(Ok(text)) => {
                if let Some(event) = decode_event(&text) {
                    debug!(kind = event.kind(), handler = handler.name(), "delivering push event");
                    if let Err(err) = handler.handle(event).await {
                        warn!(handler = handler.name(), error = %err, "event handler failed");
                    }
                }
            }
            Some(Err(err)) => {
                warn!(error = %err, "realtime channel error");
                return false;
            }
            None => {
                info!("realtime channel closed by peer");
                return false;
            }
        }
    }
}
