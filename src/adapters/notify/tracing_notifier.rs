//! Notifier that routes messages through the tracing subscriber.
//!
//! Useful as a headless default when no UI notifier is wired in.

use tracing::{error, info, warn};

use crate::ports::{Notifier, NotifyKind};

#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str, kind: NotifyKind) {
        match kind {
            NotifyKind::Info | NotifyKind::Success => info!(target: "notify", "{message}"),
            NotifyKind::Warning => warn!(target: "notify", "{message}"),
            NotifyKind::Error => error!(target: "notify", "{message}"),
        }
    }
}
