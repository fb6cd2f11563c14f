//! Notifier port - Injected user-notification capability.
//!
//! The coordinator reports operation outcomes through this port instead of
//! reaching for an ambient toast singleton; the UI layer supplies the
//! implementation that actually renders something.

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Port for surfacing user-visible messages.
pub trait Notifier: Send + Sync {
    /// Deliver a message to the user.
    fn notify(&self, message: &str, kind: NotifyKind);
}
