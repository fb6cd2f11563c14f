//! Notifier that captures messages in memory for assertions.

use std::sync::Mutex;

use crate::ports::{Notifier, NotifyKind};

/// Captures notifications instead of displaying them.
#[derive(Debug, Default)]
pub struct InMemoryNotifier {
    messages: Mutex<Vec<(String, NotifyKind)>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything notified so far, oldest first.
    pub fn messages(&self) -> Vec<(String, NotifyKind)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.messages.lock().unwrap().clear();
    }
}

impl Notifier for InMemoryNotifier {
    fn notify(&self, message: &str, kind: NotifyKind) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), kind));
    }
}
