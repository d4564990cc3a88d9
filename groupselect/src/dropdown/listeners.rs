//! Document listeners held by an open dropdown.

use crate::document::{Document, ListenerId};

/// The pointer-down and key-down subscriptions of one open dropdown.
///
/// Released explicitly on every Open exit. Dropping an unreleased guard
/// releases it too, so a dropdown torn down while open leaves nothing
/// behind on the document.
pub(crate) struct ListenerGuard {
    document: Document,
    pointer_down: Option<ListenerId>,
    key_down: Option<ListenerId>,
}

impl ListenerGuard {
    pub(crate) fn new(document: Document, pointer_down: ListenerId, key_down: ListenerId) -> Self {
        Self {
            document,
            pointer_down: Some(pointer_down),
            key_down: Some(key_down),
        }
    }

    /// Unsubscribe both listeners.
    pub(crate) fn release(mut self) {
        self.unsubscribe_all();
    }

    fn unsubscribe_all(&mut self) {
        if let Some(id) = self.pointer_down.take() {
            self.document.unsubscribe(id);
        }
        if let Some(id) = self.key_down.take() {
            self.document.unsubscribe(id);
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.unsubscribe_all();
    }
}
