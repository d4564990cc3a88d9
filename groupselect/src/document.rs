//! Document-level listener registry.
//!
//! A [`Document`] stands in for the page a widget lives on. Widgets that need
//! to react to input anywhere on the page (an open dropdown closing on an
//! outside click or on Escape) subscribe here and unsubscribe when they no
//! longer care. The host dispatches every pointer-down and key-down to the
//! document.
//!
//! Dispatch works on a snapshot of the listener set taken when the dispatch
//! starts:
//! - listeners added during a dispatch do not see the current event
//! - listeners removed during a dispatch are skipped if they have not run
//! - no lock is held while a listener runs, so listeners may subscribe and
//!   unsubscribe freely

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::event::{KeyDown, PointerDown};

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl std::fmt::Display for ListenerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__listener_{}", self.0)
    }
}

/// Which document event a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    KeyDown,
}

pub type PointerHandler = Arc<dyn Fn(&PointerDown) + Send + Sync>;
pub type KeyHandler = Arc<dyn Fn(&KeyDown) + Send + Sync>;

#[derive(Clone)]
enum Handler {
    Pointer(PointerHandler),
    Key(KeyHandler),
}

impl Handler {
    fn kind(&self) -> ListenerKind {
        match self {
            Handler::Pointer(_) => ListenerKind::PointerDown,
            Handler::Key(_) => ListenerKind::KeyDown,
        }
    }
}

#[derive(Default)]
struct DocumentInner {
    next_id: u64,
    listeners: Vec<(ListenerId, Handler)>,
}

/// Registry of document-level pointer-down and key-down listeners.
///
/// Cheap to clone; clones share the same registry.
#[derive(Clone, Default)]
pub struct Document {
    inner: Arc<RwLock<DocumentInner>>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("pointer_down", &self.listener_count_of(ListenerKind::PointerDown))
            .field("key_down", &self.listener_count_of(ListenerKind::KeyDown))
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, DocumentInner> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DocumentInner> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn subscribe(&self, handler: Handler) -> ListenerId {
        let mut inner = self.write();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        log::debug!("Document::subscribe id={} kind={:?}", id, handler.kind());
        inner.listeners.push((id, handler));
        id
    }

    /// Listen for pointer-down events anywhere on the document.
    pub fn on_pointer_down<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&PointerDown) + Send + Sync + 'static,
    {
        self.subscribe(Handler::Pointer(Arc::new(handler)))
    }

    /// Listen for key-down events anywhere on the document.
    pub fn on_key_down<F>(&self, handler: F) -> ListenerId
    where
        F: Fn(&KeyDown) + Send + Sync + 'static,
    {
        self.subscribe(Handler::Key(Arc::new(handler)))
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.write();
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _)| *lid != id);
        let removed = inner.listeners.len() != before;
        if removed {
            log::debug!("Document::unsubscribe id={}", id);
        }
        removed
    }

    pub fn is_registered(&self, id: ListenerId) -> bool {
        self.read().listeners.iter().any(|(lid, _)| *lid == id)
    }

    /// Number of active listeners of all kinds.
    pub fn listener_count(&self) -> usize {
        self.read().listeners.len()
    }

    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.read()
            .listeners
            .iter()
            .filter(|(_, h)| h.kind() == kind)
            .count()
    }

    /// Deliver a pointer-down to every pointer-down listener.
    ///
    /// Returns the number of listeners that ran.
    pub fn dispatch_pointer_down(&self, event: &PointerDown) -> usize {
        let snapshot: Vec<(ListenerId, PointerHandler)> = self
            .read()
            .listeners
            .iter()
            .filter_map(|(id, h)| match h {
                Handler::Pointer(p) => Some((*id, Arc::clone(p))),
                Handler::Key(_) => None,
            })
            .collect();

        let mut ran = 0;
        for (id, handler) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            handler(event);
            ran += 1;
        }
        ran
    }

    /// Deliver a key-down to every key-down listener.
    ///
    /// Returns the number of listeners that ran.
    pub fn dispatch_key_down(&self, event: &KeyDown) -> usize {
        let snapshot: Vec<(ListenerId, KeyHandler)> = self
            .read()
            .listeners
            .iter()
            .filter_map(|(id, h)| match h {
                Handler::Key(k) => Some((*id, Arc::clone(k))),
                Handler::Pointer(_) => None,
            })
            .collect();

        let mut ran = 0;
        for (id, handler) in snapshot {
            if !self.is_registered(id) {
                continue;
            }
            handler(event);
            ran += 1;
        }
        ran
    }
}
