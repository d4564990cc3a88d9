use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use groupselect::{Document, EventTick, Key, KeyDown, ListenerKind, PointerDown};

// ============================================================================
// Subscription Tests
// ============================================================================

#[test]
fn test_subscribe_and_unsubscribe() {
    let doc = Document::new();
    let a = doc.on_pointer_down(|_| {});
    let b = doc.on_key_down(|_| {});

    assert_eq!(doc.listener_count(), 2);
    assert_eq!(doc.listener_count_of(ListenerKind::PointerDown), 1);
    assert_eq!(doc.listener_count_of(ListenerKind::KeyDown), 1);
    assert_ne!(a, b);

    assert!(doc.unsubscribe(a));
    assert!(!doc.unsubscribe(a), "second unsubscribe is a no-op");
    assert!(!doc.is_registered(a));
    assert!(doc.is_registered(b));
    assert_eq!(doc.listener_count(), 1);
}

#[test]
fn test_clones_share_registry() {
    let doc = Document::new();
    let other = doc.clone();
    other.on_key_down(|_| {});
    assert_eq!(doc.listener_count(), 1);
}

// ============================================================================
// Dispatch Tests
// ============================================================================

#[test]
fn test_dispatch_reaches_matching_kind_only() {
    let doc = Document::new();
    let pointer_hits = Arc::new(AtomicUsize::new(0));
    let key_hits = Arc::new(AtomicUsize::new(0));

    let p = Arc::clone(&pointer_hits);
    doc.on_pointer_down(move |_| {
        p.fetch_add(1, Ordering::SeqCst);
    });
    let k = Arc::clone(&key_hits);
    doc.on_key_down(move |_| {
        k.fetch_add(1, Ordering::SeqCst);
    });

    assert_eq!(doc.dispatch_pointer_down(&PointerDown::nowhere(EventTick(1))), 1);
    assert_eq!(doc.dispatch_key_down(&KeyDown::new(EventTick(2), Key::Escape)), 1);
    assert_eq!(doc.dispatch_pointer_down(&PointerDown::nowhere(EventTick(3))), 1);

    assert_eq!(pointer_hits.load(Ordering::SeqCst), 2);
    assert_eq!(key_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dispatch_with_no_listeners() {
    let doc = Document::new();
    assert_eq!(doc.dispatch_pointer_down(&PointerDown::nowhere(EventTick(1))), 0);
    assert_eq!(doc.dispatch_key_down(&KeyDown::new(EventTick(2), Key::Escape)), 0);
}

#[test]
fn test_listeners_run_in_subscription_order() {
    let doc = Document::new();
    let order = Arc::new(Mutex::new(Vec::new()));
    for n in 0..3 {
        let order = Arc::clone(&order);
        doc.on_key_down(move |_| order.lock().unwrap().push(n));
    }
    doc.dispatch_key_down(&KeyDown::new(EventTick(1), Key::Enter));
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
}

#[test]
fn test_listener_added_during_dispatch_misses_current_event() {
    let doc = Document::new();
    let late_hits = Arc::new(AtomicUsize::new(0));

    let doc_in = doc.clone();
    let hits = Arc::clone(&late_hits);
    doc.on_pointer_down(move |_| {
        let hits = Arc::clone(&hits);
        doc_in.on_pointer_down(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        });
    });

    assert_eq!(doc.dispatch_pointer_down(&PointerDown::nowhere(EventTick(1))), 1);
    assert_eq!(late_hits.load(Ordering::SeqCst), 0);

    // The late listener sees the next event
    doc.dispatch_pointer_down(&PointerDown::nowhere(EventTick(2)));
    assert_eq!(late_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn test_listener_removed_during_dispatch_is_skipped() {
    let doc = Document::new();
    let second_hits = Arc::new(AtomicUsize::new(0));
    let second_id = Arc::new(Mutex::new(None));

    let doc_in = doc.clone();
    let id_slot = Arc::clone(&second_id);
    doc.on_key_down(move |_| {
        if let Some(id) = *id_slot.lock().unwrap() {
            doc_in.unsubscribe(id);
        }
    });
    let hits = Arc::clone(&second_hits);
    let id = doc.on_key_down(move |_| {
        hits.fetch_add(1, Ordering::SeqCst);
    });
    *second_id.lock().unwrap() = Some(id);

    assert_eq!(doc.dispatch_key_down(&KeyDown::new(EventTick(1), Key::Escape)), 1);
    assert_eq!(second_hits.load(Ordering::SeqCst), 0);
    assert_eq!(doc.listener_count(), 1);
}

#[test]
fn test_listener_may_unsubscribe_itself() {
    let doc = Document::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let own_id = Arc::new(Mutex::new(None));

    let doc_in = doc.clone();
    let slot = Arc::clone(&own_id);
    let h = Arc::clone(&hits);
    let id = doc.on_pointer_down(move |_| {
        h.fetch_add(1, Ordering::SeqCst);
        if let Some(id) = *slot.lock().unwrap() {
            doc_in.unsubscribe(id);
        }
    });
    *own_id.lock().unwrap() = Some(id);

    doc.dispatch_pointer_down(&PointerDown::nowhere(EventTick(1)));
    doc.dispatch_pointer_down(&PointerDown::nowhere(EventTick(2)));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
    assert_eq!(doc.listener_count(), 0);
}
