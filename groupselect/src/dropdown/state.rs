//! Dropdown state machine.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock, Weak};

use crate::catalog::{Catalog, SelectOption};
use crate::document::Document;
use crate::event::{EventTick, Key, KeyDown, PointerDown};
use crate::shared::Shared;

use super::listeners::ListenerGuard;
use super::render::{self, RenderInput, SelectView};
use super::{DropdownState, SelectionMode};

/// Callback invoked with the newly selected value.
pub type ChangeHandler = Arc<dyn Fn(&str) + Send + Sync>;

/// Where the selected value lives.
pub(crate) enum Selection {
    Owned(RwLock<Option<String>>),
    Controlled(Shared<Option<String>>),
}

pub(crate) struct DropdownInner {
    pub(crate) id: String,
    pub(crate) catalog: Arc<Catalog>,
    pub(crate) placeholder: String,
    pub(crate) document: Document,
    pub(crate) selection: Selection,
    pub(crate) on_change: Option<ChangeHandler>,
    /// Whether the option list is showing
    pub(crate) open: AtomicBool,
    /// Set by `unmount`; every later operation is a no-op
    pub(crate) unmounted: AtomicBool,
    /// Highlighted option as a flat display-order index
    pub(crate) highlight: AtomicUsize,
    /// Tick of the last trigger activation
    pub(crate) last_trigger_tick: Mutex<Option<EventTick>>,
    /// Document listeners, present exactly while open
    pub(crate) listeners: Mutex<Option<ListenerGuard>>,
    /// Dirty flag for re-render
    pub(crate) dirty: AtomicBool,
}

impl Drop for DropdownInner {
    fn drop(&mut self) {
        let guard = match self.listeners.get_mut() {
            Ok(slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(guard) = guard {
            log::debug!("Dropdown::drop id={} releasing listeners", self.id);
            guard.release();
        }
    }
}

/// A grouped select widget.
///
/// `Dropdown` is a cheap handle; clones share the same state. It starts
/// closed. While open it holds a pointer-down and a key-down listener on its
/// [`Document`] so that a click outside its root element or an Escape
/// closes it. Those listeners are removed on every way out of the open
/// state, including [`unmount`](Dropdown::unmount) and dropping the last
/// handle.
///
/// # Example
///
/// ```
/// use groupselect::{Document, Dropdown};
/// use groupselect::sample::{food_catalog, SAMPLE_DEFAULT_VALUE};
///
/// let document = Document::new();
/// let fruit = Dropdown::builder(food_catalog())
///     .id("fruit")
///     .default_value(SAMPLE_DEFAULT_VALUE)
///     .build_uncontrolled(&document);
///
/// assert_eq!(fruit.render().trigger.label, "Grapes");
/// fruit.activate_trigger();
/// assert!(fruit.activate_option("apple"));
/// assert_eq!(fruit.selected_value().as_deref(), Some("apple"));
/// assert_eq!(document.listener_count(), 0);
/// ```
#[derive(Clone)]
pub struct Dropdown {
    pub(crate) inner: Arc<DropdownInner>,
}

impl std::fmt::Debug for Dropdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dropdown")
            .field("id", &self.inner.id)
            .field("state", &self.state())
            .field("mode", &self.mode())
            .field("selected", &self.selected_value())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Dropdown {
    pub(crate) fn from_inner(inner: DropdownInner) -> Self {
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    pub fn placeholder(&self) -> &str {
        &self.inner.placeholder
    }

    pub fn document(&self) -> &Document {
        &self.inner.document
    }

    pub fn mode(&self) -> SelectionMode {
        match self.inner.selection {
            Selection::Owned(_) => SelectionMode::Uncontrolled,
            Selection::Controlled(_) => SelectionMode::Controlled,
        }
    }

    // -------------------------------------------------------------------------
    // Open/close state
    // -------------------------------------------------------------------------

    pub fn state(&self) -> DropdownState {
        if self.is_open() {
            DropdownState::Open
        } else {
            DropdownState::Closed
        }
    }

    pub fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::SeqCst)
    }

    pub fn is_unmounted(&self) -> bool {
        self.inner.unmounted.load(Ordering::SeqCst)
    }

    /// Open the dropdown. Returns true if it was closed.
    pub fn open(&self) -> bool {
        if self.is_unmounted() || self.inner.open.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.inner
            .highlight
            .store(self.initial_highlight(), Ordering::SeqCst);
        self.install_listeners();
        self.inner.dirty.store(true, Ordering::SeqCst);
        log::debug!("Dropdown::open id={}", self.inner.id);
        true
    }

    /// Close the dropdown. Returns true if it was open.
    pub fn close(&self) -> bool {
        if !self.inner.open.swap(false, Ordering::SeqCst) {
            return false;
        }
        self.release_listeners();
        self.inner.dirty.store(true, Ordering::SeqCst);
        log::debug!("Dropdown::close id={}", self.inner.id);
        true
    }

    /// Close in response to an outside click or Escape. No-op when closed.
    pub fn request_close(&self) {
        self.close();
    }

    /// Toggle the dropdown. Every call toggles exactly once.
    pub fn activate_trigger(&self) -> DropdownState {
        if self.is_unmounted() {
            return self.state();
        }
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
        self.state()
    }

    /// Toggle the dropdown at most once per input event.
    ///
    /// A second activation carrying the same tick (one key press delivered
    /// both as a key and as a click, say) leaves the state alone.
    pub fn activate_trigger_at(&self, tick: EventTick) -> DropdownState {
        {
            let mut last = lock(&self.inner.last_trigger_tick);
            if *last == Some(tick) {
                log::debug!(
                    "Dropdown::activate_trigger_at id={} duplicate tick={:?}",
                    self.inner.id,
                    tick
                );
                return self.state();
            }
            *last = Some(tick);
        }
        self.activate_trigger()
    }

    /// Tear the dropdown down.
    ///
    /// Releases the document listeners even when open. Afterwards the
    /// dropdown stays closed and ignores every activation.
    pub fn unmount(&self) {
        if self.inner.unmounted.swap(true, Ordering::SeqCst) {
            return;
        }
        self.inner.open.store(false, Ordering::SeqCst);
        self.release_listeners();
        self.inner.dirty.store(true, Ordering::SeqCst);
        log::debug!("Dropdown::unmount id={}", self.inner.id);
    }

    fn install_listeners(&self) {
        let document = &self.inner.document;

        let weak = Arc::downgrade(&self.inner);
        let pointer_down = document.on_pointer_down(move |ev: &PointerDown| {
            if let Some(dropdown) = upgrade(&weak)
                && !ev.is_within(dropdown.id())
            {
                log::debug!(
                    "Dropdown outside pointer-down id={} target={:?}",
                    dropdown.id(),
                    ev.target()
                );
                dropdown.request_close();
            }
        });

        let weak = Arc::downgrade(&self.inner);
        let key_down = document.on_key_down(move |ev: &KeyDown| {
            if ev.key == Key::Escape
                && let Some(dropdown) = upgrade(&weak)
            {
                log::debug!("Dropdown escape id={}", dropdown.id());
                dropdown.request_close();
            }
        });

        let previous = lock(&self.inner.listeners).replace(ListenerGuard::new(
            document.clone(),
            pointer_down,
            key_down,
        ));
        if let Some(previous) = previous {
            previous.release();
        }
    }

    fn release_listeners(&self) {
        let guard = lock(&self.inner.listeners).take();
        if let Some(guard) = guard {
            guard.release();
        }
    }

    /// Whether the document listeners are currently installed.
    pub fn has_listeners(&self) -> bool {
        lock(&self.inner.listeners).is_some()
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// The current selected value, if any.
    pub fn selected_value(&self) -> Option<String> {
        match &self.inner.selection {
            Selection::Owned(value) => value
                .read()
                .map(|guard| guard.clone())
                .unwrap_or_else(|poisoned| poisoned.into_inner().clone()),
            Selection::Controlled(value) => value.get(),
        }
    }

    /// The option the current value refers to. First match wins.
    pub fn selected_option(&self) -> Option<SelectOption> {
        let value = self.selected_value()?;
        self.inner.catalog.find(&value).cloned()
    }

    /// Select `value` from the open list.
    ///
    /// Does nothing and returns false when the dropdown is closed or
    /// unmounted, or when `value` is missing from the catalog or disabled.
    /// Otherwise closes the dropdown, records the value (uncontrolled mode)
    /// and notifies the change handler exactly once.
    pub fn activate_option(&self, value: &str) -> bool {
        if self.is_unmounted() || !self.is_open() {
            log::debug!(
                "Dropdown::activate_option id={} value={} ignored: not open",
                self.inner.id,
                value
            );
            return false;
        }
        match self.inner.catalog.find(value) {
            None => {
                log::debug!(
                    "Dropdown::activate_option id={} value={} ignored: unknown",
                    self.inner.id,
                    value
                );
                return false;
            }
            Some(option) if option.disabled => {
                log::debug!(
                    "Dropdown::activate_option id={} value={} ignored: disabled",
                    self.inner.id,
                    value
                );
                return false;
            }
            Some(_) => {}
        }

        if let Selection::Owned(owned) = &self.inner.selection {
            let mut guard = owned
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *guard = Some(value.to_string());
        }
        self.close();

        log::debug!(
            "Dropdown::activate_option id={} value={} mode={:?}",
            self.inner.id,
            value,
            self.mode()
        );
        if let Some(handler) = self.inner.on_change.clone() {
            handler(value);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Highlight (keyboard navigation while open)
    // -------------------------------------------------------------------------

    fn initial_highlight(&self) -> usize {
        let catalog = &self.inner.catalog;
        self.selected_value()
            .and_then(|v| catalog.position(&v))
            .or_else(|| {
                catalog
                    .first_enabled()
                    .and_then(|item| catalog.position(&item.value))
            })
            .and_then(|(g, i)| catalog.flat_index(g, i))
            .unwrap_or(0)
    }

    /// Highlighted option as `(group, item)`, only while open.
    pub fn highlight(&self) -> Option<(usize, usize)> {
        if !self.is_open() {
            return None;
        }
        self.inner
            .catalog
            .position_of_flat(self.inner.highlight.load(Ordering::SeqCst))
    }

    /// Move the highlight to `(group, item)`. Ignored for positions
    /// outside the catalog.
    pub fn set_highlight(&self, group: usize, item: usize) {
        if let Some(index) = self.inner.catalog.flat_index(group, item) {
            self.inner.highlight.store(index, Ordering::SeqCst);
            self.inner.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub(crate) fn set_flat_highlight(&self, index: usize) {
        let max = self.inner.catalog.len().saturating_sub(1);
        self.inner.highlight.store(index.min(max), Ordering::SeqCst);
        self.inner.dirty.store(true, Ordering::SeqCst);
    }

    pub(crate) fn flat_highlight(&self) -> usize {
        self.inner.highlight.load(Ordering::SeqCst)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Build the view of the current state.
    pub fn render(&self) -> SelectView {
        let selected = self.selected_value();
        render::render(&RenderInput {
            id: &self.inner.id,
            catalog: &self.inner.catalog,
            selection: selected.as_deref(),
            open: self.is_open(),
            placeholder: &self.inner.placeholder,
            highlight: self.highlight(),
        })
    }

    /// Check if the dropdown has changed since the last render.
    ///
    /// Controlled values written by the caller count as changes.
    pub fn is_dirty(&self) -> bool {
        let external = match &self.inner.selection {
            Selection::Controlled(value) => value.is_dirty(),
            Selection::Owned(_) => false,
        };
        external || self.inner.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag, including the controlled value's.
    pub fn clear_dirty(&self) {
        if let Selection::Controlled(value) = &self.inner.selection {
            value.clear_dirty();
        }
        self.inner.dirty.store(false, Ordering::SeqCst);
    }
}

fn upgrade(weak: &Weak<DropdownInner>) -> Option<Dropdown> {
    weak.upgrade().map(|inner| Dropdown { inner })
}
