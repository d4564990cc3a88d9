//! Dropdown construction.

use std::sync::atomic::{AtomicBool, AtomicUsize};
use std::sync::{Arc, Mutex, RwLock};

use crate::catalog::Catalog;
use crate::document::Document;
use crate::sample::DEFAULT_PLACEHOLDER;
use crate::shared::Shared;

use super::state::{ChangeHandler, Dropdown, DropdownInner, Selection};

/// A dropdown builder.
///
/// The two `build_*` methods are the two ownership models:
///
/// - [`build_uncontrolled`](Self::build_uncontrolled): the dropdown owns
///   the selection, starting from [`default_value`](Self::default_value)
///   or the first enabled option.
/// - [`build_controlled`](Self::build_controlled): the caller owns the
///   selection as a [`Shared`] value and must supply the change callback
///   that writes it. The dropdown never writes the value itself.
pub struct DropdownBuilder {
    catalog: Arc<Catalog>,
    id: Option<String>,
    placeholder: Option<String>,
    default_value: Option<String>,
    on_change: Option<ChangeHandler>,
}

impl Dropdown {
    /// Start building a dropdown over `catalog`.
    pub fn builder(catalog: impl Into<Arc<Catalog>>) -> DropdownBuilder {
        DropdownBuilder {
            catalog: catalog.into(),
            id: None,
            placeholder: None,
            default_value: None,
            on_change: None,
        }
    }
}

impl DropdownBuilder {
    /// Set the root element id. Defaults to `"select"`.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the placeholder text shown when no value is selected.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the initial value of an uncontrolled dropdown.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Notify `f` after an uncontrolled dropdown changes its value.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Build a dropdown that owns its selection.
    ///
    /// A default naming a missing or disabled option is rejected with a
    /// warning and leaves the selection unset.
    pub fn build_uncontrolled(self, document: &Document) -> Dropdown {
        let initial = match &self.default_value {
            Some(value) if self.catalog.is_selectable(value) => Some(value.clone()),
            Some(value) => {
                log::warn!(
                    "Dropdown default value {:?} is missing or disabled; starting unset",
                    value
                );
                None
            }
            None => self.catalog.first_enabled().map(|item| item.value.clone()),
        };
        let on_change = self.on_change.clone();
        self.finish(document, Selection::Owned(RwLock::new(initial)), on_change)
    }

    /// Build a dropdown whose selection is owned by the caller.
    ///
    /// The dropdown reads `value` on every render and calls `on_change`
    /// with the requested value on selection; writing it back is up to the
    /// caller.
    pub fn build_controlled<F>(self, document: &Document, value: Shared<Option<String>>, on_change: F) -> Dropdown
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        if self.default_value.is_some() || self.on_change.is_some() {
            log::debug!("Dropdown controlled build ignores default_value and on_change");
        }
        let on_change: ChangeHandler = Arc::new(on_change);
        self.finish(document, Selection::Controlled(value), Some(on_change))
    }

    fn finish(self, document: &Document, selection: Selection, on_change: Option<ChangeHandler>) -> Dropdown {
        let id = self.id.unwrap_or_else(|| "select".into());
        log::debug!(
            "Dropdown::build id={} options_count={}",
            id,
            self.catalog.len()
        );
        Dropdown::from_inner(DropdownInner {
            id,
            catalog: self.catalog,
            placeholder: self
                .placeholder
                .unwrap_or_else(|| DEFAULT_PLACEHOLDER.into()),
            document: document.clone(),
            selection,
            on_change,
            open: AtomicBool::new(false),
            unmounted: AtomicBool::new(false),
            highlight: AtomicUsize::new(0),
            last_trigger_tick: Mutex::new(None),
            listeners: Mutex::new(None),
            dirty: AtomicBool::new(false),
        })
    }
}
