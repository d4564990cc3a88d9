//! Headless grouped select (dropdown) widget.
//!
//! The crate is split the way a widget library usually is:
//!
//! - [`catalog`] holds the immutable, ordered groups of options.
//! - [`document`] is the document-level listener registry that open
//!   dropdowns subscribe to for outside-click and Escape dismissal.
//! - [`dropdown`] is the state machine itself, its event routing and its
//!   pure render function.
//!
//! Hosts (see the `groupselect-tui` crate) render [`SelectView`], hit-test
//! input and forward events to the [`Document`] and the [`Dropdown`].

pub mod catalog;
pub mod document;
pub mod dropdown;
pub mod error;
pub mod event;
pub mod sample;
pub mod shared;

pub use catalog::{Catalog, OptionGroup, SelectOption};
pub use document::{Document, ListenerId, ListenerKind};
pub use dropdown::render::{GroupView, ItemView, ListView, SelectView, TriggerView};
pub use dropdown::{Dropdown, DropdownBuilder, DropdownState, EventResult, SelectionMode};
pub use error::CatalogError;
pub use event::{EventTick, Key, KeyDown, Modifiers, MouseButton, PointerDown};
pub use shared::Shared;
