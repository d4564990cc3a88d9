//! Dropdown widget - a grouped select with outside-click and Escape dismissal.

mod builder;
pub mod events;
mod listeners;
pub mod render;
mod state;

pub use builder::DropdownBuilder;
pub use events::ElementRef;
pub use state::{ChangeHandler, Dropdown};

/// Whether the option list is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

impl DropdownState {
    pub fn is_open(self) -> bool {
        self == DropdownState::Open
    }
}

/// Who owns the selected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// The dropdown owns and mutates the selection.
    Uncontrolled,
    /// The caller owns the selection; the dropdown only requests changes.
    Controlled,
}

/// Result of handling an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    /// Check if the event was handled.
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}
