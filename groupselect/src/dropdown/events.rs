//! Event handling for the Dropdown widget.

use crate::event::{EventTick, Key, Modifiers};

use super::{Dropdown, EventResult};

/// An element rendered by a dropdown, parsed back from its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRef {
    Root,
    Trigger,
    List,
    Group(usize),
    Option(usize, usize),
}

impl ElementRef {
    /// Parse an element id produced by [`render`](super::render) for the
    /// dropdown `root`. Returns None for ids that belong to someone else.
    pub fn parse(root: &str, element_id: &str) -> Option<Self> {
        let rest = element_id.strip_prefix(root)?;
        if rest.is_empty() {
            return Some(ElementRef::Root);
        }
        let rest = rest.strip_prefix('-')?;
        match rest {
            "trigger" => Some(ElementRef::Trigger),
            "list" => Some(ElementRef::List),
            _ => {
                if let Some(g) = rest.strip_prefix("group-") {
                    return g.parse().ok().map(ElementRef::Group);
                }
                let (g, i) = rest.strip_prefix("opt-")?.split_once('-')?;
                Some(ElementRef::Option(g.parse().ok()?, i.parse().ok()?))
            }
        }
    }
}

impl Dropdown {
    /// Resolve an element id against this dropdown.
    pub fn element(&self, element_id: &str) -> Option<ElementRef> {
        ElementRef::parse(self.id(), element_id)
    }

    /// Handle a click on `element_id`.
    ///
    /// The trigger toggles (once per tick), an option is activated, other
    /// parts of the dropdown swallow the click. Ids that are not ours are
    /// ignored.
    pub fn dispatch_click(&self, element_id: &str, tick: EventTick) -> EventResult {
        if self.is_unmounted() {
            return EventResult::Ignored;
        }
        match self.element(element_id) {
            Some(ElementRef::Trigger) => {
                self.activate_trigger_at(tick);
                EventResult::Consumed
            }
            Some(ElementRef::Option(g, i)) => {
                if let Some(option) = self.catalog().option_at(g, i) {
                    let value = option.value.clone();
                    self.activate_option(&value);
                }
                EventResult::Consumed
            }
            Some(ElementRef::Root | ElementRef::List | ElementRef::Group(_)) => {
                EventResult::Consumed
            }
            None => EventResult::Ignored,
        }
    }

    /// Handle pointer movement over `element_id`: hovering an option moves
    /// the highlight to it.
    pub fn dispatch_hover(&self, element_id: &str) -> EventResult {
        if !self.is_open() {
            return EventResult::Ignored;
        }
        match self.element(element_id) {
            Some(ElementRef::Option(g, i)) => {
                self.set_highlight(g, i);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// Handle a key pressed while the trigger has focus.
    ///
    /// Escape is not handled here; the document listener installed while
    /// open takes care of it.
    pub fn dispatch_key(&self, key: Key, modifiers: Modifiers, tick: EventTick) -> EventResult {
        // Ignore keys with ctrl/alt modifiers
        if modifiers.ctrl || modifiers.alt || self.is_unmounted() {
            return EventResult::Ignored;
        }

        if !self.is_open() {
            // Closed state - open on Enter, Space, or Down
            return match key {
                Key::Enter | Key::Char(' ') | Key::Down => {
                    self.activate_trigger_at(tick);
                    EventResult::Consumed
                }
                _ => EventResult::Ignored,
            };
        }

        // Open state - navigate and select
        let len = self.catalog().len();
        match key {
            Key::Up => {
                self.set_flat_highlight(self.flat_highlight().saturating_sub(1));
                EventResult::Consumed
            }
            Key::Down => {
                self.set_flat_highlight(self.flat_highlight() + 1);
                EventResult::Consumed
            }
            Key::Home => {
                self.set_flat_highlight(0);
                EventResult::Consumed
            }
            Key::End => {
                self.set_flat_highlight(len.saturating_sub(1));
                EventResult::Consumed
            }
            Key::Enter | Key::Char(' ') => {
                let value = self
                    .highlight()
                    .and_then(|(g, i)| self.catalog().option_at(g, i))
                    .map(|option| option.value.clone());
                if let Some(value) = value {
                    self.activate_option(&value);
                }
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_element_ids() {
        assert_eq!(ElementRef::parse("fruit", "fruit"), Some(ElementRef::Root));
        assert_eq!(
            ElementRef::parse("fruit", "fruit-trigger"),
            Some(ElementRef::Trigger)
        );
        assert_eq!(ElementRef::parse("fruit", "fruit-list"), Some(ElementRef::List));
        assert_eq!(
            ElementRef::parse("fruit", "fruit-group-2"),
            Some(ElementRef::Group(2))
        );
        assert_eq!(
            ElementRef::parse("fruit", "fruit-opt-1-3"),
            Some(ElementRef::Option(1, 3))
        );
    }

    #[test]
    fn test_parse_rejects_foreign_ids() {
        assert_eq!(ElementRef::parse("fruit", "veg-trigger"), None);
        assert_eq!(ElementRef::parse("fruit", "fruitbowl"), None);
        assert_eq!(ElementRef::parse("fruit", "fruit-opt-x-1"), None);
        assert_eq!(ElementRef::parse("fruit", "fruit-opt-1"), None);
        assert_eq!(ElementRef::parse("fruit", "fruit-status"), None);
    }
}
