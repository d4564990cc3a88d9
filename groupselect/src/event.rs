//! Input events understood by the document and by dropdowns.
//!
//! Hosts translate their native input (terminal, window system, test
//! harness) into these types.

/// Identifies one input event delivered by the host.
///
/// Hosts hand out increasing ticks, one per native event. A single logical
/// activation routed through several paths carries the same tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct EventTick(pub u64);

impl EventTick {
    /// The tick following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Default::default()
        }
    }

    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn alt() -> Self {
        Self {
            alt: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// A pointer-down event as seen by document-level listeners.
///
/// `path` lists the element ids under the pointer from the outermost
/// element to the deepest one. An empty path means nothing was hit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PointerDown {
    pub tick: EventTick,
    pub path: Vec<String>,
    pub x: u16,
    pub y: u16,
    pub button: MouseButton,
}

impl PointerDown {
    /// Pointer-down on the given element path.
    pub fn on<I, S>(tick: EventTick, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tick,
            path: path.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Pointer-down that hit no element at all.
    pub fn nowhere(tick: EventTick) -> Self {
        Self {
            tick,
            ..Default::default()
        }
    }

    /// Set the screen position.
    pub fn at(mut self, x: u16, y: u16) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Whether the element with `id` is the target or one of its ancestors.
    pub fn is_within(&self, id: &str) -> bool {
        self.path.iter().any(|p| p == id)
    }

    /// The deepest element hit, if any.
    pub fn target(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}

/// A key-down event as seen by document-level listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDown {
    pub tick: EventTick,
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyDown {
    pub fn new(tick: EventTick, key: Key) -> Self {
        Self {
            tick,
            key,
            modifiers: Modifiers::new(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_within_checks_every_ancestor() {
        let ev = PointerDown::on(EventTick(1), ["page", "fruit", "fruit-trigger"]);
        assert!(ev.is_within("fruit"));
        assert!(ev.is_within("fruit-trigger"));
        assert!(!ev.is_within("veg"));
        assert_eq!(ev.target(), Some("fruit-trigger"));
    }

    #[test]
    fn test_nowhere_has_no_target() {
        let ev = PointerDown::nowhere(EventTick(3)).at(4, 5);
        assert_eq!(ev.target(), None);
        assert!(!ev.is_within("fruit"));
        assert_eq!((ev.x, ev.y), (4, 5));
    }
}
