//! Conversion from crossterm input to groupselect events.

use crossterm::event::{KeyCode, KeyModifiers, MouseButton as CtButton};
use groupselect::{Key, Modifiers, MouseButton};

/// Map a crossterm key code. Codes without a counterpart map to None.
pub fn key_from(code: KeyCode) -> Option<Key> {
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => Key::BackTab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}

pub fn modifiers_from(mods: KeyModifiers) -> Modifiers {
    Modifiers {
        shift: mods.contains(KeyModifiers::SHIFT),
        ctrl: mods.contains(KeyModifiers::CONTROL),
        alt: mods.contains(KeyModifiers::ALT),
    }
}

pub fn button_from(btn: CtButton) -> MouseButton {
    match btn {
        CtButton::Left => MouseButton::Left,
        CtButton::Right => MouseButton::Right,
        CtButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_from(KeyCode::Esc), Some(Key::Escape));
        assert_eq!(key_from(KeyCode::Char(' ')), Some(Key::Char(' ')));
        assert_eq!(key_from(KeyCode::CapsLock), None);
    }

    #[test]
    fn test_modifier_mapping() {
        let mods = modifiers_from(KeyModifiers::CONTROL | KeyModifiers::SHIFT);
        assert!(mods.ctrl && mods.shift && !mods.alt);
        assert!(modifiers_from(KeyModifiers::NONE).none());
    }
}
