/// Keyboard keys and key chords

use std::fmt;
use winit::keyboard::KeyCode;

/// Keyboard key identifier (physical position, US layout names)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Key {
    // Modifiers
    LeftShift, RightShift,
    LeftControl, RightControl,
    LeftAlt, RightAlt,
    LeftSuper, RightSuper,

    // Control keys
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,
}

impl Key {
    /// Chord of this key and `other`, e.g. `Key::LeftControl.with(Key::Q)`
    pub fn with(self, other: Key) -> KeyChord {
        KeyChord::new([self, other])
    }

    pub fn is_modifier(&self) -> bool {
        matches!(
            self,
            Key::LeftShift | Key::RightShift
                | Key::LeftControl | Key::RightControl
                | Key::LeftAlt | Key::RightAlt
                | Key::LeftSuper | Key::RightSuper
        )
    }

    /// Translate a winit physical key code; `None` for keys not represented here
    pub fn from_winit(code: KeyCode) -> Option<Key> {
        let key = match code {
            KeyCode::ShiftLeft => Key::LeftShift,
            KeyCode::ShiftRight => Key::RightShift,
            KeyCode::ControlLeft => Key::LeftControl,
            KeyCode::ControlRight => Key::RightControl,
            KeyCode::AltLeft => Key::LeftAlt,
            KeyCode::AltRight => Key::RightAlt,
            KeyCode::SuperLeft => Key::LeftSuper,
            KeyCode::SuperRight => Key::RightSuper,

            KeyCode::Escape => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Space => Key::Space,
            KeyCode::Insert => Key::Insert,
            KeyCode::Delete => Key::Delete,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,

            KeyCode::ArrowUp => Key::ArrowUp,
            KeyCode::ArrowDown => Key::ArrowDown,
            KeyCode::ArrowLeft => Key::ArrowLeft,
            KeyCode::ArrowRight => Key::ArrowRight,

            KeyCode::KeyA => Key::A, KeyCode::KeyB => Key::B, KeyCode::KeyC => Key::C,
            KeyCode::KeyD => Key::D, KeyCode::KeyE => Key::E, KeyCode::KeyF => Key::F,
            KeyCode::KeyG => Key::G, KeyCode::KeyH => Key::H, KeyCode::KeyI => Key::I,
            KeyCode::KeyJ => Key::J, KeyCode::KeyK => Key::K, KeyCode::KeyL => Key::L,
            KeyCode::KeyM => Key::M, KeyCode::KeyN => Key::N, KeyCode::KeyO => Key::O,
            KeyCode::KeyP => Key::P, KeyCode::KeyQ => Key::Q, KeyCode::KeyR => Key::R,
            KeyCode::KeyS => Key::S, KeyCode::KeyT => Key::T, KeyCode::KeyU => Key::U,
            KeyCode::KeyV => Key::V, KeyCode::KeyW => Key::W, KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y, KeyCode::KeyZ => Key::Z,

            KeyCode::Digit0 => Key::Digit0, KeyCode::Digit1 => Key::Digit1,
            KeyCode::Digit2 => Key::Digit2, KeyCode::Digit3 => Key::Digit3,
            KeyCode::Digit4 => Key::Digit4, KeyCode::Digit5 => Key::Digit5,
            KeyCode::Digit6 => Key::Digit6, KeyCode::Digit7 => Key::Digit7,
            KeyCode::Digit8 => Key::Digit8, KeyCode::Digit9 => Key::Digit9,

            KeyCode::F1 => Key::F1, KeyCode::F2 => Key::F2, KeyCode::F3 => Key::F3,
            KeyCode::F4 => Key::F4, KeyCode::F5 => Key::F5, KeyCode::F6 => Key::F6,
            KeyCode::F7 => Key::F7, KeyCode::F8 => Key::F8, KeyCode::F9 => Key::F9,
            KeyCode::F10 => Key::F10, KeyCode::F11 => Key::F11, KeyCode::F12 => Key::F12,

            _ => return None,
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A set of keys that must all be held at once
///
/// Duplicates collapse and construction order is irrelevant:
/// `Ctrl+Q` and `Q+Ctrl` are the same chord.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyChord {
    /// Sorted, deduplicated
    keys: Vec<Key>,
}

impl KeyChord {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut keys: Vec<Key> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        Self { keys }
    }

    /// Extend the chord with one more key
    pub fn with(self, key: Key) -> KeyChord {
        KeyChord::new(self.keys.into_iter().chain(std::iter::once(key)))
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<Key> for KeyChord {
    fn from(key: Key) -> Self {
        KeyChord::new([key])
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        f.write_str(&names.join("+"))
    }
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
