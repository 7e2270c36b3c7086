//! Keyboard events and the overlay focus trap.

use std::str::FromStr;

use crate::error::NavError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Tab,
    Other,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
    /// The event target is an editable text field.
    pub in_text_input: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::default(),
            in_text_input: false,
        }
    }

    pub fn shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    pub fn in_text_input(mut self) -> Self {
        self.in_text_input = true;
        self
    }
}

/// Parses names like `right`, `ArrowLeft`, `esc`, `shift+tab`, `ctrl+left`.
impl FromStr for KeyEvent {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('+').map(str::trim).collect();
        let name = parts.pop().unwrap_or_default();
        let key = match name.to_ascii_lowercase().as_str() {
            "left" | "arrowleft" => Key::ArrowLeft,
            "right" | "arrowright" => Key::ArrowRight,
            "esc" | "escape" => Key::Escape,
            "tab" => Key::Tab,
            _ => return Err(NavError::UnknownKey(s.to_string())),
        };

        let mut event = KeyEvent::new(key);
        for modifier in parts {
            event = match modifier.to_ascii_lowercase().as_str() {
                "shift" => event.shift(),
                "ctrl" | "control" => event.ctrl(),
                "alt" | "option" => event.alt(),
                "meta" | "cmd" | "super" => event.meta(),
                _ => return Err(NavError::UnknownKey(s.to_string())),
            };
        }
        Ok(event)
    }
}

/// Cyclic focus among an overlay's focusable controls.
///
/// Index 0 is the close button. Tab moves forward, Shift+Tab backward, and
/// both wrap so focus never leaves the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusTrap {
    len: usize,
    current: usize,
}

impl FocusTrap {
    /// A trap over `len` controls; an overlay always has at least its close
    /// button.
    pub fn new(len: usize) -> Self {
        Self {
            len: len.max(1),
            current: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn focused(&self) -> usize {
        self.current
    }

    pub fn advance(&mut self, backwards: bool) -> usize {
        self.current = if backwards {
            (self.current + self.len - 1) % self.len
        } else {
            (self.current + 1) % self.len
        };
        self.current
    }
}
