//! Raw key events delivered by a platform event source.

/// Whether a key went down or came back up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    /// Key pressed. OS auto-repeat is also reported as `Down`.
    Down,
    /// Key released.
    Up,
}

/// A key event in the platform's native code space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub kind: KeyEventKind,
    /// Platform-native key code (evdev code on Linux, virtual-key code on Windows).
    pub code: u32,
    /// Printable character the platform associated with the event, if any.
    pub ch: Option<char>,
}

impl RawKeyEvent {
    pub fn down(code: u32) -> Self {
        Self {
            kind: KeyEventKind::Down,
            code,
            ch: None,
        }
    }

    pub fn up(code: u32) -> Self {
        Self {
            kind: KeyEventKind::Up,
            code,
            ch: None,
        }
    }

    /// Attach a printable-character fallback.
    pub fn with_char(self, ch: char) -> Self {
        Self {
            ch: Some(ch),
            ..self
        }
    }
}
