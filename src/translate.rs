//! Translation of platform-native key codes into canonical key names.
//!
//! Each supported platform family has its own code table. The tables are
//! independent but agree on every canonical name they produce, so a binding
//! written on one platform means the same key on the other.

mod input_codes;
mod virtual_keys;

use crate::key::KeyName;

/// Platform family whose native code space a translator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Linux input-event codes, as delivered by evdev.
    Linux,
    /// Windows virtual-key codes.
    Windows,
}

/// Maps raw key codes of one platform to [`KeyName`]s.
///
/// Stateless and cheap to copy; safe to call from the event-delivery thread.
#[derive(Clone, Copy)]
pub struct KeyTranslator {
    platform: Platform,
    lookup: fn(u32) -> Option<&'static str>,
}

impl KeyTranslator {
    pub const LINUX: KeyTranslator = KeyTranslator {
        platform: Platform::Linux,
        lookup: input_codes::key_name,
    };

    pub const WINDOWS: KeyTranslator = KeyTranslator {
        platform: Platform::Windows,
        lookup: virtual_keys::key_name,
    };

    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Linux => Self::LINUX,
            Platform::Windows => Self::WINDOWS,
        }
    }

    /// Translator for the platform this crate was built for.
    #[cfg(target_os = "windows")]
    pub fn native() -> Self {
        Self::WINDOWS
    }

    /// Translator for the platform this crate was built for.
    #[cfg(not(target_os = "windows"))]
    pub fn native() -> Self {
        Self::LINUX
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Translate a raw code, falling back to the printable character when the
    /// code has no table entry. Returns `None` for keys with neither.
    pub fn translate(&self, code: u32, fallback: Option<char>) -> Option<KeyName> {
        if let Some(name) = (self.lookup)(code) {
            return Some(KeyName::new(name));
        }
        fallback.and_then(printable_name)
    }
}

impl std::fmt::Debug for KeyTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyTranslator")
            .field("platform", &self.platform)
            .finish()
    }
}

impl Default for KeyTranslator {
    fn default() -> Self {
        Self::native()
    }
}

fn printable_name(ch: char) -> Option<KeyName> {
    match ch {
        ' '..='~' => Some(KeyName::new(ch.to_ascii_uppercase().to_string())),
        _ => None,
    }
}
