//! Platform-agnostic key identifiers.

/// Canonical, platform-independent name of one physical key, such as
/// `"LeftControl"`, `"Numpad1"`, `"A"` or `"F5"`.
///
/// Names are produced by [`KeyTranslator`](crate::KeyTranslator). Two names
/// that differ only in ASCII case identify the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyName(String);

impl KeyName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-folded form used as held-key identity.
    pub fn folded(&self) -> String {
        fold(&self.0)
    }
}

impl std::fmt::Display for KeyName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for KeyName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

pub(crate) fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}
