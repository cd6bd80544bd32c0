//! JSON persistence for binding tables.
//!
//! The on-disk form is an object keyed by action id, each value a list of key
//! names in display order:
//!
//! ```json
//! { "reset": ["Numpad0", "NumpadEnter"], "select_ct": ["LeftControl", "C"] }
//! ```
//!
//! Actions missing from the object take their platform default. An explicit
//! empty list keeps the action disabled.

use crate::action::Action;
use crate::binding::{Binding, BindingTable};
use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;

impl BindingTable {
    /// Parse a table from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text).context("Failed to parse bindings")?;
        Self::from_json_value(value)
    }

    /// Build a table from an already-parsed JSON object, e.g. the `hotkeys`
    /// section of a larger host configuration.
    pub fn from_json_value(value: Value) -> Result<Self> {
        let mut object: Map<String, Value> =
            serde_json::from_value(value).context("Bindings must be a JSON object")?;
        let mut table = Self::platform_default();

        for action in Action::ALL {
            if let Some(entry) = object.remove(action.id()) {
                let binding: Binding = serde_json::from_value(entry)
                    .with_context(|| format!("Invalid binding for {}", action))?;
                table.set(action, binding);
            }
        }

        for unknown in object.keys() {
            log::warn!("Ignoring binding for unknown action {:?}", unknown);
        }

        Ok(table)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize bindings")
    }

    /// Load a table from `path`. A missing file yields the platform defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_json(&text)
                .with_context(|| format!("Failed to load bindings from {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No bindings at {}, using defaults", path.display());
                Ok(Self::platform_default())
            }
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}
