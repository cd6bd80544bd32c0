//! Key combinations and the per-action binding table.

use crate::action::Action;
use crate::key::fold;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// An ordered list of key names that must be held together.
///
/// Order only matters for display; matching treats the keys as a set. An
/// empty binding disables its action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Binding {
    keys: Vec<String>,
}

impl Binding {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a binding string like `"LeftControl+C"` or `"Numpad1+NumpadAdd"`.
    ///
    /// A `+` that appears where a key name is expected is the plus key itself,
    /// so `"LeftControl++"` binds Control and `+`. The empty string parses to
    /// the disabled binding.
    pub fn parse(s: &str) -> Result<Self> {
        let mut keys = Vec::new();
        let mut current = String::new();

        for ch in s.trim().chars() {
            match ch {
                '+' if current.is_empty() => current.push('+'),
                '+' => keys.push(std::mem::take(&mut current)),
                c if c.is_whitespace() => bail!("Whitespace in binding: {:?}", s),
                _ if current == "+" => bail!("Expected separator after '+' in {:?}", s),
                c => current.push(c),
            }
        }

        if current.is_empty() {
            if !keys.is_empty() {
                bail!("Binding ends with a separator: {:?}", s);
            }
        } else {
            keys.push(current);
        }

        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Distinct case-folded key names.
    pub(crate) fn folded_set(&self) -> HashSet<String> {
        self.keys.iter().map(|k| fold(k)).collect()
    }

    /// True when `held` contains exactly this binding's keys and nothing else.
    /// `held` must hold case-folded names.
    pub(crate) fn matches(&self, held: &HashSet<String>) -> bool {
        if self.keys.is_empty() {
            return false;
        }
        let wanted = self.folded_set();
        wanted.len() == held.len() && wanted.iter().all(|k| held.contains(k))
    }
}

impl std::fmt::Display for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keys.join("+"))
    }
}

/// One binding for each [`Action`].
///
/// `Default` is the all-disabled table. Deserializing fills actions missing
/// from the input with [`platform_default`](Self::platform_default).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default = "BindingTable::platform_default")]
pub struct BindingTable {
    pub increment_ct: Binding,
    pub decrement_ct: Binding,
    pub increment_t: Binding,
    pub decrement_t: Binding,
    pub reset: Binding,
    pub select_ct: Binding,
    pub select_t: Binding,
    pub swap_teams: Binding,
}

impl BindingTable {
    /// Default bindings for the platform this crate was built for.
    pub fn platform_default() -> Self {
        Self {
            increment_ct: Binding::new(["Numpad1", "NumpadAdd"]),
            decrement_ct: Binding::new(["Numpad1", "NumpadSubtract"]),
            increment_t: Binding::new(["Numpad2", "NumpadAdd"]),
            decrement_t: Binding::new(["Numpad2", "NumpadSubtract"]),
            reset: default_reset(),
            select_ct: Binding::new(["LeftControl", "C"]),
            select_t: Binding::new(["LeftControl", "T"]),
            swap_teams: Binding::new(["LeftControl", "S"]),
        }
    }

    pub fn get(&self, action: Action) -> &Binding {
        match action {
            Action::IncrementCt => &self.increment_ct,
            Action::DecrementCt => &self.decrement_ct,
            Action::IncrementT => &self.increment_t,
            Action::DecrementT => &self.decrement_t,
            Action::Reset => &self.reset,
            Action::SelectCt => &self.select_ct,
            Action::SelectT => &self.select_t,
            Action::SwapTeams => &self.swap_teams,
        }
    }

    pub fn get_mut(&mut self, action: Action) -> &mut Binding {
        match action {
            Action::IncrementCt => &mut self.increment_ct,
            Action::DecrementCt => &mut self.decrement_ct,
            Action::IncrementT => &mut self.increment_t,
            Action::DecrementT => &mut self.decrement_t,
            Action::Reset => &mut self.reset,
            Action::SelectCt => &mut self.select_ct,
            Action::SelectT => &mut self.select_t,
            Action::SwapTeams => &mut self.swap_teams,
        }
    }

    pub fn set(&mut self, action: Action, binding: Binding) {
        *self.get_mut(action) = binding;
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, action: Action, binding: Binding) -> Self {
        self.set(action, binding);
        self
    }

    /// Bindings in evaluation priority order.
    pub fn iter(&self) -> impl Iterator<Item = (Action, &Binding)> + '_ {
        Action::ALL.into_iter().map(move |action| (action, self.get(action)))
    }

    /// First action, in priority order, whose binding exactly matches `held`.
    pub(crate) fn find_match(&self, held: &HashSet<String>) -> Option<Action> {
        self.iter()
            .find(|(_, binding)| binding.matches(held))
            .map(|(action, _)| action)
    }
}

#[cfg(target_os = "windows")]
fn default_reset() -> Binding {
    Binding::new(["Numpad0", "Return"])
}

#[cfg(not(target_os = "windows"))]
fn default_reset() -> Binding {
    Binding::new(["Numpad0", "NumpadEnter"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn held(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|k| fold(k)).collect()
    }

    #[test]
    fn test_parse_simple() {
        let binding = Binding::parse("F8").unwrap();
        assert_eq!(binding.keys(), ["F8"]);
    }

    #[test]
    fn test_parse_combo_keeps_order() {
        let binding = Binding::parse("Numpad1+NumpadAdd").unwrap();
        assert_eq!(binding.keys(), ["Numpad1", "NumpadAdd"]);
    }

    #[test]
    fn test_parse_plus_key() {
        assert_eq!(Binding::parse("+").unwrap().keys(), ["+"]);
        assert_eq!(
            Binding::parse("LeftControl++").unwrap().keys(),
            ["LeftControl", "+"]
        );
        assert_eq!(Binding::parse("++1").unwrap().keys(), ["+", "1"]);
    }

    #[test]
    fn test_parse_empty_is_disabled() {
        assert!(Binding::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_dangling_separator() {
        assert!(Binding::parse("LeftControl+").is_err());
        assert!(Binding::parse("Left Control+C").is_err());
        assert!(Binding::parse("A++B").is_err());
    }

    #[test]
    fn test_display() {
        let binding = Binding::new(["LeftControl", "C"]);
        assert_eq!(binding.to_string(), "LeftControl+C");
        assert_eq!(Binding::parse(&binding.to_string()).unwrap(), binding);
    }

    #[test]
    fn test_matches_exact_set_only() {
        let binding = Binding::new(["LeftControl", "C"]);
        assert!(binding.matches(&held(&["LeftControl", "C"])));
        assert!(!binding.matches(&held(&["LeftControl"])));
        assert!(!binding.matches(&held(&["LeftControl", "C", "LeftShift"])));
    }

    #[test]
    fn test_matches_ignores_case() {
        let binding = Binding::new(["leftcontrol", "c"]);
        assert!(binding.matches(&held(&["LeftControl", "C"])));
    }

    #[test]
    fn test_duplicate_keys_collapse() {
        let binding = Binding::new(["C", "c"]);
        assert!(binding.matches(&held(&["C"])));
    }

    #[test]
    fn test_empty_never_matches() {
        assert!(!Binding::default().matches(&HashSet::new()));
        assert!(!Binding::default().matches(&held(&["A"])));
    }

    #[test]
    fn test_find_match_respects_priority() {
        let same = Binding::new(["F1"]);
        let table = BindingTable::default()
            .with(Action::SwapTeams, same.clone())
            .with(Action::Reset, same);
        assert_eq!(table.find_match(&held(&["F1"])), Some(Action::Reset));
    }

    #[test]
    fn test_default_table_is_complete() {
        let table = BindingTable::platform_default();
        assert!(table.iter().all(|(_, binding)| !binding.is_empty()));
        assert_eq!(table.get(Action::SelectCt).to_string(), "LeftControl+C");
    }
}
