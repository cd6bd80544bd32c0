//! Held-key tracking and combo matching.

use crate::action::Action;
use crate::binding::BindingTable;
use crate::event::{KeyEventKind, RawKeyEvent};
use crate::key::KeyName;
use crate::translate::KeyTranslator;
use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Minimum time between two emitted actions.
pub const ACTION_COOLDOWN: Duration = Duration::from_millis(100);

struct ComboState {
    /// Case-folded names of keys currently down.
    held: HashSet<String>,
    last_action: Option<Instant>,
    bindings: BindingTable,
}

/// Tracks which keys are down and decides when a configured combo fires.
///
/// All state sits behind one lock that is held only for the duration of a
/// single event or binding update.
pub struct ComboEngine {
    state: Mutex<ComboState>,
}

impl ComboEngine {
    pub fn new(bindings: BindingTable) -> Self {
        Self {
            state: Mutex::new(ComboState {
                held: HashSet::new(),
                last_action: None,
                bindings,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ComboState> {
        // Nothing in the critical sections can leave the state half-updated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Translate and apply a raw event. Unrecognized keys are ignored.
    pub fn process(&self, translator: &KeyTranslator, event: RawKeyEvent) -> Option<Action> {
        self.process_at(translator, event, Instant::now())
    }

    pub(crate) fn process_at(
        &self,
        translator: &KeyTranslator,
        event: RawKeyEvent,
        now: Instant,
    ) -> Option<Action> {
        let name = translator.translate(event.code, event.ch)?;
        match event.kind {
            KeyEventKind::Down => self.on_key_down_at(&name, now),
            KeyEventKind::Up => {
                self.on_key_up(&name);
                None
            }
        }
    }

    /// Record a key press and return the action it completes, if any.
    pub fn on_key_down(&self, name: &KeyName) -> Option<Action> {
        self.on_key_down_at(name, Instant::now())
    }

    pub(crate) fn on_key_down_at(&self, name: &KeyName, now: Instant) -> Option<Action> {
        let mut state = self.lock();

        // Auto-repeat
        if !state.held.insert(name.folded()) {
            return None;
        }

        if let Some(last) = state.last_action {
            if now.saturating_duration_since(last) < ACTION_COOLDOWN {
                return None;
            }
        }

        let action = state.bindings.find_match(&state.held)?;
        state.last_action = Some(now);
        Some(action)
    }

    /// Record a key release. Releasing a key that is not held is a no-op.
    pub fn on_key_up(&self, name: &KeyName) {
        self.lock().held.remove(&name.folded());
    }

    /// Replace the whole binding table. Held keys are kept and matched against
    /// the new table on the next key press.
    pub fn update_bindings(&self, bindings: BindingTable) {
        self.lock().bindings = bindings;
    }

    pub fn bindings(&self) -> BindingTable {
        self.lock().bindings.clone()
    }

    /// Forget held keys and the cooldown clock.
    pub fn reset(&self) {
        let mut state = self.lock();
        state.held.clear();
        state.last_action = None;
    }

    /// Number of keys currently considered down.
    pub fn held_count(&self) -> usize {
        self.lock().held.len()
    }

    pub fn is_held(&self, name: &KeyName) -> bool {
        self.lock().held.contains(&name.folded())
    }
}

impl Default for ComboEngine {
    fn default() -> Self {
        Self::new(BindingTable::platform_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::Binding;

    fn key(name: &str) -> KeyName {
        KeyName::from(name)
    }

    fn engine_with(action: Action, keys: &[&str]) -> ComboEngine {
        let table = BindingTable::default().with(action, Binding::new(keys.iter().copied()));
        ComboEngine::new(table)
    }

    #[test]
    fn test_unmapped_key_is_invisible() {
        let engine = ComboEngine::default();
        let t = KeyTranslator::LINUX;
        assert_eq!(engine.process(&t, RawKeyEvent::down(9999)), None);
        assert_eq!(
            engine.process(&t, RawKeyEvent::down(9999).with_char('\u{1}')),
            None
        );
        assert_eq!(engine.held_count(), 0);
    }

    #[test]
    fn test_auto_repeat_is_suppressed() {
        let engine = engine_with(Action::SelectT, &["A"]);
        let t0 = Instant::now();
        assert_eq!(engine.on_key_down_at(&key("A"), t0), Some(Action::SelectT));
        let later = t0 + Duration::from_secs(1);
        assert_eq!(engine.on_key_down_at(&key("A"), later), None);
        assert_eq!(engine.held_count(), 1);
    }

    #[test]
    fn test_extra_key_blocks_match() {
        let engine = engine_with(Action::SelectCt, &["LeftControl", "C"]);
        let t0 = Instant::now();
        assert_eq!(engine.on_key_down_at(&key("LeftShift"), t0), None);
        assert_eq!(engine.on_key_down_at(&key("LeftControl"), t0), None);
        assert_eq!(engine.on_key_down_at(&key("C"), t0), None);
    }

    #[test]
    fn test_exact_set_fires_once() {
        let engine = engine_with(Action::SelectCt, &["LeftControl", "C"]);
        let t0 = Instant::now();
        assert_eq!(engine.on_key_down_at(&key("LeftControl"), t0), None);
        assert_eq!(
            engine.on_key_down_at(&key("C"), t0),
            Some(Action::SelectCt)
        );
        let later = t0 + Duration::from_secs(1);
        assert_eq!(engine.on_key_down_at(&key("C"), later), None);
        engine.on_key_up(&key("C"));
        engine.on_key_up(&key("LeftControl"));
        assert_eq!(engine.held_count(), 0);
    }

    #[test]
    fn test_cooldown_between_actions() {
        let table = BindingTable::default()
            .with(Action::SelectCt, Binding::new(["F1"]))
            .with(Action::SelectT, Binding::new(["F2"]))
            .with(Action::SwapTeams, Binding::new(["F3"]));
        let engine = ComboEngine::new(table);
        let t0 = Instant::now();

        assert_eq!(engine.on_key_down_at(&key("F1"), t0), Some(Action::SelectCt));
        engine.on_key_up(&key("F1"));

        let t1 = t0 + Duration::from_millis(50);
        assert_eq!(engine.on_key_down_at(&key("F2"), t1), None);
        // Swallowed press is still held until released.
        assert!(engine.is_held(&key("F2")));
        engine.on_key_up(&key("F2"));

        let t2 = t0 + ACTION_COOLDOWN;
        assert_eq!(engine.on_key_down_at(&key("F3"), t2), Some(Action::SwapTeams));
    }

    #[test]
    fn test_release_unknown_key_is_noop() {
        let engine = ComboEngine::default();
        engine.on_key_up(&key("F9"));
        assert_eq!(engine.held_count(), 0);
    }

    #[test]
    fn test_case_folded_at_insertion() {
        let engine = engine_with(Action::SelectCt, &["LeftControl", "C"]);
        let t0 = Instant::now();
        engine.on_key_down_at(&key("c"), t0);
        engine.on_key_up(&key("C"));
        assert_eq!(engine.held_count(), 0);

        assert_eq!(engine.on_key_down_at(&key("leftcontrol"), t0), None);
        assert_eq!(
            engine.on_key_down_at(&key("c"), t0),
            Some(Action::SelectCt)
        );
    }

    #[test]
    fn test_update_bindings_applies_to_next_event() {
        let engine = engine_with(Action::Reset, &["F1"]);
        let t0 = Instant::now();
        engine.update_bindings(BindingTable::default().with(Action::Reset, Binding::new(["F2"])));

        assert_eq!(engine.on_key_down_at(&key("F1"), t0), None);
        engine.on_key_up(&key("F1"));
        assert_eq!(engine.on_key_down_at(&key("F2"), t0), Some(Action::Reset));
    }

    #[test]
    fn test_update_bindings_keeps_held_keys() {
        let engine = engine_with(Action::Reset, &["F1"]);
        let t0 = Instant::now();
        assert_eq!(engine.on_key_down_at(&key("LeftAlt"), t0), None);

        engine.update_bindings(
            BindingTable::default().with(Action::Reset, Binding::new(["LeftAlt", "R"])),
        );
        assert_eq!(engine.on_key_down_at(&key("R"), t0), Some(Action::Reset));
    }

    #[test]
    fn test_reset_clears_state() {
        let engine = engine_with(Action::Reset, &["F1"]);
        let t0 = Instant::now();
        assert_eq!(engine.on_key_down_at(&key("F1"), t0), Some(Action::Reset));
        engine.reset();
        assert_eq!(engine.held_count(), 0);
        // Cooldown forgotten too.
        assert_eq!(engine.on_key_down_at(&key("F1"), t0), Some(Action::Reset));
    }

    #[test]
    fn test_numpad_reset_end_to_end() {
        let table = BindingTable::default()
            .with(Action::Reset, Binding::new(["Numpad0", "NumpadEnter"]));
        let engine = ComboEngine::new(table);
        let t = KeyTranslator::LINUX;
        let t0 = Instant::now();

        // KEY_KP0, KEY_KPENTER
        assert_eq!(engine.process_at(&t, RawKeyEvent::down(82), t0), None);
        assert_eq!(
            engine.process_at(&t, RawKeyEvent::down(96), t0),
            Some(Action::Reset)
        );
        let later = t0 + Duration::from_secs(1);
        assert_eq!(engine.process_at(&t, RawKeyEvent::up(96), later), None);
        assert_eq!(engine.process_at(&t, RawKeyEvent::up(82), later), None);
        assert_eq!(engine.held_count(), 0);
    }
}
