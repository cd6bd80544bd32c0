//! Listening lifecycle: event thread, action consumer and start/stop.

use crate::action::Action;
use crate::binding::BindingTable;
use crate::dispatch::{self, ActionReceiver, ActionSender};
use crate::engine::ComboEngine;
use crate::source::{HostEvents, KeySource};
use crate::translate::KeyTranslator;
use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};

type OpenSource = dyn Fn() -> Result<Box<dyn KeySource>> + Send + Sync;
type ActionHandler = dyn Fn(Action) + Send + Sync;

/// Builder for creating a [`HotkeyEngine`].
pub struct HotkeyEngineBuilder {
    bindings: BindingTable,
    translator: KeyTranslator,
    open_source: Option<Box<OpenSource>>,
    handler: Option<Arc<ActionHandler>>,
}

impl Default for HotkeyEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HotkeyEngineBuilder {
    /// Create a builder with the platform default bindings, translator and
    /// event source.
    pub fn new() -> Self {
        Self {
            bindings: BindingTable::platform_default(),
            translator: KeyTranslator::native(),
            open_source: None,
            handler: None,
        }
    }

    pub fn bindings(mut self, bindings: BindingTable) -> Self {
        self.bindings = bindings;
        self
    }

    /// Override the translator, e.g. when a host source reports codes of a
    /// platform other than the build target.
    pub fn translator(mut self, translator: KeyTranslator) -> Self {
        self.translator = translator;
        self
    }

    /// Use a custom event source. `open` runs on every `start()`; its error is
    /// the start failure.
    pub fn source<F>(mut self, open: F) -> Self
    where
        F: Fn() -> Result<Box<dyn KeySource>> + Send + Sync + 'static,
    {
        self.open_source = Some(Box::new(open));
        self
    }

    /// Take raw events from the host instead of opening an OS source.
    pub fn host_events(self, events: HostEvents) -> Self {
        self.source(move || Ok(Box::new(events.clone()) as Box<dyn KeySource>))
    }

    /// Called on the consumer thread for every emitted action.
    pub fn on_action<F>(mut self, handler: F) -> Self
    where
        F: Fn(Action) + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> HotkeyEngine {
        let open_source = self
            .open_source
            .unwrap_or_else(|| Box::new(open_native_source) as Box<OpenSource>);
        let handler = self.handler.unwrap_or_else(|| {
            Arc::new(|action: Action| {
                log::debug!("No action handler installed, ignoring {}", action)
            }) as Arc<ActionHandler>
        });

        HotkeyEngine {
            combos: Arc::new(ComboEngine::new(self.bindings)),
            translator: self.translator,
            open_source,
            handler,
            session: Mutex::new(None),
        }
    }
}

#[cfg(target_os = "linux")]
fn open_native_source() -> Result<Box<dyn KeySource>> {
    Ok(Box::new(crate::linux::EvdevSource::open()?))
}

#[cfg(not(target_os = "linux"))]
fn open_native_source() -> Result<Box<dyn KeySource>> {
    anyhow::bail!("Global key capture is not supported on this platform; use a host event source")
}

struct Session {
    running: Arc<AtomicBool>,
    events: Option<JoinHandle<()>>,
}

/// A global hotkey engine.
///
/// While listening, a dedicated thread reads raw key events, translates them
/// and runs them through the [`ComboEngine`]. Matched actions go through a
/// bounded queue to a second thread that calls the action handler, so a slow
/// handler never stalls key capture. When the queue is full, new actions are
/// dropped.
///
/// # Example
///
/// ```no_run
/// use combo_hotkeys::{Action, HotkeyEngineBuilder};
///
/// fn main() -> anyhow::Result<()> {
///     let engine = HotkeyEngineBuilder::new()
///         .on_action(|action| match action {
///             Action::Reset => println!("reset"),
///             other => println!("{}", other),
///         })
///         .build();
///
///     engine.start()?;
///     // ...
///     engine.stop();
///     Ok(())
/// }
/// ```
pub struct HotkeyEngine {
    combos: Arc<ComboEngine>,
    translator: KeyTranslator,
    open_source: Box<OpenSource>,
    handler: Arc<ActionHandler>,
    session: Mutex<Option<Session>>,
}

impl HotkeyEngine {
    fn session(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start listening. Does nothing if already listening.
    ///
    /// Fails if the event source cannot be opened; hotkeys then stay inactive
    /// until `start()` is called again.
    pub fn start(&self) -> Result<()> {
        let mut session = self.session();
        if let Some(current) = session.as_ref() {
            if current.running.load(Ordering::SeqCst) {
                return Ok(());
            }
        }
        // A previous session whose source ended on its own.
        if let Some(mut finished) = session.take() {
            if let Some(events) = finished.events.take() {
                let _ = events.join();
            }
        }

        let mut source = (self.open_source)().context("Failed to start hotkey listener")?;
        self.combos.reset();

        let (tx, rx) = dispatch::channel();
        spawn_consumer(rx, Arc::clone(&self.handler))?;

        let running = Arc::new(AtomicBool::new(true));
        let events = {
            let running = Arc::clone(&running);
            let combos = Arc::clone(&self.combos);
            let translator = self.translator;
            thread::Builder::new()
                .name("hotkey-events".to_string())
                .spawn(move || {
                    let result = source.run(&running, &mut |event| {
                        if let Some(action) = combos.process(&translator, event) {
                            deliver(&tx, action);
                        }
                    });
                    if let Err(e) = result {
                        log::error!("Error listening to keyboard events: {:?}", e);
                    }
                    running.store(false, Ordering::SeqCst);
                    // Dropping `tx` here lets the consumer drain and exit.
                })
                .context("Failed to spawn event thread")?
        };

        log::info!("Hotkey listener started");
        *session = Some(Session {
            running,
            events: Some(events),
        });
        Ok(())
    }

    /// Stop listening. Safe to call from any thread, including the action
    /// handler; actions already queued may still be delivered afterwards.
    pub fn stop(&self) {
        let Some(mut session) = self.session().take() else {
            return;
        };
        session.running.store(false, Ordering::SeqCst);

        if let Some(events) = session.events.take() {
            if events.thread().id() != thread::current().id() {
                let _ = events.join();
            }
        }
        log::info!("Hotkey listener stopped");
    }

    pub fn is_listening(&self) -> bool {
        self.session()
            .as_ref()
            .is_some_and(|s| s.running.load(Ordering::SeqCst))
    }

    /// Replace the bindings. Takes effect for the next key event.
    pub fn update_bindings(&self, bindings: BindingTable) {
        log::debug!("Updating hotkey bindings");
        self.combos.update_bindings(bindings);
    }

    pub fn bindings(&self) -> BindingTable {
        self.combos.bindings()
    }
}

impl Drop for HotkeyEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

fn deliver(tx: &ActionSender, action: Action) {
    if tx.send(action) {
        log::debug!("Hotkey action {}", action);
    }
}

fn spawn_consumer(rx: ActionReceiver, handler: Arc<ActionHandler>) -> Result<()> {
    thread::Builder::new()
        .name("hotkey-actions".to_string())
        .spawn(move || {
            for action in rx {
                handler(action);
            }
        })
        .context("Failed to spawn action consumer thread")?;
    Ok(())
}
