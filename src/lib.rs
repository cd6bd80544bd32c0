//! Global multi-key hotkey engine.
//!
//! Listens to keyboard events system-wide, translates platform key codes into
//! portable key names, tracks which keys are held and fires an [`Action`] when
//! the held keys exactly match a configured [`Binding`].
//!
//! # Features
//!
//! - **Exact chords** - a binding fires only when precisely its keys are
//!   down; an extra held key blocks it
//! - **Auto-repeat suppression** - repeated key-down events are ignored
//! - **Global cooldown** - at most one action per 100 ms
//! - **Non-blocking hand-off** - actions pass through a 10-slot queue to a
//!   separate consumer thread and are dropped when it is full, so key
//!   capture never stalls
//! - **Portable key names** - Linux evdev codes and Windows virtual-key
//!   codes map to the same names, so saved bindings move between platforms
//!
//! # Example
//!
//! ```no_run
//! use combo_hotkeys::{Action, BindingTable, HotkeyEngineBuilder};
//!
//! fn main() -> anyhow::Result<()> {
//!     let bindings = BindingTable::load("bindings.json")?;
//!     println!("reset is {}", bindings.get(Action::Reset));
//!
//!     let engine = HotkeyEngineBuilder::new()
//!         .bindings(bindings)
//!         .on_action(|action| println!("{} triggered", action))
//!         .build();
//!     engine.start()?;
//!
//!     std::thread::park();
//!     Ok(())
//! }
//! ```
//!
//! # Linux Requirements
//!
//! On Linux, the user must have permission to read from `/dev/input/event*` devices.
//! This typically means running as root or being a member of the `input` group.
//! Other platforms feed events through [`host_events`].

mod action;
mod binding;
mod config;
mod dispatch;
mod engine;
mod event;
mod key;
mod listener;
mod source;
mod translate;

#[cfg(target_os = "linux")]
mod linux;

pub use action::Action;
pub use binding::{Binding, BindingTable};
pub use dispatch::{channel as action_queue, ActionReceiver, ActionSender, QUEUE_CAPACITY};
pub use engine::{ComboEngine, ACTION_COOLDOWN};
pub use event::{KeyEventKind, RawKeyEvent};
pub use key::KeyName;
pub use listener::{HotkeyEngine, HotkeyEngineBuilder};
pub use source::{host_events, HostEventSender, HostEvents, KeySource};
pub use translate::{KeyTranslator, Platform};

#[cfg(target_os = "linux")]
pub use linux::{find_keyboards, EvdevSource};
