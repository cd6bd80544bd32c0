//! Raw key event sources.

use crate::event::RawKeyEvent;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// A system-wide stream of raw key events.
///
/// `run` is called on the dedicated event thread. It must hand every event to
/// `sink` in the order the OS reported them, and return soon after `running`
/// is cleared.
pub trait KeySource: Send {
    fn run(&mut self, running: &AtomicBool, sink: &mut dyn FnMut(RawKeyEvent)) -> Result<()>;
}

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Create a source fed by the host, for platforms where the host already owns
/// the keyboard hook.
pub fn host_events() -> (HostEventSender, HostEvents) {
    let (tx, rx) = mpsc::channel();
    let active = Arc::new(AtomicBool::new(false));
    (
        HostEventSender {
            tx,
            active: Arc::clone(&active),
        },
        HostEvents {
            rx: Arc::new(Mutex::new(rx)),
            active,
        },
    )
}

/// Pushes raw events into a [`HostEvents`] source.
#[derive(Clone)]
pub struct HostEventSender {
    tx: Sender<RawKeyEvent>,
    active: Arc<AtomicBool>,
}

impl HostEventSender {
    /// Forward one event. Events sent while no listener is running are
    /// discarded and `false` is returned.
    pub fn send(&self, event: RawKeyEvent) -> bool {
        self.is_listening() && self.tx.send(event).is_ok()
    }

    /// Whether a listener is currently consuming events.
    pub fn is_listening(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// A [`KeySource`] reading from a [`HostEventSender`].
///
/// Clones share the same stream.
#[derive(Clone)]
pub struct HostEvents {
    rx: Arc<Mutex<Receiver<RawKeyEvent>>>,
    active: Arc<AtomicBool>,
}

impl KeySource for HostEvents {
    fn run(&mut self, running: &AtomicBool, sink: &mut dyn FnMut(RawKeyEvent)) -> Result<()> {
        let rx = self.rx.lock().unwrap_or_else(PoisonError::into_inner);

        // Anything queued by a send that raced the end of the previous session.
        let stale = rx.try_iter().count();
        if stale > 0 {
            log::debug!("Drained {} stale host events", stale);
        }

        self.active.store(true, Ordering::SeqCst);
        while running.load(Ordering::Relaxed) {
            match rx.recv_timeout(POLL_INTERVAL) {
                Ok(event) => sink(event),
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    log::info!("Host event sender dropped, source finished");
                    break;
                }
            }
        }
        self.active.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn wait_until_listening(tx: &HostEventSender) {
        while !tx.is_listening() {
            thread::yield_now();
        }
    }

    #[test]
    fn test_delivers_in_order_until_stopped() {
        let (tx, mut source) = host_events();
        let running = Arc::new(AtomicBool::new(true));

        let worker = {
            let running = Arc::clone(&running);
            thread::spawn(move || {
                let mut seen = Vec::new();
                source
                    .run(&running, &mut |event| {
                        seen.push(event);
                        if seen.len() == 2 {
                            running.store(false, Ordering::SeqCst);
                        }
                    })
                    .unwrap();
                seen
            })
        };

        wait_until_listening(&tx);
        assert!(tx.send(RawKeyEvent::down(29)));
        assert!(tx.send(RawKeyEvent::up(29)));
        let seen = worker.join().unwrap();
        assert_eq!(seen, vec![RawKeyEvent::down(29), RawKeyEvent::up(29)]);
        assert!(!tx.is_listening());
    }

    #[test]
    fn test_ends_when_sender_dropped() {
        let (tx, mut source) = host_events();
        drop(tx);
        let running = AtomicBool::new(true);
        source.run(&running, &mut |_| {}).unwrap();
    }

    #[test]
    fn test_discards_events_while_idle() {
        let (tx, mut source) = host_events();
        assert!(!tx.send(RawKeyEvent::down(30)));
        drop(tx);

        let running = AtomicBool::new(true);
        let mut seen = Vec::new();
        source.run(&running, &mut |event| seen.push(event)).unwrap();
        assert!(seen.is_empty());
    }
}
