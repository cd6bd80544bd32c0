//! Bounded hand-off of actions from the event thread to the host.

use crate::action::Action;
use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, SyncSender, TrySendError};
use std::time::Duration;

/// Number of actions that may wait for the consumer before new ones are dropped.
pub const QUEUE_CAPACITY: usize = 10;

/// Create a dispatcher queue with [`QUEUE_CAPACITY`] slots.
pub fn channel() -> (ActionSender, ActionReceiver) {
    let (tx, rx) = mpsc::sync_channel(QUEUE_CAPACITY);
    (ActionSender { tx }, ActionReceiver { rx })
}

/// Producer side. Never blocks.
#[derive(Clone)]
pub struct ActionSender {
    tx: SyncSender<Action>,
}

impl ActionSender {
    /// Enqueue `action`, dropping it if the queue is full or the consumer is
    /// gone. Returns whether it was enqueued.
    pub fn send(&self, action: Action) -> bool {
        match self.tx.try_send(action) {
            Ok(()) => true,
            Err(TrySendError::Full(action)) => {
                log::debug!("Action queue full, dropping {}", action);
                false
            }
            Err(TrySendError::Disconnected(action)) => {
                log::debug!("Action consumer gone, dropping {}", action);
                false
            }
        }
    }
}

/// Consumer side.
pub struct ActionReceiver {
    rx: Receiver<Action>,
}

impl ActionReceiver {
    /// Block until the next action. Fails once every sender is dropped and
    /// the queue is drained.
    pub fn recv(&self) -> Result<Action, RecvError> {
        self.rx.recv()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Action, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    pub fn try_recv(&self) -> Result<Action, mpsc::TryRecvError> {
        self.rx.try_recv()
    }
}

impl Iterator for ActionReceiver {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        self.rx.recv().ok()
    }
}
