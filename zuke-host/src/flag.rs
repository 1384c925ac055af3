//! A set-once flag. Used for cancellation.
use async_std::channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared cancellation flag. The bridge sets it when the host stops accepting messages; the host
/// can await it to stop scheduling further test cases.
#[derive(Clone)]
pub struct Flag {
    recv: Receiver<()>,
    send: Arc<Mutex<Option<Sender<()>>>>,
    set: Arc<AtomicBool>,
}

impl Default for Flag {
    fn default() -> Self {
        Self::new()
    }
}

impl Flag {
    /// Create a new flag, initially unset
    pub fn new() -> Self {
        let (send, recv) = bounded(1);
        Self {
            recv,
            send: Arc::new(Mutex::new(Some(send))),
            set: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Wait until the flag is set
    pub async fn wait(&self) {
        let _ = self.recv.recv().await;
    }

    /// Set the flag
    pub fn set(&self) {
        self.set.store(true, Ordering::SeqCst);
        // close the channel
        let _ = self.send.lock().take();
    }

    /// Has the flag been set?
    pub fn is_set(&self) -> bool {
        self.set.load(Ordering::SeqCst)
    }
}
