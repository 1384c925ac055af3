//! Messages sent to the host
//!
//! Every test case produces exactly two messages, in order: its [`Outcome`], then `Finished`.
//! Both carry the same start timestamp, elapsed time and captured output.

use crate::outcome::Outcome;
use chrono::{DateTime, Utc};
use futures::channel::mpsc;
use parking_lot::Mutex;

/// A message about one test case
#[derive(Debug, Clone)]
pub struct Message {
    /// Unique id of the test case
    pub test: String,
    /// Name of the test case as shown to the user
    pub display_name: String,
    /// When the case started running
    pub started: DateTime<Utc>,
    /// Elapsed time, in seconds
    pub time: f64,
    /// Captured output
    pub output: String,
    /// What the message reports
    pub kind: MessageKind,
}

/// The kinds of [`Message`]
#[derive(Debug, Clone)]
pub enum MessageKind {
    /// The case was skipped, passed, or failed
    Outcome(Outcome),
    /// The case is done. Always the last message for a case.
    Finished,
}

impl Message {
    /// Return the outcome, if this is an outcome message
    pub fn outcome(&self) -> Option<&Outcome> {
        match &self.kind {
            MessageKind::Outcome(o) => Some(o),
            MessageKind::Finished => None,
        }
    }

    /// Return true if this is a `Finished` message
    pub fn is_finished(&self) -> bool {
        matches!(self.kind, MessageKind::Finished)
    }
}

/// The host's message channel.
pub trait MessageBus: Send + Sync {
    /// Queue a message. Returns false if the host will not take any more messages (it is shutting
    /// down or applying backpressure), which callers treat as a request to cancel the run.
    fn queue(&self, message: Message) -> bool;
}

/// A [`MessageBus`] over a bounded channel. A full or closed channel rejects the message.
pub struct ChannelBus {
    send: Mutex<mpsc::Sender<Message>>,
}

impl ChannelBus {
    /// Create a bus and the receiver the host reads messages from
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Message>) {
        let (send, recv) = mpsc::channel(capacity);
        (
            Self {
                send: Mutex::new(send),
            },
            recv,
        )
    }
}

impl MessageBus for ChannelBus {
    fn queue(&self, message: Message) -> bool {
        self.send.lock().try_send(message).is_ok()
    }
}
