//! Frame delivery types and the channel feeding the panel.
//!
//! The host periodically delivers a [`Frame`]: the messages observed since
//! the last delivery, in receive order, plus a completion token the panel
//! must fire exactly once. [`channel_frames`] provides an mpsc pair so a
//! producer thread can feed an embedded UI.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, SendError, Sender};
use std::sync::Arc;

use serde_json::Value;

/// One message observed on a stream within a frame.
#[derive(Debug, Clone)]
pub struct MessageEvent {
    /// Stream identifier the message arrived on.
    pub topic: String,
    /// Monotonically increasing delivery counter.
    pub receive_order: u64,
    /// Structured message payload.
    pub payload: Value,
}

/// Completion token for a delivered frame.
///
/// Fires exactly once: explicitly via [`FrameDone::ack`], or on drop if the
/// consumer returned early. The host's delivery pipeline is therefore never
/// left waiting and can never be signalled twice.
pub struct FrameDone(Option<Box<dyn FnOnce() + Send>>);

impl FrameDone {
    pub fn new(on_done: impl FnOnce() + Send + 'static) -> FrameDone {
        FrameDone(Some(Box::new(on_done)))
    }

    /// Token that signals nothing; useful when constructing frames by hand.
    pub fn noop() -> FrameDone {
        FrameDone(None)
    }

    /// Signal that processing of the frame is complete.
    pub fn ack(mut self) {
        if let Some(on_done) = self.0.take() {
            on_done();
        }
    }
}

impl Drop for FrameDone {
    fn drop(&mut self) {
        if let Some(on_done) = self.0.take() {
            on_done();
        }
    }
}

impl fmt::Debug for FrameDone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FrameDone")
            .field(&if self.0.is_some() { "pending" } else { "fired" })
            .finish()
    }
}

/// A batch of messages delivered together with its completion token.
#[derive(Debug)]
pub struct Frame {
    pub messages: Vec<MessageEvent>,
    pub done: FrameDone,
}

/// Sender half for feeding frames into an embedded UI.
#[derive(Clone)]
pub struct FrameSink {
    tx: Sender<Frame>,
    next_order: Arc<AtomicU64>,
    acked: Arc<AtomicU64>,
}

impl FrameSink {
    /// Send one frame of `(topic, payload)` messages. Receive order is
    /// assigned here, in iteration order.
    pub fn send_frame<I>(&self, messages: I) -> Result<(), SendError<Frame>>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let messages = messages
            .into_iter()
            .map(|(topic, payload)| MessageEvent {
                topic,
                payload,
                receive_order: self.next_order.fetch_add(1, Ordering::Relaxed),
            })
            .collect();
        let acked = Arc::clone(&self.acked);
        let done = FrameDone::new(move || {
            acked.fetch_add(1, Ordering::Relaxed);
        });
        self.tx.send(Frame { messages, done })
    }

    /// Number of frames the consumer has acknowledged so far.
    pub fn acknowledged(&self) -> u64 {
        self.acked.load(Ordering::Relaxed)
    }
}

/// Create a new channel pair for frame delivery: `(FrameSink, Receiver<Frame>)`.
pub fn channel_frames() -> (FrameSink, Receiver<Frame>) {
    let (tx, rx) = std::sync::mpsc::channel();
    (
        FrameSink {
            tx,
            next_order: Arc::new(AtomicU64::new(0)),
            acked: Arc::new(AtomicU64::new(0)),
        },
        rx,
    )
}
