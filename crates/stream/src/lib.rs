//! Streaming primitives for delivering background results to a UI loop.
//!
//! Producers running on worker threads or async tasks push
//! [`StreamEnvelope`]s through an [`mpsc`] channel. Every envelope carries the
//! [`Generation`] of the request that produced it, so the consumer can drop
//! anything issued before the most recent request for the same source.
//!
//! ```
//! use std::sync::mpsc;
//!
//! use vidscout_stream::{DataStream, GenerationTracker};
//!
//! let (tx, rx) = mpsc::channel();
//! let mut tracker = GenerationTracker::default();
//!
//! let stale = DataStream::new(tx.clone(), tracker.advance(), "titles");
//! let fresh = DataStream::new(tx, tracker.advance(), "titles");
//! stale.send("old", true);
//! fresh.send("new", true);
//!
//! let applied: Vec<_> = rx
//!     .try_iter()
//!     .filter(|envelope| tracker.is_current(envelope.id))
//!     .map(|envelope| envelope.payload)
//!     .collect();
//! assert_eq!(applied, vec!["new"]);
//! ```
//!
//! [`mpsc`]: std::sync::mpsc

use std::fmt;
use std::sync::mpsc::Sender;

mod generation;

pub use generation::{Generation, GenerationTracker};

/// Message emitted by a background producer and delivered to the UI layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamEnvelope<M, P> {
    /// Generation of the request that produced this message.
    pub id: Generation,
    /// Stream-specific metadata describing the payload.
    pub kind: M,
    /// Payload delivered to the consumer.
    pub payload: P,
    /// Whether the producer finished streaming for this generation.
    pub complete: bool,
}

/// Owned handle for producing stream messages backed by an [`mpsc::Sender`].
///
/// The handle owns its sender so it can be moved into a spawned task.
///
/// [`mpsc::Sender`]: std::sync::mpsc::Sender
pub struct DataStream<M, P> {
    tx: Sender<StreamEnvelope<M, P>>,
    id: Generation,
    kind: M,
}

impl<M: Clone, P> DataStream<M, P> {
    #[must_use]
    pub fn new(tx: Sender<StreamEnvelope<M, P>>, id: Generation, kind: M) -> Self {
        Self { tx, id, kind }
    }

    #[must_use]
    pub fn id(&self) -> Generation {
        self.id
    }

    /// Emit a payload to the consumer. Returns `false` once the receiver is gone.
    pub fn send(&self, payload: P, complete: bool) -> bool {
        self.tx
            .send(StreamEnvelope {
                id: self.id,
                kind: self.kind.clone(),
                payload,
                complete,
            })
            .is_ok()
    }
}

impl<M: Clone, P> Clone for DataStream<M, P> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
            id: self.id,
            kind: self.kind.clone(),
        }
    }
}

impl<M: fmt::Debug, P> fmt::Debug for DataStream<M, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataStream")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;

    #[test]
    fn send_reports_closed_receiver() {
        let (tx, rx) = mpsc::channel::<StreamEnvelope<(), u8>>();
        let stream = DataStream::new(tx, Generation::new(3), ());
        assert!(stream.send(1, false));
        drop(rx);
        assert!(!stream.send(2, true));
    }

    #[test]
    fn envelopes_carry_the_stream_identity() {
        let (tx, rx) = mpsc::channel();
        let stream = DataStream::new(tx, Generation::new(9), "segments");
        stream.clone().send(4_u8, true);

        let envelope = rx.try_recv().expect("envelope");
        assert_eq!(envelope.id, Generation::new(9));
        assert_eq!(envelope.kind, "segments");
        assert_eq!(envelope.payload, 4);
        assert!(envelope.complete);
    }
}
