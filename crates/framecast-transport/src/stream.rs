//! Channel-backed outbound stream handles.
//!
//! A [`StreamHandle`] is the engine's side of a viewer connection. It
//! wraps a bounded `mpsc::Sender` and uses `try_send`, so a write from
//! inside the engine never waits on a slow socket. The transport owns the
//! matching [`StreamReceiver`] and drains it into the network.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use framecast_protocol::Frame;
use tokio::sync::{Notify, mpsc};

use crate::{ConnectionId, TransportError};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_connection_id() -> ConnectionId {
    ConnectionId::new(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
}

/// One unit of outbound traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// A rendered frame, pushed as-is.
    Frame(Frame),
    /// An encoded control message.
    Reply(Vec<u8>),
}

/// Close signal shared between a handle and its receiver.
#[derive(Debug, Default)]
struct CloseSignal {
    closed: AtomicBool,
    notify: Notify,
}

/// The engine-facing end of a viewer connection. Cheap to clone.
#[derive(Debug, Clone)]
pub struct StreamHandle {
    id: ConnectionId,
    tx: mpsc::Sender<Outbound>,
    signal: Arc<CloseSignal>,
}

impl StreamHandle {
    /// Creates a handle and its receiver with a fresh connection id.
    ///
    /// `capacity` bounds how many undelivered items may queue before
    /// writes start failing with [`TransportError::Congested`].
    pub fn channel(capacity: usize) -> (Self, StreamReceiver) {
        Self::with_id(next_connection_id(), capacity)
    }

    /// Same as [`channel`](Self::channel), with a caller-chosen id.
    pub fn with_id(id: ConnectionId, capacity: usize) -> (Self, StreamReceiver) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let signal = Arc::new(CloseSignal::default());
        let handle = Self {
            id,
            tx,
            signal: Arc::clone(&signal),
        };
        (handle, StreamReceiver { rx, signal })
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queues a frame for delivery.
    ///
    /// # Errors
    /// - [`TransportError::Congested`] if the buffer is full. The frame is
    ///   dropped but the stream stays usable.
    /// - [`TransportError::ConnectionClosed`] if the stream was closed or
    ///   its writer is gone.
    pub fn write(&self, frame: &Frame) -> Result<(), TransportError> {
        self.push(Outbound::Frame(frame.clone()))
    }

    /// Queues an encoded control message. Same error semantics as
    /// [`write`](Self::write).
    pub fn reply(&self, bytes: Vec<u8>) -> Result<(), TransportError> {
        self.push(Outbound::Reply(bytes))
    }

    /// Asks the writer to flush nothing further and close the connection.
    /// Idempotent.
    pub fn close(&self) {
        if !self.signal.closed.swap(true, Ordering::AcqRel) {
            self.signal.notify.notify_one();
        }
    }

    /// Whether the stream was closed locally or the writer went away.
    pub fn is_closed(&self) -> bool {
        self.signal.closed.load(Ordering::Acquire) || self.tx.is_closed()
    }

    fn push(&self, item: Outbound) -> Result<(), TransportError> {
        if self.signal.closed.load(Ordering::Acquire) {
            return Err(TransportError::ConnectionClosed(self.id.to_string()));
        }
        self.tx.try_send(item).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => TransportError::Congested(self.id),
            mpsc::error::TrySendError::Closed(_) => {
                TransportError::ConnectionClosed(self.id.to_string())
            }
        })
    }
}

/// The transport-facing end of a stream.
#[derive(Debug)]
pub struct StreamReceiver {
    rx: mpsc::Receiver<Outbound>,
    signal: Arc<CloseSignal>,
}

impl StreamReceiver {
    /// Waits for the next item. Returns `None` once the handle side asked
    /// to close or every handle was dropped.
    pub async fn recv(&mut self) -> Option<Outbound> {
        if self.signal.closed.load(Ordering::Acquire) {
            return None;
        }
        tokio::select! {
            biased;
            _ = self.signal.notify.notified() => None,
            item = self.rx.recv() => item,
        }
    }

    /// Takes an already-queued item without waiting, even after close.
    pub fn try_recv(&mut self) -> Option<Outbound> {
        self.rx.try_recv().ok()
    }

    /// Drains every queued item.
    pub fn drain(&mut self) -> Vec<Outbound> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Whether the handle side closed the stream.
    pub fn is_closed(&self) -> bool {
        self.signal.closed.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_queues_frame() {
        let (handle, mut rx) = StreamHandle::channel(4);
        handle.write(&Frame::from("a")).unwrap();
        assert_eq!(rx.try_recv(), Some(Outbound::Frame(Frame::from("a"))));
    }

    #[test]
    fn test_write_full_buffer_returns_congested() {
        let (handle, _rx) = StreamHandle::channel(1);
        handle.write(&Frame::from("a")).unwrap();
        let err = handle.write(&Frame::from("b")).unwrap_err();
        assert!(matches!(err, TransportError::Congested(id) if id == handle.id()));
        assert!(!err.is_disconnect());
    }

    #[test]
    fn test_write_after_receiver_dropped_returns_closed() {
        let (handle, rx) = StreamHandle::channel(4);
        drop(rx);
        let err = handle.write(&Frame::from("a")).unwrap_err();
        assert!(matches!(err, TransportError::ConnectionClosed(_)));
        assert!(err.is_disconnect());
        assert!(handle.is_closed());
    }

    #[test]
    fn test_close_rejects_later_writes() {
        let (handle, rx) = StreamHandle::channel(4);
        handle.close();
        handle.close();
        assert!(handle.is_closed());
        assert!(rx.is_closed());
        assert!(handle.write(&Frame::from("a")).is_err());
    }

    #[test]
    fn test_clones_share_close_state() {
        let (handle, _rx) = StreamHandle::channel(4);
        let copy = handle.clone();
        handle.close();
        assert!(copy.is_closed());
        assert_eq!(copy.id(), handle.id());
    }

    #[tokio::test]
    async fn test_recv_returns_none_after_close() {
        let (handle, mut rx) = StreamHandle::channel(4);
        handle.reply(b"ack".to_vec()).unwrap();
        assert_eq!(rx.recv().await, Some(Outbound::Reply(b"ack".to_vec())));
        handle.close();
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_recv_wakes_when_closed_while_waiting() {
        let (handle, mut rx) = StreamHandle::channel(4);
        let waiter = tokio::spawn(async move { rx.recv().await });
        tokio::task::yield_now().await;
        handle.close();
        assert_eq!(waiter.await.unwrap(), None);
    }

    #[test]
    fn test_channel_allocates_distinct_ids() {
        let (a, _ra) = StreamHandle::channel(1);
        let (b, _rb) = StreamHandle::channel(1);
        assert_ne!(a.id(), b.id());
    }
}
