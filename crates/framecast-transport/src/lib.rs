//! Transport abstraction layer for Framecast.
//!
//! The engine never touches sockets. It holds a [`StreamHandle`] per
//! viewer and calls [`StreamHandle::write`], which never blocks: the
//! frame is queued for a per-connection writer task, or the call fails
//! immediately. A failed write is how the engine learns a viewer left.
//!
//! # Feature Flags
//!
//! - `websocket` (default): WebSocket transport via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
mod stream;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
pub use stream::{Outbound, StreamHandle, StreamReceiver};
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketTransport};

use std::fmt;
use std::net::SocketAddr;

/// Opaque identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// What the transport learned about a request while upgrading it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestInfo {
    /// Raw address of the TCP peer.
    pub peer: SocketAddr,
    /// Request path, e.g. `/solo`.
    pub path: String,
    /// Query string without the leading `?`.
    pub query: Option<String>,
    /// Raw `X-Forwarded-For` header value, if the request carried one.
    pub forwarded_for: Option<String>,
}

impl RequestInfo {
    /// Looks up a single query parameter. No percent-decoding; every
    /// parameter this server accepts is plain ASCII.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.as_deref()?.split('&').find_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (key == name).then_some(value)
        })
    }
}

/// Accepts new incoming connections.
pub trait Transport: Send + 'static {
    /// The connection type produced by this transport.
    type Connection: Connection;

    /// Waits for and accepts the next incoming connection.
    async fn accept(&mut self) -> Result<Self::Connection, TransportError>;

    /// The address the transport is listening on.
    fn local_addr(&self) -> std::io::Result<SocketAddr>;
}

/// One accepted connection: an inbound message source plus an outbound
/// [`StreamHandle`].
pub trait Connection: Send + 'static {
    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;

    /// Request metadata captured during the upgrade.
    fn request(&self) -> &RequestInfo;

    /// A handle for pushing frames and replies to this connection.
    fn stream(&self) -> StreamHandle;

    /// Receives the next inbound message.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, TransportError>;
}
