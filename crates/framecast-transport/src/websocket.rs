//! WebSocket transport implementation using `tokio-tungstenite`.
//!
//! Each accepted socket is split in two. The read half stays inside the
//! [`WebSocketConnection`] for the handler to poll; the write half is
//! moved into a spawned writer task that drains the connection's
//! [`StreamReceiver`]. Reads and writes therefore never contend for a
//! lock, and the engine's non-blocking [`StreamHandle::write`] is the only
//! way frames reach the socket.

use std::net::SocketAddr;

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};

use crate::stream::next_connection_id;
use crate::{
    Connection, ConnectionId, Outbound, RequestInfo, StreamHandle, StreamReceiver,
    Transport, TransportError,
};

type WsStream = tokio_tungstenite::WebSocketStream<tokio::net::TcpStream>;

/// Default per-connection outbound buffer, in items.
const DEFAULT_STREAM_BUFFER: usize = 8;

/// A WebSocket-based [`Transport`] that listens for incoming connections.
pub struct WebSocketTransport {
    listener: TcpListener,
    stream_buffer: usize,
}

impl WebSocketTransport {
    /// Binds a new WebSocket transport to the given address.
    pub async fn bind(addr: &str) -> Result<Self, TransportError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(TransportError::AcceptFailed)?;
        tracing::info!(addr, "WebSocket transport listening");
        Ok(Self {
            listener,
            stream_buffer: DEFAULT_STREAM_BUFFER,
        })
    }

    /// Sets how many outbound items each connection may buffer.
    pub fn with_stream_buffer(mut self, items: usize) -> Self {
        self.stream_buffer = items.max(1);
        self
    }
}

impl Transport for WebSocketTransport {
    type Connection = WebSocketConnection;

    async fn accept(&mut self) -> Result<Self::Connection, TransportError> {
        let (stream, peer) = self
            .listener
            .accept()
            .await
            .map_err(TransportError::AcceptFailed)?;

        let mut captured = None;
        let ws = tokio_tungstenite::accept_hdr_async(
            stream,
            |req: &Request, resp: Response| {
                captured = Some(describe_request(req, peer));
                Ok::<_, ErrorResponse>(resp)
            },
        )
        .await
        .map_err(|e| TransportError::Handshake(e.to_string()))?;

        let request = captured.ok_or_else(|| {
            TransportError::Handshake("upgrade completed without a request".into())
        })?;

        let id = next_connection_id();
        let (handle, outbound) = StreamHandle::with_id(id, self.stream_buffer);
        let (sink, reader) = ws.split();
        tokio::spawn(write_loop(id, sink, outbound));

        tracing::debug!(%id, %peer, path = %request.path, "accepted WebSocket connection");

        Ok(WebSocketConnection {
            id,
            request,
            handle,
            reader,
        })
    }

    fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

fn describe_request(req: &Request, peer: SocketAddr) -> RequestInfo {
    RequestInfo {
        peer,
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        forwarded_for: req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    }
}

/// Drains a connection's outbound queue into the socket until the queue
/// closes or the socket fails. Dropping the receiver on exit is what
/// makes later [`StreamHandle::write`] calls report the disconnect.
async fn write_loop(
    id: ConnectionId,
    mut sink: SplitSink<WsStream, Message>,
    mut outbound: StreamReceiver,
) {
    while let Some(item) = outbound.recv().await {
        let msg = match item {
            Outbound::Frame(frame) => Message::Binary(frame.as_bytes().to_vec().into()),
            Outbound::Reply(bytes) => match String::from_utf8(bytes) {
                Ok(text) => Message::Text(text.into()),
                Err(e) => Message::Binary(e.into_bytes().into()),
            },
        };
        if let Err(e) = sink.send(msg).await {
            tracing::debug!(%id, error = %e, "socket write failed");
            return;
        }
    }
    let _ = sink.close().await;
    tracing::trace!(%id, "writer finished");
}

/// A single WebSocket connection.
pub struct WebSocketConnection {
    id: ConnectionId,
    request: RequestInfo,
    handle: StreamHandle,
    reader: SplitStream<WsStream>,
}

impl Connection for WebSocketConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    fn request(&self) -> &RequestInfo {
        &self.request
    }

    fn stream(&self) -> StreamHandle {
        self.handle.clone()
    }

    async fn recv(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        loop {
            match self.reader.next().await {
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.into())),
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_bytes().to_vec()));
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/raw frame
                Some(Err(e)) => {
                    return Err(TransportError::ReceiveFailed(std::io::Error::new(
                        std::io::ErrorKind::ConnectionReset,
                        e,
                    )));
                }
            }
        }
    }
}
