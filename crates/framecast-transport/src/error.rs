use crate::ConnectionId;

/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The remote end is gone. Writing to a closed stream is reported the
    /// same way as an explicit close.
    #[error("connection closed: {0}")]
    ConnectionClosed(String),

    /// The stream's outbound buffer is full. The write was dropped; the
    /// stream itself is still alive.
    #[error("connection {0} is congested")]
    Congested(ConnectionId),

    /// Sending data failed.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Receiving data failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// Binding or accepting connections failed.
    #[error("accept failed: {0}")]
    AcceptFailed(#[source] std::io::Error),

    /// The upgrade handshake was refused or malformed.
    #[error("handshake failed: {0}")]
    Handshake(String),
}

impl TransportError {
    /// Whether this error means the remote end can no longer be reached.
    pub fn is_disconnect(&self) -> bool {
        !matches!(self, Self::Congested(_))
    }
}
