//! Error types for the lobby layer.

use framecast_protocol::ClientId;

#[derive(Debug, thiserror::Error)]
pub enum LobbyError {
    /// The client already holds a place in the queue.
    #[error("client {0} is already waiting")]
    AlreadyWaiting(ClientId),

    /// The client is not in the queue.
    #[error("client {0} is not waiting")]
    NotWaiting(ClientId),
}
