//! Error types for the engine layer.

use framecast_game::MoveError;
use framecast_protocol::ClientId;

/// Errors surfaced by engine operations.
///
/// None of these are fatal. A transport layer answers every one of them
/// with the neutral placeholder; the real outcome of a move reaches the
/// client through its stream.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The client has no session (never had one, or it was torn down).
    #[error("no session for client {0}")]
    SessionNotFound(ClientId),

    /// The move was refused. The offending viewer already sees the
    /// reason on their frame.
    #[error("invalid move: {0}")]
    InvalidMove(#[from] MoveError),

    /// The engine actor has stopped or its command channel is closed.
    #[error("engine is unavailable")]
    Unavailable,
}
