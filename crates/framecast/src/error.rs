//! Unified error type for Framecast.

use framecast_engine::EngineError;
use framecast_game::MoveError;
use framecast_lobby::LobbyError;
use framecast_protocol::ProtocolError;
use framecast_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates the `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum FramecastError {
    /// A transport-level error (bind, accept, write).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A matchmaking error.
    #[error(transparent)]
    Lobby(#[from] LobbyError),

    /// A rejected move.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// An engine error (unknown session, engine stopped).
    #[error(transparent)]
    Engine(#[from] EngineError),
}
