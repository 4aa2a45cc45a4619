//! Wire protocol for Framecast.
//!
//! This crate defines what travels between a viewer and the engine:
//!
//! - **Identity** ([`ClientId`], [`SessionId`]): who is talking and which
//!   game they belong to.
//! - **Frames** ([`Frame`]): opaque rendered snapshots pushed down a
//!   stream. The engine never looks inside them.
//! - **Messages** ([`ClientMessage`], [`ServerMessage`]): the small
//!   control vocabulary carried next to the frame stream.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how messages become bytes.
//!
//! # Architecture
//!
//! ```text
//! Transport (bytes) → Protocol (ClientMessage) → Engine (session state)
//! Engine (Frame)    → Transport (binary push)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    CACHE_SUPPRESSION_HEADERS, ClientId, ClientMessage, Frame, Header,
    ServerMessage, SessionId, cache_suppression_headers,
};
