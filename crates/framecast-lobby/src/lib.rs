//! Who is connecting, and who they will play.
//!
//! # Key types
//!
//! - [`IdentityResolver`]: turns a request's source address into a
//!   [`ClientIdentity`]
//! - [`HashedAddressResolver`]: the default resolver (SHA-256 of the
//!   address, preferring the first `X-Forwarded-For` hop)
//! - [`MatchmakingQueue`]: FIFO of clients waiting for an opponent
//! - [`WaitingEntry`]: one queued client with its stream and frame

mod error;
mod identity;
mod queue;

pub use error::LobbyError;
pub use identity::{ClientIdentity, HashedAddressResolver, IdentityResolver, hash_address};
pub use queue::{MatchmakingQueue, WaitingEntry};
