//! Core protocol types.
//!
//! Everything here is either an identifier that other layers use as a map
//! key, or a value that crosses the wire.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A pseudonymous client identifier.
///
/// Produced by an identity resolver from the connecting request's source
/// address (a hex digest, never the raw address). Two different people
/// behind the same public address resolve to the same `ClientId`; that is
/// an accepted limitation, not a bug.
///
/// `#[serde(transparent)]` encodes it as the bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    /// Wraps an already-derived identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the full identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Prints a short prefix so log lines stay readable.
/// `tracing::info!(%client, "queued")` prints "client C-3fa2b9c1 queued".
impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let short = self.0.get(..8).unwrap_or(&self.0);
        write!(f, "C-{short}")
    }
}

/// A stable handle to one game session.
///
/// Session ids are allocated from a monotonically increasing counter and
/// never reused, so a timer that fires after its session was torn down
/// looks up a key that is simply absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Frame
// ---------------------------------------------------------------------------

/// An opaque rendered snapshot for one viewer.
///
/// The engine stores the latest frame per stream and resends it on every
/// broadcast tick, so cloning has to be cheap: the bytes live behind an
/// `Arc` and a clone is a reference-count bump.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Frame(Arc<[u8]>);

impl Frame {
    /// Creates a frame from any owned byte buffer.
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self(bytes.into())
    }

    /// An empty frame. Used before the renderer has produced anything.
    pub fn empty() -> Self {
        Self(Arc::from(&[][..]))
    }

    /// The raw frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({} bytes)", self.0.len())
    }
}

impl From<Vec<u8>> for Frame {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes.into())
    }
}

impl From<String> for Frame {
    fn from(text: String) -> Self {
        Self(text.into_bytes().into())
    }
}

impl From<&str> for Frame {
    fn from(text: &str) -> Self {
        Self(Arc::from(text.as_bytes()))
    }
}

// ---------------------------------------------------------------------------
// Cache suppression
// ---------------------------------------------------------------------------

/// Headers attached to every move-submission response so that no
/// intermediary caches the placeholder.
pub const CACHE_SUPPRESSION_HEADERS: [(&str, &str); 4] = [
    (
        "Cache-Control",
        "no-store, no-cache, must-revalidate, proxy-revalidate, max-age=0",
    ),
    ("Pragma", "no-cache"),
    ("Expires", "0"),
    ("Surrogate-Control", "no-store"),
];

/// A single name/value header pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Owned copy of [`CACHE_SUPPRESSION_HEADERS`], ready to serialize.
pub fn cache_suppression_headers() -> Vec<Header> {
    CACHE_SUPPRESSION_HEADERS
        .iter()
        .map(|(name, value)| Header {
            name: (*name).to_string(),
            value: (*value).to_string(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Control messages
// ---------------------------------------------------------------------------

/// A message sent by a viewer over an open stream.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
/// `{"type":"Move","position":"3"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Submit a move. The position is kept raw because its domain depends
    /// on the game: a column, a cell index, or a single letter.
    Move { position: String },
}

/// A control message sent by the server. Frames are not wrapped in this;
/// they travel as raw binary pushes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Immediate answer to a move submission. Always sent, whether or not
    /// the move was accepted; the real outcome arrives on the stream.
    MoveAck {
        headers: Vec<Header>,
        placeholder: Vec<u8>,
    },

    /// The request could not be routed (unknown path, malformed query).
    Rejected { reason: String },
}

// =========================================================================
// Tests
// =========================================================================
