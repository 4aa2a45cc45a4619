//! Client identity resolution.
//!
//! Clients never authenticate. A client is whoever connects from a given
//! address, and the address itself is never stored: it goes through a
//! one-way hash first. Two people behind one NAT therefore look like one
//! client.

use std::fmt::Write as _;
use std::net::IpAddr;

use framecast_protocol::ClientId;
use sha2::{Digest, Sha256};

/// A resolved client.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity {
    /// Map key for queues and sessions.
    pub id: ClientId,
    /// Hash of the source address. Matchmaking refuses to pair two
    /// entries with equal hashes.
    pub address_hash: String,
}

impl ClientIdentity {
    /// An identity whose id is the address hash itself.
    pub fn from_hash(hash: impl Into<String>) -> Self {
        let hash = hash.into();
        Self {
            id: ClientId::new(hash.clone()),
            address_hash: hash,
        }
    }
}

/// Derives a [`ClientIdentity`] from a connecting request.
///
/// `Send + Sync + 'static` because one resolver is shared by every
/// connection handler task.
pub trait IdentityResolver: Send + Sync + 'static {
    /// Resolves the client behind `source`. `forwarded_for` is the raw
    /// `X-Forwarded-For` header, when present.
    fn resolve(&self, source: IpAddr, forwarded_for: Option<&str>) -> ClientIdentity;
}

/// The default resolver: hex SHA-256 of the client address.
///
/// When a forwarded-for header is present its first entry is the client
/// address; later entries are proxies. Otherwise the TCP peer address is
/// used.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashedAddressResolver;

impl IdentityResolver for HashedAddressResolver {
    fn resolve(&self, source: IpAddr, forwarded_for: Option<&str>) -> ClientIdentity {
        let forwarded = forwarded_for
            .and_then(|header| header.split(',').next())
            .map(str::trim)
            .filter(|first| !first.is_empty());
        let hash = match forwarded {
            Some(address) => hash_address(address),
            None => hash_address(&source.to_string()),
        };
        ClientIdentity::from_hash(hash)
    }
}

/// Lowercase hex SHA-256 of `address`.
pub fn hash_address(address: &str) -> String {
    let digest = Sha256::digest(address.as_bytes());
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip(s: &str) -> IpAddr {
        s.parse().unwrap()
    }

    #[test]
    fn test_hash_address_is_hex_sha256() {
        // sha256("127.0.0.1")
        assert_eq!(
            hash_address("127.0.0.1"),
            "12ca17b49af2289436f303e0166030a21e525d266e209267433801a8fd4071a0"
        );
    }

    #[test]
    fn test_resolve_same_address_same_identity() {
        let resolver = HashedAddressResolver;
        let a = resolver.resolve(ip("10.1.1.1"), None);
        let b = resolver.resolve(ip("10.1.1.1"), None);
        assert_eq!(a, b);
        assert_eq!(a.id.as_str(), a.address_hash);
    }

    #[test]
    fn test_resolve_prefers_first_forwarded_hop() {
        let resolver = HashedAddressResolver;
        let identity = resolver.resolve(ip("10.0.0.1"), Some(" 203.0.113.9 , 10.0.0.1"));
        assert_eq!(identity.address_hash, hash_address("203.0.113.9"));
    }

    #[test]
    fn test_resolve_empty_forwarded_header_uses_peer() {
        let resolver = HashedAddressResolver;
        let identity = resolver.resolve(ip("10.0.0.1"), Some("  "));
        assert_eq!(identity.address_hash, hash_address("10.0.0.1"));
    }

    #[test]
    fn test_resolve_never_exposes_raw_address() {
        let identity = HashedAddressResolver.resolve(ip("192.168.7.7"), None);
        assert!(!identity.id.as_str().contains("192.168"));
        assert_eq!(identity.id.as_str().len(), 64);
    }
}
