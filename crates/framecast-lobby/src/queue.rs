//! The matchmaking queue.
//!
//! A plain FIFO. Pairing scans in arrival order and takes the first entry
//! whose address hash differs from the joiner's, so the longest-waiting
//! eligible client always gets the next game and nobody can be paired
//! with themselves from a second tab.
//!
//! # Concurrency note
//!
//! Like every store in the engine, the queue is a plain collection owned
//! by the engine actor. All access is serialized by the actor's command
//! loop; nothing here locks.

use std::collections::VecDeque;
use std::time::Duration;

use framecast_protocol::{ClientId, Frame};
use framecast_transport::StreamHandle;
use tokio::time::Instant;

use crate::{ClientIdentity, LobbyError};

/// A client waiting for an opponent.
#[derive(Debug, Clone)]
pub struct WaitingEntry {
    pub identity: ClientIdentity,
    pub stream: StreamHandle,
    /// The frame re-sent on every broadcast tick while waiting.
    pub frame: Frame,
    /// Last successful delivery (or request) from this client.
    pub last_active: Instant,
}

impl WaitingEntry {
    pub fn new(identity: ClientIdentity, stream: StreamHandle, frame: Frame) -> Self {
        Self {
            identity,
            stream,
            frame,
            last_active: Instant::now(),
        }
    }

    pub fn client(&self) -> &ClientId {
        &self.identity.id
    }
}

/// FIFO of [`WaitingEntry`]s.
#[derive(Debug, Default)]
pub struct MatchmakingQueue {
    entries: VecDeque<WaitingEntry>,
}

impl MatchmakingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a client to the tail.
    ///
    /// # Errors
    /// [`LobbyError::AlreadyWaiting`] if the client is already queued.
    /// The queue is unchanged.
    pub fn enqueue(&mut self, entry: WaitingEntry) -> Result<(), LobbyError> {
        if self.contains(entry.client()) {
            return Err(LobbyError::AlreadyWaiting(entry.client().clone()));
        }
        tracing::info!(client = %entry.client(), position = self.entries.len(), "client queued");
        self.entries.push_back(entry);
        Ok(())
    }

    /// Removes and returns the first entry `joining` may play against:
    /// the oldest one with a different client id and address hash.
    /// Returns `None` (queue unchanged) if nobody is eligible.
    pub fn pair(&mut self, joining: &ClientIdentity) -> Option<WaitingEntry> {
        let index = self.entries.iter().position(|entry| {
            let eligible = entry.identity.id != joining.id
                && entry.identity.address_hash != joining.address_hash;
            if !eligible {
                tracing::debug!(
                    waiting = %entry.client(),
                    joining = %joining.id,
                    "same address, not pairing"
                );
            }
            eligible
        })?;
        let entry = self.entries.remove(index)?;
        tracing::info!(
            waiting = %entry.client(),
            joining = %joining.id,
            "clients paired"
        );
        Some(entry)
    }

    /// Removes a client from the queue.
    ///
    /// # Errors
    /// [`LobbyError::NotWaiting`] if the client is not queued.
    pub fn remove(&mut self, client: &ClientId) -> Result<WaitingEntry, LobbyError> {
        let index = self
            .entries
            .iter()
            .position(|entry| entry.client() == client)
            .ok_or_else(|| LobbyError::NotWaiting(client.clone()))?;
        self.entries
            .remove(index)
            .ok_or_else(|| LobbyError::NotWaiting(client.clone()))
    }

    pub fn get(&self, client: &ClientId) -> Option<&WaitingEntry> {
        self.entries.iter().find(|entry| entry.client() == client)
    }

    pub fn get_mut(&mut self, client: &ClientId) -> Option<&mut WaitingEntry> {
        self.entries.iter_mut().find(|entry| entry.client() == client)
    }

    pub fn contains(&self, client: &ClientId) -> bool {
        self.get(client).is_some()
    }

    /// Entries in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &WaitingEntry> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut WaitingEntry> {
        self.entries.iter_mut()
    }

    /// Clients whose last activity is more than `threshold` before `now`.
    pub fn stale(&self, threshold: Duration, now: Instant) -> Vec<ClientId> {
        self.entries
            .iter()
            .filter(|entry| now.saturating_duration_since(entry.last_active) > threshold)
            .map(|entry| entry.client().clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =========================================================================
// Tests
// =========================================================================
