//! The session store: every queue entry, session, and client mapping one
//! engine instance knows about, plus the operations that mutate them.
//!
//! The store is owned by the engine actor and is never shared. Every
//! method runs to completion before the next command or timer is looked
//! at, so no handler observes another half-done. Handlers still re-check
//! that a session exists and has no outcome before acting on it: a timer
//! may have been armed long before it fires.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use framecast_game::{
    Board, Difficulty, Forfeit, MoveError, Outcome, Side, WordPuzzle, random_word,
};
use framecast_lobby::{ClientIdentity, MatchmakingQueue, WaitingEntry};
use framecast_protocol::{ClientId, Frame, SessionId};
use framecast_transport::{ConnectionId, StreamHandle};
use rand::Rng;
use serde::Serialize;
use tokio::time::Instant;

use crate::session::Applied;
use crate::timers::{TimerEvent, TimerKind, TimerQueue};
use crate::{EngineConfig, EngineError, Renderer, Seat, Session, SessionPhase};

/// Counts reported by [`EngineHandle::stats`](crate::EngineHandle::stats).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EngineStats {
    /// Clients waiting for an opponent.
    pub waiting: usize,
    /// Live two-human sessions, including those in their grace period.
    pub matches: usize,
    /// Live solo sessions.
    pub solos: usize,
}

pub(crate) struct SessionStore<R: Renderer> {
    config: EngineConfig,
    renderer: Arc<R>,
    queue: MatchmakingQueue,
    sessions: HashMap<SessionId, Session>,
    by_client: HashMap<ClientId, SessionId>,
    /// Never reused, so a late timer for a torn-down session finds nothing.
    next_session: u64,
    timers: TimerQueue,
}

impl<R: Renderer> SessionStore<R> {
    pub(crate) fn new(config: EngineConfig, renderer: Arc<R>, timers: TimerQueue) -> Self {
        Self {
            config,
            renderer,
            queue: MatchmakingQueue::new(),
            sessions: HashMap::new(),
            by_client: HashMap::new(),
            next_session: 1,
            timers,
        }
    }

    // -----------------------------------------------------------------------
    // Stream opening
    // -----------------------------------------------------------------------

    /// A client opened a stream. Re-attaches to their session if they have
    /// one, swaps the stream if they are already waiting, and otherwise
    /// pairs them with the oldest eligible waiting client or queues them.
    pub(crate) fn open_stream(&mut self, identity: ClientIdentity, stream: StreamHandle) {
        let client = identity.id.clone();

        if let Some(id) = self.by_client.get(&client).copied() {
            if self.reattach(id, &client, stream.clone()) {
                return;
            }
            self.by_client.remove(&client);
        }

        if let Some(entry) = self.queue.get_mut(&client) {
            let old = std::mem::replace(&mut entry.stream, stream);
            if old.id() != entry.stream.id() {
                old.close();
            }
            entry.last_active = Instant::now();
            let _ = entry.stream.write(&entry.frame);
            tracing::debug!(%client, "waiting stream replaced");
            return;
        }

        let Some(board) = self.config.game.new_board() else {
            self.start_solo(identity, stream, Difficulty::default());
            return;
        };

        match self.queue.pair(&identity) {
            Some(waiting) => self.start_match(waiting, identity, stream, board),
            None => {
                let frame = self.renderer.waiting(&client);
                let entry = WaitingEntry::new(identity, stream, frame);
                let _ = entry.stream.write(&entry.frame);
                if let Err(e) = self.queue.enqueue(entry) {
                    tracing::warn!(error = %e, "could not queue client");
                }
            }
        }
    }

    /// A client asked for a game against the AI. Whatever they had before
    /// (a queue slot or a session) is given up first.
    pub(crate) fn open_solo_stream(
        &mut self,
        identity: ClientIdentity,
        stream: StreamHandle,
        difficulty: Difficulty,
    ) {
        let client = identity.id.clone();
        if self.by_client.contains_key(&client) {
            self.disconnect(&client, None);
        }
        if let Ok(entry) = self.queue.remove(&client) {
            entry.stream.close();
        }
        self.start_solo(identity, stream, difficulty);
    }

    fn reattach(&mut self, id: SessionId, client: &ClientId, stream: StreamHandle) -> bool {
        let Some(session) = self.sessions.get_mut(&id) else {
            return false;
        };
        let Some(seat) = session.side_of(client).and_then(|side| session.seat_mut(side)) else {
            return false;
        };
        seat.attach(stream);
        let _ = seat.push();
        tracing::info!(session = %id, %client, "stream re-attached");
        true
    }

    fn start_match(
        &mut self,
        waiting: WaitingEntry,
        identity: ClientIdentity,
        stream: StreamHandle,
        board: Board,
    ) {
        let id = self.allocate_id();
        let mut first = Seat::new(waiting.identity.id, Some(waiting.stream));
        first.frame = waiting.frame;
        first.last_active = waiting.last_active;
        let second = Seat::new(identity.id, Some(stream));

        tracing::info!(
            session = %id,
            first = %first.client,
            second = %second.client,
            "match started"
        );
        self.by_client.insert(first.client.clone(), id);
        self.by_client.insert(second.client.clone(), id);
        let session = Session::multiplayer(
            id,
            self.config.game,
            board,
            first,
            second,
            self.config.initial_clock(),
        );
        self.sessions.insert(id, session);
        self.refresh(id);
        self.push_all(id);
    }

    fn start_solo(&mut self, identity: ClientIdentity, stream: StreamHandle, difficulty: Difficulty) {
        let id = self.allocate_id();
        let client = identity.id;
        let seat = Seat::new(client.clone(), Some(stream));
        let clock = self.config.initial_clock();
        let session = match self.config.game.new_board() {
            Some(board) => Session::versus_ai(id, self.config.game, board, seat, difficulty, clock),
            None => Session::puzzle(id, seat, WordPuzzle::new(self.draw_word()), clock),
        };

        tracing::info!(session = %id, %client, %difficulty, game = %self.config.game, "solo session started");
        self.by_client.insert(client, id);
        self.sessions.insert(id, session);
        self.refresh(id);
        self.push_all(id);
    }

    fn allocate_id(&mut self) -> SessionId {
        let id = SessionId(self.next_session);
        self.next_session += 1;
        id
    }

    fn draw_word(&self) -> String {
        random_word(&self.config.words, &mut rand::rng())
    }

    // -----------------------------------------------------------------------
    // Moves
    // -----------------------------------------------------------------------

    /// Applies a human move.
    ///
    /// Moves arriving after conclusion are ignored and report success; the
    /// viewer already sees the final frame.
    ///
    /// # Errors
    /// - [`EngineError::SessionNotFound`] if the client has no session
    /// - [`EngineError::InvalidMove`] if the move was refused; the reason
    ///   is also put on the mover's frame for a short while
    pub(crate) fn submit_move(&mut self, client: &ClientId, raw: &str) -> Result<(), EngineError> {
        let id = self
            .by_client
            .get(client)
            .copied()
            .ok_or_else(|| EngineError::SessionNotFound(client.clone()))?;
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or_else(|| EngineError::SessionNotFound(client.clone()))?;
        let side = session
            .side_of(client)
            .ok_or_else(|| EngineError::SessionNotFound(client.clone()))?;

        if let Some(seat) = session.seat_mut(side) {
            seat.last_active = Instant::now();
        }
        if session.outcome.is_some() {
            tracing::debug!(session = %id, %client, "move after conclusion ignored");
            return Ok(());
        }

        let result = session
            .check_turn(side)
            .and_then(|()| self.config.game.parse_position(raw))
            .and_then(|position| session.apply_move(side, position));
        if self.config.reset_clock_on_move && result.is_ok() {
            session.time_remaining = self.config.initial_clock();
        }

        match result {
            Err(e) => {
                self.reject(id, side, e);
                Err(EngineError::InvalidMove(e))
            }
            Ok(Applied::Continue) => {
                self.refresh(id);
                Ok(())
            }
            Ok(Applied::AiToMove { board, randomness }) => {
                self.schedule_ai(id, board, randomness);
                self.refresh(id);
                Ok(())
            }
            Ok(Applied::Concluded(outcome)) => {
                self.conclude(id, outcome, false);
                Ok(())
            }
        }
    }

    fn reject(&mut self, id: SessionId, side: Side, error: MoveError) {
        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };
        if let Some(seat) = session.seat_mut(side) {
            seat.message = Some(error.to_string());
        }
        let generation = session.timers.next_clear(side);
        let handle = self.timers.after(
            self.config.message_clear_delay,
            id,
            TimerKind::ClearMessage { side, generation },
        );
        session.timers.set_clear(side, handle);
        tracing::debug!(session = %id, ?side, reason = %error, "move rejected");
        self.refresh(id);
    }

    fn schedule_ai(&mut self, id: SessionId, board: Board, randomness: f64) {
        let (low, high) = self.config.ai_delay_range();
        let millis = rand::rng().random_range(low.as_millis()..=high.as_millis());
        let delay = Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX));
        let handle = self.timers.ai_move(delay, id, board, randomness);
        if let Some(session) = self.sessions.get_mut(&id) {
            session.timers.set_ai(handle);
        }
        tracing::debug!(session = %id, ?delay, "AI move scheduled");
    }

    /// Sets the outcome, puts the conclusion text on every frame and arms
    /// the grace timer. A session that already has an outcome keeps it.
    fn conclude(&mut self, id: SessionId, outcome: Outcome, clock_expired: bool) {
        let Some(session) = self.sessions.get_mut(&id) else {
            return;
        };
        if session.outcome.is_some() {
            return;
        }
        session.outcome = Some(outcome);
        session.timers.cancel_play();
        for &side in session.sides() {
            let message = session.conclusion_message(outcome, side, clock_expired);
            if let Some(seat) = session.seat_mut(side) {
                seat.message = Some(message);
            }
        }
        let handle = self
            .timers
            .after(self.config.grace_period, id, TimerKind::Teardown);
        session.timers.set_teardown(handle);
        tracing::info!(session = %id, ?outcome, clock_expired, "session concluded");
        self.refresh(id);
    }

    // -----------------------------------------------------------------------
    // Timers
    // -----------------------------------------------------------------------

    pub(crate) fn on_timer(&mut self, event: TimerEvent) {
        let id = event.session;
        let clock = self.config.initial_clock();
        let word = matches!(event.kind, TimerKind::Teardown).then(|| self.draw_word());
        let Some(session) = self.sessions.get_mut(&id) else {
            tracing::trace!(session = %id, kind = ?event.kind, "timer for absent session");
            return;
        };

        match event.kind {
            TimerKind::Teardown => {
                session.timers.teardown_fired();
                if session.is_puzzle() && session.reset_puzzle(word.unwrap_or_default(), clock) {
                    tracing::info!(session = %id, "puzzle reset");
                    self.refresh(id);
                } else {
                    self.teardown(id);
                }
            }
            TimerKind::ClearMessage { side, generation } => {
                if !session.timers.clear_fired(side, generation) {
                    tracing::trace!(session = %id, ?side, "superseded message clear");
                    return;
                }
                if session.outcome.is_some() {
                    return;
                }
                if let Some(seat) = session.seat_mut(side) {
                    seat.message = None;
                }
                self.refresh(id);
            }
            TimerKind::AiMove(None) => {
                session.timers.ai_fired();
                tracing::warn!(session = %id, "AI found no move");
                session.abandon_ai_move();
                self.refresh(id);
            }
            TimerKind::AiMove(Some(position)) => {
                session.timers.ai_fired();
                match session.apply_ai_move(position) {
                    Ok(None) => {
                        if self.config.reset_clock_on_move {
                            session.time_remaining = clock;
                        }
                        self.refresh(id);
                    }
                    Ok(Some(outcome)) => self.conclude(id, outcome, false),
                    Err(MoveError::Concluded) => {}
                    Err(e) => {
                        tracing::warn!(session = %id, position, error = %e, "AI move rejected");
                        session.abandon_ai_move();
                        self.refresh(id);
                    }
                }
            }
        }
    }

    /// One turn-clock tick: every running session loses a second, and any
    /// clock that reaches zero concludes its session.
    pub(crate) fn clock_tick(&mut self) {
        let mut ticked = Vec::new();
        let mut expired = Vec::new();
        for session in self.sessions.values_mut() {
            if session.outcome.is_some() {
                continue;
            }
            let Some(left) = session.time_remaining.as_mut() else {
                continue;
            };
            *left = left.saturating_sub(1);
            if *left == 0 {
                expired.push((session.id, session.clock_outcome()));
            } else {
                ticked.push(session.id);
            }
        }
        for id in ticked {
            self.refresh(id);
        }
        for (id, outcome) in expired {
            tracing::info!(session = %id, "turn clock expired");
            self.conclude(id, outcome, true);
        }
    }

    // -----------------------------------------------------------------------
    // Broadcast and reaping
    // -----------------------------------------------------------------------

    /// Resends every stored frame. A full stream is skipped for this tick;
    /// a closed one is handled as a disconnect.
    pub(crate) fn broadcast(&mut self, now: Instant) {
        let mut lost: Vec<(ClientId, ConnectionId)> = Vec::new();

        for entry in self.queue.iter_mut() {
            match entry.stream.write(&entry.frame) {
                Ok(()) => entry.last_active = now,
                Err(e) if e.is_disconnect() => lost.push((entry.client().clone(), entry.stream.id())),
                Err(e) => tracing::trace!(client = %entry.client(), error = %e, "skipped congested stream"),
            }
        }

        for session in self.sessions.values_mut() {
            for &side in session.sides() {
                let Some(seat) = session.seat_mut(side) else {
                    continue;
                };
                let Some(stream) = &seat.stream else {
                    continue;
                };
                match stream.write(&seat.frame) {
                    Ok(()) => seat.last_active = now,
                    Err(e) if e.is_disconnect() => lost.push((seat.client.clone(), stream.id())),
                    Err(e) => tracing::trace!(client = %seat.client, error = %e, "skipped congested stream"),
                }
            }
        }

        for (client, conn) in lost {
            tracing::debug!(%client, %conn, "stream write failed");
            self.disconnect(&client, Some(conn));
        }
    }

    /// Evicts every waiting client and seat idle for longer than the
    /// inactivity timeout.
    pub(crate) fn reap(&mut self, now: Instant) {
        let threshold = self.config.inactivity_timeout;

        for client in self.queue.stale(threshold, now) {
            if let Ok(entry) = self.queue.remove(&client) {
                entry.stream.close();
                tracing::warn!(%client, "evicted stale waiting client");
            }
        }

        let stale: Vec<ClientId> = self
            .sessions
            .values()
            .flat_map(|session| session.seats())
            .filter(|seat| {
                seat.stream.is_some()
                    && now.saturating_duration_since(seat.last_active) > threshold
            })
            .map(|seat| seat.client.clone())
            .collect();
        for client in stale {
            tracing::warn!(%client, "evicted stale participant");
            self.disconnect(&client, None);
        }
    }

    // -----------------------------------------------------------------------
    // Disconnection and teardown
    // -----------------------------------------------------------------------

    /// Handles a client leaving.
    ///
    /// `conn` names the stream that failed. If the client has since opened
    /// a newer stream the call is stale and nothing happens. Repeated calls
    /// for the same client are no-ops.
    ///
    /// A waiting client is dropped from the queue. A solo session is torn
    /// down at once. In a match the survivor wins by default and sees it on
    /// their frame; the session then tears down after the grace period, or
    /// immediately if nobody is left to see it.
    pub(crate) fn disconnect(&mut self, client: &ClientId, conn: Option<ConnectionId>) {
        if let Some(entry) = self.queue.get(client) {
            if conn.is_some_and(|conn| conn != entry.stream.id()) {
                return;
            }
            if let Ok(entry) = self.queue.remove(client) {
                entry.stream.close();
                tracing::info!(%client, "waiting client left");
            }
            return;
        }

        let Some(id) = self.by_client.get(client).copied() else {
            tracing::trace!(%client, "disconnect for client without session");
            return;
        };
        let Some(session) = self.sessions.get_mut(&id) else {
            self.by_client.remove(client);
            return;
        };
        let Some(side) = session.side_of(client) else {
            self.by_client.remove(client);
            return;
        };
        if let Some(conn) = conn {
            let current = session
                .seat(side)
                .and_then(|seat| seat.stream.as_ref())
                .map(StreamHandle::id);
            if current != Some(conn) {
                tracing::debug!(session = %id, %client, %conn, "ignoring replaced stream");
                return;
            }
        }

        if session.is_solo() {
            tracing::info!(session = %id, %client, "solo client left");
            self.teardown(id);
            return;
        }

        if let Some(seat) = session.seat_mut(side) {
            seat.detach();
        }
        self.by_client.remove(client);
        let survivor = side.other();
        let survivor_connected = session
            .seat(survivor)
            .is_some_and(|seat| seat.stream.is_some());
        let concluded = session.outcome.is_some();
        tracing::info!(session = %id, %client, survivor_connected, "participant left");

        if !survivor_connected {
            self.teardown(id);
            return;
        }
        if !concluded {
            self.conclude(id, Outcome::DefaultWin(survivor, Forfeit::Disconnect), false);
        }
        if let Some(seat) = self.sessions.get(&id).and_then(|s| s.seat(survivor)) {
            let _ = seat.push();
        }
    }

    /// Removes a session: cancels its timers, closes its streams, and
    /// drops its client mappings.
    fn teardown(&mut self, id: SessionId) {
        let Some(mut session) = self.sessions.remove(&id) else {
            return;
        };
        session.timers.cancel_all();
        for &side in session.sides() {
            if let Some(seat) = session.seat_mut(side) {
                seat.detach();
                if self.by_client.get(&seat.client) == Some(&id) {
                    self.by_client.remove(&seat.client);
                }
            }
        }
        tracing::info!(session = %id, "session torn down");
    }

    /// Tears everything down. Used when the engine stops.
    pub(crate) fn shutdown(&mut self) {
        let ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        for id in ids {
            self.teardown(id);
        }
        for entry in self.queue.iter() {
            entry.stream.close();
        }
        self.queue = MatchmakingQueue::new();
    }

    // -----------------------------------------------------------------------
    // Rendering
    // -----------------------------------------------------------------------

    /// Re-renders every seat of `id` and stores the frames. Delivery is
    /// left to the next broadcast tick.
    fn refresh(&mut self, id: SessionId) {
        if let Some(session) = self.sessions.get_mut(&id) {
            render_seats(self.renderer.as_ref(), session);
        }
    }

    fn push_all(&self, id: SessionId) {
        if let Some(session) = self.sessions.get(&id) {
            for seat in session.seats() {
                let _ = seat.push();
            }
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub(crate) fn stats(&self) -> EngineStats {
        let solos = self.sessions.values().filter(|s| s.is_solo()).count();
        EngineStats {
            waiting: self.queue.len(),
            matches: self.sessions.len() - solos,
            solos,
        }
    }

    /// The session `client` is seated in and its phase.
    pub(crate) fn lookup(&self, client: &ClientId) -> Option<(SessionId, SessionPhase)> {
        let id = self.by_client.get(client).copied()?;
        let phase = self
            .sessions
            .get(&id)
            .map_or(SessionPhase::TornDown, Session::phase);
        Some((id, phase))
    }

    #[cfg(test)]
    fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }
}

fn render_seats<R: Renderer + ?Sized>(renderer: &R, session: &mut Session) {
    let view = session.view();
    let frames: Vec<(Side, Frame)> = session
        .sides()
        .iter()
        .filter_map(|&side| {
            let seat = session.seat(side)?;
            Some((side, renderer.render(&view, side, seat.message.as_deref())))
        })
        .collect();
    for (side, frame) in frames {
        if let Some(seat) = session.seat_mut(side) {
            seat.frame = frame;
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
