//! Deferred work.
//!
//! Every timer is a spawned task that sleeps and then posts a
//! [`TimerEvent`] back to the engine actor. The task never touches a
//! session; it only names one by id. The actor re-checks that the session
//! still exists (and is still in the right state) before acting, and the
//! session keeps each task's [`AbortHandle`] so teardown can cancel it.

use std::time::Duration;

use framecast_game::{Board, Side, choose_move};
use framecast_protocol::SessionId;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

/// What a timer asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerKind {
    /// Grace period over: tear down, or reset a word puzzle.
    Teardown,
    /// Drop the transient message from one viewer's frame, if no newer
    /// message replaced it since this clear was armed.
    ClearMessage { side: Side, generation: u64 },
    /// The AI finished thinking. `None` if it found no move.
    AiMove(Option<usize>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TimerEvent {
    pub session: SessionId,
    pub kind: TimerKind,
}

/// Spawns timer tasks that report to one engine actor.
#[derive(Debug, Clone)]
pub(crate) struct TimerQueue {
    tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerQueue {
    pub(crate) fn channel() -> (Self, mpsc::UnboundedReceiver<TimerEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Posts `kind` for `session` after `delay`.
    pub(crate) fn after(&self, delay: Duration, session: SessionId, kind: TimerKind) -> AbortHandle {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(TimerEvent { session, kind });
        })
        .abort_handle()
    }

    /// Waits out the thinking delay, searches a private copy of `board`
    /// for the AI's move, and posts the result.
    ///
    /// The search runs on the blocking pool so the runtime's workers, and
    /// with them the actor's cadences, keep running. Aborting the returned
    /// handle drops the wait; a search already underway finishes but its
    /// result is never posted.
    pub(crate) fn ai_move(
        &self,
        delay: Duration,
        session: SessionId,
        mut board: Board,
        randomness: f64,
    ) -> AbortHandle {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let search = tokio::task::spawn_blocking(move || {
                choose_move(&mut board, Side::Second, randomness, &mut rand::rng())
            });
            let position = match search.await {
                Ok(position) => position,
                Err(e) => {
                    tracing::warn!(%session, error = %e, "AI search failed");
                    None
                }
            };
            tracing::trace!(%session, ?position, "AI move ready");
            let _ = tx.send(TimerEvent {
                session,
                kind: TimerKind::AiMove(position),
            });
        })
        .abort_handle()
    }
}
