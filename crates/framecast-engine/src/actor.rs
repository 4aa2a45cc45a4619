//! The engine actor: one Tokio task that owns the session store.
//!
//! Connection handlers talk to it through an [`EngineHandle`]. Inside, a
//! single `select!` loop interleaves commands, fired timers, and the three
//! cadences (broadcast, turn clock, reaper), so every mutation of the store
//! happens on this one task, one at a time.

use std::sync::Arc;
use std::time::Duration;

use framecast_game::Difficulty;
use framecast_lobby::ClientIdentity;
use framecast_protocol::{ClientId, SessionId};
use framecast_tick::{Cadence, CadenceConfig};
use framecast_transport::{ConnectionId, StreamHandle};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;

use crate::store::{EngineStats, SessionStore};
use crate::timers::{TimerEvent, TimerQueue};
use crate::{EngineConfig, EngineError, Renderer, SessionPhase};

/// Commands sent to the engine actor.
///
/// Variants that carry a `oneshot::Sender` expect an answer; the rest are
/// fire-and-forget.
pub(crate) enum Command {
    OpenStream {
        identity: ClientIdentity,
        stream: StreamHandle,
        reply: oneshot::Sender<()>,
    },

    OpenSolo {
        identity: ClientIdentity,
        stream: StreamHandle,
        difficulty: Difficulty,
        reply: oneshot::Sender<()>,
    },

    SubmitMove {
        client: ClientId,
        position: String,
        reply: oneshot::Sender<Result<(), EngineError>>,
    },

    /// A stream went away. `conn` names it so a stale notice for a stream
    /// that was already replaced is ignored.
    Disconnect {
        client: ClientId,
        conn: Option<ConnectionId>,
    },

    Stats {
        reply: oneshot::Sender<EngineStats>,
    },

    Lookup {
        client: ClientId,
        reply: oneshot::Sender<Option<(SessionId, SessionPhase)>>,
    },

    Shutdown,
}

/// Handle to a running engine. Cheap to clone.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    sender: mpsc::Sender<Command>,
}

impl EngineHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(build(reply_tx))
            .await
            .map_err(|_| EngineError::Unavailable)?;
        reply_rx.await.map_err(|_| EngineError::Unavailable)
    }

    /// Opens a viewer stream: re-attach, queue, or pair.
    pub async fn open_stream(
        &self,
        identity: ClientIdentity,
        stream: StreamHandle,
    ) -> Result<(), EngineError> {
        self.request(|reply| Command::OpenStream {
            identity,
            stream,
            reply,
        })
        .await
    }

    /// Opens a stream for a game against the AI.
    pub async fn open_solo_stream(
        &self,
        identity: ClientIdentity,
        stream: StreamHandle,
        difficulty: Difficulty,
    ) -> Result<(), EngineError> {
        self.request(|reply| Command::OpenSolo {
            identity,
            stream,
            difficulty,
            reply,
        })
        .await
    }

    /// Submits a move with its raw positional parameter.
    ///
    /// # Errors
    /// [`EngineError::SessionNotFound`] or [`EngineError::InvalidMove`]
    /// from the store, [`EngineError::Unavailable`] if the engine stopped.
    pub async fn submit_move(
        &self,
        client: ClientId,
        position: impl Into<String>,
    ) -> Result<(), EngineError> {
        let position = position.into();
        self.request(|reply| Command::SubmitMove {
            client,
            position,
            reply,
        })
        .await?
    }

    /// Reports a lost stream (fire-and-forget).
    pub async fn disconnect(
        &self,
        client: ClientId,
        conn: Option<ConnectionId>,
    ) -> Result<(), EngineError> {
        self.sender
            .send(Command::Disconnect { client, conn })
            .await
            .map_err(|_| EngineError::Unavailable)
    }

    /// Current queue and session counts.
    pub async fn stats(&self) -> Result<EngineStats, EngineError> {
        self.request(|reply| Command::Stats { reply }).await
    }

    /// The session `client` is seated in, if any.
    pub async fn lookup(
        &self,
        client: ClientId,
    ) -> Result<Option<(SessionId, SessionPhase)>, EngineError> {
        self.request(|reply| Command::Lookup { client, reply }).await
    }

    /// Stops the engine. Every session is torn down and every stream
    /// closed.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        self.sender
            .send(Command::Shutdown)
            .await
            .map_err(|_| EngineError::Unavailable)
    }
}

/// The internal actor state. Runs inside a Tokio task.
struct EngineActor<R: Renderer> {
    store: SessionStore<R>,
    commands: mpsc::Receiver<Command>,
    timer_events: mpsc::UnboundedReceiver<TimerEvent>,
    broadcast: Cadence,
    clock: Cadence,
    reaper: Cadence,
}

impl<R: Renderer> EngineActor<R> {
    async fn run(self) {
        let Self {
            mut store,
            mut commands,
            mut timer_events,
            mut broadcast,
            mut clock,
            mut reaper,
        } = self;

        tracing::info!("engine actor started");

        loop {
            tokio::select! {
                command = commands.recv() => match command {
                    Some(Command::Shutdown) | None => break,
                    Some(command) => handle(&mut store, command),
                },
                Some(event) = timer_events.recv() => store.on_timer(event),
                _ = broadcast.wait_for_tick() => {
                    store.broadcast(Instant::now());
                    broadcast.record_tick_end();
                }
                _ = clock.wait_for_tick() => {
                    store.clock_tick();
                    clock.record_tick_end();
                }
                _ = reaper.wait_for_tick() => {
                    store.reap(Instant::now());
                    reaper.record_tick_end();
                }
            }
        }

        store.shutdown();
        tracing::info!("engine actor stopped");
    }
}

fn handle<R: Renderer>(store: &mut SessionStore<R>, command: Command) {
    match command {
        Command::OpenStream {
            identity,
            stream,
            reply,
        } => {
            store.open_stream(identity, stream);
            let _ = reply.send(());
        }
        Command::OpenSolo {
            identity,
            stream,
            difficulty,
            reply,
        } => {
            store.open_solo_stream(identity, stream, difficulty);
            let _ = reply.send(());
        }
        Command::SubmitMove {
            client,
            position,
            reply,
        } => {
            let _ = reply.send(store.submit_move(&client, &position));
        }
        Command::Disconnect { client, conn } => store.disconnect(&client, conn),
        Command::Stats { reply } => {
            let _ = reply.send(store.stats());
        }
        Command::Lookup { client, reply } => {
            let _ = reply.send(store.lookup(&client));
        }
        Command::Shutdown => {}
    }
}

/// Spawns the engine actor and returns a handle to it.
pub fn spawn_engine<R: Renderer>(config: EngineConfig, renderer: Arc<R>) -> EngineHandle {
    let (tx, rx) = mpsc::channel(config.command_buffer.max(1));
    let (timers, timer_events) = TimerQueue::channel();

    let cadence = |period: Duration| Cadence::new(CadenceConfig::every(period).validated());
    let actor = EngineActor {
        broadcast: cadence(config.broadcast_interval),
        clock: cadence(config.clock_interval),
        reaper: cadence(config.reaper_interval),
        store: SessionStore::new(config, renderer, timers),
        commands: rx,
        timer_events,
    };

    tokio::spawn(actor.run());

    EngineHandle { sender: tx }
}
