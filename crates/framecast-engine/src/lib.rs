//! The Framecast engine: matchmaking, sessions, and the three clocks that
//! drive them.
//!
//! # Architecture
//!
//! ```text
//! EngineHandle ──commands──▶ EngineActor ──owns──▶ SessionStore
//!                                 ▲   │               ├─ MatchmakingQueue
//!                   TimerEvents ──┘   │               ├─ sessions by id
//!                                     │               └─ client → session
//!                 broadcast (0.1 s) ──┤
//!                turn clock (1 s)   ──┤
//!                reaper (5 s)       ──┘
//! ```
//!
//! Sessions are addressed by [`SessionId`](framecast_protocol::SessionId),
//! never by reference. Timers and the AI run as separate tasks that post
//! back to the actor, which re-checks the session before acting.

mod actor;
mod config;
mod error;
mod render;
mod session;
mod store;
mod timers;

pub use actor::{EngineHandle, spawn_engine};
pub use config::EngineConfig;
pub use error::EngineError;
pub use render::{GameView, Opponent, Renderer, SessionView};
pub use session::{AiMatch, MatchState, Seat, Session, SessionKind, SessionPhase, SoloGame, SoloState};
pub use store::EngineStats;
