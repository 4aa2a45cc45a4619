//! # Framecast
//!
//! Frame-streaming server for small two-party turn-based games.
//!
//! Viewers hold one long-lived stream each and receive a freshly rendered
//! frame whenever their session changes, plus a periodic resend of the
//! last frame. Moves arrive either on the stream or as one-shot requests
//! and are always answered with a cache-suppressed placeholder. The
//! game developer supplies a [`Renderer`](framecast_engine::Renderer);
//! matchmaking, turn clocks, the AI opponent and cleanup are handled by
//! the engine.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use framecast::prelude::*;
//!
//! // Implement Renderer for your frame format, then:
//! // let server = FramecastServer::builder()
//! //     .bind("0.0.0.0:8080")
//! //     .game(GameKind::ConnectFour)
//! //     .build(MyRenderer, HashedAddressResolver)
//! //     .await?;
//! // server.run().await
//! ```

mod error;
mod handler;
mod server;

pub use error::FramecastError;
pub use server::{FramecastServer, FramecastServerBuilder};

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// Honours `RUST_LOG` and falls back to `info`. Calling it twice is
/// harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .try_init();
}

pub mod prelude {
    pub use crate::{FramecastError, FramecastServer, FramecastServerBuilder, init_tracing};
    pub use framecast_engine::{
        EngineConfig, EngineError, EngineHandle, EngineStats, GameView, Opponent, Renderer,
        SessionPhase, SessionView,
    };
    pub use framecast_game::{Difficulty, GameKind, Outcome, Side};
    pub use framecast_lobby::{ClientIdentity, HashedAddressResolver, IdentityResolver};
    pub use framecast_protocol::{ClientId, ClientMessage, Frame, ServerMessage, SessionId};
}
