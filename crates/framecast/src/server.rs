//! `FramecastServer` builder and server loop.
//!
//! This is the entry point for running a Framecast server. It ties the
//! layers together: transport → identity → engine.

use std::sync::Arc;

use framecast_engine::{EngineConfig, EngineHandle, Renderer, spawn_engine};
use framecast_game::GameKind;
use framecast_lobby::IdentityResolver;
use framecast_protocol::{Codec, JsonCodec};
use framecast_transport::{Transport, WebSocketTransport};

use crate::FramecastError;
use crate::handler::handle_connection;

/// Shared server state passed to each connection handler task.
pub(crate) struct ServerState<R: Renderer, I: IdentityResolver, C: Codec> {
    pub(crate) engine: EngineHandle,
    pub(crate) renderer: Arc<R>,
    pub(crate) resolver: I,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a Framecast server.
///
/// # Example
///
/// ```rust,ignore
/// use framecast::prelude::*;
///
/// let server = FramecastServer::builder()
///     .bind("0.0.0.0:8080")
///     .game(GameKind::TicTacToe)
///     .build(MyRenderer, HashedAddressResolver)
///     .await?;
/// server.run().await
/// ```
pub struct FramecastServerBuilder {
    bind_addr: String,
    engine_config: EngineConfig,
}

impl FramecastServerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
            engine_config: EngineConfig::default(),
        }
    }

    /// Sets the address to bind the server to.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Replaces the whole engine configuration.
    pub fn engine_config(mut self, config: EngineConfig) -> Self {
        self.engine_config = config;
        self
    }

    /// Sets which game the server hosts.
    pub fn game(mut self, game: GameKind) -> Self {
        self.engine_config.game = game;
        self
    }

    /// Sets the turn clock length in seconds. 0 disables it.
    pub fn turn_seconds(mut self, seconds: u32) -> Self {
        self.engine_config.turn_seconds = seconds;
        self
    }

    /// Binds the listener and starts the engine.
    ///
    /// Uses `JsonCodec` for control messages and `WebSocketTransport`.
    pub async fn build<R: Renderer, I: IdentityResolver>(
        self,
        renderer: R,
        resolver: I,
    ) -> Result<FramecastServer<R, I, JsonCodec>, FramecastError> {
        let transport = WebSocketTransport::bind(&self.bind_addr)
            .await?
            .with_stream_buffer(self.engine_config.stream_buffer);

        let renderer = Arc::new(renderer);
        tracing::info!(game = %self.engine_config.game, "starting engine");
        let engine = spawn_engine(self.engine_config, Arc::clone(&renderer));

        let state = Arc::new(ServerState {
            engine,
            renderer,
            resolver,
            codec: JsonCodec,
        });

        Ok(FramecastServer { transport, state })
    }
}

impl Default for FramecastServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Framecast server.
///
/// Call [`run()`](Self::run) to start accepting connections.
pub struct FramecastServer<R: Renderer, I: IdentityResolver, C: Codec> {
    transport: WebSocketTransport,
    state: Arc<ServerState<R, I, C>>,
}

impl<R, I, C> FramecastServer<R, I, C>
where
    R: Renderer,
    I: IdentityResolver,
    C: Codec,
{
    /// Creates a new builder.
    pub fn builder() -> FramecastServerBuilder {
        FramecastServerBuilder::new()
    }

    /// Returns the local address the server is bound to.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.transport.local_addr()
    }

    /// A handle to the engine, for stats and out-of-band control.
    pub fn engine(&self) -> EngineHandle {
        self.state.engine.clone()
    }

    /// Runs the accept loop.
    ///
    /// Spawns a handler task for each connection. Runs until the process
    /// is terminated.
    pub async fn run(mut self) -> Result<(), FramecastError> {
        tracing::info!("Framecast server running");

        loop {
            match self.transport.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(conn, state).await {
                            tracing::debug!(error = %e, "connection ended with error");
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
