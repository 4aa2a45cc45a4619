//! Per-connection handler: routing, identity, and move submission.
//!
//! Each accepted connection gets its own Tokio task running this handler.
//! The flow is:
//!   1. Resolve the caller's identity from the request address
//!   2. Route on the request path
//!   3. For streams: register with the engine, then loop receiving moves
//!   4. Answer every move with a cache-suppressed placeholder

use std::sync::Arc;

use framecast_engine::{EngineError, EngineHandle, Renderer};
use framecast_game::Difficulty;
use framecast_lobby::{ClientIdentity, IdentityResolver};
use framecast_protocol::{
    ClientId, ClientMessage, Codec, ServerMessage, cache_suppression_headers,
};
use framecast_transport::{
    Connection, ConnectionId, RequestInfo, StreamHandle, WebSocketConnection,
};

use crate::FramecastError;
use crate::server::ServerState;

/// What a request path asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Route {
    /// `/stream`: watch a multiplayer game.
    Stream,
    /// `/solo?difficulty=`: play the AI (or the word game).
    Solo(Difficulty),
    /// `/move?position=`: a one-shot move submission.
    Move(String),
    /// Anything else.
    Unknown(String),
}

fn route(request: &RequestInfo) -> Route {
    match request.path.as_str() {
        "/stream" => Route::Stream,
        "/solo" => Route::Solo(Difficulty::from_selector(
            request.query_param("difficulty"),
        )),
        "/move" => match request.query_param("position") {
            Some(position) => Route::Move(position.to_string()),
            None => Route::Unknown("missing position".into()),
        },
        other => Route::Unknown(format!("unknown path {other}")),
    }
}

/// Drop guard that reports the stream as lost when the handler exits.
///
/// `Drop` is synchronous, so the report is a fire-and-forget task. The
/// connection id lets the engine ignore the report if the client already
/// re-attached on a newer stream.
struct StreamGuard {
    client: ClientId,
    conn: ConnectionId,
    engine: EngineHandle,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        let client = self.client.clone();
        let conn = self.conn;
        let engine = self.engine.clone();
        tokio::spawn(async move {
            let _ = engine.disconnect(client, Some(conn)).await;
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<R, I, C>(
    mut conn: WebSocketConnection,
    state: Arc<ServerState<R, I, C>>,
) -> Result<(), FramecastError>
where
    R: Renderer,
    I: IdentityResolver,
    C: Codec,
{
    let conn_id = conn.id();
    let request = conn.request().clone();
    let identity = resolve(&state.resolver, &request);
    let client = identity.id.clone();
    let stream = conn.stream();

    tracing::debug!(%conn_id, %client, path = %request.path, "handling new connection");

    match route(&request) {
        Route::Stream => state.engine.open_stream(identity, stream.clone()).await?,
        Route::Solo(difficulty) => {
            state
                .engine
                .open_solo_stream(identity, stream.clone(), difficulty)
                .await?
        }
        Route::Move(position) => {
            // One-shot: returning drops every handle, so the writer
            // flushes the reply and then closes the socket.
            submit(&state, &client, position).await?;
            return acknowledge(&state, &stream);
        }
        Route::Unknown(reason) => {
            tracing::debug!(%conn_id, %reason, "rejecting request");
            let bytes = state.codec.encode(&ServerMessage::Rejected { reason })?;
            stream.reply(bytes)?;
            return Ok(());
        }
    }

    let _guard = StreamGuard {
        client: client.clone(),
        conn: conn_id,
        engine: state.engine.clone(),
    };

    loop {
        let data = match conn.recv().await {
            Ok(Some(data)) => data,
            Ok(None) => {
                tracing::info!(%conn_id, %client, "stream closed");
                break;
            }
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "receive error");
                break;
            }
        };

        let msg: ClientMessage = match state.codec.decode(&data) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(%conn_id, error = %e, "ignoring undecodable message");
                continue;
            }
        };

        match msg {
            ClientMessage::Move { position } => {
                submit(&state, &client, position).await?;
                acknowledge(&state, &stream)?;
            }
        }
    }

    Ok(())
}

fn resolve<I: IdentityResolver>(resolver: &I, request: &RequestInfo) -> ClientIdentity {
    resolver.resolve(request.peer.ip(), request.forwarded_for.as_deref())
}

/// Forwards a move to the engine.
///
/// Rejections and unknown sessions are not errors for the caller: the
/// result of a move is only ever visible on the stream.
async fn submit<R, I, C>(
    state: &Arc<ServerState<R, I, C>>,
    client: &ClientId,
    position: String,
) -> Result<(), FramecastError>
where
    R: Renderer,
    I: IdentityResolver,
    C: Codec,
{
    match state.engine.submit_move(client.clone(), position).await {
        Ok(()) => Ok(()),
        Err(EngineError::SessionNotFound(_)) => {
            tracing::debug!(%client, "move without a session");
            Ok(())
        }
        Err(EngineError::InvalidMove(e)) => {
            tracing::debug!(%client, reason = %e, "move rejected");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// Replies with the placeholder under cache-suppression headers.
fn acknowledge<R, I, C>(
    state: &Arc<ServerState<R, I, C>>,
    stream: &StreamHandle,
) -> Result<(), FramecastError>
where
    R: Renderer,
    I: IdentityResolver,
    C: Codec,
{
    let ack = ServerMessage::MoveAck {
        headers: cache_suppression_headers(),
        placeholder: state.renderer.placeholder().as_bytes().to_vec(),
    };
    let bytes = state.codec.encode(&ack)?;
    match stream.reply(bytes) {
        Ok(()) => Ok(()),
        Err(e) if !e.is_disconnect() => {
            tracing::debug!(conn = %stream.id(), "dropping ack on a congested stream");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn request(path: &str, query: Option<&str>) -> RequestInfo {
        RequestInfo {
            peer: "127.0.0.1:4000".parse().unwrap(),
            path: path.into(),
            query: query.map(str::to_string),
            forwarded_for: None,
        }
    }

    #[test]
    fn test_route_stream() {
        assert_eq!(route(&request("/stream", None)), Route::Stream);
    }

    #[test]
    fn test_route_solo_reads_difficulty() {
        assert_eq!(
            route(&request("/solo", Some("difficulty=hard"))),
            Route::Solo(Difficulty::Hard)
        );
    }

    #[test]
    fn test_route_solo_without_difficulty_is_medium() {
        assert_eq!(
            route(&request("/solo", None)),
            Route::Solo(Difficulty::Medium)
        );
    }

    #[test]
    fn test_route_move_keeps_raw_position() {
        assert_eq!(
            route(&request("/move", Some("position=e"))),
            Route::Move("e".into())
        );
    }

    #[test]
    fn test_route_move_without_position_is_unknown() {
        assert!(matches!(
            route(&request("/move", Some("col=3"))),
            Route::Unknown(_)
        ));
    }

    #[test]
    fn test_route_other_path_is_unknown() {
        assert_eq!(
            route(&request("/favicon.ico", None)),
            Route::Unknown("unknown path /favicon.ico".into())
        );
    }
}
