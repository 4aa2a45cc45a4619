//! Integration tests for the Framecast server, handler, and full connection flow.

use std::time::Duration;

use framecast::prelude::*;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;

// =========================================================================
// Test renderer
// =========================================================================

/// Renders a one-line summary so tests can match on substrings.
struct LineRenderer;

impl Renderer for LineRenderer {
    fn render(&self, view: &SessionView<'_>, viewer: Side, message: Option<&str>) -> Frame {
        Frame::from(format!(
            "{} viewer={viewer:?} turn={:?} outcome={:?} message={}",
            view.session,
            view.turn,
            view.outcome,
            message.unwrap_or("")
        ))
    }

    fn waiting(&self, _client: &ClientId) -> Frame {
        Frame::from("waiting")
    }

    fn placeholder(&self) -> Frame {
        Frame::from("ok")
    }
}

// =========================================================================
// Helpers
// =========================================================================

type ClientWs = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

/// Starts a tic-tac-toe server on a random port and returns the address
/// plus an engine handle.
async fn start_server() -> (String, EngineHandle) {
    let server = FramecastServerBuilder::new()
        .bind("127.0.0.1:0")
        .game(GameKind::TicTacToe)
        .turn_seconds(0)
        .build(LineRenderer, HashedAddressResolver)
        .await
        .expect("server should build");

    let addr = server
        .local_addr()
        .expect("should have local addr")
        .to_string();
    let engine = server.engine();

    tokio::spawn(async move {
        let _ = server.run().await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(10)).await;
    (addr, engine)
}

/// Connects to `path`, presenting `client_addr` as the forwarded-for
/// address so several clients on loopback get distinct identities.
async fn connect(addr: &str, path: &str, client_addr: &str) -> ClientWs {
    let mut request = format!("ws://{addr}{path}")
        .into_client_request()
        .expect("valid request");
    request
        .headers_mut()
        .insert("x-forwarded-for", client_addr.parse().expect("header value"));
    let (ws, _) = tokio_tungstenite::connect_async(request)
        .await
        .expect("should connect");
    ws
}

async fn next_message(ws: &mut ClientWs) -> Option<Message> {
    tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for message")
        .and_then(Result::ok)
}

/// Skips frames until the next control message arrives.
async fn next_reply(ws: &mut ClientWs) -> ServerMessage {
    loop {
        match next_message(ws).await {
            Some(Message::Text(text)) => {
                return serde_json::from_str(text.as_str()).expect("decode reply");
            }
            Some(Message::Binary(_)) => continue,
            other => panic!("expected a reply, got {other:?}"),
        }
    }
}

/// Reads frames until one contains `needle`.
async fn frame_containing(ws: &mut ClientWs, needle: &str) -> String {
    loop {
        match next_message(ws).await {
            Some(Message::Binary(data)) => {
                let text = String::from_utf8(data.to_vec()).expect("utf-8 frame");
                if text.contains(needle) {
                    return text;
                }
            }
            Some(Message::Text(_)) => continue,
            other => panic!("expected a frame containing {needle:?}, got {other:?}"),
        }
    }
}

fn move_msg(position: &str) -> Message {
    let msg = ClientMessage::Move {
        position: position.into(),
    };
    Message::Text(serde_json::to_string(&msg).expect("encode").into())
}

// =========================================================================
// Tests
// =========================================================================

#[tokio::test]
async fn test_stream_first_client_sees_waiting_frame() {
    let (addr, engine) = start_server().await;
    let mut ws = connect(&addr, "/stream", "198.51.100.1").await;

    assert_eq!(frame_containing(&mut ws, "waiting").await, "waiting");
    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.waiting, 1);
}

#[tokio::test]
async fn test_stream_two_clients_are_paired() {
    let (addr, engine) = start_server().await;
    let mut first = connect(&addr, "/stream", "198.51.100.1").await;
    frame_containing(&mut first, "waiting").await;
    let mut second = connect(&addr, "/stream", "198.51.100.2").await;

    let seen = frame_containing(&mut first, "viewer=First").await;
    assert!(seen.contains("turn=Some(First)"));
    frame_containing(&mut second, "viewer=Second").await;

    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.matches, 1);
    assert_eq!(stats.waiting, 0);
}

#[tokio::test]
async fn test_stream_same_address_is_never_paired() {
    let (addr, engine) = start_server().await;
    let mut first = connect(&addr, "/stream", "198.51.100.7").await;
    frame_containing(&mut first, "waiting").await;
    let mut second = connect(&addr, "/stream", "198.51.100.7").await;
    frame_containing(&mut second, "waiting").await;

    // The second stream re-attaches the same client; nobody is matched.
    let stats = engine.stats().await.unwrap();
    assert_eq!(stats.matches, 0);
    assert_eq!(stats.waiting, 1);
}

#[tokio::test]
async fn test_move_on_stream_is_acknowledged_with_cache_headers() {
    let (addr, _engine) = start_server().await;
    let mut first = connect(&addr, "/stream", "198.51.100.1").await;
    frame_containing(&mut first, "waiting").await;
    let mut second = connect(&addr, "/stream", "198.51.100.2").await;
    frame_containing(&mut first, "viewer=First").await;

    first.send(move_msg("4")).await.expect("send move");
    match next_reply(&mut first).await {
        ServerMessage::MoveAck {
            headers,
            placeholder,
        } => {
            assert_eq!(placeholder, b"ok");
            assert!(
                headers
                    .iter()
                    .any(|h| h.name == "Cache-Control" && h.value.contains("no-store"))
            );
        }
        other => panic!("expected MoveAck, got {other:?}"),
    }

    frame_containing(&mut second, "turn=Some(Second)").await;
}

#[tokio::test]
async fn test_invalid_move_still_acknowledged_and_shown_on_stream() {
    let (addr, _engine) = start_server().await;
    let mut first = connect(&addr, "/stream", "198.51.100.1").await;
    frame_containing(&mut first, "waiting").await;
    let mut second = connect(&addr, "/stream", "198.51.100.2").await;
    frame_containing(&mut second, "viewer=Second").await;

    second.send(move_msg("4")).await.expect("send move");
    assert!(matches!(
        next_reply(&mut second).await,
        ServerMessage::MoveAck { .. }
    ));
    frame_containing(&mut second, "message=Not your turn.").await;
}

#[tokio::test]
async fn test_one_shot_move_without_session_serves_placeholder() {
    let (addr, _engine) = start_server().await;
    let mut ws = connect(&addr, "/move?position=3", "198.51.100.9").await;

    match next_reply(&mut ws).await {
        ServerMessage::MoveAck { placeholder, .. } => assert_eq!(placeholder, b"ok"),
        other => panic!("expected MoveAck, got {other:?}"),
    }
    match next_message(&mut ws).await {
        None | Some(Message::Close(_)) => {}
        other => panic!("expected close, got {other:?}"),
    }
}

#[tokio::test]
async fn test_one_shot_move_reaches_streamed_session() {
    let (addr, _engine) = start_server().await;
    let mut first = connect(&addr, "/stream", "198.51.100.1").await;
    frame_containing(&mut first, "waiting").await;
    let mut second = connect(&addr, "/stream", "198.51.100.2").await;
    frame_containing(&mut first, "viewer=First").await;

    let mut oneshot = connect(&addr, "/move?position=0", "198.51.100.1").await;
    assert!(matches!(
        next_reply(&mut oneshot).await,
        ServerMessage::MoveAck { .. }
    ));
    frame_containing(&mut second, "turn=Some(Second)").await;
}

#[tokio::test]
async fn test_unknown_path_is_rejected() {
    let (addr, _engine) = start_server().await;
    let mut ws = connect(&addr, "/nowhere", "198.51.100.1").await;

    match next_reply(&mut ws).await {
        ServerMessage::Rejected { reason } => assert!(reason.contains("/nowhere")),
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn test_closing_stream_gives_opponent_default_win() {
    let (addr, _engine) = start_server().await;
    let mut first = connect(&addr, "/stream", "198.51.100.1").await;
    frame_containing(&mut first, "waiting").await;
    let mut second = connect(&addr, "/stream", "198.51.100.2").await;
    frame_containing(&mut second, "viewer=Second").await;

    second.close(None).await.expect("close");
    drop(second);

    let seen = frame_containing(&mut first, "Disconnect").await;
    assert!(seen.contains("DefaultWin(First, Disconnect)"));
}

#[tokio::test]
async fn test_solo_route_starts_ai_session() {
    let (addr, engine) = start_server().await;
    let mut ws = connect(&addr, "/solo?difficulty=impossible", "198.51.100.3").await;

    let seen = frame_containing(&mut ws, "viewer=First").await;
    assert!(seen.contains("turn=Some(First)"));
    assert_eq!(engine.stats().await.unwrap().solos, 1);
}
