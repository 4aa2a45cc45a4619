use std::path::PathBuf;

use clap::Parser;
use framecast::prelude::*;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Hosts one game kind and streams JSON snapshots to every viewer.
#[derive(Debug, Parser)]
#[command(name = "arcade", version)]
struct Args {
    /// Game to host: connect-four, tic-tac-toe or word-guess.
    #[arg(long, default_value = "connect-four")]
    game: GameKind,

    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,

    /// Turn clock length in seconds; 0 disables it.
    #[arg(long)]
    turn_seconds: Option<u32>,

    /// JSON file with a full engine configuration. Flags override it.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn engine_config(&self) -> Result<EngineConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
            None => EngineConfig::default(),
        };
        config.game = self.game;
        if let Some(seconds) = self.turn_seconds {
            config.turn_seconds = seconds;
        }
        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// What a viewer receives on every push.
#[derive(Debug, Serialize)]
struct Snapshot<'a> {
    session: u64,
    game: String,
    you: char,
    /// Board rows top to bottom, one character per cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    word: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    misses: Option<usize>,
    turn: Option<char>,
    time: Option<u32>,
    opponent: String,
    over: bool,
    message: Option<&'a str>,
}

struct SnapshotRenderer;

impl SnapshotRenderer {
    fn rows(game: GameKind, board: &framecast_game::Board) -> Vec<String> {
        board
            .cells()
            .chunks(board.columns())
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or('.', |side| game.mark(side)))
                    .collect()
            })
            .collect()
    }
}

impl Renderer for SnapshotRenderer {
    fn render(&self, view: &SessionView<'_>, viewer: Side, message: Option<&str>) -> Frame {
        let (rows, word, misses) = match view.state {
            GameView::Board(board) => (Some(Self::rows(view.game, board)), None, None),
            GameView::Puzzle(puzzle) => (None, Some(puzzle.masked()), Some(puzzle.misses())),
        };
        let snapshot = Snapshot {
            session: view.session.0,
            game: view.game.to_string(),
            you: view.game.mark(viewer),
            rows,
            word,
            misses,
            turn: view.turn.map(|side| view.game.mark(side)),
            time: view.time_remaining,
            opponent: match view.opponent {
                Opponent::Human => "human".to_string(),
                Opponent::Ai(difficulty) => format!("ai:{difficulty:?}").to_lowercase(),
            },
            over: view.outcome.is_some(),
            message,
        };
        match serde_json::to_vec(&snapshot) {
            Ok(bytes) => Frame::from(bytes),
            Err(e) => {
                tracing::warn!(error = %e, "snapshot encoding failed");
                Frame::empty()
            }
        }
    }

    fn waiting(&self, client: &ClientId) -> Frame {
        Frame::from(format!(r#"{{"waiting":true,"you":"{client}"}}"#))
    }

    fn placeholder(&self) -> Frame {
        Frame::empty()
    }
}

// ---------------------------------------------------------------------------
// Server bootstrap
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing();
    let config = args.engine_config()?;

    eprintln!("starting {} arcade on {}", args.game, args.bind);

    let server = FramecastServerBuilder::new()
        .bind(&args.bind)
        .engine_config(config)
        .build(SnapshotRenderer, HashedAddressResolver)
        .await?;

    server.run().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::{SinkExt, StreamExt};
    use serde_json::Value;
    use std::time::Duration;
    use tokio_tungstenite::tungstenite::Message;
    use tokio_tungstenite::tungstenite::client::IntoClientRequest;

    type Ws = tokio_tungstenite::WebSocketStream<
        tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
    >;

    async fn start(game: GameKind) -> String {
        let server = FramecastServerBuilder::new()
            .bind("127.0.0.1:0")
            .game(game)
            .turn_seconds(0)
            .build(SnapshotRenderer, HashedAddressResolver)
            .await
            .unwrap();
        let addr = server.local_addr().unwrap().to_string();
        tokio::spawn(async move {
            let _ = server.run().await;
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        addr
    }

    async fn ws(addr: &str, path: &str, from: &str) -> Ws {
        let mut request = format!("ws://{addr}{path}").into_client_request().unwrap();
        request
            .headers_mut()
            .insert("x-forwarded-for", from.parse().unwrap());
        let (ws, _) = tokio_tungstenite::connect_async(request).await.unwrap();
        ws
    }

    async fn send_move(ws: &mut Ws, position: &str) {
        let text = format!(r#"{{"type":"Move","position":"{position}"}}"#);
        ws.send(Message::Text(text.into())).await.unwrap();
    }

    /// Reads snapshots until one satisfies `want`, skipping replies.
    async fn snapshot_where(ws: &mut Ws, want: impl Fn(&Value) -> bool) -> Value {
        loop {
            let msg = tokio::time::timeout(Duration::from_secs(5), ws.next())
                .await
                .expect("timeout")
                .unwrap()
                .unwrap();
            if let Message::Binary(data) = msg {
                let snapshot: Value = serde_json::from_slice(&data).unwrap();
                if want(&snapshot) {
                    return snapshot;
                }
            }
        }
    }

    fn cells(snapshot: &Value) -> String {
        snapshot["rows"]
            .as_array()
            .unwrap()
            .iter()
            .map(|row| row.as_str().unwrap())
            .collect()
    }

    /// Two viewers connected and paired; X is on the first stream.
    async fn setup_game(addr: &str) -> (Ws, Ws) {
        let mut x = ws(addr, "/stream", "192.0.2.1").await;
        snapshot_where(&mut x, |s| s["waiting"] == true).await;
        let mut o = ws(addr, "/stream", "192.0.2.2").await;
        snapshot_where(&mut x, |s| s["turn"] == "X").await;
        snapshot_where(&mut o, |s| s["you"] == "O").await;
        (x, o)
    }

    /// Plays `position` for the viewer on `mover` and waits until it shows.
    async fn play(mover: &mut Ws, position: usize, mark: char) {
        send_move(mover, &position.to_string()).await;
        snapshot_where(mover, |s| {
            s.get("rows").is_some() && cells(s).chars().nth(position) == Some(mark)
        })
        .await;
    }

    // ---------------------------------------------------------------
    // Full game: X wins with top row
    //  X | X | X
    //  O | O | .
    //  . | . | .
    // ---------------------------------------------------------------
    #[tokio::test]
    async fn test_x_wins_top_row() {
        let addr = start(GameKind::TicTacToe).await;
        let (mut x, mut o) = setup_game(&addr).await;

        play(&mut x, 0, 'X').await;
        play(&mut o, 3, 'O').await;
        play(&mut x, 1, 'X').await;
        play(&mut o, 4, 'O').await;
        send_move(&mut x, "2").await;

        let final_x = snapshot_where(&mut x, |s| s["over"] == true).await;
        assert_eq!(cells(&final_x), "XXXOO....");
        assert_eq!(final_x["message"], "You win!");
        let final_o = snapshot_where(&mut o, |s| s["over"] == true).await;
        assert_eq!(final_o["message"], "You lose!");
    }

    #[tokio::test]
    async fn test_wrong_turn_shows_message_only_to_mover() {
        let addr = start(GameKind::TicTacToe).await;
        let (mut x, mut o) = setup_game(&addr).await;

        send_move(&mut o, "0").await;
        let seen = snapshot_where(&mut o, |s| !s["message"].is_null()).await;
        assert_eq!(seen["message"], "Not your turn.");
        assert_eq!(cells(&seen), ".........");

        // X is unaffected and can still play.
        play(&mut x, 0, 'X').await;
    }

    #[tokio::test]
    async fn test_word_guess_stream_starts_puzzle() {
        let addr = start(GameKind::WordGuess).await;
        let mut player = ws(&addr, "/stream", "192.0.2.5").await;

        let first = snapshot_where(&mut player, |s| s.get("word").is_some()).await;
        assert_eq!(first["misses"], 0);
        assert!(first["word"].as_str().unwrap().chars().all(|c| c == '_' || c == ' '));
    }

    #[test]
    fn test_rows_split_connect_four_board() {
        let board = GameKind::ConnectFour.new_board().unwrap();
        let rows = SnapshotRenderer::rows(GameKind::ConnectFour, &board);
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row == "......."));
    }

    #[test]
    fn test_args_flags_override_defaults() {
        let args = Args::parse_from(["arcade", "--game", "ttt", "--turn-seconds", "0"]);
        let config = args.engine_config().unwrap();
        assert_eq!(config.game, GameKind::TicTacToe);
        assert_eq!(config.initial_clock(), None);
        assert_eq!(args.bind, "0.0.0.0:8080");
    }
}
