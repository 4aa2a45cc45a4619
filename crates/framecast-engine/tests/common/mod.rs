//! Shared helpers for engine integration tests.

#![allow(dead_code)]

use std::time::Duration;

use framecast_engine::{GameView, Renderer, SessionView};
use framecast_game::Side;
use framecast_lobby::ClientIdentity;
use framecast_protocol::{ClientId, Frame};
use framecast_transport::{Outbound, StreamHandle, StreamReceiver};
use serde_json::{Value, json};

/// Renders every view as a small JSON document.
pub struct SnapshotRenderer;

fn mark(cell: Option<Side>) -> char {
    match cell {
        Some(Side::First) => 'X',
        Some(Side::Second) => 'O',
        None => '.',
    }
}

impl Renderer for SnapshotRenderer {
    fn render(&self, view: &SessionView<'_>, viewer: Side, message: Option<&str>) -> Frame {
        let cells = match view.state {
            GameView::Board(board) => board.cells().iter().copied().map(mark).collect(),
            GameView::Puzzle(puzzle) => puzzle.masked(),
        };
        let snapshot = json!({
            "session": view.session.0,
            "viewer": format!("{viewer:?}"),
            "cells": cells,
            "turn": view.turn.map(|side| format!("{side:?}")),
            "outcome": view.outcome.map(|outcome| format!("{outcome:?}")),
            "time": view.time_remaining,
            "message": message,
        });
        Frame::from(snapshot.to_string())
    }

    fn waiting(&self, _client: &ClientId) -> Frame {
        Frame::from(json!({ "waiting": true }).to_string())
    }

    fn placeholder(&self) -> Frame {
        Frame::empty()
    }
}

pub fn who(name: &str) -> ClientIdentity {
    ClientIdentity::from_hash(name)
}

pub fn cid(name: &str) -> ClientId {
    ClientId::new(name)
}

/// A stream with room for well over ten seconds of broadcasts.
pub fn stream() -> (StreamHandle, StreamReceiver) {
    StreamHandle::channel(256)
}

/// The newest frame already queued on `rx`, parsed.
pub fn latest(rx: &mut StreamReceiver) -> Option<Value> {
    rx.drain().into_iter().rev().find_map(|item| match item {
        Outbound::Frame(frame) => serde_json::from_slice(frame.as_bytes()).ok(),
        Outbound::Reply(_) => None,
    })
}

/// Discards what is queued, waits for the next broadcast, and returns it.
pub async fn next_frame(rx: &mut StreamReceiver) -> Value {
    rx.drain();
    tokio::time::sleep(Duration::from_millis(150)).await;
    latest(rx).unwrap_or(Value::Null)
}
