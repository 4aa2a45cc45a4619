//! The renderer contract.
//!
//! Turning game state into something displayable is not the engine's job.
//! The engine hands a [`SessionView`] to a [`Renderer`] whenever a
//! session's state changes and stores whatever [`Frame`] comes back; the
//! broadcast cadence then resends that stored frame until the next change.

use framecast_game::{Board, Difficulty, GameKind, Outcome, Side, WordPuzzle};
use framecast_protocol::{ClientId, Frame, SessionId};

/// Produces frames for viewers.
///
/// `Send + Sync + 'static` because one renderer is shared between the
/// engine actor and every connection handler.
pub trait Renderer: Send + Sync + 'static {
    /// A frame of `view` as seen by `viewer`, with an optional message
    /// line (an invalid-move notice or the conclusion text).
    fn render(&self, view: &SessionView<'_>, viewer: Side, message: Option<&str>) -> Frame;

    /// The frame shown to a client waiting for an opponent.
    fn waiting(&self, client: &ClientId) -> Frame;

    /// The no-content frame returned synchronously for move submissions.
    fn placeholder(&self) -> Frame;
}

/// Who sits across from the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Human,
    Ai(Difficulty),
}

/// The game-specific half of a view.
#[derive(Debug, Clone, Copy)]
pub enum GameView<'a> {
    Board(&'a Board),
    Puzzle(&'a WordPuzzle),
}

/// A read-only snapshot of one session, borrowed for the duration of a
/// `render` call.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub session: SessionId,
    pub game: GameKind,
    pub state: GameView<'a>,
    /// Side to move, or `None` once concluded (or while the word game,
    /// which has no turns, is running).
    pub turn: Option<Side>,
    pub outcome: Option<Outcome>,
    /// Seconds left on the turn clock, if it runs.
    pub time_remaining: Option<u32>,
    pub opponent: Opponent,
}
