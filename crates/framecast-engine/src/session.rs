//! Session records and the per-session state machine.
//!
//! A session is either a two-human match or a solo game against the AI.
//! Move handling dispatches on [`SessionKind`] rather than on which map a
//! session happens to live in.
//!
//! ```text
//! InProgress ──terminal move / clock / disconnect──▶ Concluded ──grace──▶ TornDown
//!                                                        │
//!                                   (word game) ◀──reset─┘
//! ```
//!
//! Nothing here schedules timers or touches the store; the methods answer
//! "what happened" and leave the consequences to the caller.

use framecast_game::{
    Board, Difficulty, Forfeit, GameKind, MoveError, Outcome, Position, SearchBoard, Side,
    WordPuzzle,
};
use framecast_protocol::{ClientId, Frame, SessionId};
use framecast_transport::{StreamHandle, TransportError};
use tokio::task::AbortHandle;
use tokio::time::Instant;

use crate::{GameView, Opponent, SessionView};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    Concluded(Outcome),
    /// The session no longer exists.
    TornDown,
}

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// One human viewer of a session.
#[derive(Debug)]
pub struct Seat {
    pub client: ClientId,
    /// `None` once the viewer has disconnected.
    pub stream: Option<StreamHandle>,
    /// Latest frame rendered for this viewer.
    pub frame: Frame,
    pub last_active: Instant,
    /// Line shown under the board: a transient move error, or the
    /// conclusion text.
    pub message: Option<String>,
}

impl Seat {
    pub fn new(client: ClientId, stream: Option<StreamHandle>) -> Self {
        Self {
            client,
            stream,
            frame: Frame::empty(),
            last_active: Instant::now(),
            message: None,
        }
    }

    /// Installs `stream` as this seat's stream, closing the one it
    /// replaces.
    pub fn attach(&mut self, stream: StreamHandle) {
        let id = stream.id();
        if let Some(old) = self.stream.replace(stream) {
            if old.id() != id {
                old.close();
            }
        }
        self.last_active = Instant::now();
    }

    /// Closes and forgets the seat's stream.
    pub fn detach(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.close();
        }
    }

    /// Writes the stored frame to the stream, if there is one.
    pub fn push(&self) -> Result<(), TransportError> {
        match &self.stream {
            Some(stream) => stream.write(&self.frame),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Session kinds
// ---------------------------------------------------------------------------

/// Two humans on one board. Seat 0 is [`Side::First`].
#[derive(Debug)]
pub struct MatchState {
    pub board: Board,
    pub turn: Side,
    pub last_mover: Option<Side>,
    pub seats: [Seat; 2],
}

/// A board game against the AI. The human is always [`Side::First`].
#[derive(Debug)]
pub struct AiMatch {
    pub board: Board,
    pub turn: Side,
    pub last_mover: Option<Side>,
    pub difficulty: Difficulty,
    /// The AI's move has been scheduled but not applied.
    pub ai_pending: bool,
}

#[derive(Debug)]
pub enum SoloGame {
    Versus(AiMatch),
    Puzzle(WordPuzzle),
}

#[derive(Debug)]
pub struct SoloState {
    pub seat: Seat,
    pub game: SoloGame,
}

#[derive(Debug)]
pub enum SessionKind {
    Multiplayer(MatchState),
    Solo(SoloState),
}

/// What an accepted move led to.
#[derive(Debug)]
pub(crate) enum Applied {
    /// Play continues.
    Continue,
    /// The AI is on move. Carries a copy of the board to search and the
    /// AI's randomness.
    AiToMove { board: Board, randomness: f64 },
    /// The move ended the game.
    Concluded(Outcome),
}

// ---------------------------------------------------------------------------
// Timers
// ---------------------------------------------------------------------------

/// Abort handles for every timer a session owns.
///
/// Dropping the set aborts whatever is still pending, so a session removed
/// from the store can never be acted on by one of its own timers.
#[derive(Debug, Default)]
pub(crate) struct SessionTimers {
    teardown: Option<AbortHandle>,
    ai: Option<AbortHandle>,
    clear: [Option<AbortHandle>; 2],
    /// Bumped per side each time a clear is armed. A clear event that was
    /// already queued when its task was replaced carries an old value.
    clear_generation: [u64; 2],
}

impl SessionTimers {
    fn replace(slot: &mut Option<AbortHandle>, handle: Option<AbortHandle>) {
        if let Some(old) = std::mem::replace(slot, handle) {
            old.abort();
        }
    }

    pub(crate) fn set_teardown(&mut self, handle: AbortHandle) {
        Self::replace(&mut self.teardown, Some(handle));
    }

    pub(crate) fn set_ai(&mut self, handle: AbortHandle) {
        Self::replace(&mut self.ai, Some(handle));
    }

    /// The generation the next clear timer for `side` must carry.
    pub(crate) fn next_clear(&mut self, side: Side) -> u64 {
        let generation = &mut self.clear_generation[side.index()];
        *generation += 1;
        *generation
    }

    pub(crate) fn set_clear(&mut self, side: Side, handle: AbortHandle) {
        Self::replace(&mut self.clear[side.index()], Some(handle));
    }

    /// Forgets a fired timer without aborting anything.
    pub(crate) fn teardown_fired(&mut self) {
        self.teardown = None;
    }

    pub(crate) fn ai_fired(&mut self) {
        self.ai = None;
    }

    /// Forgets a fired clear timer. Returns false, leaving the armed one
    /// alone, if `generation` belongs to a timer that was since replaced.
    pub(crate) fn clear_fired(&mut self, side: Side, generation: u64) -> bool {
        if self.clear_generation[side.index()] != generation {
            return false;
        }
        self.clear[side.index()] = None;
        true
    }

    /// Cancels the AI move and message clears. The teardown timer stays.
    pub(crate) fn cancel_play(&mut self) {
        Self::replace(&mut self.ai, None);
        for slot in &mut self.clear {
            Self::replace(slot, None);
        }
    }

    pub(crate) fn cancel_all(&mut self) {
        self.cancel_play();
        Self::replace(&mut self.teardown, None);
    }

    pub(crate) fn pending(&self) -> usize {
        let armed = |slot: &Option<AbortHandle>| {
            slot.as_ref().is_some_and(|handle| !handle.is_finished())
        };
        usize::from(armed(&self.teardown))
            + usize::from(armed(&self.ai))
            + self.clear.iter().filter(|slot| armed(slot)).count()
    }
}

impl Drop for SessionTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One game in progress (or in its grace period).
#[derive(Debug)]
pub struct Session {
    pub id: SessionId,
    pub game: GameKind,
    pub kind: SessionKind,
    /// Write-once. Only the store sets it.
    pub outcome: Option<Outcome>,
    pub time_remaining: Option<u32>,
    pub(crate) timers: SessionTimers,
}

impl Session {
    /// A two-human match. `first` moves first.
    pub fn multiplayer(
        id: SessionId,
        game: GameKind,
        board: Board,
        first: Seat,
        second: Seat,
        clock: Option<u32>,
    ) -> Self {
        Self::with_kind(
            id,
            game,
            SessionKind::Multiplayer(MatchState {
                board,
                turn: Side::First,
                last_mover: None,
                seats: [first, second],
            }),
            clock,
        )
    }

    /// A board game against the AI.
    pub fn versus_ai(
        id: SessionId,
        game: GameKind,
        board: Board,
        seat: Seat,
        difficulty: Difficulty,
        clock: Option<u32>,
    ) -> Self {
        Self::with_kind(
            id,
            game,
            SessionKind::Solo(SoloState {
                seat,
                game: SoloGame::Versus(AiMatch {
                    board,
                    turn: Side::First,
                    last_mover: None,
                    difficulty,
                    ai_pending: false,
                }),
            }),
            clock,
        )
    }

    /// A word puzzle.
    pub fn puzzle(id: SessionId, seat: Seat, puzzle: WordPuzzle, clock: Option<u32>) -> Self {
        Self::with_kind(
            id,
            GameKind::WordGuess,
            SessionKind::Solo(SoloState {
                seat,
                game: SoloGame::Puzzle(puzzle),
            }),
            clock,
        )
    }

    fn with_kind(id: SessionId, game: GameKind, kind: SessionKind, clock: Option<u32>) -> Self {
        Self {
            id,
            game,
            kind,
            outcome: None,
            time_remaining: clock,
            timers: SessionTimers::default(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match self.outcome {
            Some(outcome) => SessionPhase::Concluded(outcome),
            None => SessionPhase::InProgress,
        }
    }

    pub fn is_solo(&self) -> bool {
        matches!(self.kind, SessionKind::Solo(_))
    }

    pub fn is_puzzle(&self) -> bool {
        matches!(
            self.kind,
            SessionKind::Solo(SoloState {
                game: SoloGame::Puzzle(_),
                ..
            })
        )
    }

    /// The sides that have a human seat.
    pub fn sides(&self) -> &'static [Side] {
        match self.kind {
            SessionKind::Multiplayer(_) => &Side::BOTH,
            SessionKind::Solo(_) => &[Side::First],
        }
    }

    pub fn seat(&self, side: Side) -> Option<&Seat> {
        match &self.kind {
            SessionKind::Multiplayer(m) => Some(&m.seats[side.index()]),
            SessionKind::Solo(s) => (side == Side::First).then_some(&s.seat),
        }
    }

    pub fn seat_mut(&mut self, side: Side) -> Option<&mut Seat> {
        match &mut self.kind {
            SessionKind::Multiplayer(m) => Some(&mut m.seats[side.index()]),
            SessionKind::Solo(s) => (side == Side::First).then_some(&mut s.seat),
        }
    }

    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.sides()
            .iter()
            .filter_map(move |&side| self.seat(side))
    }

    /// The side `client` plays, if they have a seat here.
    pub fn side_of(&self, client: &ClientId) -> Option<Side> {
        self.sides()
            .iter()
            .copied()
            .find(|&side| self.seat(side).is_some_and(|seat| &seat.client == client))
    }

    /// Side to move, if the game has turns and is still running.
    pub fn turn(&self) -> Option<Side> {
        if self.outcome.is_some() {
            return None;
        }
        match &self.kind {
            SessionKind::Multiplayer(m) => Some(m.turn),
            SessionKind::Solo(SoloState {
                game: SoloGame::Versus(v),
                ..
            }) => Some(v.turn),
            SessionKind::Solo(_) => None,
        }
    }

    /// Number of marks on the board, or guesses made in the word game.
    pub fn moves_made(&self) -> usize {
        match &self.kind {
            SessionKind::Multiplayer(m) => m.board.filled(),
            SessionKind::Solo(SoloState {
                game: SoloGame::Versus(v),
                ..
            }) => v.board.filled(),
            SessionKind::Solo(SoloState {
                game: SoloGame::Puzzle(p),
                ..
            }) => p.correct().len() + p.incorrect().len(),
        }
    }

    /// Number of timers this session still has armed.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    /// Borrowed snapshot for the renderer.
    pub fn view(&self) -> SessionView<'_> {
        let (state, opponent) = match &self.kind {
            SessionKind::Multiplayer(m) => (GameView::Board(&m.board), Opponent::Human),
            SessionKind::Solo(s) => match &s.game {
                SoloGame::Versus(v) => (GameView::Board(&v.board), Opponent::Ai(v.difficulty)),
                SoloGame::Puzzle(p) => (GameView::Puzzle(p), Opponent::Ai(Difficulty::default())),
            },
        };
        SessionView {
            session: self.id,
            game: self.game,
            state,
            turn: self.turn(),
            outcome: self.outcome,
            time_remaining: self.time_remaining,
            opponent,
        }
    }

    /// Whether `side` may move right now. Checked before the position is
    /// even parsed, so an out-of-turn request reads "Not your turn."
    /// whatever it carried.
    ///
    /// # Errors
    /// [`MoveError::Concluded`] or [`MoveError::NotYourTurn`].
    pub(crate) fn check_turn(&self, side: Side) -> Result<(), MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::Concluded);
        }
        let on_turn = match &self.kind {
            SessionKind::Multiplayer(m) => side == m.turn,
            SessionKind::Solo(s) => match &s.game {
                SoloGame::Versus(v) => side == Side::First && v.turn == Side::First && !v.ai_pending,
                SoloGame::Puzzle(_) => true,
            },
        };
        if on_turn { Ok(()) } else { Err(MoveError::NotYourTurn) }
    }

    /// Applies a human move by `side`. Does not set the outcome.
    ///
    /// # Errors
    /// Any [`MoveError`]; the session is unchanged when one is returned.
    pub(crate) fn apply_move(&mut self, side: Side, position: Position) -> Result<Applied, MoveError> {
        self.check_turn(side)?;
        match &mut self.kind {
            SessionKind::Multiplayer(m) => {
                let Position::Index(index) = position else {
                    return Err(MoveError::OutOfRange);
                };
                m.board.play(index, side)?;
                m.last_mover = Some(side);
                m.turn = side.other();
                Ok(terminal(&m.board).map_or(Applied::Continue, Applied::Concluded))
            }
            SessionKind::Solo(s) => match &mut s.game {
                SoloGame::Versus(v) => {
                    let Position::Index(index) = position else {
                        return Err(MoveError::OutOfRange);
                    };
                    v.board.play(index, side)?;
                    v.last_mover = Some(side);
                    if let Some(outcome) = terminal(&v.board) {
                        return Ok(Applied::Concluded(outcome));
                    }
                    v.turn = Side::Second;
                    v.ai_pending = true;
                    Ok(Applied::AiToMove {
                        board: v.board.clone(),
                        randomness: v.difficulty.randomness(),
                    })
                }
                SoloGame::Puzzle(p) => {
                    let Position::Letter(letter) = position else {
                        return Err(MoveError::InvalidGuess);
                    };
                    p.guess(letter)?;
                    Ok(p.outcome().map_or(Applied::Continue, Applied::Concluded))
                }
            },
        }
    }

    /// Applies the AI's scheduled move and hands the turn back.
    ///
    /// # Errors
    /// [`MoveError::Concluded`] after conclusion, [`MoveError::NotYourTurn`]
    /// if no AI move is pending, or the board's own rejection.
    pub(crate) fn apply_ai_move(&mut self, position: usize) -> Result<Option<Outcome>, MoveError> {
        if self.outcome.is_some() {
            return Err(MoveError::Concluded);
        }
        let SessionKind::Solo(SoloState {
            game: SoloGame::Versus(v),
            ..
        }) = &mut self.kind
        else {
            return Err(MoveError::NotYourTurn);
        };
        if !v.ai_pending {
            return Err(MoveError::NotYourTurn);
        }
        v.board.play(position, Side::Second)?;
        v.ai_pending = false;
        v.last_mover = Some(Side::Second);
        v.turn = Side::First;
        Ok(terminal(&v.board))
    }

    /// Hands the turn back to the human after an AI move could not be
    /// made.
    pub(crate) fn abandon_ai_move(&mut self) {
        if let SessionKind::Solo(SoloState {
            game: SoloGame::Versus(v),
            ..
        }) = &mut self.kind
        {
            v.ai_pending = false;
            v.turn = Side::First;
        }
    }

    /// The outcome when the turn clock runs out: the last mover wins by
    /// default, no moves at all is a draw, and an unsolved puzzle is lost.
    pub fn clock_outcome(&self) -> Outcome {
        let last_mover = match &self.kind {
            SessionKind::Multiplayer(m) => m.last_mover,
            SessionKind::Solo(SoloState {
                game: SoloGame::Versus(v),
                ..
            }) => v.last_mover,
            SessionKind::Solo(SoloState {
                game: SoloGame::Puzzle(_),
                ..
            }) => return Outcome::Win(Side::Second),
        };
        match last_mover {
            Some(side) => Outcome::DefaultWin(side, Forfeit::Timeout),
            None => Outcome::Draw,
        }
    }

    /// The line `viewer` sees once the session has concluded with
    /// `outcome`.
    pub fn conclusion_message(&self, outcome: Outcome, viewer: Side, clock_expired: bool) -> String {
        if let SessionKind::Solo(SoloState {
            game: SoloGame::Puzzle(p),
            ..
        }) = &self.kind
        {
            return match outcome.winner() {
                Some(Side::First) => "You win!".to_string(),
                _ => format!("You lose! The word was \"{}\"", p.word()),
            };
        }
        if clock_expired && outcome == Outcome::Draw {
            return "Time's up! It's a draw!".to_string();
        }
        outcome.message_for(viewer).to_string()
    }

    /// Starts a new puzzle in place. Returns `false` for any other kind
    /// of session.
    pub(crate) fn reset_puzzle(&mut self, word: String, clock: Option<u32>) -> bool {
        let SessionKind::Solo(s) = &mut self.kind else {
            return false;
        };
        let SoloGame::Puzzle(p) = &mut s.game else {
            return false;
        };
        p.reset(word);
        s.seat.message = None;
        self.outcome = None;
        self.time_remaining = clock;
        true
    }
}

/// Winner or draw, if `board` is finished.
fn terminal(board: &Board) -> Option<Outcome> {
    match board.winner() {
        Some(side) => Some(Outcome::Win(side)),
        None if board.is_full() => Some(Outcome::Draw),
        None => None,
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // -- Helpers ----------------------------------------------------------

    fn seat(name: &str) -> Seat {
        Seat::new(ClientId::new(name), None)
    }

    fn connect_four() -> Session {
        Session::multiplayer(
            SessionId(1),
            GameKind::ConnectFour,
            Board::Gravity(Default::default()),
            seat("a"),
            seat("b"),
            Some(90),
        )
    }

    fn solo_grid() -> Session {
        Session::versus_ai(
            SessionId(2),
            GameKind::TicTacToe,
            Board::Grid(Default::default()),
            seat("h"),
            Difficulty::Impossible,
            None,
        )
    }

    fn puzzle(word: &str) -> Session {
        Session::puzzle(SessionId(3), seat("p"), WordPuzzle::new(word), Some(90))
    }

    fn cells(session: &Session) -> Vec<Option<Side>> {
        match session.view().state {
            GameView::Board(board) => board.cells().to_vec(),
            GameView::Puzzle(_) => Vec::new(),
        }
    }

    // =====================================================================
    // Multiplayer moves
    // =====================================================================

    #[test]
    fn test_apply_move_second_player_first_returns_not_your_turn() {
        let mut session = connect_four();
        let before = cells(&session);

        let result = session.apply_move(Side::Second, Position::Index(3));

        assert_eq!(result.unwrap_err(), MoveError::NotYourTurn);
        assert_eq!(cells(&session), before);
    }

    #[test]
    fn test_apply_move_accepted_flips_turn() {
        let mut session = connect_four();
        session.apply_move(Side::First, Position::Index(3)).unwrap();
        assert_eq!(session.turn(), Some(Side::Second));
        assert_eq!(session.moves_made(), 1);
    }

    #[test]
    fn test_apply_move_full_column_rejected_board_unchanged() {
        let mut session = connect_four();
        let mut side = Side::First;
        for _ in 0..6 {
            session.apply_move(side, Position::Index(0)).unwrap();
            side = side.other();
        }
        let before = cells(&session);

        let err = session.apply_move(side, Position::Index(0)).unwrap_err();

        assert!(err.is_occupied());
        assert_eq!(cells(&session), before);
        assert_eq!(session.turn(), Some(side));
    }

    #[test]
    fn test_apply_move_vertical_four_concludes_with_win() {
        let mut session = connect_four();
        let moves = [0, 1, 0, 1, 0, 1];
        let mut side = Side::First;
        for col in moves {
            assert!(matches!(
                session.apply_move(side, Position::Index(col)).unwrap(),
                Applied::Continue
            ));
            side = side.other();
        }
        let applied = session.apply_move(Side::First, Position::Index(0)).unwrap();
        assert!(matches!(applied, Applied::Concluded(Outcome::Win(Side::First))));
    }

    #[test]
    fn test_apply_move_after_outcome_returns_concluded() {
        let mut session = connect_four();
        session.outcome = Some(Outcome::Draw);
        assert_eq!(
            session.apply_move(Side::First, Position::Index(0)).unwrap_err(),
            MoveError::Concluded
        );
    }

    // =====================================================================
    // Solo moves
    // =====================================================================

    #[test]
    fn test_apply_move_solo_hands_turn_to_ai() {
        let mut session = solo_grid();
        let applied = session.apply_move(Side::First, Position::Index(4)).unwrap();
        assert!(matches!(applied, Applied::AiToMove { randomness, .. } if randomness == 0.0));

        let again = session.apply_move(Side::First, Position::Index(0));
        assert_eq!(again.unwrap_err(), MoveError::NotYourTurn);
    }

    #[test]
    fn test_apply_ai_move_without_pending_returns_not_your_turn() {
        let mut session = solo_grid();
        assert_eq!(session.apply_ai_move(0).unwrap_err(), MoveError::NotYourTurn);
    }

    #[test]
    fn test_apply_ai_move_returns_turn_to_human() {
        let mut session = solo_grid();
        session.apply_move(Side::First, Position::Index(4)).unwrap();
        assert_eq!(session.apply_ai_move(0).unwrap(), None);
        assert_eq!(session.turn(), Some(Side::First));
        assert_eq!(cells(&session)[0], Some(Side::Second));
    }

    #[test]
    fn test_apply_move_puzzle_solved_wins() {
        let mut session = puzzle("abba");
        session.apply_move(Side::First, Position::Letter('A')).unwrap();
        let applied = session.apply_move(Side::First, Position::Letter('B')).unwrap();
        assert!(matches!(applied, Applied::Concluded(Outcome::Win(Side::First))));
    }

    #[test]
    fn test_apply_move_puzzle_six_misses_loses() {
        let mut session = puzzle("cat");
        session.apply_move(Side::First, Position::Letter('C')).unwrap();
        let mut last = None;
        for letter in ['B', 'D', 'E', 'F', 'G', 'H'] {
            last = Some(session.apply_move(Side::First, Position::Letter(letter)).unwrap());
        }
        assert!(matches!(last, Some(Applied::Concluded(Outcome::Win(Side::Second)))));
    }

    // =====================================================================
    // Clock and messages
    // =====================================================================

    #[test]
    fn test_clock_outcome_no_moves_is_draw() {
        assert_eq!(connect_four().clock_outcome(), Outcome::Draw);
    }

    #[test]
    fn test_clock_outcome_last_mover_wins_by_default() {
        let mut session = connect_four();
        session.apply_move(Side::First, Position::Index(2)).unwrap();
        assert_eq!(
            session.clock_outcome(),
            Outcome::DefaultWin(Side::First, Forfeit::Timeout)
        );
    }

    #[test]
    fn test_clock_outcome_puzzle_goes_to_ai() {
        assert_eq!(puzzle("dog").clock_outcome(), Outcome::Win(Side::Second));
    }

    #[test]
    fn test_conclusion_message_timeout_draw() {
        let session = connect_four();
        assert_eq!(
            session.conclusion_message(Outcome::Draw, Side::First, true),
            "Time's up! It's a draw!"
        );
        assert_eq!(
            session.conclusion_message(Outcome::Draw, Side::First, false),
            "It's a draw!"
        );
    }

    #[test]
    fn test_conclusion_message_puzzle_loss_reveals_word() {
        let session = puzzle("dog");
        assert_eq!(
            session.conclusion_message(Outcome::Win(Side::Second), Side::First, false),
            "You lose! The word was \"DOG\""
        );
    }

    #[test]
    fn test_reset_puzzle_clears_outcome_and_guesses() {
        let mut session = puzzle("dog");
        session.apply_move(Side::First, Position::Letter('D')).unwrap();
        session.outcome = Some(Outcome::Win(Side::Second));

        assert!(session.reset_puzzle("CAT".into(), Some(90)));

        assert_eq!(session.phase(), SessionPhase::InProgress);
        assert_eq!(session.moves_made(), 0);
        assert!(!connect_four().reset_puzzle("CAT".into(), None));
    }

    #[test]
    fn test_side_of_finds_each_seat() {
        let session = connect_four();
        assert_eq!(session.side_of(&ClientId::new("a")), Some(Side::First));
        assert_eq!(session.side_of(&ClientId::new("b")), Some(Side::Second));
        assert_eq!(session.side_of(&ClientId::new("z")), None);
    }
}
