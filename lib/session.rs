use crate::chess::{
    Color, IllegalMove, Move, Outcome, Pgn, Piece, Position, Promotion, Rank, Role, San, Square,
};
use crate::view::{render, Adjust, Camera, Mode, Scene};
use proptest::{prelude::*, sample::Selector};
use time::Date;
use tracing::instrument;

mod record;
mod status;

pub use record::*;
pub use status::*;

/// The effect of a [`click`][`Session::click`] on the selection.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Click {
    /// A piece of the side to move was picked.
    Selected(Square),
    /// The move from the previously selected square was played.
    Played(Move),
    /// The selection was dropped.
    Cleared,
    /// The click had no effect.
    Ignored,
}

/// An interactive game of chess and its view state.
///
/// A [`Session`] owns everything one board needs: the position, the
/// selection, the history of moves played, and the view configuration.
/// Every user event maps to exactly one method and either applies in full
/// or leaves the session untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    start: Position,
    position: Position,
    selected: Option<Square>,
    history: Vec<Record>,
    mode: Mode,
    camera: Camera,
}

impl Session {
    /// Opens a [`Session`] from a starting [`Position`].
    pub fn new(start: Position, mode: Mode, camera: Camera) -> Self {
        Session {
            position: start.clone(),
            start,
            selected: None,
            history: Vec::new(),
            mode,
            camera,
        }
    }

    /// The [`Position`] the game started from.
    pub fn start(&self) -> &Position {
        &self.start
    }

    /// The current [`Position`].
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The selected [`Square`], if any.
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    /// The [`Record`]s of the moves played since the game started.
    pub fn history(&self) -> &[Record] {
        &self.history
    }

    /// The view [`Mode`].
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The pose of the [`Camera`].
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// Plays a [`Move`] if it is legal in the current position.
    ///
    /// A move that pushes a pawn of the side to move onto its last rank
    /// without naming a promotion promotes to a queen.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn play(&mut self, m: Move) -> Result<San, IllegalMove> {
        let m = self.promote(m);
        let captured = self.position.piece_on(m.whither());
        let prior = self.position.clone();
        let san = self.position.play(m)?;

        self.history.push(Record {
            played: m,
            san: san.clone(),
            captured,
            prior,
        });

        self.selected = None;

        Ok(san)
    }

    /// Handles a click on a [`Square`] of the board.
    ///
    /// The first click picks a piece of the side to move and the next one
    /// drops it on any of its legal destinations, promoting pawns to
    /// queens. Clicking another piece of the side to move re-selects it
    /// instead, and clicking anywhere else drops the selection.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn click(&mut self, s: Square) -> Click {
        if let Some(prior) = self.selected {
            if self.targets().contains(&s) {
                let m = self.promote(Move(prior, s, Promotion::None));
                if self.play(m).is_ok() {
                    return Click::Played(m);
                }
            }
        }

        match self.position.piece_on(s) {
            Some(p) if p.color() == self.position.turn() => {
                self.selected = Some(s);
                Click::Selected(s)
            }

            _ if self.selected.take().is_some() => Click::Cleared,
            _ => Click::Ignored,
        }
    }

    /// Takes back the last [`Move`] played, if any, and returns it.
    #[instrument(level = "debug", skip(self), ret)]
    pub fn undo(&mut self) -> Option<Move> {
        let r = self.history.pop()?;
        self.position = r.prior;
        self.selected = None;
        Some(r.played)
    }

    /// Starts a fresh game from the [`Session`]'s starting position.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        self.position = self.start.clone();
        self.history.clear();
        self.selected = None;
    }

    /// Sets the view [`Mode`], dropping the selection.
    #[instrument(level = "debug", skip(self))]
    pub fn switch(&mut self, mode: Mode) {
        self.mode = mode;
        self.selected = None;
    }

    /// Moves the [`Camera`] one step, unless the view is two dimensional.
    #[instrument(level = "debug", skip(self))]
    pub fn adjust(&mut self, step: Adjust) {
        if self.mode == Mode::ThreeD {
            self.camera = self.camera.adjust(step);
        }
    }

    /// The legal destinations of the selected piece.
    ///
    /// The set is derived from the current position on every call and is
    /// empty if nothing is selected.
    pub fn targets(&self) -> Vec<Square> {
        let mut targets: Vec<_> = match self.selected {
            None => return Vec::new(),
            Some(s) => self
                .position
                .moves()
                .filter(|m| m.whence() == s)
                .map(|m| m.whither())
                .collect(),
        };

        targets.sort_unstable();
        targets.dedup();
        targets
    }

    /// The [`Piece`]s a player has lost since the game started, in order
    /// of capture.
    pub fn captured(&self, side: Color) -> Vec<Piece> {
        self.history
            .iter()
            .filter_map(Record::captured)
            .filter(|p| p.color() == side)
            .collect()
    }

    /// The [`Status`] of the game.
    pub fn status(&self) -> Status {
        Status::from(&self.position)
    }

    /// How the game ended, if it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status() {
            Status::Checkmate => Some(Outcome::Checkmate(!self.position.turn())),
            Status::Stalemate => Some(Outcome::Stalemate),
            _ => None,
        }
    }

    /// Renders the board for display.
    pub fn scene(&self) -> Scene {
        render(
            &self.position,
            self.mode,
            self.camera,
            self.selected,
            &self.targets(),
        )
    }

    /// Exports the game in portable game notation.
    pub fn pgn(&self, date: Date) -> Pgn {
        Pgn {
            date,
            white: "?".to_string(),
            black: "?".to_string(),
            outcome: self.outcome(),
            start: (self.start != Position::default()).then(|| self.start.clone().into()),
            fullmoves: self.start.fullmoves(),
            turn: self.start.turn(),
            moves: self.history.iter().map(|r| r.san.clone()).collect(),
        }
    }

    /// Fills in the default promotion if `m` pushes a pawn of the side to
    /// move onto its last rank.
    fn promote(&self, m: Move) -> Move {
        match self.position.piece_on(m.whence()) {
            Some(p)
                if p.color() == self.position.turn()
                    && p.role() == Role::Pawn
                    && m.promotion() == Promotion::None
                    && m.whither().rank() == Rank::last(p.color()) =>
            {
                Move(m.whence(), m.whither(), Promotion::Queen)
            }

            _ => m,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Position::default(), Mode::default(), Camera::default())
    }
}

impl Arbitrary for Session {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        let events = (any::<Position>(), 0..24usize, any::<Selector>());

        (events, any::<Mode>(), any::<Camera>())
            .prop_map(|((start, plies, selector), mode, camera)| {
                let mut session = Session::new(start, mode, camera);

                for _ in 0..plies {
                    match selector.try_select(session.position().moves()) {
                        Some(m) => session.play(m).ok(),
                        None => break,
                    };
                }

                session
            })
            .no_shrink()
            .boxed()
    }
}
