use crate::chess::{Move, Piece, Position, San};

/// One ply of the game and the state needed to retract it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Record {
    pub(super) played: Move,
    pub(super) san: San,
    pub(super) captured: Option<Piece>,
    pub(super) prior: Position,
}

impl Record {
    /// The move in pure coordinate notation.
    pub fn played(&self) -> Move {
        self.played
    }

    /// The move in standard algebraic notation.
    pub fn san(&self) -> &San {
        &self.san
    }

    /// The [`Piece`] that stood on the destination square, if any.
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }
}
