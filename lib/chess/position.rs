use super::{Color, Fen, Move, ParseFenError, Piece, San, Square};
use derive_more::{Display, Error, From};
use proptest::{prelude::*, sample::Selector};
use shakmaty as sm;
use std::{fmt, num::NonZeroU32, str::FromStr};
use test_strategy::Arbitrary;

/// Represents an illegal [`Move`] in a given [`Position`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{}` is illegal in this position", _0)]
pub struct IllegalMove(#[error(not(source))] pub Move);

/// The current position on the chess board.
///
/// This type guarantees that it only holds reachable positions.
#[derive(Display, Default, Clone, Eq, PartialEq, Hash, Arbitrary)]
#[display(fmt = "{}", "Fen::from(self.clone())")]
pub struct Position(
    #[strategy((0..256, any::<Selector>()).prop_map(|(moves, selector)| {
        let mut chess = sm::Chess::default();
        for _ in 0..moves {
            match selector.try_select(sm::Position::legal_moves(&chess)) {
                Some(m) => sm::Position::play_unchecked(&mut chess, &m),
                _ => break,
            }
        }
        chess
    }).no_shrink())]
    sm::Chess,
);

impl Position {
    /// The side to move.
    pub fn turn(&self) -> Color {
        sm::Position::turn(&self.0).into()
    }

    /// The current move number since the start of the game.
    ///
    /// It starts at 1, and is incremented after every move by black.
    pub fn fullmoves(&self) -> NonZeroU32 {
        sm::Position::fullmoves(&self.0)
    }

    /// The [`Piece`] at a given [`Square`], if any.
    pub fn piece_on(&self, s: Square) -> Option<Piece> {
        sm::Position::board(&self.0)
            .piece_at(s.into())
            .map(Into::into)
    }

    /// An iterator over the [`Piece`]s on the board and their [`Square`]s.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> {
        sm::Position::board(&self.0)
            .clone()
            .into_iter()
            .map(|(s, p)| (s.into(), p.into()))
    }

    /// Whether this position is a [check].
    ///
    /// [check]: https://www.chessprogramming.org/Check
    pub fn is_check(&self) -> bool {
        sm::Position::is_check(&self.0)
    }

    /// Whether this position is a [checkmate].
    ///
    /// [checkmate]: https://www.chessprogramming.org/Checkmate
    pub fn is_checkmate(&self) -> bool {
        sm::Position::is_checkmate(&self.0)
    }

    /// Whether this position is a [stalemate].
    ///
    /// [stalemate]: https://www.chessprogramming.org/Stalemate
    pub fn is_stalemate(&self) -> bool {
        sm::Position::is_stalemate(&self.0)
    }

    /// An iterator over the legal [`Move`]s that can be played in this position.
    pub fn moves(&self) -> impl ExactSizeIterator<Item = Move> {
        sm::Position::legal_moves(&self.0)
            .into_iter()
            .map(|vm| sm::uci::Uci::from_standard(&vm).into())
    }

    /// Play a [`Move`] if legal in this position.
    pub fn play(&mut self, m: Move) -> Result<San, IllegalMove> {
        match sm::uci::Uci::to_move(&m.into(), &self.0) {
            Ok(vm) if sm::Position::is_legal(&self.0, &vm) => {
                let san = sm::san::San::from_move(&self.0, &vm).into();
                sm::Position::play_unchecked(&mut self.0, &vm);
                Ok(san)
            }

            _ => Err(IllegalMove(m)),
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position(\"{self}\")")
    }
}

/// The reason why the position represented by the FEN string is illegal.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum IllegalPosition {
    #[display(fmt = "at least one side has no king")]
    MissingKing,
    #[display(fmt = "at least one side has multiple kings")]
    TooManyKings,
    #[display(fmt = "there are pawns on the back-rank")]
    PawnsOnBackRank,
    #[display(fmt = "the player in check is not to move")]
    OppositeCheck,
    #[display(fmt = "invalid en passant square; wrong rank, occupied, or missing pushed pawn")]
    InvalidEnPassantSquare,
    #[display(fmt = "invalid castling rights")]
    InvalidCastlingRights,
    #[display(fmt = "no sequence of legal moves can reach this position")]
    Other,
}

#[doc(hidden)]
impl From<sm::PositionError<sm::Chess>> for IllegalPosition {
    fn from(e: sm::PositionError<sm::Chess>) -> Self {
        let kinds = e.kinds();

        if kinds.contains(sm::PositionErrorKinds::MISSING_KING) {
            IllegalPosition::MissingKing
        } else if kinds.contains(sm::PositionErrorKinds::TOO_MANY_KINGS) {
            IllegalPosition::TooManyKings
        } else if kinds.contains(sm::PositionErrorKinds::PAWNS_ON_BACKRANK) {
            IllegalPosition::PawnsOnBackRank
        } else if kinds.contains(sm::PositionErrorKinds::OPPOSITE_CHECK) {
            IllegalPosition::OppositeCheck
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_EP_SQUARE) {
            IllegalPosition::InvalidEnPassantSquare
        } else if kinds.contains(sm::PositionErrorKinds::INVALID_CASTLING_RIGHTS) {
            IllegalPosition::InvalidCastlingRights
        } else {
            IllegalPosition::Other
        }
    }
}

impl TryFrom<Fen> for Position {
    type Error = IllegalPosition;

    fn try_from(fen: Fen) -> Result<Self, Self::Error> {
        Ok(Position(
            sm::Setup::from(fen).position(sm::CastlingMode::Standard)?,
        ))
    }
}

/// The reason why parsing [`Position`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParsePositionError {
    #[display(fmt = "failed to parse position; {}", _0)]
    InvalidFen(ParseFenError),
    #[display(fmt = "failed to parse position; {}", _0)]
    IllegalPosition(IllegalPosition),
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<Fen>()?.try_into()?)
    }
}

#[doc(hidden)]
impl From<Position> for sm::Setup {
    fn from(pos: Position) -> Self {
        sm::Position::into_setup(pos.0, sm::EnPassantMode::Always)
    }
}

#[doc(hidden)]
impl From<sm::Chess> for Position {
    fn from(chess: sm::Chess) -> Self {
        Position(chess)
    }
}

#[doc(hidden)]
impl From<Position> for sm::Chess {
    fn from(pos: Position) -> Self {
        pos.0
    }
}

#[doc(hidden)]
impl AsRef<sm::Chess> for Position {
    fn as_ref(&self) -> &sm::Chess {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Promotion, Role};
    use proptest::sample::Selector;
    use test_strategy::proptest;

    #[proptest]
    fn turn_returns_the_current_side_to_play(pos: Position) {
        assert_eq!(pos.turn(), sm::Setup::from(pos).turn.into());
    }

    #[proptest]
    fn fullmoves_returns_the_current_move_number(pos: Position) {
        assert_eq!(pos.fullmoves(), sm::Setup::from(pos).fullmoves);
    }

    #[proptest]
    fn default_position_is_the_standard_starting_position() {
        let pos = Position::default();
        assert_eq!(pos.turn(), Color::White);
        assert_eq!(pos.fullmoves().get(), 1);
        assert_eq!(pos.iter().count(), 32);
        assert_eq!(pos.moves().len(), 20);
    }

    #[proptest]
    fn piece_on_returns_the_piece_at_a_square(pos: Position, s: Square) {
        assert_eq!(
            pos.piece_on(s),
            sm::Position::board(pos.as_ref())
                .piece_at(s.into())
                .map(Into::into)
        );
    }

    #[proptest]
    fn iter_returns_pieces_and_their_squares(pos: Position) {
        for (s, p) in pos.iter() {
            assert_eq!(pos.piece_on(s), Some(p));
        }
    }

    #[proptest]
    fn checkmate_implies_check(pos: Position) {
        assert!(!pos.is_checkmate() || pos.is_check());
    }

    #[proptest]
    fn checkmate_and_stalemate_are_mutually_exclusive(pos: Position) {
        assert!(!(pos.is_checkmate() && pos.is_stalemate()));
    }

    #[proptest]
    fn checkmate_and_stalemate_imply_no_legal_moves(pos: Position) {
        if pos.is_checkmate() || pos.is_stalemate() {
            assert_eq!(pos.moves().len(), 0);
        }
    }

    #[proptest]
    fn moves_returns_all_legal_moves_from_this_position(pos: Position) {
        for m in pos.moves() {
            let mut next = pos.clone();
            assert_eq!(
                next.piece_on(m.whence()).map(|p| p.color()),
                Some(next.turn())
            );
            assert_eq!(next.play(m).err(), None);
        }
    }

    #[proptest]
    fn legal_move_updates_position(
        #[by_ref]
        #[filter(#pos.moves().len() > 0)]
        mut pos: Position,
        selector: Selector,
    ) {
        let m = selector.select(pos.moves());
        let turn = pos.turn();
        assert_eq!(pos.play(m).err(), None);
        assert_eq!(pos.turn(), !turn);
    }

    #[proptest]
    fn illegal_move_fails_without_changing_position(
        #[by_ref] mut pos: Position,
        #[filter(#pos.clone().play(#m).is_err())] m: Move,
    ) {
        let before = pos.clone();
        assert_eq!(pos.play(m), Err(IllegalMove(m)));
        assert_eq!(pos, before);
    }

    #[proptest]
    fn promoting_move_exchanges_the_pawn(
        #[filter(#pos.moves().any(|m| m.promotion() != Promotion::None))] pos: Position,
        selector: Selector,
    ) {
        let m = selector.select(
            pos.moves()
                .filter(|m| m.promotion() != Promotion::None)
                .collect::<Vec<_>>(),
        );

        let mut next = pos.clone();
        assert_eq!(next.play(m).err(), None);
        assert_eq!(
            next.piece_on(m.whither()).map(|p| p.role()),
            Option::<Role>::from(m.promotion())
        );
    }

    #[proptest]
    fn all_positions_can_be_represented_using_fen_notation(pos: Position) {
        assert_eq!(Position::try_from(Fen::from(pos.clone())), Ok(pos));
    }

    #[proptest]
    fn parsing_printed_position_is_an_identity(pos: Position) {
        assert_eq!(pos.to_string().parse(), Ok(pos));
    }

    #[proptest]
    fn position_has_an_equivalent_shakmaty_representation(pos: Position) {
        assert_eq!(Position::from(sm::Chess::from(pos.clone())), pos);
    }
}
