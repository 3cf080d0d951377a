use crate::chess::Position;
use derive_more::Display;

/// The status of the game at a given [`Position`].
///
/// Checkmate implies check, so the classification is by priority: checkmate
/// first, then stalemate, then check.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Status {
    /// The game goes on and the side to move is not in check.
    #[display(fmt = "normal")]
    Normal,

    /// The side to move is in check but still has a move to play.
    #[display(fmt = "check")]
    Check,

    /// The side to move is in check and has no move to play.
    #[display(fmt = "checkmate")]
    Checkmate,

    /// The side to move is not in check yet has no move to play.
    #[display(fmt = "stalemate")]
    Stalemate,
}

impl From<&Position> for Status {
    fn from(pos: &Position) -> Self {
        if pos.is_checkmate() {
            Status::Checkmate
        } else if pos.is_stalemate() {
            Status::Stalemate
        } else if pos.is_check() {
            Status::Check
        } else {
            Status::Normal
        }
    }
}
