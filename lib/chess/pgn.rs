use super::{Color, Fen, Outcome, San};
use std::fmt::{self, Display};
use std::num::NonZeroU32;
use time::Date;

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
use time::Month;

/// The description of a chess game.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Pgn {
    /// The date the game was played on.
    #[cfg_attr(test, strategy((1970i32..=2100, 1u8..=12, 1u8..=28).prop_map(|(y, m, d)| {
        Date::from_calendar_date(y, Month::try_from(m).unwrap(), d).unwrap()
    })))]
    pub date: Date,
    pub white: String,
    pub black: String,
    /// How the game ended, if it is over.
    pub outcome: Option<Outcome>,
    /// The position the game started from, unless standard.
    pub start: Option<Fen>,
    /// The move number of the first recorded move.
    #[cfg_attr(test, strategy((1u32..=300).prop_map(|n| NonZeroU32::new(n).unwrap())))]
    pub fullmoves: NonZeroU32,
    /// The side that makes the first recorded move.
    pub turn: Color,
    pub moves: Vec<San>,
}

impl Pgn {
    fn result(&self) -> &'static str {
        match self.outcome {
            None => "*",
            Some(Outcome::Stalemate) => "1/2-1/2",
            Some(Outcome::Checkmate(Color::White)) => "1-0",
            Some(Outcome::Checkmate(Color::Black)) => "0-1",
        }
    }
}

/// Prints a simplified [PGN] description of the game.
///
/// [PGN]: https://www.chessprogramming.org/Portable_Game_Notation
impl Display for Pgn {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "[Date \"{:04}.{:02}.{:02}\"]",
            self.date.year(),
            u8::from(self.date.month()),
            self.date.day()
        )?;

        writeln!(f, "[White {:?}]", self.white)?;
        writeln!(f, "[Black {:?}]", self.black)?;
        writeln!(f, "[Result {:?}]", self.result())?;

        if let Some(fen) = &self.start {
            writeln!(f, "[SetUp \"1\"]")?;
            writeln!(f, "[FEN \"{}\"]", fen)?;
        }

        let mut n = self.fullmoves.get();
        let mut side = self.turn;

        for (i, san) in self.moves.iter().enumerate() {
            if side == Color::White {
                write!(f, "{}. ", n)?;
            } else if i == 0 {
                write!(f, "{}... ", n)?;
            }

            write!(f, "{} ", san)?;

            if side == Color::Black {
                n += 1;
            }

            side = !side;
        }

        match self.outcome {
            Some(Outcome::Stalemate) => write!(f, "{{stalemate}} {}", self.result()),
            _ => write!(f, "{}", self.result()),
        }
    }
}
