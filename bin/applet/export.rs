use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Fen, Move, Position};
use lib::session::Session;
use lib::view::{Camera, Mode};
use time::OffsetDateTime;
use tracing::instrument;

/// Exports a game in Portable Game Notation.
#[derive(Debug, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Export {
    /// The starting position in Forsyth-Edwards notation.
    #[clap(short, long, default_value_t)]
    fen: Fen,

    /// The moves played, in pure coordinate notation.
    moves: Vec<Move>,
}

impl Export {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let pos = Position::try_from(self.fen).context("illegal starting position")?;
        let mut session = Session::new(pos, Mode::default(), Camera::default());

        for m in self.moves {
            session
                .play(m)
                .with_context(|| format!("failed to play `{}`", m))?;
        }

        println!("{}", session.pgn(OffsetDateTime::now_utc().date()));

        Ok(())
    }
}
