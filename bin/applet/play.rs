use crate::io::Pipe;
use anyhow::{Context, Error as Anyhow};
use clap::Parser;
use lib::chess::{Fen, Position};
use lib::session::Session;
use lib::view::{Camera, Mode};
use tokio::io::{stdin, stdout};
use tracing::instrument;

mod console;
mod screen;

/// An interactive game of chess.
#[derive(Debug, Default, Parser)]
#[clap(disable_help_flag = true, disable_version_flag = true)]
pub struct Play {
    /// The starting position in Forsyth-Edwards notation.
    #[clap(short, long, default_value_t)]
    fen: Fen,

    /// The initial view mode.
    #[clap(short, long, default_value_t)]
    view: Mode,

    /// The initial pose of the camera in the 3d view.
    #[clap(short, long, default_value_t)]
    camera: Camera,
}

impl Play {
    #[instrument(level = "trace", skip(self), err)]
    pub async fn execute(self) -> Result<(), Anyhow> {
        let pos = Position::try_from(self.fen).context("illegal starting position")?;
        let session = Session::new(pos, self.view, self.camera);
        let io = Pipe::new(stdout(), stdin());
        Ok(console::Console::new(session, io).run().await?)
    }
}
