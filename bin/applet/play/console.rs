use super::screen::{Screen, Sheet};
use crate::io::Io;
use clap::Parser;
use derive_more::{Display, Error};
use lib::chess::{Move, Square};
use lib::session::Session;
use lib::view::{Adjust, Mode};
use std::{io, str::FromStr};
use time::OffsetDateTime;
use tracing::instrument;

#[cfg(test)]
use test_strategy::Arbitrary;

/// A vertical direction of camera motion.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
enum Vertical {
    #[display(fmt = "up")]
    Up,
    #[display(fmt = "down")]
    Down,
}

impl From<Vertical> for Adjust {
    fn from(direction: Vertical) -> Self {
        match direction {
            Vertical::Up => Adjust::TiltUp,
            Vertical::Down => Adjust::TiltDown,
        }
    }
}

impl FromStr for Vertical {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Vertical::Up),
            "down" => Ok(Vertical::Down),
            _ => Err(ParseDirectionError("up", "down")),
        }
    }
}

/// A horizontal direction of camera motion.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
enum Horizontal {
    #[display(fmt = "left")]
    Left,
    #[display(fmt = "right")]
    Right,
}

impl From<Horizontal> for Adjust {
    fn from(direction: Horizontal) -> Self {
        match direction {
            Horizontal::Left => Adjust::PanLeft,
            Horizontal::Right => Adjust::PanRight,
        }
    }
}

impl FromStr for Horizontal {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Horizontal::Left),
            "right" => Ok(Horizontal::Right),
            _ => Err(ParseDirectionError("left", "right")),
        }
    }
}

/// A direction of camera motion along its line of sight.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(Arbitrary))]
enum Depth {
    #[display(fmt = "in")]
    In,
    #[display(fmt = "out")]
    Out,
}

impl From<Depth> for Adjust {
    fn from(direction: Depth) -> Self {
        match direction {
            Depth::In => Adjust::ZoomIn,
            Depth::Out => Adjust::ZoomOut,
        }
    }
}

impl FromStr for Depth {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Depth::In),
            "out" => Ok(Depth::Out),
            _ => Err(ParseDirectionError("in", "out")),
        }
    }
}

/// The reason why parsing a direction of camera motion failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse direction; expected `{}` or `{}`", _0, _1)]
struct ParseDirectionError(
    #[error(not(source))] &'static str,
    #[error(not(source))] &'static str,
);

/// Console Command
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Parser)]
#[cfg_attr(test, derive(Arbitrary))]
#[clap(
    name = "",
    multicall = true,
    arg_required_else_help = true,
    disable_help_flag = true,
    disable_version_flag = true
)]
enum Cmd {
    /// Play a move.
    #[display(fmt = "move {}", descriptor)]
    #[clap(after_help = r#"SYNTAX:
    <DESCRIPTOR>    ::= <SQUARE:from><SQUARE:to>[<PROMOTION>]
    <SQUARE>        ::= <FILE><RANK>
    <FILE>          ::= a|b|c|d|e|f|g|h
    <RANK>          ::= 1|2|3|4|5|6|7|8
    <PROMOTION>     ::= q|r|b|n"#)]
    Move {
        /// The move to play in pure coordinate notation.
        descriptor: Move,
    },

    /// Click a square of the board.
    #[display(fmt = "click {}", square)]
    Click {
        /// The square to click in algebraic notation.
        square: Square,
    },

    /// Retract the last move played.
    #[display(fmt = "undo")]
    Undo,

    /// Start a new game from the initial position.
    #[display(fmt = "new")]
    New,

    /// Switch between the 2d and the 3d views.
    #[display(fmt = "view {}", mode)]
    View {
        /// The view to switch to, either `2d` or `3d`.
        mode: Mode,
    },

    /// Rotate the camera up or down.
    #[display(fmt = "tilt {}", direction)]
    Tilt {
        /// Either `up` or `down`.
        direction: Vertical,
    },

    /// Rotate the camera left or right.
    #[display(fmt = "pan {}", direction)]
    Pan {
        /// Either `left` or `right`.
        direction: Horizontal,
    },

    /// Move the camera closer to the board or further away.
    #[display(fmt = "zoom {}", direction)]
    Zoom {
        /// Either `in` or `out`.
        direction: Depth,
    },

    /// List the moves played so far.
    #[display(fmt = "moves")]
    Moves,

    /// Export the game in PGN.
    #[display(fmt = "export")]
    Export,

    /// Leave the console.
    #[display(fmt = "quit")]
    Quit,
}

/// An interactive chessboard console.
#[derive(Debug)]
pub struct Console<T: Io> {
    session: Session,
    io: T,
}

impl<T: Io> Console<T> {
    pub fn new(session: Session, io: T) -> Self {
        Console { session, io }
    }

    /// Runs the console until the player quits.
    #[instrument(level = "trace", skip(self), err)]
    pub async fn run(&mut self) -> io::Result<()> {
        loop {
            let screen = Screen(&self.session).to_string();
            self.io.send(&screen).await?;

            loop {
                self.io.flush().await?;
                let line = self.io.recv().await?;

                match Cmd::try_parse_from(line.split_whitespace()) {
                    Err(e) => self.io.send(&e.to_string()).await?,

                    Ok(Cmd::Quit) => return Ok(()),

                    Ok(Cmd::Moves) => {
                        let sheet = Sheet(&self.session).to_string();
                        self.io.send(&sheet).await?;
                    }

                    Ok(Cmd::Export) => {
                        let date = OffsetDateTime::now_utc().date();
                        let pgn = self.session.pgn(date).to_string();
                        self.io.send(&pgn).await?;
                    }

                    Ok(Cmd::Move { descriptor }) => match self.session.play(descriptor) {
                        Err(e) => self.io.send(&e.to_string()).await?,
                        Ok(_) => break,
                    },

                    Ok(Cmd::Click { square }) => {
                        self.session.click(square);
                        break;
                    }

                    Ok(Cmd::Undo) => {
                        self.session.undo();
                        break;
                    }

                    Ok(Cmd::New) => {
                        self.session.reset();
                        break;
                    }

                    Ok(Cmd::View { mode }) => {
                        self.session.switch(mode);
                        break;
                    }

                    Ok(Cmd::Tilt { direction }) => {
                        if self.adjust(direction.into()).await? {
                            break;
                        }
                    }

                    Ok(Cmd::Pan { direction }) => {
                        if self.adjust(direction.into()).await? {
                            break;
                        }
                    }

                    Ok(Cmd::Zoom { direction }) => {
                        if self.adjust(direction.into()).await? {
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Moves the camera one step, unless the current view has no camera.
    async fn adjust(&mut self, step: Adjust) -> io::Result<bool> {
        if self.session.mode() != Mode::ThreeD {
            let warning = "the camera can only be adjusted in the 3d view";
            self.io.send(warning).await?;
            Ok(false)
        } else {
            self.session.adjust(step);
            Ok(true)
        }
    }
}
