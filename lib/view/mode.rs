use derive_more::{Display, Error};
use std::str::FromStr;
use test_strategy::Arbitrary;

/// The projection of the board on the screen.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Arbitrary)]
pub enum Mode {
    /// A flat, top-down diagram of the board.
    #[display(fmt = "2d")]
    TwoD,
    /// A perspective projection of the board seen through the [`Camera`][`super::Camera`].
    #[display(fmt = "3d")]
    ThreeD,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::TwoD
    }
}

/// The reason why the string is not a valid view mode.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse view mode; expected `2d` or `3d`")]
pub struct ParseModeError;

impl FromStr for Mode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "2d" => Ok(Mode::TwoD),
            "3d" => Ok(Mode::ThreeD),
            _ => Err(ParseModeError),
        }
    }
}
