use crate::chess::{Piece, Position, Square};
use crate::view::{Camera, Mode};
use std::{array, ops::Index};

/// The shade of a square on the checkered board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Shade {
    Light,
    Dark,
}

impl From<Square> for Shade {
    fn from(s: Square) -> Self {
        if (s.file().index() + s.rank().index()) % 2 == 0 {
            Shade::Dark
        } else {
            Shade::Light
        }
    }
}

/// The reason why a [`Tile`] is emphasized.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Highlight {
    /// The square the player picked a piece from.
    Selected,
    /// A square the picked piece can legally move to.
    Target,
}

/// One square of a rendered [`Scene`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Tile {
    pub square: Square,
    pub shade: Shade,
    pub piece: Option<Piece>,
    pub highlight: Option<Highlight>,
}

/// A drawable snapshot of the board.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    mode: Mode,
    camera: Option<Camera>,
    tiles: [Tile; 64],
}

impl Scene {
    /// The perspective this scene was rendered for.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The pose of the camera, if the scene is three dimensional.
    pub fn camera(&self) -> Option<Camera> {
        self.camera
    }

    /// All 64 tiles ordered by [square index][`Square::index`].
    pub fn tiles(&self) -> &[Tile; 64] {
        &self.tiles
    }
}

impl Index<Square> for Scene {
    type Output = Tile;

    fn index(&self, s: Square) -> &Self::Output {
        &self.tiles[s.index() as usize]
    }
}

/// Renders a snapshot of `pos` for the given perspective.
///
/// The selected square and the squares in `targets` are emphasized, the
/// former taking precedence. The pose of the camera is part of the scene
/// only if `mode` is [`Mode::ThreeD`].
pub fn render(
    pos: &Position,
    mode: Mode,
    camera: Camera,
    selected: Option<Square>,
    targets: &[Square],
) -> Scene {
    Scene {
        mode,
        camera: match mode {
            Mode::TwoD => None,
            Mode::ThreeD => Some(camera),
        },
        tiles: array::from_fn(|i| {
            let square = Square::from_index(i as u8);

            Tile {
                square,
                shade: square.into(),
                piece: pos.piece_on(square),
                highlight: if selected == Some(square) {
                    Some(Highlight::Selected)
                } else if targets.contains(&square) {
                    Some(Highlight::Target)
                } else {
                    None
                },
            }
        }),
    }
}
