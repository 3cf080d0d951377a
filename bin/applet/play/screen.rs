use arrayvec::ArrayVec;
use lib::chess::{Color, File, Rank, Square};
use lib::session::{Session, Status};
use lib::view::{Camera, Highlight, Scene, Shade};
use std::fmt::{self, Display};

/// The width of the perspective canvas in character cells.
const COLS: usize = 72;

/// The height of the perspective canvas in character cells.
const ROWS: usize = 28;

/// How many character cells one view unit spans horizontally.
const SCALE: f32 = 48.0;

/// The board, the capture tallies, and the status line, ready for display.
pub struct Screen<'a>(pub &'a Session);

impl Display for Screen<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scene = self.0.scene();

        match scene.camera() {
            None => writeln!(f, "{}", Diagram(&scene))?,
            Some(camera) => writeln!(f, "{}", Perspective(&scene, camera))?,
        }

        writeln!(f)?;

        for side in [Color::White, Color::Black] {
            let spoils = self.0.captured(!side);

            if !spoils.is_empty() {
                write!(f, "the {} player took", side)?;

                for p in spoils {
                    write!(f, " {:#}", p)?;
                }

                writeln!(f)?;
            }
        }

        match self.0.status() {
            Status::Normal => write!(f, "the {} player is to move", self.0.position().turn()),
            Status::Check => write!(f, "the {} player is in check", self.0.position().turn()),
            Status::Stalemate => write!(f, "stalemate, the game is drawn"),
            Status::Checkmate => {
                write!(f, "checkmate, the {} player wins", !self.0.position().turn())
            }
        }
    }
}

/// The scene as a flat diagram.
///
/// The selected piece is bracketed and every legal destination is marked,
/// with a middle dot if vacant or parentheses around the piece otherwise.
struct Diagram<'a>(&'a Scene);

impl Display for Diagram<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for file in File::iter() {
            write!(f, "   {}", file)?;
        }

        writeln!(f)?;
        writeln!(f, "   +---+---+---+---+---+---+---+---+")?;

        for rank in Rank::iter().rev() {
            write!(f, " {} |", rank)?;

            for file in File::iter() {
                let tile = self.0[Square(file, rank)];

                match (tile.piece, tile.highlight) {
                    (Some(p), Some(Highlight::Selected)) => write!(f, "[{:#}]|", p)?,
                    (Some(p), Some(Highlight::Target)) => write!(f, "({:#})|", p)?,
                    (Some(p), None) => write!(f, " {:#} |", p)?,
                    (None, Some(Highlight::Target)) => write!(f, " · |")?,
                    (None, _) => write!(f, "   |")?,
                }
            }

            writeln!(f, " {}", rank)?;
            writeln!(f, "   +---+---+---+---+---+---+---+---+")?;
        }

        write!(f, "  ")?;
        for file in File::iter() {
            write!(f, "   {}", file)?;
        }

        Ok(())
    }
}

/// The scene in perspective, as seen by the camera.
struct Perspective<'a>(&'a Scene, Camera);

impl Display for Perspective<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut glyphs: ArrayVec<_, 64> = ArrayVec::new();

        for tile in self.0.tiles() {
            let p = [
                (tile.square.file().index() as f32 - 3.5) / 4.0,
                (tile.square.rank().index() as f32 - 3.5) / 4.0,
                0.0,
            ];

            let [x, y, depth] = self.1.project(p);

            // character cells are roughly twice as tall as they are wide
            let col = COLS as i32 / 2 + (x * SCALE) as i32;
            let row = ROWS as i32 / 2 - (y * SCALE / 2.0) as i32;

            let glyph = match (tile.piece.map(|p| p.figurine()), tile.highlight) {
                (Some(fig), Some(Highlight::Selected)) => ['[', fig, ']'],
                (Some(fig), Some(Highlight::Target)) => ['(', fig, ')'],
                (Some(fig), None) => [' ', fig, ' '],
                (None, Some(Highlight::Target)) => ['(', '·', ')'],
                (None, _) => match tile.shade {
                    Shade::Light => [' ', '·', ' '],
                    Shade::Dark => [' ', '•', ' '],
                },
            };

            glyphs.push((tile.piece.is_some(), depth, col, row, glyph));
        }

        // board marks first, then the pieces standing on them, far to near
        glyphs.sort_unstable_by(|a, b| a.0.cmp(&b.0).then(b.1.total_cmp(&a.1)));

        let mut canvas = [[' '; COLS]; ROWS];

        for (_, _, col, row, glyph) in glyphs {
            for (i, c) in glyph.into_iter().enumerate() {
                plot(&mut canvas, row, col + i as i32 - 1, c);
            }
        }

        for (i, row) in canvas.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }

            write!(f, "{}", row.iter().collect::<String>().trim_end())?;
        }

        Ok(())
    }
}

fn plot(canvas: &mut [[char; COLS]; ROWS], row: i32, col: i32, c: char) {
    if c != ' ' {
        if let (Ok(row), Ok(col)) = (usize::try_from(row), usize::try_from(col)) {
            if let Some(cell) = canvas.get_mut(row).and_then(|r| r.get_mut(col)) {
                *cell = c;
            }
        }
    }
}

/// The moves played so far, one line per full move.
pub struct Sheet<'a>(pub &'a Session);

impl Display for Sheet<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut number = self.0.start().fullmoves().get();
        let mut records = self.0.history().iter();
        let mut lines = Vec::new();

        if self.0.start().turn() == Color::Black {
            if let Some(r) = records.next() {
                lines.push(format!("{}... {}", number, r.san()));
                number += 1;
            }
        }

        while let Some(w) = records.next() {
            match records.next() {
                Some(b) => lines.push(format!("{}. {} {}", number, w.san(), b.san())),
                None => lines.push(format!("{}. {}", number, w.san())),
            }

            number += 1;
        }

        if lines.is_empty() {
            write!(f, "no moves have been played yet")
        } else {
            write!(f, "{}", lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib::chess::Position;
    use lib::view::{render, Mode};
    use test_strategy::proptest;

    #[proptest]
    fn the_diagram_lays_the_board_out_in_a_grid(pos: Position) {
        let scene = render(&pos, Mode::TwoD, Camera::default(), None, &[]);
        let diagram = Diagram(&scene).to_string();

        assert_eq!(diagram.lines().count(), 19);
    }

    #[proptest]
    fn the_diagram_shows_every_piece_on_the_board(pos: Position) {
        let scene = render(&pos, Mode::TwoD, Camera::default(), None, &[]);
        let diagram = Diagram(&scene).to_string();

        let pieces: Vec<_> = pos.iter().map(|(_, p)| p).collect();

        for &p in &pieces {
            assert_eq!(
                diagram.matches(p.figurine()).count(),
                pieces.iter().filter(|&&q| q == p).count()
            );
        }
    }

    #[proptest]
    fn the_selection_and_its_vacant_targets_are_highlighted() {
        let pos = Position::default();
        let targets = ["e3".parse()?, "e4".parse()?];
        let scene = render(
            &pos,
            Mode::TwoD,
            Camera::default(),
            Some("e2".parse()?),
            &targets,
        );

        let diagram = Diagram(&scene).to_string();

        assert!(diagram.contains("[♙]"));
        assert_eq!(diagram.matches('·').count(), 2);
    }

    #[proptest]
    fn a_target_holding_a_piece_is_parenthesized() {
        let pos: Position = "k7/8/8/3p4/4P3/8/8/K7 w - - 0 1".parse()?;
        let targets = ["d5".parse()?, "e5".parse()?];
        let scene = render(
            &pos,
            Mode::TwoD,
            Camera::default(),
            Some("e4".parse()?),
            &targets,
        );

        let diagram = Diagram(&scene).to_string();

        assert!(diagram.contains("[♙]"));
        assert!(diagram.contains("(♟)"));
        assert_eq!(diagram.matches('·').count(), 1);
    }

    #[proptest]
    fn the_perspective_fits_the_canvas(pos: Position, c: Camera) {
        let scene = render(&pos, Mode::ThreeD, c, None, &[]);
        let view = Perspective(&scene, c).to_string();

        assert!(view.lines().count() <= ROWS);

        for line in view.lines() {
            assert!(line.chars().count() <= COLS);
        }
    }

    #[proptest]
    fn the_default_pose_shows_the_entire_starting_lineup() {
        let pos = Position::default();
        let c = Camera::default();
        let scene = render(&pos, Mode::ThreeD, c, None, &[]);
        let view = Perspective(&scene, c).to_string();

        let lineup = [
            ('♙', 8),
            ('♟', 8),
            ('♖', 2),
            ('♜', 2),
            ('♘', 2),
            ('♞', 2),
            ('♗', 2),
            ('♝', 2),
            ('♕', 1),
            ('♛', 1),
            ('♔', 1),
            ('♚', 1),
        ];

        for (figurine, count) in lineup {
            assert_eq!(view.matches(figurine).count(), count);
        }
    }

    #[proptest]
    fn the_sheet_numbers_moves_by_full_move() {
        let mut s = Session::default();

        for m in ["e2e4", "e7e5", "g1f3"] {
            s.play(m.parse()?)?;
        }

        assert_eq!(Sheet(&s).to_string(), "1. e4 e5\n2. Nf3");
    }

    #[proptest]
    fn the_sheet_counts_from_the_starting_position() {
        let pos = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse()?;
        let mut s = Session::new(pos, Mode::default(), Camera::default());

        s.play("e7e5".parse()?)?;
        s.play("g1f3".parse()?)?;

        assert_eq!(Sheet(&s).to_string(), "1... e5\n2. Nf3");
    }

    #[proptest]
    fn the_sheet_mentions_a_game_with_no_moves(pos: Position, m: Mode, c: Camera) {
        let s = Session::new(pos, m, c);
        assert_eq!(Sheet(&s).to_string(), "no moves have been played yet");
    }

    #[proptest]
    fn the_screen_captions_the_state_of_the_game(s: Session) {
        let screen = Screen(&s).to_string();

        let caption = match s.status() {
            Status::Normal => format!("the {} player is to move", s.position().turn()),
            Status::Check => format!("the {} player is in check", s.position().turn()),
            Status::Checkmate => format!("checkmate, the {} player wins", !s.position().turn()),
            Status::Stalemate => "stalemate, the game is drawn".to_string(),
        };

        assert!(screen.ends_with(&caption));
    }

    #[proptest]
    fn the_screen_tallies_the_captured_pieces(
        #[filter(#s.history().iter().any(|r| r.captured().is_some()))] s: Session,
    ) {
        let screen = Screen(&s).to_string();

        for side in [Color::White, Color::Black] {
            let spoils = s.captured(!side);

            if !spoils.is_empty() {
                let mut line = format!("the {} player took", side);

                for p in spoils {
                    line.push(' ');
                    line.push(p.figurine());
                }

                assert!(screen.contains(&line));
            }
        }
    }

    #[proptest]
    fn the_screen_shows_a_flat_diagram_in_the_2d_view(pos: Position, c: Camera) {
        let s = Session::new(pos, Mode::TwoD, c);
        assert!(Screen(&s).to_string().contains('+'));
    }

    #[proptest]
    fn the_screen_shows_a_projection_in_the_3d_view(pos: Position, c: Camera) {
        let s = Session::new(pos, Mode::ThreeD, c);
        assert!(!Screen(&s).to_string().contains('+'));
    }
}
