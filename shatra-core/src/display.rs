//! Text rendering of a position

use std::fmt;

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::Board;
use crate::pieces::Color;

/// Board drawn from one side's point of view; that side's citadel is at
/// the bottom
pub struct BoardView<'a> {
    board: &'a Board,
    perspective: Color,
}

impl Board {
    pub fn view(&self, perspective: Color) -> BoardView<'_> {
        BoardView { board: self, perspective }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows: Vec<i8> = match self.perspective {
            Color::White => (0..BOARD_HEIGHT).collect(),
            Color::Black => (0..BOARD_HEIGHT).rev().collect(),
        };

        for y in rows {
            write!(f, "{:>2} ", y)?;
            for x in 0..BOARD_WIDTH {
                let mark = match self.board.cell_at(x, y) {
                    None => ' ',
                    Some(cell) => cell.figure.map_or('.', |figure| figure.symbol()),
                };
                write!(f, "[{}]", mark)?;
            }
            writeln!(f)?;
        }

        write!(f, "   ")?;
        for x in 0..BOARD_WIDTH {
            write!(f, " {} ", x)?;
        }
        writeln!(f)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.view(Color::White).fmt(f)
    }
}
