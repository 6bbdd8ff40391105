//! Cross-shaped board geometry and the cell registry

use serde::{Deserialize, Serialize};

use crate::pieces::{Color, Figure};

/// Cell identifier (1-based, row-major top to bottom, left to right)
pub type CellId = u8;

/// Number of rows
pub const BOARD_HEIGHT: i8 = 14;

/// Width of the widest row
pub const BOARD_WIDTH: i8 = 7;

/// Number of cells in the standard layout
pub const CELL_COUNT: usize = 62;

/// Inclusive x-span of every row, top to bottom
pub const ROW_SPANS: [(i8, i8); BOARD_HEIGHT as usize] = [
    (2, 4), // Black fortress
    (2, 4),
    (2, 4),
    (3, 3), // Black gate
    (0, 6), // Field
    (0, 6),
    (0, 6),
    (0, 6),
    (0, 6),
    (0, 6),
    (3, 3), // White gate
    (2, 4), // White fortress
    (2, 4),
    (2, 4),
];

/// Compass directions (dx, dy), y grows downward
/// Index: 0=N, 1=NE, 2=E, 3=SE, 4=S, 5=SW, 6=W, 7=NW
pub const DIRECTIONS: [(i8, i8); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

// ============================================================================
// COORDINATES AND ZONES
// ============================================================================

/// Integer board coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Check if this coordinate is on the board
    pub fn is_valid(&self) -> bool {
        if self.y < 0 || self.y >= BOARD_HEIGHT {
            return false;
        }
        let (start, end) = ROW_SPANS[self.y as usize];
        self.x >= start && self.x <= end
    }

    pub fn offset(&self, dx: i8, dy: i8) -> Coord {
        Coord::new(self.x + dx, self.y + dy)
    }

    /// Checkerboard shade of the square
    pub fn shade(&self) -> Color {
        if (self.x + self.y).rem_euclid(2) == 0 {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Fortress of `color`, gate row included
    pub fn is_own_fortress(&self, color: Color) -> bool {
        match color {
            Color::Black => self.y <= 3,
            Color::White => self.y >= 10,
        }
    }

    pub fn is_gate(&self) -> bool {
        *self == gate(Color::Black) || *self == gate(Color::White)
    }

    /// Owner of the fortress containing this coordinate, if any
    pub fn fortress_owner(&self) -> Option<Color> {
        if self.is_own_fortress(Color::Black) {
            Some(Color::Black)
        } else if self.is_own_fortress(Color::White) {
            Some(Color::White)
        } else {
            None
        }
    }

    /// Leader position inside the opponent's citadel, seen from `color`
    pub fn is_enemy_leader_position(&self, color: Color) -> bool {
        *self == leader_position(color.opponent())
    }

    /// Three-row band in front of the citadel of `color`
    pub fn in_middle_zone(&self, color: Color) -> bool {
        match color {
            Color::Black => (4..=6).contains(&self.y),
            Color::White => (7..=9).contains(&self.y),
        }
    }
}

/// Gate cell of the citadel of `color`
pub const fn gate(color: Color) -> Coord {
    match color {
        Color::Black => Coord::new(3, 3),
        Color::White => Coord::new(3, 10),
    }
}

/// Home cell of the Biy of `color`, directly behind its gate
pub const fn leader_position(color: Color) -> Coord {
    match color {
        Color::Black => Coord::new(3, 2),
        Color::White => Coord::new(3, 11),
    }
}

/// Row on which a Shatra of `color` promotes
pub const fn promotion_row(color: Color) -> i8 {
    match color {
        Color::Black => BOARD_HEIGHT - 1,
        Color::White => 0,
    }
}

// ============================================================================
// CELLS
// ============================================================================

/// A board cell; at most one figure
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pub id: CellId,
    pub coord: Coord,
    pub color: Color,
    pub figure: Option<Figure>,
}

impl Cell {
    pub fn x(&self) -> i8 {
        self.coord.x
    }

    pub fn y(&self) -> i8 {
        self.coord.y
    }

    pub fn is_empty(&self) -> bool {
        self.figure.is_none()
    }
}

/// Id-indexed cell arena with coordinate lookup
#[derive(Clone, Debug, Default)]
pub struct Grid {
    cells: Vec<Cell>,
    index: [[Option<CellId>; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
}

impl Grid {
    /// Build the standard cross layout
    pub fn generate() -> Self {
        let mut grid = Grid::default();
        let mut id: CellId = 1;

        for (y, &(start, end)) in ROW_SPANS.iter().enumerate() {
            for x in start..=end {
                let coord = Coord::new(x, y as i8);
                grid.cells.push(Cell {
                    id,
                    coord,
                    color: coord.shade(),
                    figure: None,
                });
                grid.index[y][x as usize] = Some(id);
                id += 1;
            }
        }

        grid
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        let idx = (id as usize).checked_sub(1)?;
        self.cells.get(idx)
    }

    pub(crate) fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        let idx = (id as usize).checked_sub(1)?;
        self.cells.get_mut(idx)
    }

    pub fn id_at(&self, coord: Coord) -> Option<CellId> {
        if !coord.is_valid() {
            return None;
        }
        self.index[coord.y as usize][coord.x as usize]
    }

    pub fn cell_at(&self, x: i8, y: i8) -> Option<&Cell> {
        self.id_at(Coord::new(x, y)).and_then(|id| self.cell(id))
    }

    pub fn coord_of(&self, id: CellId) -> Option<Coord> {
        self.cell(id).map(|c| c.coord)
    }

    pub fn figure(&self, id: CellId) -> Option<&Figure> {
        self.cell(id).and_then(|c| c.figure.as_ref())
    }

    pub fn figure_at(&self, coord: Coord) -> Option<&Figure> {
        self.id_at(coord).and_then(|id| self.figure(id))
    }

    /// On the board and unoccupied
    pub fn is_vacant(&self, coord: Coord) -> bool {
        self.id_at(coord)
            .and_then(|id| self.cell(id))
            .is_some_and(Cell::is_empty)
    }

    /// Put a figure on a cell, returning whatever was there
    pub(crate) fn put(&mut self, id: CellId, figure: Option<Figure>) -> Option<Figure> {
        let cell = self.cell_mut(id)?;
        std::mem::replace(&mut cell.figure, figure)
    }
}
