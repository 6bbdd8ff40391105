//! Piece catalog: sides, figure kinds and their movement patterns

use serde::{Deserialize, Serialize};

use crate::board::Coord;

/// Stable figure identifier, kept across promotion
pub type FigureId = u16;

/// Side (also used for the checkerboard shade of a cell)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Index into per-side tables
    pub fn index(self) -> usize {
        self as usize
    }

    /// Sign of the y step that moves this side forward
    pub fn forward(self) -> i8 {
        match self {
            Color::Black => 1,
            Color::White => -1,
        }
    }

    /// Turn a side-relative (dx, forward) vector into an absolute one
    pub fn orient(self, (dx, df): (i8, i8)) -> (i8, i8) {
        (dx, df * self.forward())
    }
}

// ============================================================================
// RELATIVE DIRECTIONS
// ============================================================================

/// Relative vectors as (dx, steps forward)
pub const FORWARD: (i8, i8) = (0, 1);
pub const FORWARD_LEFT: (i8, i8) = (-1, 1);
pub const FORWARD_RIGHT: (i8, i8) = (1, 1);
pub const LEFT: (i8, i8) = (-1, 0);
pub const RIGHT: (i8, i8) = (1, 0);
pub const BACKWARD: (i8, i8) = (0, -1);
pub const BACK_LEFT: (i8, i8) = (-1, -1);
pub const BACK_RIGHT: (i8, i8) = (1, -1);

/// Forward arc plus both sides
pub const ADVANCE: [(i8, i8); 5] = [FORWARD, FORWARD_LEFT, FORWARD_RIGHT, LEFT, RIGHT];

/// Backward mirrors of the forward arc
pub const RETREAT: [(i8, i8); 3] = [BACKWARD, BACK_LEFT, BACK_RIGHT];

/// All eight directions
pub const ALL_AROUND: [(i8, i8); 8] = [
    FORWARD, FORWARD_LEFT, FORWARD_RIGHT, LEFT, RIGHT, BACKWARD, BACK_LEFT, BACK_RIGHT,
];

// ============================================================================
// FIGURE KINDS
// ============================================================================

/// How far a figure travels along a direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reach {
    /// Exactly one cell for a move, exactly two for a jump
    Step,
    /// Any distance while the path is clear
    Slide,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FigureKind {
    /// Garrison piece
    Shatra,
    /// Leader
    Biy,
    /// Promoted champion
    Baatyr,
}

impl FigureKind {
    pub fn name(self) -> &'static str {
        match self {
            FigureKind::Shatra => "Shatra",
            FigureKind::Biy => "Biy",
            FigureKind::Baatyr => "Baatyr",
        }
    }

    pub fn symbol(self) -> char {
        match self {
            FigureKind::Shatra => 'S',
            FigureKind::Biy => 'B',
            FigureKind::Baatyr => 'A',
        }
    }

    pub fn reach(self) -> Reach {
        match self {
            FigureKind::Shatra | FigureKind::Biy => Reach::Step,
            FigureKind::Baatyr => Reach::Slide,
        }
    }

    /// Relative directions for ordinary moves
    pub fn move_pattern(self) -> &'static [(i8, i8)] {
        match self {
            FigureKind::Shatra => &ADVANCE,
            FigureKind::Biy | FigureKind::Baatyr => &ALL_AROUND,
        }
    }

    /// Relative directions for captures
    pub fn capture_pattern(self) -> &'static [(i8, i8)] {
        &ALL_AROUND
    }

    /// Only a Biy may stand inside its own fortress after leaving it
    pub fn may_enter_own_fortress(self) -> bool {
        self == FigureKind::Biy
    }
}

// ============================================================================
// FIGURES
// ============================================================================

/// A figure on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Figure {
    pub id: FigureId,
    pub color: Color,
    pub kind: FigureKind,
}

impl Figure {
    pub const fn new(id: FigureId, color: Color, kind: FigureKind) -> Self {
        Self { id, color, kind }
    }

    pub const fn shatra(id: FigureId, color: Color) -> Self {
        Self::new(id, color, FigureKind::Shatra)
    }

    pub const fn biy(id: FigureId, color: Color) -> Self {
        Self::new(id, color, FigureKind::Biy)
    }

    pub const fn baatyr(id: FigureId, color: Color) -> Self {
        Self::new(id, color, FigureKind::Baatyr)
    }

    /// Replacement figure after promotion; id and color survive
    pub fn promoted(self) -> Self {
        Self::baatyr(self.id, self.color)
    }

    /// Display letter, uppercase for White
    pub fn symbol(&self) -> char {
        let c = self.kind.symbol();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    /// Absolute unit vectors for ordinary moves
    pub fn move_directions(&self) -> impl Iterator<Item = (i8, i8)> {
        let color = self.color;
        self.kind.move_pattern().iter().map(move |&rel| color.orient(rel))
    }

    /// Absolute unit vectors for captures
    pub fn capture_directions(&self) -> impl Iterator<Item = (i8, i8)> {
        let color = self.color;
        self.kind.capture_pattern().iter().map(move |&rel| color.orient(rel))
    }

    /// Absolute unit vectors for leaving the enemy fortress
    pub fn retreat_directions(&self) -> impl Iterator<Item = (i8, i8)> {
        let color = self.color;
        RETREAT.iter().map(move |&rel| color.orient(rel))
    }

    /// Single-step destinations, ignoring occupancy and board edges
    pub fn step_targets(&self, from: Coord) -> Vec<Coord> {
        self.move_directions()
            .map(|(dx, dy)| from.offset(dx, dy))
            .collect()
    }

    /// (jumped-over, landing) pairs for a distance-2 jump, ignoring occupancy
    pub fn jump_targets(&self, from: Coord) -> Vec<(Coord, Coord)> {
        self.capture_directions()
            .map(|(dx, dy)| (from.offset(dx, dy), from.offset(2 * dx, 2 * dy)))
            .collect()
    }
}
