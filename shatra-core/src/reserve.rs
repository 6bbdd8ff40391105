//! Reserve order tracker
//!
//! Each side keeps nine garrison Shatras on its gate and inside its fortress.
//! They must leave in a fixed order, gate first, then row by row inward.
//! Only the piece on `next_position` may evacuate.

use serde::{Deserialize, Serialize};

use crate::board::{gate, CellId, Coord, Grid};
use crate::pieces::{Color, FigureKind};

/// Number of garrison pieces per side
pub const GARRISON_SIZE: usize = 9;

/// Home cells as (x, depth behind the gate), highest priority first
pub const HOME_ORDER: [(i8, i8); GARRISON_SIZE] = [
    (3, 0), // Gate
    (2, 1),
    (4, 1),
    (3, 2),
    (2, 2),
    (4, 2),
    (3, 3),
    (2, 3),
    (4, 3),
];

/// Home cells of `color` in evacuation order
pub fn home_cells(color: Color) -> [Coord; GARRISON_SIZE] {
    let g = gate(color);
    HOME_ORDER.map(|(x, depth)| Coord::new(x, g.y - depth * color.forward()))
}

/// Per-side reserve bookkeeping
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveState {
    /// Garrison pieces still at home
    pub count: usize,
    /// A lower-priority home cell emptied before a higher-priority one
    pub order_violated: bool,
    /// Highest-priority home cell still holding a garrison piece
    pub next_position: Option<CellId>,
}

impl ReserveState {
    /// Compute from scratch, used after setup edits
    pub fn derive(grid: &Grid, color: Color) -> Self {
        let scan = scan(grid, color);
        Self {
            count: scan.count,
            order_violated: scan.count > 0 && scan.gap,
            next_position: scan.next,
        }
    }

    /// Recompute after a move; the violation flag only clears once the
    /// garrison is gone
    pub fn refresh(&mut self, grid: &Grid, color: Color) {
        let scan = scan(grid, color);
        debug_assert!(scan.count <= self.count, "reserve count grew for {:?}", color);

        let violated = scan.count > 0 && (self.order_violated || scan.gap);
        if violated && !self.order_violated {
            tracing::debug!(?color, remaining = scan.count, "reserve order violated");
        }

        self.count = scan.count;
        self.order_violated = violated;
        self.next_position = scan.next;
    }

    /// Whether the piece on `id` is the one allowed to evacuate
    pub fn is_next(&self, id: CellId) -> bool {
        self.next_position == Some(id)
    }
}

struct Scan {
    count: usize,
    next: Option<CellId>,
    gap: bool,
}

fn scan(grid: &Grid, color: Color) -> Scan {
    let mut count = 0;
    let mut next = None;
    let mut seen_empty = false;
    let mut gap = false;

    // Walk from lowest priority to highest: an occupied cell after an empty
    // one in this order means a later cell was emptied first.
    for coord in home_cells(color).iter().rev() {
        let Some(id) = grid.id_at(*coord) else {
            continue;
        };
        let garrisoned = grid
            .figure(id)
            .is_some_and(|f| f.color == color && f.kind == FigureKind::Shatra);

        if garrisoned {
            count += 1;
            next = Some(id);
            if seen_empty {
                gap = true;
            }
        } else {
            seen_empty = true;
        }
    }

    Scan { count, next, gap }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Figure;

    fn filled(color: Color) -> Grid {
        let mut grid = Grid::generate();
        for (i, coord) in home_cells(color).iter().enumerate() {
            let id = grid.id_at(*coord).unwrap();
            grid.put(id, Some(Figure::shatra(i as u16 + 1, color)));
        }
        grid
    }

    #[test]
    fn test_home_cells() {
        let black = home_cells(Color::Black);
        assert_eq!(black[0], Coord::new(3, 3));
        assert_eq!(black[1], Coord::new(2, 2));
        assert_eq!(black[8], Coord::new(4, 0));

        let white = home_cells(Color::White);
        assert_eq!(white[0], Coord::new(3, 10));
        assert_eq!(white[3], Coord::new(3, 12));
        assert_eq!(white[8], Coord::new(4, 13));

        for color in [Color::White, Color::Black] {
            for coord in home_cells(color) {
                assert!(coord.is_valid());
                assert!(coord.is_own_fortress(color));
            }
        }
    }

    #[test]
    fn test_full_garrison() {
        let grid = filled(Color::Black);
        let state = ReserveState::derive(&grid, Color::Black);
        assert_eq!(state.count, 9);
        assert!(!state.order_violated);
        assert_eq!(state.next_position, grid.id_at(Coord::new(3, 3)));
    }

    #[test]
    fn test_in_order_evacuation_is_not_a_violation() {
        let mut grid = filled(Color::White);
        let mut state = ReserveState::derive(&grid, Color::White);
        for coord in home_cells(Color::White).iter().take(4) {
            grid.put(grid.id_at(*coord).unwrap(), None);
            state.refresh(&grid, Color::White);
            assert!(!state.order_violated);
        }
        assert_eq!(state.count, 5);
        assert_eq!(state.next_position, grid.id_at(home_cells(Color::White)[4]));
    }

    #[test]
    fn test_violation_is_sticky_until_empty() {
        let mut grid = filled(Color::Black);
        let mut state = ReserveState::derive(&grid, Color::Black);

        // Empty a low-priority cell while the gate is still occupied
        let low = grid.id_at(home_cells(Color::Black)[5]).unwrap();
        let removed = grid.put(low, None);
        state.refresh(&grid, Color::Black);
        assert!(state.order_violated);
        assert_eq!(state.count, 8);
        assert_eq!(state.next_position, grid.id_at(Coord::new(3, 3)));

        // Restoring the piece does not clear the flag
        grid.put(low, removed);
        state.count = 9;
        state.refresh(&grid, Color::Black);
        assert!(state.order_violated);

        // Clearing the whole garrison does
        for coord in home_cells(Color::Black) {
            grid.put(grid.id_at(coord).unwrap(), None);
        }
        state.refresh(&grid, Color::Black);
        assert_eq!(state.count, 0);
        assert!(!state.order_violated);
        assert_eq!(state.next_position, None);
    }

    #[test]
    fn test_foreign_pieces_do_not_count() {
        let mut grid = Grid::generate();
        let gate_id = grid.id_at(Coord::new(3, 3)).unwrap();
        grid.put(gate_id, Some(Figure::shatra(1, Color::White)));
        let biy_home = grid.id_at(Coord::new(2, 2)).unwrap();
        grid.put(biy_home, Some(Figure::biy(2, Color::Black)));

        let state = ReserveState::derive(&grid, Color::Black);
        assert_eq!(state.count, 0);
        assert_eq!(state.next_position, None);
        assert!(!state.order_violated);
    }
}
