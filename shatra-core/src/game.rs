//! Board aggregate: move legality, move application and capture chains

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{gate, leader_position, promotion_row, Cell, CellId, Coord, Grid};
use crate::capture::{CaptureSession, Phase, Turn};
use crate::error::MoveError;
use crate::pieces::{Color, Figure, FigureId, FigureKind, Reach};
use crate::reserve::ReserveState;
use crate::rules::{move_families, CapturePriority, MoveFamily, Restriction, Zone};

// ============================================================================
// CORE TYPES
// ============================================================================

/// A legal move
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Step { from: CellId, to: CellId },
    Evacuate { from: CellId, to: CellId },
    Exit { from: CellId, to: CellId },
    Capture { from: CellId, over: CellId, to: CellId },
    Stay { at: CellId },
    Withdraw { from: CellId, to: CellId },
}

impl Move {
    pub fn from(&self) -> CellId {
        match *self {
            Move::Step { from, .. }
            | Move::Evacuate { from, .. }
            | Move::Exit { from, .. }
            | Move::Capture { from, .. }
            | Move::Withdraw { from, .. } => from,
            Move::Stay { at } => at,
        }
    }

    pub fn to(&self) -> CellId {
        match *self {
            Move::Step { to, .. }
            | Move::Evacuate { to, .. }
            | Move::Exit { to, .. }
            | Move::Capture { to, .. }
            | Move::Withdraw { to, .. } => to,
            Move::Stay { at } => at,
        }
    }

    pub fn family(&self) -> MoveFamily {
        match self {
            Move::Step { .. } => MoveFamily::Step,
            Move::Evacuate { .. } => MoveFamily::Evacuation,
            Move::Exit { .. } => MoveFamily::FortressExit,
            Move::Capture { .. } => MoveFamily::Capture,
            Move::Stay { .. } => MoveFamily::Stay,
            Move::Withdraw { .. } => MoveFamily::Withdraw,
        }
    }

    pub fn is_capture(&self) -> bool {
        matches!(self, Move::Capture { .. })
    }
}

/// Last completed turn of one side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub figure: FigureId,
    pub from: CellId,
    pub to: CellId,
}

/// What an applied move led to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// Chain still open; the same piece moves again
    ChainContinues { at: CellId, biy_rights: bool },
    /// Turn passed to the opponent
    TurnEnded { captured: Vec<CellId>, promoted: bool },
}

// ============================================================================
// BOARD
// ============================================================================

/// Full game position (clone to get an independent copy)
#[derive(Clone, Debug)]
pub struct Board {
    grid: Grid,

    /// Occupied cells per side
    pieces: [FxHashSet<CellId>; 2],

    current_player: Color,
    turn: Turn,

    /// Per side: last moved figure and where it came from
    last_moves: [Option<LastMove>; 2],

    reserves: [ReserveState; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    // ========================================================================
    // CONSTRUCTORS
    // ========================================================================

    /// Board without cells; call `init_cells` and `init_figures` next
    pub fn new() -> Self {
        Self {
            grid: Grid::default(),
            pieces: Default::default(),
            current_player: Color::White,
            turn: Turn::Free,
            last_moves: [None; 2],
            reserves: Default::default(),
        }
    }

    /// Standard opening position
    pub fn standard() -> Self {
        let mut board = Self::new();
        board.init_cells();
        board.init_figures();
        board
    }

    /// Generate the empty cross layout, discarding any figures
    pub fn init_cells(&mut self) {
        self.grid = Grid::generate();
        self.pieces = Default::default();
        self.current_player = Color::White;
        self.turn = Turn::Free;
        self.last_moves = [None; 2];
        self.reserves = Default::default();
    }

    /// Place the opening setup on the existing cells
    pub fn init_figures(&mut self) {
        let placements: Vec<(CellId, Color, FigureKind)> = self
            .grid
            .cells()
            .iter()
            .filter_map(|cell| opening_piece(cell.coord).map(|(color, kind)| (cell.id, color, kind)))
            .collect();

        let mut next_id: FigureId = 1;
        for (cell, color, kind) in placements {
            self.place(cell, Some(Figure::new(next_id, color, kind)));
            next_id += 1;
        }

        self.current_player = Color::White;
        self.turn = Turn::Free;
        self.last_moves = [None; 2];
        self.reset_reserves();
        tracing::debug!(figures = next_id - 1, "opening position set up");
    }

    /// Setup hook: put `figure` on a cell (or clear it); reserve state is
    /// re-derived from scratch
    pub fn set_figure(&mut self, cell: CellId, figure: Option<Figure>) -> bool {
        if self.grid.cell(cell).is_none() {
            return false;
        }
        self.place(cell, figure);
        self.reset_reserves();
        true
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.grid.cell(id)
    }

    pub fn cell_at(&self, x: i8, y: i8) -> Option<&Cell> {
        self.grid.cell_at(x, y)
    }

    pub fn figure_at(&self, id: CellId) -> Option<&Figure> {
        self.grid.figure(id)
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        self.turn.phase()
    }

    pub fn capture_session(&self) -> Option<&CaptureSession> {
        self.turn.session()
    }

    /// Piece that is in the middle of, or obliged to start, a capture chain
    pub fn active_capture_cell(&self) -> Option<CellId> {
        match &self.turn {
            Turn::Free => None,
            Turn::Chain(session) => Some(session.anchor()),
            Turn::Forced(cell) => Some(*cell),
        }
    }

    pub fn reserve(&self, color: Color) -> &ReserveState {
        &self.reserves[color.index()]
    }

    pub fn last_move(&self, color: Color) -> Option<LastMove> {
        self.last_moves[color.index()]
    }

    /// Occupied cells of one side, ascending
    pub fn pieces(&self, color: Color) -> Vec<CellId> {
        let mut cells: Vec<CellId> = self.pieces[color.index()].iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    /// Legal destinations of the piece on `from`, ascending
    pub fn available_moves(&self, from: CellId) -> Vec<CellId> {
        let mut targets: Vec<CellId> = self.legal_moves(from).iter().map(Move::to).collect();
        targets.sort_unstable();
        targets.dedup();
        tracing::trace!(from, count = targets.len(), "available moves");
        targets
    }

    pub fn is_valid_move(&self, from: CellId, to: CellId) -> bool {
        self.legal_moves(from).iter().any(|m| m.to() == to)
    }

    /// `to` is reachable from `from` both by a capture and by an ordinary
    /// move; the caller has to ask which one is meant
    pub fn has_move_intersection(&self, from: CellId, to: CellId) -> bool {
        let moves = self.legal_moves(from);
        let capture = moves.iter().any(|m| m.to() == to && m.is_capture());
        let ordinary = moves.iter().any(|m| m.to() == to && !m.is_capture());
        capture && ordinary
    }

    /// Cells whose pieces are under a capture obligation right now
    pub fn figures_with_forced_capture(&self) -> Vec<CellId> {
        if self.turn_problem().is_some() {
            return Vec::new();
        }
        match &self.turn {
            Turn::Chain(session) => {
                let anchor = session.anchor();
                if self.legal_moves(anchor).iter().any(Move::is_capture) {
                    vec![anchor]
                } else {
                    Vec::new()
                }
            }
            Turn::Forced(cell) => vec![*cell],
            Turn::Free => {
                let priority = self.capture_priority();
                self.pieces(self.current_player)
                    .into_iter()
                    .filter(|&cell| {
                        self.grid.figure(cell).is_some_and(|f| {
                            priority.restriction(f.kind) == Restriction::CaptureOnly
                                && self.has_capture(cell, &[])
                        })
                    })
                    .collect()
            }
        }
    }

    pub fn has_forced_capture(&self) -> bool {
        !self.figures_with_forced_capture().is_empty()
    }

    /// Legal moves of the piece on `from`; empty when it may not move now
    pub fn legal_moves(&self, from: CellId) -> Vec<Move> {
        let Some(figure) = self.grid.figure(from).copied() else {
            return Vec::new();
        };
        let Some(coord) = self.grid.coord_of(from) else {
            return Vec::new();
        };
        if figure.color != self.current_player || self.turn_problem().is_some() {
            return Vec::new();
        }

        let restriction = match &self.turn {
            Turn::Free => self.capture_priority().restriction(figure.kind),
            Turn::Chain(session) if session.anchor() == from => Restriction::Free,
            Turn::Forced(cell) if *cell == from => Restriction::Free,
            _ => return Vec::new(),
        };
        let captured = self.turn.session().map(CaptureSession::captured).unwrap_or(&[]);
        let zone = Zone::classify(coord, figure.color);

        let mut moves = Vec::new();
        for &family in move_families(self.phase(), figure.kind, zone) {
            if !restriction.admits(family) {
                continue;
            }
            match family {
                MoveFamily::Step => self.step_moves(from, coord, &figure, &mut moves),
                MoveFamily::Evacuation => {
                    if self.reserves[figure.color.index()].is_next(from) {
                        self.middle_zone_moves(figure.color, &mut moves, |to| Move::Evacuate { from, to });
                    }
                }
                MoveFamily::FortressExit => self.exit_moves(from, coord, &figure, &mut moves),
                MoveFamily::Capture => self.capture_moves(from, coord, &figure, captured, &mut moves),
                MoveFamily::Stay => moves.push(Move::Stay { at: from }),
                MoveFamily::Withdraw => {
                    self.middle_zone_moves(figure.color, &mut moves, |to| Move::Withdraw { from, to });
                }
            }
        }
        moves
    }

    // ========================================================================
    // MOVE GENERATION
    // ========================================================================

    fn step_moves(&self, from: CellId, coord: Coord, figure: &Figure, moves: &mut Vec<Move>) {
        for (dx, dy) in figure.move_directions() {
            let mut current = coord;
            loop {
                current = current.offset(dx, dy);
                let Some(to) = self.landing(current, figure) else {
                    break;
                };
                if !self.reverses_last_move(figure, to) {
                    moves.push(Move::Step { from, to });
                }
                if figure.kind.reach() == Reach::Step {
                    break;
                }
            }
        }
    }

    fn exit_moves(&self, from: CellId, coord: Coord, figure: &Figure, moves: &mut Vec<Move>) {
        for (dx, dy) in figure.retreat_directions() {
            if let Some(to) = self.landing(coord.offset(dx, dy), figure) {
                if !self.reverses_last_move(figure, to) {
                    moves.push(Move::Exit { from, to });
                }
            }
        }
    }

    fn middle_zone_moves(&self, color: Color, moves: &mut Vec<Move>, make: impl Fn(CellId) -> Move) {
        moves.extend(
            self.grid
                .cells()
                .iter()
                .filter(|c| c.is_empty() && c.coord.in_middle_zone(color))
                .map(|c| make(c.id)),
        );
    }

    fn capture_moves(
        &self,
        from: CellId,
        coord: Coord,
        figure: &Figure,
        captured: &[CellId],
        moves: &mut Vec<Move>,
    ) {
        match figure.kind.reach() {
            Reach::Step => {
                for (over, land) in figure.jump_targets(coord) {
                    let Some(over) = self.enemy_target(over, figure.color, captured) else {
                        continue;
                    };
                    if let Some(to) = self.landing(land, figure) {
                        moves.push(Move::Capture { from, over, to });
                    }
                }
            }
            Reach::Slide => {
                for dir in figure.capture_directions() {
                    self.ray_captures(from, coord, figure, dir, captured, moves);
                }
            }
        }
    }

    /// Slider capture along one ray: the first occupied cell must be an
    /// uncaptured enemy, and every free cell past it is a landing. Landings
    /// that let the chain continue are preferred over those that don't.
    fn ray_captures(
        &self,
        from: CellId,
        coord: Coord,
        figure: &Figure,
        (dx, dy): (i8, i8),
        captured: &[CellId],
        moves: &mut Vec<Move>,
    ) {
        let Some((over, beyond)) = self.first_enemy_on_ray(coord, figure, (dx, dy), captured) else {
            return;
        };

        let mut landings = Vec::new();
        let mut current = beyond;
        while let Some(to) = self.landing(current, figure) {
            landings.push(to);
            current = current.offset(dx, dy);
        }

        if landings.len() > 1 {
            let continuing: Vec<CellId> = landings
                .iter()
                .copied()
                .filter(|&to| self.continues_after(from, over, to, captured))
                .collect();
            if !continuing.is_empty() {
                landings = continuing;
            }
        }

        moves.extend(landings.into_iter().map(|to| Move::Capture { from, over, to }));
    }

    /// First occupied cell along a ray, if it is a jumpable enemy; also
    /// returns the coordinate right past it
    fn first_enemy_on_ray(
        &self,
        coord: Coord,
        figure: &Figure,
        (dx, dy): (i8, i8),
        captured: &[CellId],
    ) -> Option<(CellId, Coord)> {
        let mut current = coord;
        loop {
            current = current.offset(dx, dy);
            let id = self.grid.id_at(current)?;
            if self.grid.figure(id).is_some() {
                let over = self.enemy_target(current, figure.color, captured)?;
                return Some((over, current.offset(dx, dy)));
            }
        }
    }

    /// Whether the jump `from` over `over` to `to` leaves another capture,
    /// evaluated on a scratch copy
    fn continues_after(&self, from: CellId, over: CellId, to: CellId, captured: &[CellId]) -> bool {
        let mut scratch = self.clone();
        scratch.relocate(from, to);
        let mut seen = captured.to_vec();
        seen.push(over);
        scratch.has_capture(to, &seen)
    }

    /// Whether the piece on `cell` has at least one capture, ignoring turn
    /// order and landing preference
    fn has_capture(&self, cell: CellId, captured: &[CellId]) -> bool {
        let (Some(figure), Some(coord)) = (self.grid.figure(cell), self.grid.coord_of(cell)) else {
            return false;
        };
        match figure.kind.reach() {
            Reach::Step => figure.jump_targets(coord).into_iter().any(|(over, land)| {
                self.enemy_target(over, figure.color, captured).is_some()
                    && self.landing(land, figure).is_some()
            }),
            Reach::Slide => figure.capture_directions().any(|dir| {
                self.first_enemy_on_ray(coord, figure, dir, captured)
                    .is_some_and(|(_, beyond)| self.landing(beyond, figure).is_some())
            }),
        }
    }

    /// Mandatory-capture precedence for the side to move
    fn capture_priority(&self) -> CapturePriority {
        let (mut shatra, mut biy, mut baatyr) = (false, false, false);
        for &cell in &self.pieces[self.current_player.index()] {
            let Some(figure) = self.grid.figure(cell) else {
                continue;
            };
            let flag = match figure.kind {
                FigureKind::Shatra => &mut shatra,
                FigureKind::Biy => &mut biy,
                FigureKind::Baatyr => &mut baatyr,
            };
            if !*flag && self.has_capture(cell, &[]) {
                *flag = true;
            }
        }
        CapturePriority::from_flags(shatra, biy, baatyr)
    }

    /// Free cell the figure may finish a move on
    fn landing(&self, coord: Coord, figure: &Figure) -> Option<CellId> {
        if coord.is_own_fortress(figure.color) && !figure.kind.may_enter_own_fortress() {
            return None;
        }
        let id = self.grid.id_at(coord)?;
        self.grid.figure(id).is_none().then_some(id)
    }

    /// Enemy figure that may be jumped in the current chain
    fn enemy_target(&self, coord: Coord, color: Color, captured: &[CellId]) -> Option<CellId> {
        let id = self.grid.id_at(coord)?;
        let target = self.grid.figure(id)?;
        (target.color != color && !captured.contains(&id)).then_some(id)
    }

    fn reverses_last_move(&self, figure: &Figure, to: CellId) -> bool {
        self.last_moves[figure.color.index()]
            .is_some_and(|last| last.figure == figure.id && last.from == to)
    }

    /// Leader rights are earned on the enemy leader position or on a gate
    fn is_rights_cell(coord: Coord, color: Color) -> bool {
        coord.is_enemy_leader_position(color) || coord.is_gate()
    }

    /// Describes why the stored turn state cannot be acted on, if it can't
    fn turn_problem(&self) -> Option<&'static str> {
        match &self.turn {
            Turn::Free => None,
            Turn::Chain(session) => match self.grid.figure(session.anchor()) {
                Some(f) if f.color == self.current_player => None,
                _ => Some("capture chain anchor holds no piece of the side to move"),
            },
            Turn::Forced(cell) => match self.grid.figure(*cell) {
                Some(f) if f.color == self.current_player && self.has_capture(*cell, &[]) => None,
                _ => Some("forced mover is gone or has nothing to capture"),
            },
        }
    }

    // ========================================================================
    // APPLY MOVE
    // ========================================================================

    /// Apply a move, preferring the capture reading of an ambiguous target
    pub fn make_move(&mut self, from: CellId, to: CellId) -> bool {
        match self.try_move(from, to) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(%err, "move rejected");
                false
            }
        }
    }

    /// Apply a move, preferring the ordinary reading of an ambiguous target
    pub fn make_normal_move(&mut self, from: CellId, to: CellId) -> bool {
        match self.try_normal_move(from, to) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(%err, "move rejected");
                false
            }
        }
    }

    /// Apply a move and report what happened, or why it was refused
    pub fn try_move(&mut self, from: CellId, to: CellId) -> Result<MoveOutcome, MoveError> {
        self.apply_preferring(from, to, true)
    }

    /// `try_move` with the ordinary reading preferred
    pub fn try_normal_move(&mut self, from: CellId, to: CellId) -> Result<MoveOutcome, MoveError> {
        self.apply_preferring(from, to, false)
    }

    fn apply_preferring(
        &mut self,
        from: CellId,
        to: CellId,
        prefer_capture: bool,
    ) -> Result<MoveOutcome, MoveError> {
        if let Some(reason) = self.turn_problem() {
            tracing::warn!(reason, "resetting turn state");
            self.turn = Turn::Free;
            return Err(MoveError::Inconsistent(reason));
        }

        let cell = self.grid.cell(from).ok_or(MoveError::UnknownCell(from))?;
        self.grid.cell(to).ok_or(MoveError::UnknownCell(to))?;
        let figure = cell.figure.ok_or(MoveError::EmptyCell(from))?;
        if figure.color != self.current_player {
            return Err(MoveError::NotYourTurn {
                cell: from,
                owner: figure.color,
                to_move: self.current_player,
            });
        }

        let candidates: Vec<Move> = self
            .legal_moves(from)
            .into_iter()
            .filter(|m| m.to() == to)
            .collect();
        let chosen = candidates
            .iter()
            .find(|m| m.is_capture() == prefer_capture)
            .or_else(|| candidates.first())
            .copied()
            .ok_or(MoveError::IllegalMove { from, to })?;

        tracing::trace!(kind = figure.kind.name(), ?chosen, "applying move");
        Ok(self.apply(chosen))
    }

    fn apply(&mut self, mv: Move) -> MoveOutcome {
        match mv {
            Move::Step { from, to } | Move::Evacuate { from, to } | Move::Exit { from, to } => {
                self.relocate(from, to);
                self.finish_turn(from, to, Vec::new())
            }
            Move::Capture { from, over, to } => self.apply_capture(from, over, to),
            Move::Stay { at } => self.finish_chain(at),
            Move::Withdraw { from, to } => {
                self.relocate(from, to);
                self.finish_chain(to)
            }
        }
    }

    fn apply_capture(&mut self, from: CellId, over: CellId, to: CellId) -> MoveOutcome {
        let mut session = match std::mem::take(&mut self.turn) {
            Turn::Chain(session) => session,
            _ => {
                tracing::debug!(from, over, to, "capture chain opened");
                CaptureSession::open(from)
            }
        };

        self.relocate(from, to);
        session.record_jump(over, to);

        // Rights hold the chain open even with nothing left to jump
        let rights = match (self.grid.figure(to), self.grid.coord_of(to)) {
            (Some(figure), Some(coord)) => Self::is_rights_cell(coord, figure.color),
            _ => false,
        };
        if !rights && !self.has_capture(to, session.captured()) {
            self.turn = Turn::Chain(session);
            return self.finish_chain(to);
        }

        if rights && !session.has_biy_rights() {
            tracing::debug!(at = to, "leader rights granted");
        }
        session.set_biy_rights(rights);
        tracing::debug!(at = to, jumped = session.captured().len(), "capture chain continues");

        self.turn = Turn::Chain(session);
        MoveOutcome::ChainContinues { at: to, biy_rights: rights }
    }

    /// Close the chain: jumped figures leave the board now
    fn finish_chain(&mut self, at: CellId) -> MoveOutcome {
        let (origin, captured) = match std::mem::take(&mut self.turn) {
            Turn::Chain(session) => (session.origin(), session.captured().to_vec()),
            _ => (at, Vec::new()),
        };
        for &cell in &captured {
            self.place(cell, None);
        }
        tracing::debug!(at, removed = captured.len(), "capture chain finished");
        self.finish_turn(origin, at, captured)
    }

    fn finish_turn(&mut self, origin: CellId, at: CellId, captured: Vec<CellId>) -> MoveOutcome {
        let promoted = self.promote_if_due(at);

        if let Some(figure) = self.grid.figure(at) {
            self.last_moves[figure.color.index()] = Some(LastMove {
                figure: figure.id,
                from: origin,
                to: at,
            });
        }

        self.current_player = self.current_player.opponent();
        self.turn = Turn::Free;
        self.refresh_reserves();
        self.activate_forced_mover();

        MoveOutcome::TurnEnded { captured, promoted }
    }

    fn promote_if_due(&mut self, at: CellId) -> bool {
        let (Some(figure), Some(coord)) = (self.grid.figure(at).copied(), self.grid.coord_of(at)) else {
            return false;
        };
        if figure.kind != FigureKind::Shatra || coord.y != promotion_row(figure.color) {
            return false;
        }
        self.place(at, Some(figure.promoted()));
        tracing::debug!(at, figure = figure.id, color = ?figure.color, "shatra promoted to baatyr");
        true
    }

    /// A piece of the side to move standing on the enemy leader position
    /// with a capture available must move this turn
    fn activate_forced_mover(&mut self) {
        let color = self.current_player;
        let Some(cell) = self.grid.id_at(leader_position(color.opponent())) else {
            return;
        };
        let ours = self.grid.figure(cell).is_some_and(|f| f.color == color);
        if ours && self.has_capture(cell, &[]) {
            tracing::debug!(cell, ?color, "forced move from enemy leader position");
            self.turn = Turn::Forced(cell);
        }
    }

    // ========================================================================
    // BOOKKEEPING
    // ========================================================================

    /// Put a figure on a cell keeping the side indexes in sync
    fn place(&mut self, cell: CellId, figure: Option<Figure>) -> Option<Figure> {
        let old = self.grid.put(cell, figure);
        if let Some(old) = old {
            self.pieces[old.color.index()].remove(&cell);
        }
        if let Some(new) = figure {
            self.pieces[new.color.index()].insert(cell);
        }
        old
    }

    fn relocate(&mut self, from: CellId, to: CellId) {
        let figure = self.place(from, None);
        self.place(to, figure);
    }

    fn reset_reserves(&mut self) {
        for color in [Color::White, Color::Black] {
            self.reserves[color.index()] = ReserveState::derive(&self.grid, color);
        }
    }

    fn refresh_reserves(&mut self) {
        for color in [Color::White, Color::Black] {
            self.reserves[color.index()].refresh(&self.grid, color);
        }
    }
}

/// Opening occupant of a coordinate
fn opening_piece(coord: Coord) -> Option<(Color, FigureKind)> {
    for color in [Color::White, Color::Black] {
        if coord == leader_position(color) {
            return Some((color, FigureKind::Biy));
        }
        if coord.is_own_fortress(color) {
            return Some((color, FigureKind::Shatra));
        }
        // Two field rows in front of the gate
        let depth = (coord.y - gate(color).y) * color.forward();
        if depth == 1 || depth == 2 {
            return Some((color, FigureKind::Shatra));
        }
    }
    None
}

// ============================================================================
// TESTS
// ============================================================================
