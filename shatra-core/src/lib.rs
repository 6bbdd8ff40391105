//! Shatra Core - Rule engine
//!
//! This crate provides the rules of Shatra, the Altai draughts-chess game:
//! - Board geometry (cross-shaped grid with two citadels)
//! - Figure kinds and their movement patterns
//! - Reserve (garrison) evacuation order
//! - Move legality, mandatory capture and capture chains
//! - Text rendering of positions

pub mod board;
pub mod pieces;
pub mod reserve;
pub mod capture;
pub mod rules;
pub mod game;
pub mod display;
pub mod error;

// Re-exports for convenient access
pub use board::{Cell, CellId, Coord, CELL_COUNT};
pub use pieces::{Color, Figure, FigureId, FigureKind};
pub use reserve::ReserveState;
pub use capture::{CaptureSession, Phase};
pub use game::{Board, LastMove, Move, MoveOutcome};
pub use display::BoardView;
pub use error::MoveError;
