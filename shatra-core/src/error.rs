//! Move rejection reasons

use thiserror::Error;

use crate::board::CellId;
use crate::pieces::Color;

/// Why a move was refused; the board is left untouched in every case
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("no cell with id {0}")]
    UnknownCell(CellId),

    #[error("cell {0} is empty")]
    EmptyCell(CellId),

    #[error("piece on cell {cell} belongs to {owner:?}, but {to_move:?} is to move")]
    NotYourTurn {
        cell: CellId,
        owner: Color,
        to_move: Color,
    },

    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: CellId, to: CellId },

    #[error("inconsistent turn state: {0}")]
    Inconsistent(&'static str),
}
