use thiserror::Error;

use crate::{Color, Position};

/// Why a requested move was not played. The board is left untouched in every case.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    #[error("square {0} is off the board")]
    InvalidSquare(Position),

    #[error("no piece at {0}")]
    NoPiece(Position),

    #[error("it is {0:?}'s turn")]
    NotYourTurn(Color),

    #[error("{from}-{to} is not a legal move")]
    IllegalMove { from: Position, to: Position },
}
