// Core chess rules: board storage, move generation, attacks and legality
pub mod attacks;
pub mod board;
pub mod error;
pub mod legality;
pub mod moves;
pub mod piece;
pub mod position;

// Re-export main types for convenience
pub use board::Board;
pub use error::MoveError;
pub use moves::{Move, MoveType};
pub use piece::{Color, Piece, PieceType};
pub use position::Position;
