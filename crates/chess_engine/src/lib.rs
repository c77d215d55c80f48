pub mod ai;
pub mod difficulty;
pub mod evaluation;
pub mod game;
pub mod search;

pub use ai::ChessAI;
pub use difficulty::{Difficulty, ParseDifficultyError};
pub use evaluation::evaluate;
pub use game::{Game, GameStatus};
pub use search::{best_move, find_best_move, negamax};
