use chess_core::{Board, Move};
use log::{info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{difficulty::Difficulty, search::find_best_move_with_depth};

const MIN_DEPTH: u8 = 1;
const MAX_DEPTH: u8 = 5;

/// The synthetic opponent: a difficulty profile plus its own random source.
#[derive(Clone, Debug)]
pub struct ChessAI {
    difficulty: Difficulty,
    base_depth: Option<u8>, // overrides the difficulty's own base depth
    rng: StdRng,
}

impl ChessAI {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            base_depth: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Same seed, same games.
    pub fn with_seed(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            base_depth: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    /// Requests a different base depth. The difficulty still caps what is searched.
    pub fn set_base_depth(&mut self, depth: u8) {
        self.base_depth = Some(depth.clamp(MIN_DEPTH, MAX_DEPTH));
    }

    pub fn base_depth(&self) -> u8 {
        self.base_depth.unwrap_or_else(|| self.difficulty.base_depth())
    }

    /// The move the engine would play for the side to move, if it has one.
    pub fn get_move(&mut self, board: &Board) -> Option<Move> {
        let base_depth = self.base_depth();
        find_best_move_with_depth(
            board,
            board.current_turn(),
            self.difficulty,
            base_depth,
            &mut self.rng,
        )
    }

    /// Chooses a move and plays it on `board`. Returns `None`, leaving the board as it was,
    /// when the side to move has no legal move (the engine resigns).
    pub fn make_move(&mut self, board: &mut Board) -> Option<Move> {
        let Some(mv) = self.get_move(board) else {
            info!("{:?} has no legal move, engine resigns", board.current_turn());
            return None;
        };

        match board.make_move(mv.from, mv.to) {
            Ok(played) => {
                info!("engine ({}) played {}", self.difficulty, played);
                Some(played)
            }
            Err(err) => {
                warn!("engine move {} was rejected: {}", mv, err);
                None
            }
        }
    }
}

impl Default for ChessAI {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}
