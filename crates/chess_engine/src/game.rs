use chess_core::{Board, Color, Move, Position};
use log::info;

use crate::{ai::ChessAI, difficulty::Difficulty};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    /// The given side is in check but can still move.
    Check(Color),
    Checkmate { winner: Color },
    Stalemate,
}

/// A live game: the real board plus the engine that can play on it.
///
/// This is the surface a front end talks to. Search only ever works on clones of the
/// board; `attempt_move` and `ai_move` are the only ways the board changes.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    ai: ChessAI,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::new(), ChessAI::default())
    }

    /// A new game whose engine moves are reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_board(Board::new(), ChessAI::with_seed(Difficulty::default(), seed))
    }

    pub fn from_board(board: Board, ai: ChessAI) -> Self {
        Self { board, ai }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ai_mut(&mut self) -> &mut ChessAI {
        &mut self.ai
    }

    pub fn current_turn(&self) -> Color {
        self.board.current_turn()
    }

    pub fn move_history(&self) -> &[Move] {
        self.board.history()
    }

    /// Where the piece on `pos` may go. Empty if there is no piece or it is not its turn.
    pub fn legal_moves_for(&self, pos: Position) -> Vec<Position> {
        self.board.legal_destinations(pos)
    }

    /// Plays `from`-`to` for the side to move. The board is unchanged when this fails.
    pub fn attempt_move(&mut self, from: Position, to: Position) -> bool {
        match self.board.make_move(from, to) {
            Ok(_) => true,
            Err(err) => {
                info!("move rejected: {}", err);
                false
            }
        }
    }

    /// Lets the engine choose and play a move at `difficulty`. `None` means the side to
    /// move had no legal move and the board was left alone.
    pub fn ai_move(&mut self, difficulty: Difficulty) -> Option<Move> {
        self.ai.set_difficulty(difficulty);
        self.ai.make_move(&mut self.board)
    }

    pub fn undo_last_move(&mut self) -> bool {
        self.board.undo_last_move().is_some()
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    /// The side to move has no legal move.
    pub fn is_game_over(&self) -> bool {
        self.board.is_game_over()
    }

    pub fn status(&self) -> GameStatus {
        let to_move = self.board.current_turn();
        let in_check = self.board.is_in_check(to_move);
        let has_moves = !self.board.legal_moves(to_move).is_empty();

        match (has_moves, in_check) {
            (true, false) => GameStatus::InProgress,
            (true, true) => GameStatus::Check(to_move),
            (false, true) => GameStatus::Checkmate { winner: to_move.opposite() },
            (false, false) => GameStatus::Stalemate,
        }
    }
}
