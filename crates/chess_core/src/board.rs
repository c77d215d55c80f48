use log::{debug, trace};

use crate::{
    moves::castle_rook_squares,
    piece::{Color, PieceType},
    Move, MoveError, Piece, Position,
};

/// An 8x8 grid of optional pieces plus the side to move and the history of played moves.
///
/// `Clone` is a deep copy: pieces are plain values and the history is copied, so a clone
/// can be mutated freely during search without touching the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    current_turn: Color,
    history: Vec<Move>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard initial position, White to move.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
            current_turn: Color::White,
            history: Vec::new(),
        }
    }

    pub fn setup_initial_position(&mut self) {
        self.clear();
        self.history.clear();
        self.current_turn = Color::White;

        let piece_order = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (col, &piece_type) in (0..8).zip(piece_order.iter()) {
            self.place_piece(Piece::new(piece_type, Color::Black), Position::new(0, col));
            self.place_piece(Piece::new(PieceType::Pawn, Color::Black), Position::new(1, col));
            self.place_piece(Piece::new(PieceType::Pawn, Color::White), Position::new(6, col));
            self.place_piece(Piece::new(piece_type, Color::White), Position::new(7, col));
        }
    }

    pub fn get_piece(&self, pos: Position) -> Option<&Piece> {
        let (row, col) = pos.index()?;
        self.squares[row][col].as_ref()
    }

    /// Puts `piece` on `pos`, replacing any occupant. Ignored for off-board squares.
    pub fn place_piece(&mut self, piece: Piece, pos: Position) {
        if let Some((row, col)) = pos.index() {
            self.squares[row][col] = Some(piece);
        }
    }

    /// Takes the piece off `pos`, returning it. Ignored for off-board squares.
    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        let (row, col) = pos.index()?;
        self.squares[row][col].take()
    }

    /// Off-board squares count as empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get_piece(pos).is_none()
    }

    /// Removes every piece. Side to move and history are kept.
    pub fn clear(&mut self) {
        self.squares = [[None; 8]; 8];
    }

    pub fn current_turn(&self) -> Color {
        self.current_turn
    }

    pub fn set_current_turn(&mut self, color: Color) {
        self.current_turn = color;
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last()
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        Position::all().filter_map(move |pos| self.get_piece(pos).map(|piece| (pos, piece)))
    }

    /// Moves a piece without any legality check: captures whatever is on the destination,
    /// marks the mover as moved, and brings the rook along when a king moves two columns.
    /// Side to move and history are left alone. Does nothing if `from` is empty or either
    /// square is off the board.
    pub fn apply_move(&mut self, mv: &Move) {
        if !mv.from.is_valid() || !mv.to.is_valid() {
            return;
        }
        let Some(mut piece) = self.remove_piece(mv.from) else {
            return;
        };

        piece.has_moved = true;
        self.place_piece(piece, mv.to);

        if piece.piece_type == PieceType::King && (mv.to.col - mv.from.col).abs() == 2 {
            let (rook_from, rook_to) = castle_rook_squares(mv.from, mv.to);
            if let Some(mut rook) = self.remove_piece(rook_from) {
                rook.has_moved = true;
                self.place_piece(rook, rook_to);
            }
        }
    }

    /// Plays a real move for the side to move. On success the move is appended to the
    /// history and the turn passes; on failure nothing changes.
    pub fn make_move(&mut self, from: Position, to: Position) -> Result<Move, MoveError> {
        if !from.is_valid() {
            return Err(MoveError::InvalidSquare(from));
        }
        if !to.is_valid() {
            return Err(MoveError::InvalidSquare(to));
        }

        let piece = *self.get_piece(from).ok_or(MoveError::NoPiece(from))?;
        if piece.color != self.current_turn {
            return Err(MoveError::NotYourTurn(self.current_turn));
        }

        let chess_move = self
            .legal_moves_from(from)
            .into_iter()
            .find(|mv| mv.to == to)
            .ok_or(MoveError::IllegalMove { from, to })?;

        self.apply_move(&chess_move);
        self.history.push(chess_move);
        self.current_turn = self.current_turn.opposite();
        debug!("played {}", chess_move);

        Ok(chess_move)
    }

    /// Reverts the last move played with `make_move`.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;

        self.remove_piece(mv.to);
        self.place_piece(mv.piece, mv.from);
        if let Some(captured) = mv.captured {
            self.place_piece(captured, mv.to);
        }

        if mv.is_castle() {
            let (rook_from, rook_to) = castle_rook_squares(mv.from, mv.to);
            if let Some(mut rook) = self.remove_piece(rook_to) {
                // Castling needs an unmoved rook
                rook.has_moved = false;
                self.place_piece(rook, rook_from);
            }
        }

        self.current_turn = self.current_turn.opposite();
        trace!("undid {}", mv);
        Some(mv)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_in_check(self.current_turn) && self.legal_moves(self.current_turn).is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check(self.current_turn) && self.legal_moves(self.current_turn).is_empty()
    }

    /// The side to move has no legal move.
    pub fn is_game_over(&self) -> bool {
        self.legal_moves(self.current_turn).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(square: &str) -> Position {
        Position::from_algebraic(square).unwrap()
    }

    #[test]
    fn initial_position_has_thirty_two_pieces() {
        let board = Board::new();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.current_turn(), Color::White);
        assert_eq!(
            board.get_piece(sq("e1")),
            Some(&Piece::new(PieceType::King, Color::White))
        );
        assert_eq!(
            board.get_piece(sq("d8")),
            Some(&Piece::new(PieceType::Queen, Color::Black))
        );
        assert!(board.is_empty(sq("e4")));
    }

    #[test]
    fn off_board_operations_are_ignored() {
        let mut board = Board::empty();
        let outside = Position::new(8, 3);
        board.place_piece(Piece::new(PieceType::Rook, Color::White), outside);
        assert_eq!(board.pieces().count(), 0);
        assert_eq!(board.remove_piece(Position::new(-1, 0)), None);
        assert!(board.get_piece(outside).is_none());
        assert!(board.is_empty(outside));
    }

    #[test]
    fn clone_is_independent_of_source() {
        let mut board = Board::new();
        board.make_move(sq("e2"), sq("e3")).unwrap();
        let snapshot = board.clone();

        let mut copy = board.clone();
        copy.make_move(sq("e7"), sq("e6")).unwrap();
        copy.place_piece(Piece::new(PieceType::Queen, Color::White), sq("d5"));
        copy.remove_piece(sq("a1"));
        copy.set_current_turn(Color::White);

        assert_eq!(board, snapshot);
        assert_eq!(board.history().len(), 1);
        assert_eq!(board.current_turn(), Color::Black);
        assert!(board.get_piece(sq("a1")).is_some());
        assert!(board.is_empty(sq("d5")));
    }

    #[test]
    fn make_move_flips_turn_and_records_history() {
        let mut board = Board::new();
        let mv = board.make_move(sq("g1"), sq("f3")).unwrap();
        assert_eq!(mv.piece.piece_type, PieceType::Knight);
        assert_eq!(board.current_turn(), Color::Black);
        assert_eq!(board.last_move(), Some(&mv));
        assert!(board.get_piece(sq("f3")).unwrap().has_moved);
    }

    #[test]
    fn rejected_moves_leave_the_board_untouched() {
        let mut board = Board::new();
        let before = board.clone();

        assert_eq!(board.make_move(sq("e7"), sq("e6")), Err(MoveError::NotYourTurn(Color::White)));
        assert_eq!(board.make_move(sq("e4"), sq("e5")), Err(MoveError::NoPiece(sq("e4"))));
        assert_eq!(
            board.make_move(sq("e2"), sq("e4")),
            Err(MoveError::IllegalMove { from: sq("e2"), to: sq("e4") })
        );
        assert_eq!(
            board.make_move(Position::new(9, 9), sq("e4")),
            Err(MoveError::InvalidSquare(Position::new(9, 9)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn castling_moves_the_rook_and_undo_restores_it() {
        let mut board = Board::empty();
        board.place_piece(Piece::new(PieceType::King, Color::White), sq("e1"));
        board.place_piece(Piece::new(PieceType::Rook, Color::White), sq("h1"));
        board.place_piece(Piece::new(PieceType::King, Color::Black), sq("e8"));
        let before = board.clone();

        let mv = board.make_move(sq("e1"), sq("g1")).unwrap();
        assert!(mv.is_castle());
        let rook = board.get_piece(sq("f1")).unwrap();
        assert_eq!(rook.piece_type, PieceType::Rook);
        assert!(rook.has_moved);
        assert!(board.is_empty(sq("h1")));

        board.undo_last_move();
        assert_eq!(board, before);
    }

    #[test]
    fn undo_restores_captured_piece() {
        let mut board = Board::empty();
        board.place_piece(Piece::new(PieceType::Rook, Color::White), sq("a1"));
        board.place_piece(Piece::new(PieceType::Knight, Color::Black), sq("a7"));
        let before = board.clone();

        let mv = board.make_move(sq("a1"), sq("a7")).unwrap();
        assert_eq!(mv.captured.map(|p| p.piece_type), Some(PieceType::Knight));
        assert_eq!(board.pieces().count(), 1);

        assert_eq!(board.undo_last_move(), Some(mv));
        assert_eq!(board, before);
        assert_eq!(board.undo_last_move(), None);
    }

    #[test]
    fn apply_move_ignores_empty_origin() {
        let mut board = Board::new();
        let before = board.clone();
        let mut mv = Move::on_board(&board, sq("e2"), sq("e3")).unwrap();
        mv.from = sq("e4");
        board.apply_move(&mv);
        assert_eq!(board, before);
    }
}
