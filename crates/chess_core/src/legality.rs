use crate::{piece::Color, Board, Move, Position};

impl Board {
    /// Every legal move of `color`, in row-major order of the moving piece.
    ///
    /// Each pseudo-legal move is played on a clone and kept only if the mover's king is not
    /// left in check. The side to move is not consulted.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        self.pieces()
            .filter(|(_, piece)| piece.color == color)
            .flat_map(|(from, _)| self.legal_moves_from(from))
            .collect()
    }

    /// Legal moves of whichever piece stands on `from`.
    pub fn legal_moves_from(&self, from: Position) -> Vec<Move> {
        let Some(piece) = self.get_piece(from) else {
            return Vec::new();
        };

        piece
            .destinations(self, from)
            .into_iter()
            .filter_map(|to| Move::on_board(self, from, to))
            .filter(|mv| self.keeps_king_safe(mv))
            .collect()
    }

    /// Legal destinations for the piece on `from`; empty when there is no piece there or it
    /// belongs to the side not on move.
    pub fn legal_destinations(&self, from: Position) -> Vec<Position> {
        match self.get_piece(from) {
            Some(piece) if piece.color == self.current_turn() => {
                self.legal_moves_from(from).into_iter().map(|mv| mv.to).collect()
            }
            _ => Vec::new(),
        }
    }

    fn keeps_king_safe(&self, mv: &Move) -> bool {
        let mut simulated = self.clone();
        simulated.apply_move(mv);
        !simulated.is_in_check(mv.piece.color)
    }
}
