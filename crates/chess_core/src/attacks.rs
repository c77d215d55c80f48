use crate::{
    moves::{BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS},
    piece::{Color, PieceType},
    Board, Piece, Position,
};

impl Board {
    /// True if any piece of `by` could capture on `target`.
    ///
    /// Pawns attack their two forward diagonals whether or not those squares are occupied,
    /// which differs from how they move.
    pub fn is_square_attacked(&self, target: Position, by: Color) -> bool {
        if !target.is_valid() {
            return false;
        }

        self.pieces()
            .filter(|(_, piece)| piece.color == by)
            .any(|(from, piece)| self.attacks(piece, from, target))
    }

    /// True if the king of `color` is attacked. A side without a king is never in check.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_position(color) {
            Some(king_pos) => self.is_square_attacked(king_pos, color.opposite()),
            None => false,
        }
    }

    /// First king of `color` in row-major order.
    pub fn king_position(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, piece)| piece.piece_type == PieceType::King && piece.color == color)
            .map(|(pos, _)| pos)
    }

    fn attacks(&self, piece: &Piece, from: Position, target: Position) -> bool {
        if from == target {
            return false;
        }

        let dr = target.row - from.row;
        let dc = target.col - from.col;

        match piece.piece_type {
            PieceType::Pawn => dr == piece.color.forward() && dc.abs() == 1,
            PieceType::Knight => KNIGHT_OFFSETS.contains(&(dr, dc)),
            PieceType::King => KING_OFFSETS.contains(&(dr, dc)),
            PieceType::Bishop => self.ray_reaches(from, target, &BISHOP_DIRECTIONS),
            PieceType::Rook => self.ray_reaches(from, target, &ROOK_DIRECTIONS),
            PieceType::Queen => {
                self.ray_reaches(from, target, &ROOK_DIRECTIONS)
                    || self.ray_reaches(from, target, &BISHOP_DIRECTIONS)
            }
        }
    }

    fn ray_reaches(&self, from: Position, target: Position, directions: &[(i8, i8)]) -> bool {
        let dr = target.row - from.row;
        let dc = target.col - from.col;
        let step = (dr.signum(), dc.signum());

        // Target must lie on one of the rays
        let aligned = dr == 0 || dc == 0 || dr.abs() == dc.abs();
        if !aligned || !directions.contains(&step) {
            return false;
        }

        let mut current = from;
        while let Some(next) = current.offset(step.0, step.1) {
            if next == target {
                return true;
            }
            if !self.is_empty(next) {
                return false;
            }
            current = next;
        }
        false
    }
}
