use std::fmt;

use crate::{piece::{Color, PieceType}, Board, Piece, Position};

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] =
    [(-2, -1), (-2, 1), (-1, -2), (-1, 2), (1, -2), (1, 2), (2, -1), (2, 1)];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] =
    [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

const KING_START_COL: i8 = 4;

/// Geometry of one castling side, all in columns of the king's row.
struct CastleRule {
    rook_col: i8,
    king_to: i8,
    /// Must be empty.
    between: &'static [i8],
    /// Must not be attacked: the king's square, the square it crosses and its destination.
    king_path: &'static [i8],
}

const CASTLE_RULES: [CastleRule; 2] = [
    CastleRule { rook_col: 7, king_to: 6, between: &[5, 6], king_path: &[4, 5, 6] },
    CastleRule { rook_col: 0, king_to: 2, between: &[1, 2, 3], king_path: &[4, 3, 2] },
];

/// Rook relocation for a king moving two columns from `from` to `to`.
pub(crate) fn castle_rook_squares(from: Position, to: Position) -> (Position, Position) {
    if to.col > from.col {
        (Position::new(from.row, 7), Position::new(from.row, 5))
    } else {
        (Position::new(from.row, 0), Position::new(from.row, 3))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveType {
    Normal,
    Capture,
    Castle,
}

/// A move as played or searched. `piece` and `captured` are snapshots taken before the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub move_type: MoveType,
}

impl Move {
    /// Describes moving whatever stands on `from` to `to`. `None` if `from` is empty.
    pub fn on_board(board: &Board, from: Position, to: Position) -> Option<Self> {
        let piece = *board.get_piece(from)?;
        let captured = board.get_piece(to).copied();

        let castles = piece.piece_type == PieceType::King
            && to.is_valid()
            && (to.col - from.col).abs() == 2;
        let move_type = if castles {
            MoveType::Castle
        } else if captured.is_some() {
            MoveType::Capture
        } else {
            MoveType::Normal
        };

        Some(Self {
            from,
            to,
            piece,
            captured,
            move_type,
        })
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_castle(&self) -> bool {
        self.move_type == MoveType::Castle
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let separator = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}{}", self.piece.symbol(), self.from, separator, self.to)
    }
}

/// Destinations that respect geometry and blocking but not the safety of the mover's king.
pub(crate) fn pseudo_legal_destinations(
    piece: &Piece,
    board: &Board,
    from: Position,
) -> Vec<Position> {
    if !from.is_valid() {
        return Vec::new();
    }

    match piece.piece_type {
        PieceType::Pawn => pawn_destinations(piece.color, board, from),
        PieceType::Knight => step_destinations(piece.color, board, from, &KNIGHT_OFFSETS),
        PieceType::Bishop => ray_destinations(piece.color, board, from, &BISHOP_DIRECTIONS),
        PieceType::Rook => ray_destinations(piece.color, board, from, &ROOK_DIRECTIONS),
        PieceType::Queen => {
            let mut moves = ray_destinations(piece.color, board, from, &ROOK_DIRECTIONS);
            moves.extend(ray_destinations(piece.color, board, from, &BISHOP_DIRECTIONS));
            moves
        }
        PieceType::King => {
            let mut moves = step_destinations(piece.color, board, from, &KING_OFFSETS);
            moves.extend(castling_destinations(piece, board, from));
            moves
        }
    }
}

fn pawn_destinations(color: Color, board: &Board, from: Position) -> Vec<Position> {
    let mut moves = Vec::new();
    let forward = color.forward();

    // Single step only; no double step, no en passant
    if let Some(to) = from.offset(forward, 0) {
        if board.is_empty(to) {
            moves.push(to);
        }
    }

    for dc in [-1, 1] {
        if let Some(to) = from.offset(forward, dc) {
            if board.get_piece(to).is_some_and(|target| target.color != color) {
                moves.push(to);
            }
        }
    }

    moves
}

fn step_destinations(
    color: Color,
    board: &Board,
    from: Position,
    offsets: &[(i8, i8)],
) -> Vec<Position> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter(|&to| board.get_piece(to).map_or(true, |target| target.color != color))
        .collect()
}

fn ray_destinations(
    color: Color,
    board: &Board,
    from: Position,
    directions: &[(i8, i8)],
) -> Vec<Position> {
    let mut moves = Vec::new();

    for &(dr, dc) in directions {
        let mut current = from;
        while let Some(to) = current.offset(dr, dc) {
            match board.get_piece(to) {
                None => moves.push(to),
                Some(target) => {
                    if target.color != color {
                        moves.push(to);
                    }
                    break;
                }
            }
            current = to;
        }
    }

    moves
}

fn castling_destinations(king: &Piece, board: &Board, from: Position) -> Vec<Position> {
    let mut moves = Vec::new();
    if king.has_moved || from.col != KING_START_COL {
        return moves;
    }

    let enemy = king.color.opposite();
    for rule in &CASTLE_RULES {
        let rook_ready = board
            .get_piece(Position::new(from.row, rule.rook_col))
            .is_some_and(|rook| {
                rook.piece_type == PieceType::Rook && rook.color == king.color && !rook.has_moved
            });
        if !rook_ready {
            continue;
        }

        let path_clear = rule
            .between
            .iter()
            .all(|&col| board.is_empty(Position::new(from.row, col)));
        if !path_clear {
            continue;
        }

        let path_safe = rule
            .king_path
            .iter()
            .all(|&col| !board.is_square_attacked(Position::new(from.row, col), enemy));
        if path_safe {
            moves.push(Position::new(from.row, rule.king_to));
        }
    }

    moves
}
