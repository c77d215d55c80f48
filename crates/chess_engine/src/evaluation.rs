use chess_core::{
    piece::{Color, PieceType},
    Board, Piece, Position,
};

/// Non-king material below which the position counts as an endgame.
pub const ENDGAME_MATERIAL: i32 = 1500;

const PASSED_PAWN_BONUS: i32 = 30;
const PASSED_PAWN_RANK_BONUS: i32 = 5; // per row advanced from the pawn's own back rank
const DOUBLED_PAWN_PENALTY: i32 = 15;
const ISOLATED_PAWN_PENALTY: i32 = 10;
const CENTRAL_FILE_PAWN_BONUS: i32 = 5;

const OPEN_FILE_ROOK_BONUS: i32 = 25;
const SEMI_OPEN_FILE_ROOK_BONUS: i32 = 15;
const CONNECTED_ROOK_BONUS: i32 = 20;

const BISHOP_DIAGONAL_SQUARE_BONUS: i32 = 2;
const BISHOP_PAIR_BONUS: i32 = 30;
const CENTRAL_QUEEN_BONUS: i32 = 5;

const KING_BACK_RANKS_BONUS: i32 = 30;
const PAWN_SHIELD_BONUS: i32 = 10;

const DEVELOPMENT_BONUS: i32 = 10;
const CENTER_OCCUPATION_BONUS: i32 = 8;

const IN_CHECK_PENALTY: i32 = 60;
const GIVING_CHECK_BONUS: i32 = 50;

// Knight position table, indexed [row][col] from White's side of the board.
// Black pieces read it mirrored vertically.
#[rustfmt::skip]
const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50,-40,-30,-30,-30,-30,-40,-50],   // Edge penalties
    [-40,-20,  0,  0,  0,  0,-20,-40],
    [-30,  0, 10, 15, 15, 10,  0,-30],
    [-30,  5, 15, 20, 20, 15,  5,-30],   // Center control
    [-30,  0, 15, 20, 20, 15,  0,-30],
    [-30,  5, 10, 15, 15, 10,  5,-30],
    [-40,-20,  0,  5,  5,  0,-20,-40],
    [-50,-40,-30,-30,-30,-30,-40,-50]    // Edge penalties
];

/// Scores `board` for `perspective`: positive is good for `perspective`.
///
/// Every per-piece term is added for the perspective's own pieces and subtracted for the
/// opponent's. Mobility counts legal destinations of both sides at half weight.
pub fn evaluate(board: &Board, perspective: Color) -> i32 {
    let endgame = is_endgame(board);

    let mut score = 0;
    let mut king_safety = 0;
    let mut center_control = 0;
    let mut mobility = 0;

    for (pos, piece) in board.pieces() {
        let sign = if piece.color == perspective { 1 } else { -1 };

        let mut value = piece.value() + piece_bonus(board, piece, pos);

        if piece.piece_type == PieceType::King {
            king_safety += sign * king_bonus(board, piece.color, pos, endgame);
        }

        if is_central(pos) {
            center_control += sign * CENTER_OCCUPATION_BONUS;
        }

        if !matches!(piece.piece_type, PieceType::Pawn | PieceType::King)
            && pos.row != piece.color.back_row()
        {
            value += DEVELOPMENT_BONUS;
        }

        score += sign * value;
    }

    for (color, sign) in [(perspective, 1), (perspective.opposite(), -1)] {
        mobility += sign * board.legal_moves(color).len() as i32;
    }

    if board.is_in_check(perspective) {
        score -= IN_CHECK_PENALTY;
    }
    if board.is_in_check(perspective.opposite()) {
        score += GIVING_CHECK_BONUS;
    }

    // Half weight, truncated toward zero together with the running score
    score = (2 * score + mobility) / 2;

    score + king_safety + center_control
}

/// Sum of non-king material on the board.
pub fn total_material(board: &Board) -> i32 {
    board
        .pieces()
        .filter(|(_, piece)| piece.piece_type != PieceType::King)
        .map(|(_, piece)| piece.value())
        .sum()
}

pub fn is_endgame(board: &Board) -> bool {
    total_material(board) < ENDGAME_MATERIAL
}

/// Piece-specific terms, before signing.
fn piece_bonus(board: &Board, piece: &Piece, pos: Position) -> i32 {
    let color = piece.color;
    match piece.piece_type {
        PieceType::Pawn => {
            let mut bonus = 0;
            if is_passed_pawn(board, pos, color) {
                let advanced = (pos.row - color.back_row()).abs() as i32;
                bonus += PASSED_PAWN_BONUS + advanced * PASSED_PAWN_RANK_BONUS;
            }
            if is_doubled_pawn(board, pos, color) {
                bonus -= DOUBLED_PAWN_PENALTY;
            }
            if is_isolated_pawn(board, pos, color) {
                bonus -= ISOLATED_PAWN_PENALTY;
            }
            if (2..=5).contains(&pos.col) {
                bonus += CENTRAL_FILE_PAWN_BONUS;
            }
            bonus
        }
        PieceType::Rook => {
            let mut bonus = 0;
            if is_open_file(board, pos.col) {
                bonus += OPEN_FILE_ROOK_BONUS;
            } else if is_semi_open_file(board, pos.col, color) {
                bonus += SEMI_OPEN_FILE_ROOK_BONUS;
            }
            if are_rooks_connected(board, pos, color) {
                bonus += CONNECTED_ROOK_BONUS;
            }
            bonus
        }
        PieceType::Knight => {
            let row = match color {
                Color::White => pos.row,
                Color::Black => 7 - pos.row,
            };
            KNIGHT_TABLE[row as usize][pos.col as usize]
        }
        PieceType::Bishop => {
            let mut bonus = open_diagonal_squares(board, pos) * BISHOP_DIAGONAL_SQUARE_BONUS;
            // Counted for each bishop of the pair
            if has_bishop_pair(board, color) {
                bonus += BISHOP_PAIR_BONUS;
            }
            bonus
        }
        PieceType::Queen => {
            if is_central(pos) {
                CENTRAL_QUEEN_BONUS
            } else {
                0
            }
        }
        PieceType::King => 0,
    }
}

/// Centralisation in the endgame, shelter otherwise.
fn king_bonus(board: &Board, color: Color, pos: Position, endgame: bool) -> i32 {
    if endgame {
        // (4 - manhattan distance to the centre) * 10, kept in whole numbers
        let doubled_distance = (7 - 2 * pos.row as i32).abs() + (7 - 2 * pos.col as i32).abs();
        return 40 - 5 * doubled_distance;
    }

    let mut bonus = 0;
    if (pos.row - color.back_row()).abs() <= 1 {
        bonus += KING_BACK_RANKS_BONUS;
    }
    bonus + pawn_shield(board, pos, color) * PAWN_SHIELD_BONUS
}

fn is_central(pos: Position) -> bool {
    (2..=5).contains(&pos.row) && (2..=5).contains(&pos.col)
}

fn is_pawn_of(board: &Board, pos: Position, color: Color) -> bool {
    board
        .get_piece(pos)
        .is_some_and(|p| p.piece_type == PieceType::Pawn && p.color == color)
}

fn file_has_pawn_of(board: &Board, col: i8, color: Color) -> bool {
    (0..8).any(|row| is_pawn_of(board, Position::new(row, col), color))
}

/// No enemy pawn ahead of it on its own or an adjacent file.
pub fn is_passed_pawn(board: &Board, pos: Position, color: Color) -> bool {
    if !pos.is_valid() {
        return false;
    }
    let enemy = color.opposite();
    let mut row = pos.row + color.forward();
    while (0..8).contains(&row) {
        for col in pos.col - 1..=pos.col + 1 {
            if is_pawn_of(board, Position::new(row, col), enemy) {
                return false;
            }
        }
        row += color.forward();
    }
    true
}

pub fn is_doubled_pawn(board: &Board, pos: Position, color: Color) -> bool {
    if !pos.is_valid() {
        return false;
    }
    (0..8)
        .filter(|&row| row != pos.row)
        .any(|row| is_pawn_of(board, Position::new(row, pos.col), color))
}

pub fn is_isolated_pawn(board: &Board, pos: Position, color: Color) -> bool {
    if !pos.is_valid() {
        return false;
    }
    !file_has_pawn_of(board, pos.col - 1, color) && !file_has_pawn_of(board, pos.col + 1, color)
}

pub fn is_open_file(board: &Board, col: i8) -> bool {
    !file_has_pawn_of(board, col, Color::White) && !file_has_pawn_of(board, col, Color::Black)
}

/// Only enemy pawns on the file.
pub fn is_semi_open_file(board: &Board, col: i8, color: Color) -> bool {
    !file_has_pawn_of(board, col, color) && file_has_pawn_of(board, col, color.opposite())
}

/// Another friendly rook anywhere on the same row or column.
fn are_rooks_connected(board: &Board, pos: Position, color: Color) -> bool {
    board.pieces().any(|(other, piece)| {
        other != pos
            && piece.piece_type == PieceType::Rook
            && piece.color == color
            && (other.row == pos.row || other.col == pos.col)
    })
}

/// Empty squares along the four diagonals until the first piece or the edge.
fn open_diagonal_squares(board: &Board, pos: Position) -> i32 {
    let mut count = 0;
    for (dr, dc) in [(1, 1), (1, -1), (-1, 1), (-1, -1)] {
        let mut current = pos;
        while let Some(next) = current.offset(dr, dc) {
            if !board.is_empty(next) {
                break;
            }
            count += 1;
            current = next;
        }
    }
    count
}

/// Bishops of `color` on both square colours.
pub fn has_bishop_pair(board: &Board, color: Color) -> bool {
    let mut light = false;
    let mut dark = false;
    for (pos, piece) in board.pieces() {
        if piece.piece_type == PieceType::Bishop && piece.color == color {
            if pos.is_light() {
                light = true;
            } else {
                dark = true;
            }
        }
    }
    light && dark
}

/// Friendly pawns on the three squares directly in front of the king.
fn pawn_shield(board: &Board, king_pos: Position, color: Color) -> i32 {
    (-1..=1)
        .filter_map(|dc| king_pos.offset(color.forward(), dc))
        .filter(|&pos| is_pawn_of(board, pos, color))
        .count() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(square: &str) -> Position {
        Position::from_algebraic(square).unwrap()
    }

    fn place(board: &mut Board, piece_type: PieceType, color: Color, square: &str) {
        board.place_piece(Piece::new(piece_type, color), sq(square));
    }

    #[test]
    fn initial_position_is_balanced() {
        let board = Board::new();
        assert_eq!(evaluate(&board, Color::White), 0);
        assert_eq!(evaluate(&board, Color::Black), 0);
        assert!(!is_endgame(&board));
    }

    #[test]
    fn passed_pawn_is_blocked_by_enemy_pawn_in_front() {
        let mut board = Board::empty();
        let pawn = Position::new(3, 4);
        board.place_piece(Piece::new(PieceType::Pawn, Color::White), pawn);
        // Black pawns behind the white pawn do not matter
        board.place_piece(Piece::new(PieceType::Pawn, Color::Black), Position::new(5, 3));
        assert!(is_passed_pawn(&board, pawn, Color::White));

        board.place_piece(Piece::new(PieceType::Pawn, Color::Black), Position::new(1, 4));
        assert!(!is_passed_pawn(&board, pawn, Color::White));
    }

    #[test]
    fn adjacent_file_pawn_also_stops_a_passer() {
        let mut board = Board::empty();
        place(&mut board, PieceType::Pawn, Color::Black, "c5");
        place(&mut board, PieceType::Pawn, Color::White, "b3");
        assert!(!is_passed_pawn(&board, sq("c5"), Color::Black));
        assert!(!is_passed_pawn(&board, sq("b3"), Color::White));
    }

    #[test]
    fn pawn_structure_flags() {
        let mut board = Board::empty();
        place(&mut board, PieceType::Pawn, Color::White, "a2");
        place(&mut board, PieceType::Pawn, Color::White, "a3");
        place(&mut board, PieceType::Pawn, Color::White, "e4");
        place(&mut board, PieceType::Pawn, Color::White, "f2");

        assert!(is_doubled_pawn(&board, sq("a2"), Color::White));
        assert!(is_isolated_pawn(&board, sq("a2"), Color::White));
        assert!(!is_isolated_pawn(&board, sq("e4"), Color::White));
        assert!(!is_doubled_pawn(&board, sq("e4"), Color::White));
    }

    #[test]
    fn file_openness() {
        let mut board = Board::empty();
        place(&mut board, PieceType::Pawn, Color::Black, "d7");
        place(&mut board, PieceType::Pawn, Color::White, "e2");

        assert!(is_open_file(&board, 0));
        assert!(!is_open_file(&board, 3));
        assert!(is_semi_open_file(&board, 3, Color::White));
        assert!(!is_semi_open_file(&board, 3, Color::Black));
        assert!(!is_semi_open_file(&board, 0, Color::White));
    }

    #[test]
    fn bishop_pair_needs_both_square_colours() {
        let mut board = Board::empty();
        place(&mut board, PieceType::Bishop, Color::White, "c1");
        place(&mut board, PieceType::Bishop, Color::White, "e3");
        assert!(!has_bishop_pair(&board, Color::White));

        place(&mut board, PieceType::Bishop, Color::White, "f1");
        assert!(has_bishop_pair(&board, Color::White));
        assert!(!has_bishop_pair(&board, Color::Black));
    }

    #[test]
    fn endgame_threshold_excludes_kings() {
        let mut board = Board::empty();
        place(&mut board, PieceType::King, Color::White, "e1");
        place(&mut board, PieceType::King, Color::Black, "e8");
        place(&mut board, PieceType::Queen, Color::White, "d1");
        place(&mut board, PieceType::Rook, Color::Black, "a8");
        assert_eq!(total_material(&board), 1400);
        assert!(is_endgame(&board));

        place(&mut board, PieceType::Knight, Color::Black, "b8");
        assert!(!is_endgame(&board));
    }

    #[test]
    fn score_flips_with_perspective_when_nobody_is_in_check() {
        let mut board = Board::empty();
        place(&mut board, PieceType::King, Color::White, "g1");
        place(&mut board, PieceType::Pawn, Color::White, "g2");
        place(&mut board, PieceType::Rook, Color::White, "d1");
        place(&mut board, PieceType::King, Color::Black, "b8");
        place(&mut board, PieceType::Knight, Color::Black, "c6");
        place(&mut board, PieceType::Pawn, Color::Black, "a7");

        let white = evaluate(&board, Color::White);
        assert_eq!(white, -evaluate(&board, Color::Black));
        assert!(white > 0);
    }

    #[test]
    fn check_terms_are_asymmetric() {
        let mut board = Board::empty();
        place(&mut board, PieceType::King, Color::White, "e1");
        place(&mut board, PieceType::King, Color::Black, "a8");
        place(&mut board, PieceType::Rook, Color::Black, "e8");
        let quiet = {
            let mut b = board.clone();
            b.remove_piece(sq("e8"));
            b.place_piece(Piece::new(PieceType::Rook, Color::Black), sq("d8"));
            b
        };

        // Same material and structure, the rook only moves off the king's file
        let diff_white = evaluate(&quiet, Color::White) - evaluate(&board, Color::White);
        let diff_black = evaluate(&board, Color::Black) - evaluate(&quiet, Color::Black);
        assert!(diff_white > 0);
        assert!(diff_black > 0);
    }

    #[test]
    fn two_rooks_against_a_bare_king() {
        let mut board = Board::empty();
        place(&mut board, PieceType::King, Color::White, "e1");
        place(&mut board, PieceType::Rook, Color::White, "a1");
        place(&mut board, PieceType::Rook, Color::White, "h1");
        place(&mut board, PieceType::King, Color::Black, "e8");
        assert!(is_endgame(&board));

        // Each rook: 500 + open file 25 + connected 20. Mobility is 26 (two castles
        // included) against 5, counted at half weight and truncated.
        assert_eq!(evaluate(&board, Color::White), 1100);
        assert_eq!(evaluate(&board, Color::Black), -1100);
    }

    #[test]
    fn bishop_pair_is_counted_for_each_bishop() {
        let mut board = Board::empty();
        place(&mut board, PieceType::King, Color::White, "e1");
        place(&mut board, PieceType::Bishop, Color::White, "c1");
        place(&mut board, PieceType::Bishop, Color::White, "f1");
        place(&mut board, PieceType::King, Color::Black, "e8");

        // Each bishop: 330 + 7 open diagonal squares * 2 + pair 30 = 374
        assert_eq!(piece_bonus(&board, board.get_piece(sq("c1")).unwrap(), sq("c1")), 44);
        assert_eq!(piece_bonus(&board, board.get_piece(sq("f1")).unwrap(), sq("f1")), 44);
        // (2 * 748 + 18 - 5) / 2 rounds 754.5 down
        assert_eq!(evaluate(&board, Color::White), 754);
        assert_eq!(evaluate(&board, Color::Black), -754);
    }

    #[test]
    fn pawn_shield_counts_outside_the_endgame() {
        let mut board = Board::empty();
        place(&mut board, PieceType::King, Color::White, "g1");
        place(&mut board, PieceType::Pawn, Color::White, "f2");
        place(&mut board, PieceType::Pawn, Color::White, "g2");
        place(&mut board, PieceType::Pawn, Color::White, "h2");
        place(&mut board, PieceType::King, Color::Black, "g8");
        place(&mut board, PieceType::Queen, Color::Black, "a8");
        place(&mut board, PieceType::Rook, Color::Black, "b8");
        assert!(!is_endgame(&board));

        assert_eq!(king_bonus(&board, Color::White, sq("g1"), false), 60);
        assert_eq!(king_bonus(&board, Color::Black, sq("g8"), false), 30);

        // Pawns 140 + 135 + 135 against queen 900 and rook on an open file 525,
        // mobility 5 against 29, king safety 60 against 30
        assert_eq!(evaluate(&board, Color::White), -997);

        board.remove_piece(sq("g2"));
        assert_eq!(king_bonus(&board, Color::White, sq("g1"), false), 50);
    }

    #[test]
    fn black_king_shield_looks_down_the_board() {
        let mut board = Board::empty();
        place(&mut board, PieceType::Pawn, Color::Black, "f7");
        place(&mut board, PieceType::Pawn, Color::Black, "g7");
        place(&mut board, PieceType::Pawn, Color::White, "h7");
        assert_eq!(king_bonus(&board, Color::Black, sq("g8"), false), 50);
        assert_eq!(king_bonus(&board, Color::Black, sq("g6"), false), 0);
        // Endgame: centralisation only, shelter ignored
        assert_eq!(king_bonus(&board, Color::Black, sq("g8"), true), -20);
        assert_eq!(king_bonus(&board, Color::White, sq("d4"), true), 30);
    }

    #[test]
    fn knight_table_is_mirrored_for_black() {
        let board = Board::empty();
        let white = Piece::new(PieceType::Knight, Color::White);
        let black = Piece::new(PieceType::Knight, Color::Black);

        assert_eq!(piece_bonus(&board, &white, sq("d2")), 5);
        assert_eq!(piece_bonus(&board, &black, sq("d7")), 5);
        assert_eq!(piece_bonus(&board, &black, sq("d2")), 0);
        assert_eq!(piece_bonus(&board, &white, sq("c4")), 15);
        assert_eq!(piece_bonus(&board, &black, sq("c4")), 15);
        assert_eq!(piece_bonus(&board, &white, sq("b3")), 5);
        assert_eq!(piece_bonus(&board, &black, sq("b3")), 0);
        assert_eq!(piece_bonus(&board, &white, sq("a1")), -50);
    }

    #[test]
    fn extreme_squares_are_not_pawns() {
        let board = Board::new();
        let far = Position::new(i8::MAX, 0);
        assert!(!is_passed_pawn(&board, far, Color::Black));
        assert!(!is_doubled_pawn(&board, far, Color::White));
        assert!(!is_isolated_pawn(&board, Position::new(0, i8::MIN), Color::White));
    }

    #[test]
    fn endgame_king_prefers_the_centre() {
        let mut corner = Board::empty();
        place(&mut corner, PieceType::King, Color::White, "a1");
        place(&mut corner, PieceType::King, Color::Black, "h8");
        let mut centre = Board::empty();
        place(&mut centre, PieceType::King, Color::White, "d4");
        place(&mut centre, PieceType::King, Color::Black, "h8");

        assert!(evaluate(&centre, Color::White) > evaluate(&corner, Color::White));
    }
}
