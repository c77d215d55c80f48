// Negamax search with alpha-beta pruning over cloned boards
use std::cmp::Reverse;

use chess_core::{piece::KING_VALUE, Board, Color, Move};
use log::{debug, info, trace};
use rand::{seq::SliceRandom, Rng};

use crate::{difficulty::Difficulty, evaluation::{evaluate, is_endgame}};

/// Bound of the search window. Finite so that negating it never overflows.
pub const INFINITY: i32 = 1_000_000;

/// Score of a side that is checkmated, from its own point of view (negated).
pub const MATE_SCORE: i32 = KING_VALUE;

/// Moves scoring within this many points of the best one are "good" substitutes.
pub const GOOD_MOVE_MARGIN: i32 = 50;

// Move ordering
const CAPTURE_PRIORITY_FACTOR: i32 = 10;
const CASTLE_PRIORITY: i32 = 50;

/// Ordering score: captured material times ten, plus a bonus for castling.
pub fn move_priority(mv: &Move) -> i32 {
    let mut priority = 0;
    if let Some(captured) = mv.captured {
        priority += captured.value() * CAPTURE_PRIORITY_FACTOR;
    }
    if mv.is_castle() {
        priority += CASTLE_PRIORITY;
    }
    priority
}

/// Highest priority first; equal priorities keep generation order.
pub fn order_moves(moves: &mut [Move]) {
    moves.sort_by_key(|mv| Reverse(move_priority(mv)));
}

/// Best score `color` can force within `depth` plies, from `color`'s point of view.
///
/// A side with no legal move scores `-MATE_SCORE` when in check and 0 otherwise.
pub fn negamax(board: &Board, depth: u8, mut alpha: i32, beta: i32, color: Color) -> i32 {
    if depth == 0 {
        return evaluate(board, color);
    }

    let mut moves = board.legal_moves(color);
    if moves.is_empty() {
        return if board.is_in_check(color) { -MATE_SCORE } else { 0 };
    }
    order_moves(&mut moves);

    let mut best_score = -INFINITY;
    for mv in &moves {
        let mut child = board.clone();
        child.apply_move(mv);
        let score = -negamax(&child, depth - 1, -beta, -alpha, color.opposite());

        best_score = best_score.max(score);
        alpha = alpha.max(best_score);
        if alpha >= beta {
            trace!("cutoff after {} at depth {}", mv, depth);
            break;
        }
    }

    best_score
}

/// Result of scoring every root move.
#[derive(Debug, Clone)]
pub struct RootSearch {
    /// Best move and its score.
    pub best: Option<(Move, i32)>,
    /// The best move plus every later move scored within `GOOD_MOVE_MARGIN` of the best
    /// score at the time it was searched.
    pub good_moves: Vec<Move>,
}

/// Scores the already ordered root `moves` for `color`.
pub fn search_root(board: &Board, color: Color, depth: u8, moves: &[Move]) -> RootSearch {
    let depth = depth.max(1);
    let beta = INFINITY;
    let mut alpha = -INFINITY;
    let mut best: Option<(Move, i32)> = None;
    let mut good_moves = Vec::new();

    for mv in moves {
        let mut child = board.clone();
        child.apply_move(mv);
        let score = -negamax(&child, depth - 1, -beta, -alpha, color.opposite());
        trace!("root move {} scored {}", mv, score);

        match best {
            Some((_, best_score)) if score <= best_score => {
                if score >= best_score - GOOD_MOVE_MARGIN {
                    good_moves.push(*mv);
                }
            }
            _ => {
                best = Some((*mv, score));
                alpha = alpha.max(score);
                good_moves.clear();
                good_moves.push(*mv);
            }
        }
    }

    RootSearch { best, good_moves }
}

/// Strongest move for `color` at a fixed depth, with no randomness involved.
pub fn best_move(board: &Board, color: Color, depth: u8) -> Option<Move> {
    let mut moves = board.legal_moves(color);
    order_moves(&mut moves);
    search_root(board, color, depth, &moves).best.map(|(mv, _)| mv)
}

/// Picks a move for `color` the way the given difficulty plays. `None` means `color` has no
/// legal move; whether that is mate or stalemate is for the caller to decide.
pub fn find_best_move<R: Rng + ?Sized>(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Move> {
    find_best_move_with_depth(board, color, difficulty, difficulty.base_depth(), rng)
}

/// Like `find_best_move` with an explicit base depth, still capped by the difficulty.
pub fn find_best_move_with_depth<R: Rng + ?Sized>(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    base_depth: u8,
    rng: &mut R,
) -> Option<Move> {
    let depth = difficulty.search_depth(base_depth, is_endgame(board));

    let mut moves = board.legal_moves(color);
    debug!(
        "{:?} has {} legal moves, searching {} plies ({})",
        color,
        moves.len(),
        depth,
        difficulty
    );
    if moves.is_empty() {
        return None;
    }
    order_moves(&mut moves);

    if rng.gen_range(0..100) < difficulty.random_move_chance() {
        let mv = moves.choose(rng).copied();
        debug!("playing a random move without searching");
        return mv;
    }

    let RootSearch { best, good_moves } = search_root(board, color, depth, &moves);

    if let Some((best_move, best_score)) = best {
        debug!(
            "best move {} with score {} ({} good moves)",
            best_move,
            best_score,
            good_moves.len()
        );
        let roll = rng.gen_range(0..100);
        if roll < difficulty.substitution_chance() {
            if let Some(&substitute) = good_moves.choose(rng) {
                info!("playing {} instead of the best move {}", substitute, best_move);
                return Some(substitute);
            }
        }
        return Some(best_move);
    }

    moves.choose(rng).copied()
}
