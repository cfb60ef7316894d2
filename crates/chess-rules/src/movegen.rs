//! Move generation.
//!
//! Each piece kind enumerates its own pseudo-legal destinations from a
//! single origin square, constrained only by geometry and occupancy.
//! [`legal_moves_from`] then funnels every candidate through
//! [`rules::move_obeys_rules`], the shared filter that turns pseudo-legal
//! into legal.

use crate::rules::{self, DIAGONAL_DIRECTIONS, KNIGHT_JUMPS, ORTHOGONAL_DIRECTIONS};
use crate::{Board, GameConditions};
use chess_model::{Color, File, Movement, Piece, Rank, Square};
use std::collections::HashMap;

/// The legal-move cache for one position: every legal movement of the side
/// to move, keyed by (start, end). A promotion appears once per key, with
/// no piece elected yet.
pub type LegalMoveMap = HashMap<(Square, Square), Movement>;

/// Generates the pseudo-legal movements of the piece on `from`.
///
/// Candidates obey movement geometry and occupancy but may still leave the
/// mover's own king in check. Returns nothing for an empty square.
pub fn pseudo_legal_moves(
    board: &Board,
    conditions: &GameConditions,
    from: Square,
) -> Vec<Movement> {
    let Some((piece, color)) = board.piece_at(from) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    match piece {
        Piece::Pawn => pawn_moves(board, conditions, from, color, &mut moves),
        Piece::Knight => knight_moves(board, from, color, &mut moves),
        Piece::Bishop => sliding_moves(board, from, color, &DIAGONAL_DIRECTIONS, &mut moves),
        Piece::Rook => sliding_moves(board, from, color, &ORTHOGONAL_DIRECTIONS, &mut moves),
        Piece::Queen => {
            sliding_moves(board, from, color, &ORTHOGONAL_DIRECTIONS, &mut moves);
            sliding_moves(board, from, color, &DIAGONAL_DIRECTIONS, &mut moves);
        }
        Piece::King => king_moves(board, conditions, from, color, &mut moves),
    }
    moves
}

/// Generates the fully legal movements of the piece on `from`.
pub fn legal_moves_from(board: &Board, conditions: &GameConditions, from: Square) -> Vec<Movement> {
    let Some((_, color)) = board.piece_at(from) else {
        return Vec::new();
    };
    let mut moves = pseudo_legal_moves(board, conditions, from);
    moves.retain(|m| rules::move_obeys_rules(board, m, color));
    moves
}

/// Builds the full legal-move cache for the side to move. Pieces with no
/// legal moves contribute no entries.
pub fn legal_move_map(board: &Board, conditions: &GameConditions) -> LegalMoveMap {
    let mut map = LegalMoveMap::new();
    for (from, _, color) in board.pieces() {
        if color != conditions.side_to_move {
            continue;
        }
        for m in legal_moves_from(board, conditions, from) {
            map.insert(m.key(), m);
        }
    }
    map
}

/// Counts leaf nodes of the legal-move tree to the given depth.
///
/// Promotions are counted once per (start, end), electing a queen to
/// recurse. Used to validate the generator against known node counts.
pub fn perft(board: &Board, conditions: &GameConditions, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let map = legal_move_map(board, conditions);
    if depth == 1 {
        return map.len() as u64;
    }

    let mut nodes = 0;
    for m in map.values() {
        let m = if m.is_promotion() {
            m.with_promotion_choice(Piece::Queen)
        } else {
            *m
        };
        let mut next_board = board.clone();
        next_board.apply_move(&m);
        let next_conditions = conditions.after_move(board, &m);
        nodes += perft(&next_board, &next_conditions, depth - 1);
    }
    nodes
}

fn pawn_moves(
    board: &Board,
    conditions: &GameConditions,
    from: Square,
    color: Color,
    moves: &mut Vec<Movement>,
) {
    let dir = color.pawn_direction();
    let promotion_rank = color.promotion_rank();

    // Forward pushes are blocked by any occupancy.
    if let Some(to) = from.offset(0, dir) {
        if !board.is_occupied(to) {
            moves.push(pawn_push_or_promotion(from, to, promotion_rank));

            if from.rank() == color.pawn_rank() {
                if let Some(double) = from.offset(0, 2 * dir) {
                    if !board.is_occupied(double) {
                        moves.push(Movement::normal(from, double));
                    }
                }
            }
        }
    }

    // Diagonal captures only onto enemy-occupied squares.
    for df in [-1, 1] {
        let Some(to) = from.offset(df, dir) else {
            continue;
        };
        if board.is_occupied_by(to, color.opposite()) {
            moves.push(pawn_push_or_promotion(from, to, promotion_rank));
        }
    }

    // En passant: capture onto the target square, removing the pawn behind it.
    if let Some(target) = conditions.en_passant {
        for df in [-1, 1] {
            if from.offset(df, dir) == Some(target) {
                let captured = target
                    .offset(0, -dir)
                    .expect("en passant target has a square behind it");
                moves.push(Movement::en_passant(from, target, captured));
            }
        }
    }
}

fn pawn_push_or_promotion(from: Square, to: Square, promotion_rank: Rank) -> Movement {
    if to.rank() == promotion_rank {
        Movement::promotion(from, to)
    } else {
        Movement::normal(from, to)
    }
}

fn knight_moves(board: &Board, from: Square, color: Color, moves: &mut Vec<Movement>) {
    for &(df, dr) in &KNIGHT_JUMPS {
        if let Some(to) = from.offset(df, dr) {
            if !board.is_occupied_by(to, color) {
                moves.push(Movement::normal(from, to));
            }
        }
    }
}

fn sliding_moves(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Movement>,
) {
    for &(df, dr) in directions {
        let mut cursor = from.offset(df, dr);
        while let Some(to) = cursor {
            match board.piece_at(to) {
                None => {
                    moves.push(Movement::normal(from, to));
                    cursor = to.offset(df, dr);
                }
                Some((_, owner)) => {
                    if owner != color {
                        moves.push(Movement::normal(from, to));
                    }
                    break;
                }
            }
        }
    }
}

fn king_moves(
    board: &Board,
    conditions: &GameConditions,
    from: Square,
    color: Color,
    moves: &mut Vec<Movement>,
) {
    for &(df, dr) in ORTHOGONAL_DIRECTIONS.iter().chain(&DIAGONAL_DIRECTIONS) {
        if let Some(to) = from.offset(df, dr) {
            if !board.is_occupied_by(to, color) {
                moves.push(Movement::normal(from, to));
            }
        }
    }

    // Castling candidates. Rights imply an unmoved king and rook; the
    // placement checks keep custom setups with stale rights honest.
    let back = color.back_rank();
    if from != Square::new(File::E, back) {
        return;
    }

    if conditions.castling.can_castle_kingside(color) {
        let rook_from = Square::new(File::H, back);
        let transit = [Square::new(File::F, back), Square::new(File::G, back)];
        if board.piece_at(rook_from) == Some((Piece::Rook, color))
            && transit.iter().all(|&sq| !board.is_occupied(sq))
            && !rules::is_square_attacked(board, from, color)
            && transit
                .iter()
                .all(|&sq| !rules::is_square_attacked(board, sq, color))
        {
            moves.push(Movement::castling(from, Square::new(File::G, back), rook_from));
        }
    }

    if conditions.castling.can_castle_queenside(color) {
        let rook_from = Square::new(File::A, back);
        let between = [
            Square::new(File::B, back),
            Square::new(File::C, back),
            Square::new(File::D, back),
        ];
        let transit = [Square::new(File::D, back), Square::new(File::C, back)];
        if board.piece_at(rook_from) == Some((Piece::Rook, color))
            && between.iter().all(|&sq| !board.is_occupied(sq))
            && !rules::is_square_attacked(board, from, color)
            && transit
                .iter()
                .all(|&sq| !rules::is_square_attacked(board, sq, color))
        {
            moves.push(Movement::castling(from, Square::new(File::C, back), rook_from));
        }
    }
}
