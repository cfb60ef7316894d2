//! Stateless legality and game-end predicates.
//!
//! Everything here is a pure read of a board and conditions; the only
//! mutation is [`move_obeys_rules`]'s scratch copy, which never escapes.

use crate::{Board, GameConditions};
use chess_model::{Color, Movement, Piece, Square};

/// The four orthogonal ray directions as (file, rank) deltas.
pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// The four diagonal ray directions.
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The eight knight jumps.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Returns true if `square` is attacked by any piece of the side opposing
/// `friendly`.
///
/// Walks each of the eight rays outward from the square until the first
/// occupant: a friendly piece shields the ray, an enemy piece attacks only
/// if its kind matches the direction (queen on any ray, bishop on
/// diagonals, rook on orthogonals, king at distance one, pawn at distance
/// one on the diagonal pointing toward the friendly side). The eight
/// knight-jump squares are probed independently.
pub fn is_square_attacked(board: &Board, square: Square, friendly: Color) -> bool {
    for &(df, dr) in ORTHOGONAL_DIRECTIONS.iter().chain(&DIAGONAL_DIRECTIONS) {
        let diagonal = df != 0 && dr != 0;
        let mut distance = 1u8;
        let mut cursor = square.offset(df, dr);
        while let Some(sq) = cursor {
            if let Some((piece, owner)) = board.piece_at(sq) {
                if owner != friendly && ray_piece_attacks(piece, diagonal, distance, dr, friendly) {
                    return true;
                }
                // First occupant blocks the ray either way.
                break;
            }
            cursor = sq.offset(df, dr);
            distance += 1;
        }
    }

    KNIGHT_JUMPS.iter().any(|&(df, dr)| {
        matches!(
            square.offset(df, dr).and_then(|sq| board.piece_at(sq)),
            Some((Piece::Knight, owner)) if owner != friendly
        )
    })
}

fn ray_piece_attacks(piece: Piece, diagonal: bool, distance: u8, dr: i8, friendly: Color) -> bool {
    match piece {
        Piece::Queen => true,
        Piece::Bishop => diagonal,
        Piece::Rook => !diagonal,
        Piece::King => distance == 1,
        // An enemy pawn one step away on the diagonal pointing toward the
        // friendly side captures onto `square`.
        Piece::Pawn => distance == 1 && diagonal && dr == friendly.pawn_direction(),
        Piece::Knight => false,
    }
}

/// Returns true if the given side's king is attacked.
///
/// A board without that king (possible in custom setups) is never in check.
pub fn is_in_check(board: &Board, side: Color) -> bool {
    match board.king_square(side) {
        Some(king) => is_square_attacked(board, king, side),
        None => false,
    }
}

/// The single chokepoint from pseudo-legal to legal.
///
/// Rejects capturing a king or landing on a friendly piece, then simulates
/// the move on a scratch copy and rejects it if the mover's own king is
/// attacked afterward. Unelected promotions are simulated with a queen;
/// the elected kind cannot change the mover's own king safety.
pub fn move_obeys_rules(board: &Board, m: &Movement, side: Color) -> bool {
    match board.piece_at(m.to) {
        Some((Piece::King, _)) => return false,
        Some((_, owner)) if owner == side => return false,
        _ => {}
    }

    let simulated = if m.is_promotion() && m.promotion_choice().is_none() {
        m.with_promotion_choice(Piece::Queen)
    } else {
        *m
    };
    let mut scratch = board.clone();
    scratch.apply_move(&simulated);
    !is_in_check(&scratch, side)
}

/// Checkmate: no legal moves while in check.
pub fn is_checkmated(board: &Board, side: Color, legal_move_count: usize) -> bool {
    legal_move_count == 0 && is_in_check(board, side)
}

/// Stalemate: no legal moves while not in check.
pub fn is_stalemated(board: &Board, side: Color, legal_move_count: usize) -> bool {
    legal_move_count == 0 && !is_in_check(board, side)
}

/// Returns true if `latest` has now occurred three times: once as itself
/// and at least twice more among the `history` of earlier positions.
/// Comparison is structural occupancy, never provenance.
pub fn is_threefold_repetition(history: &[Board], latest: &Board) -> bool {
    let earlier = history.iter().filter(|board| *board == latest).count();
    earlier + 1 >= 3
}

/// Returns true once the half-move clock reaches 50 without a capture or
/// pawn move.
pub fn is_fifty_move_draw(conditions: &GameConditions) -> bool {
    conditions.halfmove_clock >= 50
}

/// Result of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// White delivered checkmate.
    WhiteWins,
    /// Black delivered checkmate.
    BlackWins,
    /// Draw with a specific reason.
    Draw(DrawReason),
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// No legal moves but not in check.
    Stalemate,
    /// Identical board occupancy recurred three times.
    ThreefoldRepetition,
    /// Fifty half-moves without a capture or pawn move.
    FiftyMoveRule,
}
