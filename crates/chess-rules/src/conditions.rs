//! Game conditions: turn owner, castling rights, en passant, move clocks.

use crate::Board;
use chess_model::{Color, MoveKind, Movement, Piece, Square};

/// Castling rights flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const WHITE_KINGSIDE: u8 = 0b0001;
    pub const WHITE_QUEENSIDE: u8 = 0b0010;
    pub const BLACK_KINGSIDE: u8 = 0b0100;
    pub const BLACK_QUEENSIDE: u8 = 0b1000;
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// Creates new castling rights from flags.
    #[inline]
    pub const fn new(flags: u8) -> Self {
        CastlingRights(flags & 0b1111)
    }

    /// Returns true if the given side can castle kingside.
    #[inline]
    pub const fn can_castle_kingside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Returns true if the given side can castle queenside.
    #[inline]
    pub const fn can_castle_queenside(self, color: Color) -> bool {
        let flag = match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        };
        (self.0 & flag) != 0
    }

    /// Removes castling rights for a color.
    #[inline]
    pub fn remove_color(&mut self, color: Color) {
        let mask = match color {
            Color::White => !(Self::WHITE_KINGSIDE | Self::WHITE_QUEENSIDE),
            Color::Black => !(Self::BLACK_KINGSIDE | Self::BLACK_QUEENSIDE),
        };
        self.0 &= mask;
    }

    /// Removes kingside castling for a color.
    #[inline]
    pub fn remove_kingside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_KINGSIDE,
            Color::Black => !Self::BLACK_KINGSIDE,
        };
        self.0 &= mask;
    }

    /// Removes queenside castling for a color.
    #[inline]
    pub fn remove_queenside(&mut self, color: Color) {
        let mask = match color {
            Color::White => !Self::WHITE_QUEENSIDE,
            Color::Black => !Self::BLACK_QUEENSIDE,
        };
        self.0 &= mask;
    }

    /// Returns the raw flags.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// The per-position state that is not piece placement.
///
/// Conditions are derived deterministically from the previous conditions
/// plus the half-move just made; nothing here is ever mutated in place
/// once published into history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConditions {
    /// The side to move.
    pub side_to_move: Color,
    /// Castling rights.
    pub castling: CastlingRights,
    /// En passant target square (the square behind a pawn that just
    /// double-pushed), if any.
    pub en_passant: Option<Square>,
    /// Half-moves since the last capture or pawn move.
    pub halfmove_clock: u32,
    /// Fullmove number (starts at 1, increments after Black's move).
    pub fullmove_number: u32,
}

impl GameConditions {
    /// Conditions at the start of a standard game.
    pub const fn initial() -> Self {
        GameConditions {
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// Derives the conditions that hold after `m` is played on
    /// `board_before`.
    ///
    /// Updates the turn owner, invalidates castling rights touched by a
    /// king/rook move or a capture on a rook home square, sets or clears
    /// the en passant target, and advances the clocks.
    ///
    /// # Panics
    ///
    /// Panics if `m.from` is empty on `board_before`.
    pub fn after_move(&self, board_before: &Board, m: &Movement) -> Self {
        let (piece, color) = board_before
            .piece_at(m.from)
            .expect("no piece at origin square");
        let is_capture =
            board_before.is_occupied(m.to) || matches!(m.kind, MoveKind::EnPassant { .. });

        let mut next = *self;
        next.side_to_move = color.opposite();

        if piece == Piece::King {
            next.castling.remove_color(color);
        }
        if piece == Piece::Rook {
            match m.from {
                sq if sq == Square::H1 => next.castling.remove_kingside(Color::White),
                sq if sq == Square::A1 => next.castling.remove_queenside(Color::White),
                sq if sq == Square::H8 => next.castling.remove_kingside(Color::Black),
                sq if sq == Square::A8 => next.castling.remove_queenside(Color::Black),
                _ => {}
            }
        }
        // A capture landing on a rook home square kills that right too.
        match m.to {
            sq if sq == Square::H1 => next.castling.remove_kingside(Color::White),
            sq if sq == Square::A1 => next.castling.remove_queenside(Color::White),
            sq if sq == Square::H8 => next.castling.remove_kingside(Color::Black),
            sq if sq == Square::A8 => next.castling.remove_queenside(Color::Black),
            _ => {}
        }

        let rank_distance =
            (m.to.rank().index() as i8 - m.from.rank().index() as i8).unsigned_abs();
        next.en_passant = if piece == Piece::Pawn && rank_distance == 2 {
            m.from.offset(0, color.pawn_direction())
        } else {
            None
        };

        if piece == Piece::Pawn || is_capture {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock += 1;
        }
        if color == Color::Black {
            next.fullmove_number += 1;
        }

        next
    }
}

impl Default for GameConditions {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn castling_rights_flags() {
        let mut rights = CastlingRights::ALL;
        assert!(rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::Black));

        rights.remove_kingside(Color::White);
        assert!(!rights.can_castle_kingside(Color::White));
        assert!(rights.can_castle_queenside(Color::White));

        rights.remove_color(Color::Black);
        assert!(!rights.can_castle_kingside(Color::Black));
        assert!(!rights.can_castle_queenside(Color::Black));
        assert_eq!(rights.raw(), CastlingRights::WHITE_QUEENSIDE);
    }

    #[test]
    fn initial_conditions() {
        let c = GameConditions::initial();
        assert_eq!(c.side_to_move, Color::White);
        assert_eq!(c.castling, CastlingRights::ALL);
        assert_eq!(c.en_passant, None);
        assert_eq!(c.halfmove_clock, 0);
        assert_eq!(c.fullmove_number, 1);
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let board = Board::standard();
        let next = GameConditions::initial()
            .after_move(&board, &Movement::normal(sq("e2"), sq("e4")));
        assert_eq!(next.en_passant, Some(sq("e3")));
        assert_eq!(next.side_to_move, Color::Black);
        assert_eq!(next.halfmove_clock, 0); // pawn move resets
        assert_eq!(next.fullmove_number, 1);
    }

    #[test]
    fn single_push_clears_en_passant_target() {
        let board = Board::standard();
        let mut conditions = GameConditions::initial();
        conditions.en_passant = Some(sq("d6"));

        let next = conditions.after_move(&board, &Movement::normal(sq("e2"), sq("e3")));
        assert_eq!(next.en_passant, None);
    }

    #[test]
    fn king_move_clears_both_rights() {
        let mut board = Board::standard();
        board.set(sq("e2"), None);
        let next = GameConditions::initial()
            .after_move(&board, &Movement::normal(sq("e1"), sq("e2")));
        assert!(!next.castling.can_castle_kingside(Color::White));
        assert!(!next.castling.can_castle_queenside(Color::White));
        assert!(next.castling.can_castle_kingside(Color::Black));
    }

    #[test]
    fn rook_move_clears_one_right() {
        let mut board = Board::standard();
        board.set(sq("a2"), None);
        let next = GameConditions::initial()
            .after_move(&board, &Movement::normal(sq("a1"), sq("a3")));
        assert!(!next.castling.can_castle_queenside(Color::White));
        assert!(next.castling.can_castle_kingside(Color::White));
    }

    #[test]
    fn rook_capture_clears_victims_right() {
        let mut board = Board::empty();
        board.set(sq("h8"), Some((Piece::Rook, Color::Black)));
        board.set(sq("h1"), Some((Piece::Rook, Color::White)));
        board.set(sq("e1"), Some((Piece::King, Color::White)));
        board.set(sq("e8"), Some((Piece::King, Color::Black)));

        let next = GameConditions::initial()
            .after_move(&board, &Movement::normal(sq("h1"), sq("h8")));
        assert!(!next.castling.can_castle_kingside(Color::Black));
        // Mover's own kingside right dies too: its rook left h1.
        assert!(!next.castling.can_castle_kingside(Color::White));
        assert_eq!(next.halfmove_clock, 0); // capture resets
    }

    #[test]
    fn quiet_move_advances_clocks() {
        let board = Board::standard();
        let after_white = GameConditions::initial()
            .after_move(&board, &Movement::normal(sq("g1"), sq("f3")));
        assert_eq!(after_white.halfmove_clock, 1);
        assert_eq!(after_white.fullmove_number, 1);

        let mut board_after = board.clone();
        board_after.apply_move(&Movement::normal(sq("g1"), sq("f3")));
        let after_black =
            after_white.after_move(&board_after, &Movement::normal(sq("g8"), sq("f6")));
        assert_eq!(after_black.halfmove_clock, 2);
        assert_eq!(after_black.fullmove_number, 2);
    }
}
