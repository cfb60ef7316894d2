//! Mailbox board representation.

use chess_model::{Color, File, MoveKind, Movement, Piece, Rank, Square};
use std::fmt;

/// An 8x8 board: one optional `(Piece, Color)` per square, plus a cached
/// king square per color.
///
/// Boards published into game history are never mutated in place; callers
/// clone before applying a move. Cloning is a deep copy because every cell
/// is a plain value.
#[derive(Clone)]
pub struct Board {
    squares: [Option<(Piece, Color)>; 64],
    kings: [Option<Square>; 2],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Board {
            squares: [None; 64],
            kings: [None; 2],
        }
    }

    /// Creates the standard opening position.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, &piece) in File::ALL.iter().zip(back_rank.iter()) {
            board.set(Square::new(*file, Rank::R1), Some((piece, Color::White)));
            board.set(Square::new(*file, Rank::R2), Some((Piece::Pawn, Color::White)));
            board.set(Square::new(*file, Rank::R7), Some((Piece::Pawn, Color::Black)));
            board.set(Square::new(*file, Rank::R8), Some((piece, Color::Black)));
        }
        board
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<(Piece, Color)> {
        self.squares[sq.index() as usize]
    }

    /// Places or removes a piece, keeping the king cache current.
    pub fn set(&mut self, sq: Square, piece: Option<(Piece, Color)>) {
        for cached in &mut self.kings {
            if *cached == Some(sq) {
                *cached = None;
            }
        }
        if let Some((Piece::King, color)) = piece {
            self.kings[color.index()] = Some(sq);
        }
        self.squares[sq.index() as usize] = piece;
    }

    /// Returns true if the square holds any piece.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    /// Returns true if the square holds a piece of the given color.
    #[inline]
    pub fn is_occupied_by(&self, sq: Square, color: Color) -> bool {
        matches!(self.piece_at(sq), Some((_, owner)) if owner == color)
    }

    /// Returns the square of the given color's king, if it is on the board.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// Iterates over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece, Color)> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq).map(|(p, c)| (sq, p, c)))
    }

    /// Applies a movement to this board, including its special-move side
    /// effect. Legality is the caller's responsibility: the piece at `from`
    /// is relocated unconditionally, overwriting any occupant of `to`.
    ///
    /// # Panics
    ///
    /// Panics on moves a correct generation pipeline never produces: an
    /// empty origin square, a castling movement whose rook square holds no
    /// friendly rook or whose rook stands on a file other than A/H, and a
    /// promotion with no elected piece.
    pub fn apply_move(&mut self, m: &Movement) {
        let (piece, color) = self.piece_at(m.from).expect("no piece at origin square");
        self.set(m.from, None);
        self.set(m.to, Some((piece, color)));

        match m.kind {
            MoveKind::Normal => {}
            MoveKind::Castling { rook_from } => {
                let (rook, rook_color) = self
                    .piece_at(rook_from)
                    .expect("castling with empty rook square");
                assert!(
                    rook == Piece::Rook && rook_color == color,
                    "castling with no friendly rook on {}",
                    rook_from
                );
                let rook_to = Square::new(castled_rook_file(rook_from.file()), rook_from.rank());
                self.set(rook_from, None);
                self.set(rook_to, Some((Piece::Rook, color)));
            }
            MoveKind::EnPassant { captured } => {
                self.set(captured, None);
            }
            MoveKind::Promotion { choice } => {
                let elected = choice.expect("promotion executed with no elected piece");
                self.set(m.to, Some((elected, color)));
            }
        }
    }
}

/// Post-castle file of a rook starting on the given file: the A-rook lands
/// three files toward the king, the H-rook two.
fn castled_rook_file(file: File) -> File {
    match file {
        File::A => File::D,
        File::H => File::F,
        other => panic!("castling rook on invalid file {}", other),
    }
}

/// Structural equality: same piece placement and ownership, nothing else.
/// Repetition detection compares boards with this.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.squares == other.squares
    }
}

impl Eq for Board {}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        for rank in Rank::ALL.iter().rev() {
            write!(f, "  {} ", rank)?;
            for file in File::ALL {
                let cell = match self.piece_at(Square::new(file, *rank)) {
                    None => '.',
                    Some((piece, color)) => piece_char(piece, color),
                };
                write!(f, "{} ", cell)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "    a b c d e f g h")?;
        write!(f, "}}")
    }
}

fn piece_char(piece: Piece, color: Color) -> char {
    let c = match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    };
    match color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        Square::from_algebraic(s).unwrap()
    }

    #[test]
    fn standard_placement() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.piece_at(sq("e1")), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(sq("d8")), Some((Piece::Queen, Color::Black)));
        assert_eq!(board.piece_at(sq("a2")), Some((Piece::Pawn, Color::White)));
        assert_eq!(board.piece_at(sq("e4")), None);
        assert_eq!(board.king_square(Color::White), Some(sq("e1")));
        assert_eq!(board.king_square(Color::Black), Some(sq("e8")));
    }

    #[test]
    fn set_tracks_kings() {
        let mut board = Board::empty();
        assert_eq!(board.king_square(Color::White), None);

        board.set(sq("d4"), Some((Piece::King, Color::White)));
        assert_eq!(board.king_square(Color::White), Some(sq("d4")));

        board.set(sq("d4"), None);
        assert_eq!(board.king_square(Color::White), None);
    }

    #[test]
    fn apply_normal_move() {
        let mut board = Board::standard();
        board.apply_move(&Movement::normal(sq("g1"), sq("f3")));
        assert_eq!(board.piece_at(sq("g1")), None);
        assert_eq!(board.piece_at(sq("f3")), Some((Piece::Knight, Color::White)));
    }

    #[test]
    fn apply_move_overwrites_capture() {
        let mut board = Board::empty();
        board.set(sq("d4"), Some((Piece::Rook, Color::White)));
        board.set(sq("d7"), Some((Piece::Knight, Color::Black)));

        board.apply_move(&Movement::normal(sq("d4"), sq("d7")));
        assert_eq!(board.piece_at(sq("d7")), Some((Piece::Rook, Color::White)));
        assert_eq!(board.piece_at(sq("d4")), None);
    }

    #[test]
    fn apply_kingside_castle() {
        let mut board = Board::empty();
        board.set(sq("e1"), Some((Piece::King, Color::White)));
        board.set(sq("h1"), Some((Piece::Rook, Color::White)));

        board.apply_move(&Movement::castling(sq("e1"), sq("g1"), sq("h1")));
        assert_eq!(board.piece_at(sq("g1")), Some((Piece::King, Color::White)));
        assert_eq!(board.piece_at(sq("f1")), Some((Piece::Rook, Color::White)));
        assert_eq!(board.piece_at(sq("e1")), None);
        assert_eq!(board.piece_at(sq("h1")), None);
        assert_eq!(board.king_square(Color::White), Some(sq("g1")));
    }

    #[test]
    fn apply_queenside_castle_black() {
        let mut board = Board::empty();
        board.set(sq("e8"), Some((Piece::King, Color::Black)));
        board.set(sq("a8"), Some((Piece::Rook, Color::Black)));

        board.apply_move(&Movement::castling(sq("e8"), sq("c8"), sq("a8")));
        assert_eq!(board.piece_at(sq("c8")), Some((Piece::King, Color::Black)));
        assert_eq!(board.piece_at(sq("d8")), Some((Piece::Rook, Color::Black)));
    }

    #[test]
    fn apply_en_passant() {
        let mut board = Board::empty();
        board.set(sq("b5"), Some((Piece::Pawn, Color::White)));
        board.set(sq("c5"), Some((Piece::Pawn, Color::Black)));

        board.apply_move(&Movement::en_passant(sq("b5"), sq("c6"), sq("c5")));
        assert_eq!(board.piece_at(sq("c6")), Some((Piece::Pawn, Color::White)));
        assert_eq!(board.piece_at(sq("c5")), None);
        assert_eq!(board.piece_at(sq("b5")), None);
    }

    #[test]
    fn apply_promotion() {
        let mut board = Board::empty();
        board.set(sq("a7"), Some((Piece::Pawn, Color::White)));

        let m = Movement::promotion(sq("a7"), sq("a8")).with_promotion_choice(Piece::Queen);
        board.apply_move(&m);
        assert_eq!(board.piece_at(sq("a8")), Some((Piece::Queen, Color::White)));
        assert_eq!(board.piece_at(sq("a7")), None);
    }

    #[test]
    #[should_panic(expected = "no elected piece")]
    fn promotion_without_election_panics() {
        let mut board = Board::empty();
        board.set(sq("a7"), Some((Piece::Pawn, Color::White)));
        board.apply_move(&Movement::promotion(sq("a7"), sq("a8")));
    }

    #[test]
    #[should_panic(expected = "empty rook square")]
    fn castling_without_rook_panics() {
        let mut board = Board::empty();
        board.set(sq("e1"), Some((Piece::King, Color::White)));
        board.apply_move(&Movement::castling(sq("e1"), sq("g1"), sq("h1")));
    }

    #[test]
    fn clone_is_deep() {
        let original = Board::standard();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.apply_move(&Movement::normal(sq("e2"), sq("e4")));
        assert_ne!(copy, original);
        assert_eq!(original.piece_at(sq("e2")), Some((Piece::Pawn, Color::White)));
    }

    #[test]
    fn structural_equality_ignores_history() {
        // Same occupancy reached by different move orders compares equal.
        let mut a = Board::standard();
        a.apply_move(&Movement::normal(sq("g1"), sq("f3")));
        a.apply_move(&Movement::normal(sq("f3"), sq("g1")));
        assert_eq!(a, Board::standard());
    }
}
