//! Chess piece representation.

/// The six types of chess pieces.
///
/// A piece on the board is the pair `(Piece, Color)`; two pieces are the
/// same piece when both kind and owner match. Move generation dispatches
/// on this tag, one arm per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// All piece types in order.
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    /// Returns the index of this piece type (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true if this piece is a sliding piece (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, Piece::Bishop | Piece::Rook | Piece::Queen)
    }

    /// Returns true if a pawn may promote to this piece.
    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            Piece::Knight | Piece::Bishop | Piece::Rook | Piece::Queen
        )
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Piece::Pawn => "Pawn",
            Piece::Knight => "Knight",
            Piece::Bishop => "Bishop",
            Piece::Rook => "Rook",
            Piece::Queen => "Queen",
            Piece::King => "King",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_slider() {
        assert!(!Piece::Pawn.is_slider());
        assert!(!Piece::Knight.is_slider());
        assert!(Piece::Bishop.is_slider());
        assert!(Piece::Rook.is_slider());
        assert!(Piece::Queen.is_slider());
        assert!(!Piece::King.is_slider());
    }

    #[test]
    fn is_promotion_choice() {
        assert!(!Piece::Pawn.is_promotion_choice());
        assert!(!Piece::King.is_promotion_choice());
        assert!(Piece::Knight.is_promotion_choice());
        assert!(Piece::Bishop.is_promotion_choice());
        assert!(Piece::Rook.is_promotion_choice());
        assert!(Piece::Queen.is_promotion_choice());
    }

    #[test]
    fn display() {
        assert_eq!(format!("{}", Piece::Knight), "Knight");
        assert_eq!(format!("{}", Piece::Queen), "Queen");
    }
}
