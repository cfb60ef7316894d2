//! Move representation.

use crate::{Piece, Square};
use std::fmt;

/// How a move alters the board beyond relocating the moving piece.
///
/// The non-normal variants carry the extra square their side effect needs,
/// so that data cannot exist on a move that does not use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// Plain relocation, possibly capturing the occupant of the target.
    Normal,
    /// Castling; carries the square of the rook that moves with the king.
    Castling { rook_from: Square },
    /// En passant; carries the square of the captured pawn, which is not
    /// the destination square.
    EnPassant { captured: Square },
    /// Pawn promotion. Generated with `choice: None`; the elected piece
    /// must be set before the move can be executed.
    Promotion { choice: Option<Piece> },
}

/// A single half-move (ply).
///
/// Movements are plain values; the legal-move cache keys them by
/// `(from, to)` and two movements are equal when every component matches.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Movement {
    pub from: Square,
    pub to: Square,
    pub kind: MoveKind,
}

impl Movement {
    /// Creates a normal movement.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Movement {
            from,
            to,
            kind: MoveKind::Normal,
        }
    }

    /// Creates a castling movement for a king, naming the rook that
    /// castles with it.
    #[inline]
    pub const fn castling(from: Square, to: Square, rook_from: Square) -> Self {
        Movement {
            from,
            to,
            kind: MoveKind::Castling { rook_from },
        }
    }

    /// Creates an en passant capture, naming the square of the pawn that
    /// is removed.
    #[inline]
    pub const fn en_passant(from: Square, to: Square, captured: Square) -> Self {
        Movement {
            from,
            to,
            kind: MoveKind::EnPassant { captured },
        }
    }

    /// Creates a promotion movement with no piece elected yet.
    #[inline]
    pub const fn promotion(from: Square, to: Square) -> Self {
        Movement {
            from,
            to,
            kind: MoveKind::Promotion { choice: None },
        }
    }

    /// Returns this movement with the given promotion election.
    ///
    /// Has no effect on non-promotion movements.
    #[inline]
    pub const fn with_promotion_choice(self, piece: Piece) -> Self {
        match self.kind {
            MoveKind::Promotion { .. } => Movement {
                from: self.from,
                to: self.to,
                kind: MoveKind::Promotion {
                    choice: Some(piece),
                },
            },
            _ => self,
        }
    }

    /// Returns the cache key for this movement.
    #[inline]
    pub const fn key(self) -> (Square, Square) {
        (self.from, self.to)
    }

    /// Returns true if this is a promotion movement.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        matches!(self.kind, MoveKind::Promotion { .. })
    }

    /// Returns the elected promotion piece, if one has been set.
    #[inline]
    pub const fn promotion_choice(self) -> Option<Piece> {
        match self.kind {
            MoveKind::Promotion { choice } => choice,
            _ => None,
        }
    }
}

impl fmt::Debug for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Movement({}{}", self.from, self.to)?;
        match self.kind {
            MoveKind::Normal => {}
            MoveKind::Castling { rook_from } => write!(f, " castling rook {}", rook_from)?,
            MoveKind::EnPassant { captured } => write!(f, " ep x{}", captured)?,
            MoveKind::Promotion { choice: None } => write!(f, " promotion")?,
            MoveKind::Promotion { choice: Some(p) } => write!(f, " promotion={}", p)?,
        }
        write!(f, ")")
    }
}

impl fmt::Display for Movement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
