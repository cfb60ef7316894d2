//! Value types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Piece`] and [`Color`] for piece representation
//! - [`Square`], [`File`], and [`Rank`] for board coordinates
//! - [`Movement`] and [`MoveKind`] for move representation

mod color;
mod movement;
mod piece;
mod square;

pub use color::Color;
pub use movement::{MoveKind, Movement};
pub use piece::Piece;
pub use square::{File, Rank, Square};
