//! Chess rules engine with full game history.
//!
//! This crate provides:
//! - [`Board`] - 8x8 mailbox representation with special-move application
//! - [`GameConditions`] - turn, castling rights, en passant, move clocks
//! - [`Game`] - move execution against four co-indexed history timelines
//! - [`Timeline`] - append-and-rewind history container
//! - Move generation ([`movegen`]) and legality/game-end predicates ([`rules`])
//!
//! # Architecture
//!
//! Each piece kind enumerates its own pseudo-legal destinations from a
//! square; every candidate is then funneled through a single
//! simulate-and-check filter ([`rules::move_obeys_rules`]) that turns
//! pseudo-legal into legal. [`Game`] caches the resulting move map per
//! position and replays it for validation, so a submitted move is never
//! re-derived.
//!
//! # Example
//!
//! ```
//! use chess_model::Square;
//! use chess_rules::Game;
//!
//! let mut game = Game::new();
//! let e2 = Square::from_algebraic("e2").unwrap();
//! let e4 = Square::from_algebraic("e4").unwrap();
//! let push = *game.legal_move(e2, e4).unwrap();
//! game.try_execute_move(push).unwrap();
//! assert_eq!(game.ply_count(), 1);
//! ```

mod board;
mod conditions;
mod game;
pub mod movegen;
pub mod rules;
mod timeline;

pub use board::Board;
pub use conditions::{CastlingRights, GameConditions};
pub use game::{Game, GameError, HalfMove};
pub use movegen::{legal_move_map, legal_moves_from, pseudo_legal_moves, LegalMoveMap};
pub use rules::{DrawReason, Outcome};
pub use timeline::Timeline;
