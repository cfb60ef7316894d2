//! Full game management with history tracking.
//!
//! [`Game`] owns four co-indexed timelines: boards, conditions, half-move
//! records, and per-position legal-move caches. For ply `i`, board index
//! `i + 1` is the position reached by half-move `i`; index 0 holds the
//! pre-game state. Every accepted move appends one entry to each timeline,
//! rewinding moves all four heads together, and a rejected move leaves all
//! of them untouched.

use crate::movegen::{legal_move_map, LegalMoveMap};
use crate::rules::{self, DrawReason, Outcome};
use crate::{Board, GameConditions, Timeline};
use chess_model::{Color, MoveKind, Movement, Piece, Square};
use thiserror::Error;

/// A recorded half-move (ply) with its terminal-state flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfMove {
    /// The kind of piece that moved.
    pub piece: Piece,
    /// The side that moved.
    pub side: Color,
    /// The movement as executed, elections included.
    pub movement: Movement,
    /// Whether the move captured a piece (en passant included).
    pub is_capture: bool,
    /// Whether the move put the opponent in check.
    pub is_check: bool,
    /// The opponent has no legal moves and is in check.
    pub caused_checkmate: bool,
    /// The opponent has no legal moves and is not in check.
    pub caused_stalemate: bool,
    /// The resulting occupancy has now occurred three times.
    pub caused_threefold_repetition: bool,
    /// The half-move clock reached fifty.
    pub caused_fifty_move_draw: bool,
}

/// Error type for game operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The move is not in the current legal-move cache.
    #[error("illegal move: {0}")]
    IllegalMove(Movement),
    /// A promotion was submitted without a valid elected piece.
    #[error("promotion requires an elected piece: {0}")]
    MissingPromotionChoice(Movement),
    /// There is no earlier state to rewind to.
    #[error("no earlier state to rewind to")]
    NothingToRewind,
}

/// A complete chess game with history tracking.
#[derive(Debug, Clone)]
pub struct Game {
    boards: Timeline<Board>,
    conditions: Timeline<GameConditions>,
    half_moves: Timeline<HalfMove>,
    legal_moves: Timeline<LegalMoveMap>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Creates a new game from the standard opening position.
    pub fn new() -> Self {
        Self::from_setup(Board::standard(), GameConditions::initial())
    }

    /// Creates a game from an explicit starting board and conditions,
    /// for puzzles and other non-standard setups.
    pub fn from_setup(board: Board, conditions: GameConditions) -> Self {
        let legal = legal_move_map(&board, &conditions);
        let mut game = Game {
            boards: Timeline::new(),
            conditions: Timeline::new(),
            half_moves: Timeline::new(),
            legal_moves: Timeline::new(),
        };
        game.boards.push(board);
        game.conditions.push(conditions);
        game.legal_moves.push(legal);
        game
    }

    /// Returns the current board.
    pub fn board(&self) -> &Board {
        self.boards.current().expect("board timeline is seeded")
    }

    /// Returns the current conditions.
    pub fn conditions(&self) -> &GameConditions {
        self.conditions
            .current()
            .expect("conditions timeline is seeded")
    }

    /// Returns the board at the given timeline index: 0 is the starting
    /// position, `i + 1` the position reached by half-move `i`.
    pub fn board_at(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    /// Returns the conditions at the given timeline index.
    pub fn conditions_at(&self, index: usize) -> Option<&GameConditions> {
        self.conditions.get(index)
    }

    /// Returns the record of half-move `index`.
    pub fn half_move(&self, index: usize) -> Option<&HalfMove> {
        self.half_moves.get(index)
    }

    /// Returns the number of half-moves up to the current head.
    pub fn ply_count(&self) -> usize {
        self.half_moves.len()
    }

    /// Returns true if the side to move is in check.
    pub fn is_in_check(&self) -> bool {
        rules::is_in_check(self.board(), self.conditions().side_to_move)
    }

    /// Returns the current legal-move cache.
    pub fn legal_moves(&self) -> &LegalMoveMap {
        self.legal_moves
            .current()
            .expect("legal-move timeline is seeded")
    }

    /// Looks up the cached legal move for a (start, end) pair. Pure cache
    /// read; nothing is recomputed.
    pub fn legal_move(&self, from: Square, to: Square) -> Option<&Movement> {
        self.legal_moves().get(&(from, to))
    }

    /// Returns the cached legal moves of the piece on `from`.
    pub fn legal_moves_from(&self, from: Square) -> Vec<&Movement> {
        self.legal_moves()
            .values()
            .filter(|m| m.from == from)
            .collect()
    }

    /// Returns the number of legal moves in the current position.
    pub fn legal_move_count(&self) -> usize {
        self.legal_moves().len()
    }

    /// Returns the game result, if the current half-move record ended the
    /// game. The engine never blocks further moves itself; after a flagged
    /// repetition or fifty-move draw play may continue and only the record
    /// carries the flags.
    pub fn outcome(&self) -> Option<Outcome> {
        let record = self.half_moves.current()?;
        if record.caused_checkmate {
            return Some(match record.side {
                Color::White => Outcome::WhiteWins,
                Color::Black => Outcome::BlackWins,
            });
        }
        if record.caused_stalemate {
            return Some(Outcome::Draw(DrawReason::Stalemate));
        }
        if record.caused_threefold_repetition {
            return Some(Outcome::Draw(DrawReason::ThreefoldRepetition));
        }
        if record.caused_fifty_move_draw {
            return Some(Outcome::Draw(DrawReason::FiftyMoveRule));
        }
        None
    }

    /// Validates and executes a move.
    ///
    /// The current legal-move cache is the single source of truth: a
    /// submitted (start, end) pair not present there is rejected, and the
    /// cached movement is what gets executed. Promotions take their
    /// election from the submitted move and are rejected if it is missing
    /// or not a promotable piece. On success one entry is appended to
    /// every timeline; on failure nothing changes.
    pub fn try_execute_move(&mut self, submitted: Movement) -> Result<(), GameError> {
        let cached = *self
            .legal_moves()
            .get(&submitted.key())
            .ok_or(GameError::IllegalMove(submitted))?;

        let movement = if cached.is_promotion() {
            match submitted.promotion_choice() {
                Some(piece) if piece.is_promotion_choice() => {
                    cached.with_promotion_choice(piece)
                }
                _ => return Err(GameError::MissingPromotionChoice(submitted)),
            }
        } else {
            cached
        };

        let board_before = self.board();
        let conditions_before = *self.conditions();
        let side = conditions_before.side_to_move;
        let (piece, _) = board_before
            .piece_at(movement.from)
            .expect("cached legal move starts on an occupied square");
        let is_capture = board_before.is_occupied(movement.to)
            || matches!(movement.kind, MoveKind::EnPassant { .. });

        let mut next_board = board_before.clone();
        next_board.apply_move(&movement);
        let next_conditions = conditions_before.after_move(board_before, &movement);

        let opponent = next_conditions.side_to_move;
        let is_check = rules::is_in_check(&next_board, opponent);
        let next_legal = legal_move_map(&next_board, &next_conditions);
        let legal_count = next_legal.len();

        let record = HalfMove {
            piece,
            side,
            movement,
            is_capture,
            is_check,
            caused_checkmate: rules::is_checkmated(&next_board, opponent, legal_count),
            caused_stalemate: rules::is_stalemated(&next_board, opponent, legal_count),
            caused_threefold_repetition: rules::is_threefold_repetition(
                self.boards.past(),
                &next_board,
            ),
            caused_fifty_move_draw: rules::is_fifty_move_draw(&next_conditions),
        };

        self.boards.push(next_board);
        self.conditions.push(next_conditions);
        self.legal_moves.push(next_legal);
        self.half_moves.push(record);
        Ok(())
    }

    /// Rewinds all four timelines to the state immediately after
    /// half-move `index`. The truncated future is discarded only when a
    /// new move is executed while rewound.
    pub fn rewind_to_half_move(&mut self, index: usize) -> Result<(), GameError> {
        if !self.half_moves.rewind_to(index) {
            return Err(GameError::NothingToRewind);
        }
        self.boards.rewind_to(index + 1);
        self.conditions.rewind_to(index + 1);
        self.legal_moves.rewind_to(index + 1);
        Ok(())
    }

    /// Rewinds all four timelines to before any half-move.
    pub fn rewind_to_start(&mut self) -> Result<(), GameError> {
        if !self.half_moves.rewind_to_start() {
            return Err(GameError::NothingToRewind);
        }
        self.boards.rewind_to(0);
        self.conditions.rewind_to(0);
        self.legal_moves.rewind_to(0);
        Ok(())
    }
}
