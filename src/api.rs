//! The narrow surface a presentation layer (native CLI, WASM bindings) drives
//! instead of reaching into `board`/`moves`/`search` directly. `GameSession`
//! owns one `Board` plus the undo history needed to reverse any move it has
//! applied.

use crate::board::{Board, Color, Piece};
use crate::error::{CoreError, Empty, ParseError};
use crate::moves::execute::{generate_legal, make_move_basic, undo_move_basic};
use crate::moves::square_control::in_check;
use crate::moves::types::{Move, Undo};
use crate::search::search::choose_move;
use crate::square::Square;
use crate::status::{GameStatus, position_status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Normal,
    Capture,
    Castle,
    EnPassant,
    Promotion,
    Check,
    Checkmate,
    Stalemate,
    DrawInsufficient,
    DrawFiftyMove,
    DrawRepetition,
}

pub struct GameSession {
    board: Board,
    undo_stack: Vec<Undo>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        GameSession {
            board: Board::new(),
            undo_stack: Vec::new(),
        }
    }

    pub fn piece_at(&self, square: Square) -> Option<(Color, Piece)> {
        self.board.piece_at(square)
    }

    pub fn legal_moves_from(&mut self, square: Square) -> Vec<Move> {
        let mut legal = Vec::with_capacity(64);
        let mut scratch = Vec::with_capacity(256);
        generate_legal(&mut self.board, &mut legal, &mut scratch);
        legal.retain(|mv| mv.from == square);
        legal
    }

    pub fn apply_user_move(
        &mut self,
        from: Square,
        to: Square,
        promotion_choice: Option<Piece>,
    ) -> Result<MoveOutcome, CoreError> {
        let mut legal = Vec::with_capacity(64);
        let mut scratch = Vec::with_capacity(256);
        generate_legal(&mut self.board, &mut legal, &mut scratch);

        let candidates: Vec<Move> = legal
            .iter()
            .copied()
            .filter(|mv| mv.from == from && mv.to == to)
            .collect();

        if candidates.is_empty() {
            return Err(CoreError::IllegalMove);
        }

        let is_promotion = candidates.iter().any(|mv| mv.promotion.is_some());
        let chosen = if is_promotion {
            match promotion_choice {
                None => return Err(CoreError::PromotionRequired),
                Some(piece) => candidates
                    .into_iter()
                    .find(|mv| mv.promotion == Some(piece))
                    .ok_or(CoreError::IllegalMove)?,
            }
        } else {
            candidates[0]
        };

        let undo = make_move_basic(&mut self.board, chosen);
        self.undo_stack.push(undo);

        Ok(self.classify_outcome(chosen))
    }

    fn classify_outcome(&mut self, mv: Move) -> MoveOutcome {
        match position_status(&mut self.board) {
            GameStatus::Checkmate => return MoveOutcome::Checkmate,
            GameStatus::Stalemate => return MoveOutcome::Stalemate,
            GameStatus::DrawDeadPosition => return MoveOutcome::DrawInsufficient,
            GameStatus::DrawThreefold | GameStatus::DrawFivefold => {
                return MoveOutcome::DrawRepetition;
            }
            GameStatus::DrawFiftyMove | GameStatus::DrawSeventyFiveMove => {
                return MoveOutcome::DrawFiftyMove;
            }
            GameStatus::InPlay => {}
        }

        if in_check(&self.board, self.board.side_to_move) {
            return MoveOutcome::Check;
        }

        if mv.is_promotion() {
            MoveOutcome::Promotion
        } else if mv.is_castling() {
            MoveOutcome::Castle
        } else if mv.is_en_passant() {
            MoveOutcome::EnPassant
        } else if mv.is_capture() {
            MoveOutcome::Capture
        } else {
            MoveOutcome::Normal
        }
    }

    /// Asks the engine to pick and apply a move at the given search depth.
    /// Returns `None` if the position has no legal moves.
    pub fn engine_move(&mut self, depth: u32) -> Option<Move> {
        let (mv, _score) = choose_move(&mut self.board, depth)?;
        let undo = make_move_basic(&mut self.board, mv);
        self.undo_stack.push(undo);
        Some(mv)
    }

    pub fn undo_last(&mut self) -> Result<(), Empty> {
        let undo = self.undo_stack.pop().ok_or(Empty)?;
        undo_move_basic(&mut self.board, undo);
        Ok(())
    }

    pub fn export_fen(&self) -> String {
        self.board.to_fen()
    }

    pub fn import_fen(&mut self, fen: &str) -> Result<(), ParseError> {
        self.board.set_fen(fen)?;
        self.undo_stack.clear();
        Ok(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Runs perft at `depth`, printing `<uci-move>: <count>` per root move
    /// plus a trailing total, and returns that total.
    pub fn perft(&mut self, depth: u32) -> u64 {
        crate::moves::perft::perft_divide(&mut self.board, depth)
    }
}
