use wasm_bindgen::prelude::*;

use crate::api::GameSession;
use crate::board::Piece;
use crate::square::Square;

fn parse_square(text: &str) -> Option<Square> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some(Square::from_file_rank(file - b'a', rank - b'1'))
}

fn parse_promotion(c: char) -> Option<Piece> {
    match c {
        'q' => Some(Piece::Queen),
        'r' => Some(Piece::Rook),
        'b' => Some(Piece::Bishop),
        'n' => Some(Piece::Knight),
        _ => None,
    }
}

/// WASM-facing wrapper mirroring the native `api::GameSession` surface as
/// string-friendly methods `wasm_bindgen` can export to JS.
#[wasm_bindgen]
pub struct Engine {
    session: GameSession,
}

#[wasm_bindgen]
impl Engine {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Engine {
        console_error_panic_hook::set_once();
        Engine {
            session: GameSession::new(),
        }
    }

    /// Legal destination squares (UCI, e.g. "e4") for the piece on `square`.
    pub fn legal_moves_from(&mut self, square: &str) -> String {
        let Some(sq) = parse_square(square) else {
            return "[]".to_string();
        };
        let moves = self.session.legal_moves_from(sq);
        let items: Vec<String> = moves.iter().map(|m| format!("\"{}\"", m.to_uci())).collect();
        format!("[{}]", items.join(","))
    }

    /// Applies a user move. `promotion` is a single glyph ("q","r","b","n")
    /// or empty. Returns the `MoveOutcome` variant name, or one of
    /// "illegal_move" / "promotion_required" on rejection.
    pub fn apply_user_move(&mut self, from: &str, to: &str, promotion: &str) -> String {
        let (Some(from), Some(to)) = (parse_square(from), parse_square(to)) else {
            return "illegal_move".to_string();
        };
        let promo = promotion.chars().next().and_then(parse_promotion);
        match self.session.apply_user_move(from, to, promo) {
            Ok(outcome) => format!("{:?}", outcome),
            Err(err) => match err {
                crate::error::CoreError::IllegalMove => "illegal_move".to_string(),
                crate::error::CoreError::PromotionRequired => "promotion_required".to_string(),
                crate::error::CoreError::InvariantViolation(msg) => {
                    format!("invariant_violation:{msg}")
                }
            },
        }
    }

    /// Asks the engine to choose and apply a move at the given depth.
    /// Returns its UCI notation, or an empty string if there are no legal moves.
    pub fn engine_move(&mut self, depth: u32) -> String {
        self.session
            .engine_move(depth)
            .map(|m| m.to_uci())
            .unwrap_or_default()
    }

    /// Undoes the last applied move. Returns true on success.
    pub fn undo_last(&mut self) -> bool {
        self.session.undo_last().is_ok()
    }

    pub fn export_fen(&self) -> String {
        self.session.export_fen()
    }

    /// Imports a FEN string. Returns true on success.
    pub fn import_fen(&mut self, fen: &str) -> bool {
        self.session.import_fen(fen).is_ok()
    }

    /// Returns "white_pawn", "black_knight", etc, or "" if empty.
    pub fn piece_at(&self, square: &str) -> String {
        let Some(sq) = parse_square(square) else {
            return String::new();
        };
        match self.session.piece_at(sq) {
            Some((color, piece)) => format!("{:?}_{:?}", color, piece).to_lowercase(),
            None => String::new(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
