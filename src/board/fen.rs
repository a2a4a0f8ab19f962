use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{Board, CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ, Color};
use crate::error::ParseError;
use crate::square::Square;

impl Board {
    /// Parses a FEN string into `self`, replacing all prior state. Rejects malformed
    /// input field-by-field rather than panicking.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), ParseError> {
        let mut fields = fen.split_whitespace();

        let placement = fields
            .next()
            .ok_or_else(|| ParseError::new("placement", "missing piece-placement field"))?;

        let mut board = Board::new_empty();
        board.side_to_move = Color::White;
        board.castling_rights = 0;
        board.en_passant = None;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(ParseError::new(
                "placement",
                format!("expected 8 ranks, found {}", ranks.len()),
            ));
        }

        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if file >= 8 {
                    return Err(ParseError::new("placement", "rank has more than 8 files"));
                }
                if let Some(skip) = c.to_digit(10) {
                    file += skip as usize;
                    continue;
                }
                let (piece, color) = CHAR_TO_PC[c as usize]
                    .ok_or_else(|| ParseError::new("placement", format!("unknown piece glyph `{c}`")))?;
                let sq = Square::from_file_rank(file as u8, rank as u8);
                let bb = board.bb(color, piece) | (1u64 << sq.index());
                board.set_bb(color, piece, bb);
                file += 1;
            }
            if file != 8 {
                return Err(ParseError::new("placement", "rank does not span 8 files"));
            }
        }

        let side = fields
            .next()
            .ok_or_else(|| ParseError::new("side-to-move", "missing field"))?;
        board.side_to_move = match side {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(ParseError::new(
                    "side-to-move",
                    format!("expected `w` or `b`, found `{other}`"),
                ));
            }
        };

        let castling = fields
            .next()
            .ok_or_else(|| ParseError::new("castling", "missing field"))?;
        if castling != "-" {
            for c in castling.chars() {
                board.castling_rights |= match c {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    other => {
                        return Err(ParseError::new(
                            "castling",
                            format!("unknown castling glyph `{other}`"),
                        ));
                    }
                };
            }
        }

        let ep = fields
            .next()
            .ok_or_else(|| ParseError::new("en-passant", "missing field"))?;
        if ep != "-" {
            board.en_passant = Some(parse_square(ep)?);
        }

        // Halfmove clock and fullmove number are optional trailing fields; default
        // to 0/1 when absent (matches the "- 0 1" stub callers may omit).
        board.halfmove_clock = fields
            .next()
            .map(|s| s.parse::<u32>())
            .transpose()
            .map_err(|_| ParseError::new("halfmove-clock", "not an integer"))?
            .unwrap_or(0);
        board.fullmove_number = fields
            .next()
            .map(|s| s.parse::<u32>())
            .transpose()
            .map_err(|_| ParseError::new("fullmove-number", "not an integer"))?
            .unwrap_or(1);

        board.history.clear();
        board.refresh_zobrist();

        *self = board;
        Ok(())
    }

    /// Serializes the current position to standard Forsyth-Edwards notation.
    pub fn to_fen(&self) -> String {
        let mut s = String::with_capacity(64);

        for rank_from_top in 0..8 {
            let rank = 7 - rank_from_top;
            let mut empty_run = 0u32;
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                match self.piece_at(sq) {
                    None => empty_run += 1,
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            s.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        let idx = (color as usize) * 6 + (piece as usize);
                        s.push(PC_TO_CHAR[idx]);
                    }
                }
            }
            if empty_run > 0 {
                s.push_str(&empty_run.to_string());
            }
            if rank_from_top != 7 {
                s.push('/');
            }
        }

        s.push(' ');
        s.push(if self.side_to_move == Color::White { 'w' } else { 'b' });

        s.push(' ');
        if self.castling_rights == 0 {
            s.push('-');
        } else {
            if self.has_castling(CASTLE_WK) {
                s.push('K');
            }
            if self.has_castling(CASTLE_WQ) {
                s.push('Q');
            }
            if self.has_castling(CASTLE_BK) {
                s.push('k');
            }
            if self.has_castling(CASTLE_BQ) {
                s.push('q');
            }
        }

        s.push(' ');
        match self.en_passant {
            Some(sq) => s.push_str(&sq.to_string()),
            None => s.push('-'),
        }

        s.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        s
    }
}

fn parse_square(text: &str) -> Result<Square, ParseError> {
    let bytes = text.as_bytes();
    if bytes.len() != 2 {
        return Err(ParseError::new("square", format!("`{text}` is not two characters")));
    }
    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(ParseError::new("square", format!("`{text}` out of range")));
    }
    Ok(Square::from_file_rank(file - b'a', rank - b'1'))
}
