use crate::board::{Board, Color, Piece};
use crate::status::is_insufficient_material;

/// Score magnitude for a forced mate, comfortably above any realizable
/// material+PST sum (max is well under 10_000). Search decrements this by
/// ply-from-root so shorter mates score higher than longer ones.
pub const CHECKMATE_MAX: i32 = 1_000_000;

pub fn piece_value(piece: Piece) -> i32 {
    match piece {
        Piece::Pawn => 100,
        Piece::Knight => 320,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 950,
        Piece::King => 0,
    }
}

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10,-20,-20, 10, 10,  5,
     5, -5,-10,  0,  0,-10, -5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5,  5, 10, 25, 25, 10,  5,  5,
    10, 10, 20, 30, 30, 20, 10, 10,
    50, 50, 50, 50, 50, 50, 50, 50,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -10,  5,  5,  5,  5,  5,  0,-10,
      0,  0,  5,  5,  5,  5,  0, -5,
     -5,  0,  5,  5,  5,  5,  0, -5,
    -10,  0,  5,  5,  5,  5,  0,-10,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

fn pst(piece: Piece) -> Option<&'static [i32; 64]> {
    match piece {
        Piece::Pawn => Some(&PAWN_PST),
        Piece::Knight => Some(&KNIGHT_PST),
        Piece::Bishop => Some(&BISHOP_PST),
        Piece::Rook => Some(&ROOK_PST),
        Piece::Queen => Some(&QUEEN_PST),
        Piece::King => None,
    }
}

fn side_material_and_pst(board: &Board, color: Color) -> i32 {
    let mut total = 0;
    for piece in [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
    ] {
        let table = pst(piece);
        let mut bb = board.bb(color, piece);
        while bb != 0 {
            let sq = bb.trailing_zeros() as usize;
            bb &= bb - 1;
            total += piece_value(piece);
            if let Some(table) = table {
                let idx = match color {
                    Color::White => sq,
                    Color::Black => 63 - sq,
                };
                total += table[idx];
            }
        }
    }
    total
}

/// Static material + piece-square evaluation from White's perspective
/// (positive favors White), negated for Black to move so callers always
/// see the score from the side-to-move's point of view.
pub fn evaluate(board: &Board) -> i32 {
    if is_insufficient_material(board) {
        return 0;
    }

    let white = side_material_and_pst(board, Color::White);
    let black = side_material_and_pst(board, Color::Black);
    let score = white - black;

    match board.side_to_move {
        Color::White => score,
        Color::Black => -score,
    }
}
