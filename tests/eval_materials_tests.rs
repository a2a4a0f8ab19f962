use std::str::FromStr;
use zugzwang::board::Board;
use zugzwang::search::eval::{evaluate, piece_value};

fn fen(f: &str) -> Board {
    Board::from_str(f).expect("valid FEN")
}

#[test]
fn piece_values_match_spec() {
    use zugzwang::board::Piece;
    assert_eq!(piece_value(Piece::Pawn), 100);
    assert_eq!(piece_value(Piece::Knight), 320);
    assert_eq!(piece_value(Piece::Bishop), 330);
    assert_eq!(piece_value(Piece::Rook), 500);
    assert_eq!(piece_value(Piece::Queen), 950);
    assert_eq!(piece_value(Piece::King), 0);
}

#[test]
fn up_a_pawn_is_positive_and_mirroring_is_exact_negative() {
    // White has an extra pawn (b-pawn missing on Black's side).
    let w_fen = "rnbqkbnr/1ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let sw = evaluate(&fen(w_fen));
    assert!(sw > 0, "White up a pawn should be positive, got {}", sw);

    // Mirror: Black has the extra pawn instead (White's b-pawn missing).
    let b_fen = "rnbqkbnr/pppppppp/8/8/8/8/1PPPPPPP/RNBQKBNR w KQkq - 0 1";
    let sb = evaluate(&fen(b_fen));
    assert!(sb < 0, "Black up a pawn should be negative for White, got {}", sb);
}

#[test]
fn startpos_is_balanced() {
    assert_eq!(evaluate(&Board::new()), 0);
}

#[test]
fn white_up_a_rook_is_strongly_positive() {
    let b = fen("k7/8/8/8/8/8/8/KR6 w - - 0 1");
    let score = evaluate(&b);
    assert!(score > 450, "rook advantage should dominate PST noise, got {}", score);
}

#[test]
fn black_up_a_rook_is_strongly_negative() {
    let b = fen("k6r/8/8/8/8/8/8/K7 w - - 0 1");
    let score = evaluate(&b);
    assert!(score < -450, "rook disadvantage should dominate PST noise, got {}", score);
}

#[test]
fn promotion_delta_is_roughly_a_queen_minus_a_pawn() {
    let pawn = fen("7k/P7/8/8/8/8/8/7K w - - 0 1");
    let queen = fen("7k/Q7/8/8/8/8/8/7K w - - 0 1");
    let delta = evaluate(&queen) - evaluate(&pawn);
    // Queen (950) - Pawn (100) = 850, plus/minus PST differences between a7/a8.
    assert!(
        (700..=1000).contains(&delta),
        "promotion delta should be roughly a queen's worth, got {}",
        delta
    );
}

#[test]
fn en_passant_capture_reduces_material_by_one_pawn() {
    let before_ep = fen("7k/8/3p4/4P3/8/8/8/7K w - - 0 1");
    let after_ep = fen("7k/8/3p4/8/8/8/8/7K w - - 0 1");
    let diff = evaluate(&before_ep) - evaluate(&after_ep);
    assert!(
        (80..=120).contains(&diff),
        "removing one white pawn should cost roughly one pawn's value, got {}",
        diff
    );
}

#[test]
fn score_is_from_side_to_move_perspective() {
    let white_to_move = fen("rnbqkbnr/pppp1ppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
    let black_to_move = fen("rnbqkbnr/pppp1ppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1");
    assert_eq!(evaluate(&white_to_move), -evaluate(&black_to_move));
}
