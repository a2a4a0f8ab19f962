//! Search wiring tests: stalemate/checkmate handling and sanity checks that
//! the negamax + quiescence search finds free material and avoids blunders.
use std::str::FromStr;
use zugzwang::board::Board;
use zugzwang::moves::types::Move;
use zugzwang::search::eval::evaluate;
use zugzwang::search::search::choose_move;

fn fen(f: &str) -> Board {
    Board::from_str(f).expect("valid FEN")
}

/// Runs `choose_move` and returns the score from the root side's perspective.
fn search_position(f: &str, depth: u32) -> (i32, Option<Move>) {
    let mut board = fen(f);
    match choose_move(&mut board, depth) {
        Some((mv, score)) => (score, Some(mv)),
        None => (evaluate(&board), None),
    }
}

#[test]
fn depth0_equals_static_eval_white_up_pawn() {
    let b = fen("k7/8/8/8/4P3/8/8/6K1 w - - 0 1");
    let (score, _) = search_position("k7/8/8/8/4P3/8/8/6K1 w - - 0 1", 0);
    assert_eq!(score, evaluate(&b));
    assert!(score >= 70);
}

#[test]
fn stalemate_returns_none_any_depth() {
    for d in 1..=3 {
        let mut b = fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(
            choose_move(&mut b, d).is_none(),
            "stalemate should have no move at depth {d}"
        );
    }
}

#[test]
fn depth1_prefers_free_capture_white() {
    let (score, best_move) = search_position("k7/8/8/3p4/4P3/8/8/6K1 w - - 0 1", 1);
    assert!(best_move.is_some());
    assert!(score >= 80);
}

#[test]
fn test_threefold_repetition_recognition() {
    // Symmetric K+N+2P vs K+N+2P: material is exactly equal.
    let position = "7k/6pp/4N3/8/8/4n3/6PP/7K w - - 0 1";
    let (score, _) = search_position(position, 4);
    assert!(
        score.abs() <= 50,
        "should evaluate symmetric position close to 0, got {}",
        score
    );
}

#[test]
fn test_avoids_losing_queen_to_knight() {
    let position = "rnbqkb1r/pppp1ppp/5n2/4p3/4P3/5Q2/PPPP1PPP/RNB1KBNR w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score < 500);
}

#[test]
fn test_equal_trade_evaluation() {
    let position = "rnbqkb1r/pppp1ppp/8/4p3/4n3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score.abs() < 150);
}

#[test]
fn test_refuses_bad_queen_sacrifice() {
    let position = "r1bqkbnr/ppp2ppp/2n5/3pp3/3PP3/2N2Q2/PPP2PPP/R1B1KBNR w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score < 400);
}

#[test]
fn test_queen_trade_evaluation() {
    let position = "r1bqkb1r/ppppnppp/2n5/4p3/4P3/2N2N2/PPPPQPPP/R1B1KB1R w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score.abs() < 250);
}

#[test]
fn test_hanging_piece_after_capture() {
    let position = "rnbqkb1r/pppp1ppp/8/8/4n3/2N5/PPPPPPPP/R1BQKBNR w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score > 250);
}

#[test]
fn test_desperado_captures() {
    let position = "rnbqkb1r/pppp1ppp/5n2/4N3/8/8/PPPPPPPP/RNBQKB1R w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score.abs() < 1000);
}

#[test]
fn test_quiet_position_no_captures() {
    let position = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score.abs() < 100);
}

#[test]
fn test_multiple_recaptures() {
    let position = "rnbqkb1r/pppp1ppp/5n2/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score.abs() < 150);
}

#[test]
fn test_quiescence_depth_limit() {
    use std::time::Instant;
    let position = "r1bqkb1r/pppp1ppp/2n2n2/4p3/4P3/3P1N2/PPP2PPP/RNBQKB1R w KQkq - 0 1";
    let start = Instant::now();
    let _ = search_position(position, 4);
    assert!(start.elapsed().as_secs() < 180);
}

#[test]
fn test_quiescence_with_checks() {
    let position = "rnb1kbnr/pppp1ppp/8/4p3/5PPq/8/PPPPP2P/RNBQKBNR w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score < 500);
}

#[test]
fn test_stand_pat_beta_cutoff() {
    let position = "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score.abs() < 200);
}

#[test]
fn test_tactical_win_material() {
    let position = "r1bqkb1r/pppp1ppp/2n2n2/4p3/3PP3/5N2/PPP2PPP/RNBQKB1R w KQkq - 0 1";
    let (score, _) = search_position(position, 3);
    assert!(score > -50);
}
