use std::io::{self, BufRead};

use indicatif::{ProgressBar, ProgressStyle};
use zugzwang::api::GameSession;
use zugzwang::square::Square;

/// Depth at which a perft run is slow enough to be worth a progress bar.
const PERFT_PROGRESS_DEPTH: u32 = 6;

fn main() {
    #[cfg(feature = "cli")]
    {
        if let Err(e) = zugzwang::logger::init_logging("zugzwang.log", "info") {
            eprintln!("warning: failed to start logger: {e}");
        }
    }

    let mut session = GameSession::new();

    println!("zugzwang {} - type `quit` to exit", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l.trim().to_string(),
            Err(_) => break,
        };
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            "quit" | "exit" => break,
            "position" => handle_position(&parts, &mut session),
            "go" => handle_go(&parts, &mut session),
            "d" | "display" => println!("{}", session.board()),
            "fen" => println!("{}", session.export_fen()),
            "perft" => handle_perft(&parts, &mut session, false),
            "divide" => handle_perft(&parts, &mut session, true),
            "undo" => match session.undo_last() {
                Ok(()) => println!("ok"),
                Err(e) => println!("error: {e}"),
            },
            other => println!("unknown command: {other}"),
        }
    }
}

fn handle_position(parts: &[&str], session: &mut GameSession) {
    if parts.len() > 1 && parts[1] == "startpos" {
        *session = GameSession::new();
    } else if parts.len() > 1 && parts[1] == "fen" {
        let fen_end = parts
            .iter()
            .position(|&p| p == "moves")
            .unwrap_or(parts.len());
        let fen = parts[2..fen_end].join(" ");
        if session.import_fen(&fen).is_err() {
            println!("error: invalid fen");
            return;
        }
    }

    if let Some(moves_idx) = parts.iter().position(|&p| p == "moves") {
        for uci in &parts[moves_idx + 1..] {
            if !apply_uci_move(session, uci) {
                println!("error: illegal move {uci}");
                return;
            }
        }
    }
}

fn apply_uci_move(session: &mut GameSession, uci: &str) -> bool {
    if uci.len() < 4 {
        return false;
    }
    let chars: Vec<char> = uci.chars().collect();
    let from = match parse_square(chars[0], chars[1]) {
        Some(sq) => sq,
        None => return false,
    };
    let to = match parse_square(chars[2], chars[3]) {
        Some(sq) => sq,
        None => return false,
    };
    let promotion = chars.get(4).and_then(|&c| match c {
        'q' => Some(zugzwang::board::Piece::Queen),
        'r' => Some(zugzwang::board::Piece::Rook),
        'b' => Some(zugzwang::board::Piece::Bishop),
        'n' => Some(zugzwang::board::Piece::Knight),
        _ => None,
    });
    session.apply_user_move(from, to, promotion).is_ok()
}

fn parse_square(file: char, rank: char) -> Option<Square> {
    if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
        return None;
    }
    Some(Square::from_file_rank(
        file as u8 - b'a',
        rank as u8 - b'1',
    ))
}

fn handle_go(parts: &[&str], session: &mut GameSession) {
    let mut depth = 4;
    if let Some(idx) = parts.iter().position(|&p| p == "depth") {
        if let Some(val) = parts.get(idx + 1) {
            depth = val.parse().unwrap_or(depth);
        }
    }

    match session.engine_move(depth) {
        Some(mv) => println!("bestmove {}", mv.to_uci()),
        None => println!("bestmove 0000"),
    }
}

fn handle_perft(parts: &[&str], session: &mut GameSession, _divide: bool) {
    let depth: u32 = match parts.get(1).and_then(|s| s.parse().ok()) {
        Some(d) => d,
        None => {
            println!("usage: perft <depth>");
            return;
        }
    };

    let bar = if depth >= PERFT_PROGRESS_DEPTH {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} perft depth {msg}...").unwrap(),
        );
        bar.set_message(depth.to_string());
        bar.enable_steady_tick(std::time::Duration::from_millis(120));
        Some(bar)
    } else {
        None
    };

    let total = session.perft(depth);

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }
    println!("nodes: {total}");
}
