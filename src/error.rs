//! Typed error surface for the public API (§7). Internal make/undo invariant
//! checks still use `debug_assert!`/`debug_assert_eq!` (see `moves::execute`)
//! so they cost nothing in release builds; `CoreError::InvariantViolation` is
//! the non-panicking release-build surface of that same class of check for
//! `apply_user_move`, the one operation a host calls directly.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The (from, to) pair is not in the legal move list for the side to move.
    IllegalMove,
    /// Legal move, but it is a promotion and no piece was selected.
    PromotionRequired,
    /// make/undo detected state divergence. Fatal: the caller should treat the
    /// board as corrupted.
    InvariantViolation(&'static str),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::IllegalMove => write!(f, "illegal move"),
            CoreError::PromotionRequired => write!(f, "promotion piece required"),
            CoreError::InvariantViolation(msg) => write!(f, "invariant violation: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub field: &'static str,
    pub message: String,
}

impl ParseError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        ParseError {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FEN parse error in field `{}`: {}", self.field, self.message)
    }
}

impl std::error::Error for ParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Empty;

impl fmt::Display for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no move to undo")
    }
}

impl std::error::Error for Empty {}
