//! Move requests: source, destination, and an optional promotion kind.

use std::fmt;

use serde::Serialize;

use crate::piece_kind::PieceKind;
use crate::square::Square;

/// A move request.
///
/// A `Move` carries no knowledge of the position it is played in. Whether it
/// is a capture, castling or en passant is decided against a
/// [`GameState`](crate::GameState), and it is only valid once it appears among
/// that state's legal moves.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Create a move without promotion.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Create a promoting move.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, kind: PieceKind) -> Move {
        Move {
            from,
            to,
            promotion: Some(kind),
        }
    }

    /// Return `true` if this move requests a promotion.
    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion.is_some()
    }

    /// Parse long algebraic (UCI) notation such as `e2e4` or `e7e8q`.
    pub fn from_uci(s: &str) -> Option<Move> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return None;
        }
        let from = Square::from_algebraic(&s[0..2])?;
        let to = Square::from_algebraic(&s[2..4])?;
        match s[4..].chars().next() {
            None => Some(Move::new(from, to)),
            Some(c) => {
                let kind = PieceKind::from_fen_char(c).filter(|k| k.is_promotion_target())?;
                Some(Move::with_promotion(from, to, kind))
            }
        }
    }

    /// Return the UCI string representation.
    pub fn to_uci(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.promotion {
            Some(kind) => write!(f, "{}{}{}", self.from, self.to, kind.fen_char()),
            None => write!(f, "{}{}", self.from, self.to),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({self})")
    }
}
