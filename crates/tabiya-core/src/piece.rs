//! Colored chess piece as a plain tagged value.

use std::fmt;

use serde::Serialize;

use crate::color::Color;
use crate::piece_kind::PieceKind;

/// A colored chess piece.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    pub const WHITE_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::White);
    pub const WHITE_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::White);
    pub const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);
    pub const WHITE_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::White);
    pub const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);
    pub const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    pub const BLACK_KNIGHT: Piece = Piece::new(PieceKind::Knight, Color::Black);
    pub const BLACK_BISHOP: Piece = Piece::new(PieceKind::Bishop, Color::Black);
    pub const BLACK_ROOK: Piece = Piece::new(PieceKind::Rook, Color::Black);
    pub const BLACK_QUEEN: Piece = Piece::new(PieceKind::Queen, Color::Black);
    pub const BLACK_KING: Piece = Piece::new(PieceKind::King, Color::Black);

    /// Create a piece from a kind and a color.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece { color, kind }
    }

    /// Parse a FEN character into a piece.
    ///
    /// Uppercase letters produce White pieces; lowercase letters produce Black pieces.
    #[inline]
    pub fn from_fen_char(c: char) -> Option<Piece> {
        let kind = PieceKind::from_fen_char(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece::new(kind, color))
    }

    /// Contiguous index 0-11: White P,N,B,R,Q,K then Black P,N,B,R,Q,K.
    #[inline]
    pub const fn index(self) -> usize {
        self.color.index() * PieceKind::COUNT + self.kind.index()
    }

    /// Return the FEN character: uppercase for White, lowercase for Black.
    #[inline]
    pub fn fen_char(self) -> char {
        let base = self.kind.fen_char();
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    /// Identifier used by the presentation layer, e.g. `"WhiteKnight"`.
    pub fn identifier(self) -> String {
        let color = match self.color {
            Color::White => "White",
            Color::Black => "Black",
        };
        format!("{color}{}", self.kind.name())
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fen_char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        write!(f, "{}{}", color_prefix, self.kind.fen_char().to_ascii_uppercase())
    }
}
