//! Castling rights and the fixed geometry of the two castling moves.

use std::fmt;

use crate::color::Color;
use crate::error::FenError;
use crate::square::Square;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    #[inline]
    const fn index(self) -> usize {
        match self {
            CastleSide::KingSide => 0,
            CastleSide::QueenSide => 1,
        }
    }

    /// Square the king lands on.
    pub const fn king_destination(self, color: Color) -> Square {
        let row = color.back_row();
        match self {
            CastleSide::KingSide => Square::at(row, 6),
            CastleSide::QueenSide => Square::at(row, 2),
        }
    }

    /// Rook source and destination squares.
    pub const fn rook_squares(self, color: Color) -> (Square, Square) {
        let row = color.back_row();
        match self {
            CastleSide::KingSide => (Square::at(row, 7), Square::at(row, 5)),
            CastleSide::QueenSide => (Square::at(row, 0), Square::at(row, 3)),
        }
    }

    /// Squares between king and rook, all of which must be empty.
    pub fn empty_path(self, color: Color) -> &'static [Square] {
        match (color, self) {
            (Color::White, CastleSide::KingSide) => &[Square::F1, Square::G1],
            (Color::White, CastleSide::QueenSide) => &[Square::D1, Square::C1, Square::B1],
            (Color::Black, CastleSide::KingSide) => &[Square::F8, Square::G8],
            (Color::Black, CastleSide::QueenSide) => &[Square::D8, Square::C8, Square::B8],
        }
    }

    /// Squares the king crosses and lands on, none of which may be attacked.
    pub const fn king_path(self, color: Color) -> [Square; 2] {
        let row = color.back_row();
        match self {
            CastleSide::KingSide => [Square::at(row, 5), Square::at(row, 6)],
            CastleSide::QueenSide => [Square::at(row, 3), Square::at(row, 2)],
        }
    }
}

/// Four independent castling flags, indexed by color and side.
///
/// Flags are only ever cleared by play; nothing but FEN decoding sets them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastleRights {
    flags: [[bool; 2]; Color::COUNT],
}

impl CastleRights {
    /// No castling rights.
    pub const NONE: CastleRights = CastleRights {
        flags: [[false; 2]; 2],
    };
    /// All castling rights.
    pub const ALL: CastleRights = CastleRights {
        flags: [[true; 2]; 2],
    };

    /// Check whether a specific color and side can castle.
    #[inline]
    pub const fn has(self, color: Color, side: CastleSide) -> bool {
        self.flags[color.index()][side.index()]
    }

    /// Return `true` if no castling rights remain.
    pub fn is_empty(self) -> bool {
        self.flags.iter().flatten().all(|&f| !f)
    }

    /// Return these rights with one flag set.
    #[inline]
    pub const fn with(mut self, color: Color, side: CastleSide) -> CastleRights {
        self.flags[color.index()][side.index()] = true;
        self
    }

    /// Return these rights with one flag cleared.
    #[inline]
    pub const fn without(mut self, color: Color, side: CastleSide) -> CastleRights {
        self.flags[color.index()][side.index()] = false;
        self
    }

    /// Return these rights with both flags of `color` cleared.
    #[inline]
    pub const fn without_color(self, color: Color) -> CastleRights {
        self.without(color, CastleSide::KingSide)
            .without(color, CastleSide::QueenSide)
    }

    /// Clear every right tied to `sq`: a king's home square clears both of
    /// that side's flags, a rook's home corner clears the matching one.
    pub fn touched(self, sq: Square) -> CastleRights {
        let mut rights = self;
        for color in Color::ALL {
            if sq == Square::at(color.back_row(), 4) {
                rights = rights.without_color(color);
            }
            for side in CastleSide::ALL {
                if sq == side.rook_squares(color).0 {
                    rights = rights.without(color, side);
                }
            }
        }
        rights
    }

    /// Pack the flags into 4 bits: bit 0 = K, 1 = Q, 2 = k, 3 = q.
    pub fn bits(self) -> u8 {
        let mut bits = 0;
        for color in Color::ALL {
            for side in CastleSide::ALL {
                if self.has(color, side) {
                    bits |= 1 << (color.index() * 2 + side.index());
                }
            }
        }
        bits
    }

    /// Parse castling rights from the FEN castling field (e.g. "KQkq", "Kq", "-").
    pub fn from_fen(s: &str) -> Result<CastleRights, FenError> {
        if s == "-" {
            return Ok(CastleRights::NONE);
        }

        let mut rights = CastleRights::NONE;
        for c in s.chars() {
            rights = match c {
                'K' => rights.with(Color::White, CastleSide::KingSide),
                'Q' => rights.with(Color::White, CastleSide::QueenSide),
                'k' => rights.with(Color::Black, CastleSide::KingSide),
                'q' => rights.with(Color::Black, CastleSide::QueenSide),
                _ => return Err(FenError::InvalidCastlingChar { character: c }),
            };
        }
        Ok(rights)
    }

    /// Serialize castling rights to the FEN castling field.
    pub fn to_fen(self) -> String {
        if self.is_empty() {
            return "-".to_string();
        }

        let letters = [
            (Color::White, CastleSide::KingSide, 'K'),
            (Color::White, CastleSide::QueenSide, 'Q'),
            (Color::Black, CastleSide::KingSide, 'k'),
            (Color::Black, CastleSide::QueenSide, 'q'),
        ];
        letters
            .into_iter()
            .filter(|&(color, side, _)| self.has(color, side))
            .map(|(_, _, c)| c)
            .collect()
    }
}

impl Default for CastleRights {
    fn default() -> Self {
        CastleRights::NONE
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl fmt::Debug for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CastleRights({})", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::{CastleRights, CastleSide};
    use crate::color::Color;
    use crate::square::Square;

    #[test]
    fn fen_roundtrip() {
        for fen in ["KQkq", "Kq", "k", "-", "KQ", "kq", "Qk"] {
            let rights = CastleRights::from_fen(fen).unwrap();
            let reparsed = CastleRights::from_fen(&rights.to_fen()).unwrap();
            assert_eq!(rights, reparsed, "roundtrip failed for {fen}");
        }
        assert_eq!(CastleRights::from_fen("qK").unwrap().to_fen(), "Kq");
    }

    #[test]
    fn from_fen_invalid() {
        assert!(CastleRights::from_fen("KQxq").is_err());
        assert!(CastleRights::from_fen("1").is_err());
    }

    #[test]
    fn has_color_side() {
        let rights = CastleRights::from_fen("Kq").unwrap();
        assert!(rights.has(Color::White, CastleSide::KingSide));
        assert!(!rights.has(Color::White, CastleSide::QueenSide));
        assert!(!rights.has(Color::Black, CastleSide::KingSide));
        assert!(rights.has(Color::Black, CastleSide::QueenSide));
    }

    #[test]
    fn touching_king_square_clears_both() {
        let rights = CastleRights::ALL.touched(Square::E1);
        assert_eq!(rights.to_fen(), "kq");
        let rights = CastleRights::ALL.touched(Square::E8);
        assert_eq!(rights.to_fen(), "KQ");
    }

    #[test]
    fn touching_corner_clears_one() {
        assert_eq!(CastleRights::ALL.touched(Square::H1).to_fen(), "Qkq");
        assert_eq!(CastleRights::ALL.touched(Square::A8).to_fen(), "KQk");
        assert_eq!(CastleRights::ALL.touched(Square::D4), CastleRights::ALL);
    }

    #[test]
    fn bits_are_distinct() {
        assert_eq!(CastleRights::NONE.bits(), 0);
        assert_eq!(CastleRights::ALL.bits(), 0b1111);
        assert_eq!(CastleRights::from_fen("k").unwrap().bits(), 0b0100);
    }

    #[test]
    fn castle_geometry() {
        assert_eq!(CastleSide::KingSide.king_destination(Color::White), Square::G1);
        assert_eq!(CastleSide::QueenSide.king_destination(Color::Black), Square::C8);
        assert_eq!(
            CastleSide::QueenSide.rook_squares(Color::White),
            (Square::A1, Square::D1)
        );
        assert_eq!(
            CastleSide::KingSide.king_path(Color::Black),
            [Square::F8, Square::G8]
        );
    }
}
