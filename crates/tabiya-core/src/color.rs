//! Side colors and the board geometry that depends on them.

use std::fmt;
use std::ops::Not;

use serde::Serialize;

/// A side in the game: White or Black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// Total number of colors.
    pub const COUNT: usize = 2;

    /// All colors in index order.
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    /// Return the index (0 for White, 1 for Black).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Return the opposite color.
    #[inline]
    pub const fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a single pawn step. Rows grow from rank 8 (row 0) toward rank 1.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start of the game.
    #[inline]
    pub const fn back_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Row from which this side's pawns may advance two squares.
    #[inline]
    pub const fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    /// Row on which this side's pawns promote.
    #[inline]
    pub const fn promotion_row(self) -> u8 {
        self.flip().back_row()
    }

    /// Lowercase English name, as shown to the presentation layer.
    pub const fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl Not for Color {
    type Output = Color;

    #[inline]
    fn not(self) -> Color {
        self.flip()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}
