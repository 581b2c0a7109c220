//! The 8x8 piece grid.

use std::fmt;

use crate::color::Color;
use crate::error::BoardError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Back-rank layout from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece placement only. Carries no notion of whose turn it is or of legality.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    /// `squares[row][col]`, row 0 = rank 8.
    squares: [[Option<Piece>; 8]; 8],
}

impl Board {
    /// Return a board with no pieces.
    pub const fn empty() -> Board {
        Board {
            squares: [[None; 8]; 8],
        }
    }

    /// Return the standard starting placement.
    pub fn starting_position() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                board.squares[color.back_row() as usize][col] = Some(Piece::new(kind, color));
            }
            board.squares[color.pawn_row() as usize] = [Some(Piece::new(PieceKind::Pawn, color)); 8];
        }
        board
    }

    /// Return the piece on `sq`, if any.
    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()]
    }

    /// Put `piece` on `sq`, returning whatever stood there before.
    #[inline]
    pub fn set(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[sq.row()][sq.col()].replace(piece)
    }

    /// Empty `sq`, returning the piece that stood there.
    #[inline]
    pub fn clear(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()].take()
    }

    /// Return the piece at raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if either coordinate is off the board.
    pub fn get_at(&self, row: usize, col: usize) -> Result<Option<Piece>, BoardError> {
        Ok(self.get(Square::new(row, col)?))
    }

    /// Place or remove a piece at raw coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if either coordinate is off the board.
    pub fn set_at(&mut self, row: usize, col: usize, piece: Option<Piece>) -> Result<(), BoardError> {
        let sq = Square::new(row, col)?;
        self.squares[sq.row()][sq.col()] = piece;
        Ok(())
    }

    /// Return `true` if a piece stands on `sq`.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.get(sq).is_some()
    }

    /// Return the color of the piece on `sq`, if any.
    #[inline]
    pub fn color_on(&self, sq: Square) -> Option<Color> {
        self.get(sq).map(|p| p.color)
    }

    /// Iterate over occupied squares, a8 to h1.
    pub fn occupied(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Iterate over the squares holding pieces of `color`.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.occupied().filter(move |(_, piece)| piece.color == color)
    }

    /// Return the square of `color`'s king, or `None` if it has none.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let king = Piece::new(PieceKind::King, color);
        self.occupied()
            .find(|&(_, piece)| piece == king)
            .map(|(sq, _)| sq)
    }

    /// Return the rows of the grid, row 0 = rank 8.
    pub fn rows(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.squares
    }

    /// Validate the structural integrity of the board.
    pub fn validate(&self) -> Result<(), BoardError> {
        for color in Color::ALL {
            let count = self
                .pieces_of(color)
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .count();
            if count != 1 {
                return Err(BoardError::InvalidKingCount {
                    color: color.name(),
                    count,
                });
            }
        }

        let back_rank_pawn = self.occupied().any(|(sq, piece)| {
            piece.kind == PieceKind::Pawn && (sq.row() == 0 || sq.row() == 7)
        });
        if back_rank_pawn {
            return Err(BoardError::PawnsOnBackRank);
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::empty()
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self.placement_fen())
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, squares) in self.0.squares.iter().enumerate() {
            write!(f, "{}  ", 8 - row)?;
            let line: Vec<String> = squares
                .iter()
                .map(|sq| sq.map_or('.', Piece::fen_char).to_string())
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        write!(f, "   a b c d e f g h")
    }
}
