//! Error types for board access, FEN parsing, and move application.

use crate::chess_move::Move;

/// Errors from board addressing and structural validation of a [`Board`](crate::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A coordinate pair falls outside the 8x8 grid.
    #[error("square ({row}, {col}) is outside the board")]
    OutOfBounds {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },
    /// A side does not have exactly one king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: &'static str,
        /// Number of kings found.
        count: usize,
    },
    /// Pawns occupy the first or eighth rank.
    #[error("pawns found on back rank")]
    PawnsOnBackRank,
    /// The king of the side not to move is attacked.
    #[error("the side not to move is in check")]
    OppositeCheck,
}

/// Errors that occur when parsing a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FenError {
    /// The FEN string does not have exactly 6 space-separated fields.
    #[error("expected 6 FEN fields, found {found}")]
    WrongFieldCount {
        /// Number of fields found.
        found: usize,
    },
    /// The piece placement section does not have exactly 8 ranks.
    #[error("expected 8 ranks in piece placement, found {found}")]
    WrongRankCount {
        /// Number of ranks found.
        found: usize,
    },
    /// A rank in the piece placement describes more or fewer than 8 squares.
    #[error("rank {rank_index} describes {length} squares, expected 8")]
    BadRankLength {
        /// Zero-based rank index (0 = rank 8 in FEN, 7 = rank 1).
        rank_index: usize,
        /// Number of squares described.
        length: usize,
    },
    /// An unrecognized character appeared in the piece placement.
    #[error("invalid piece character: '{character}'")]
    InvalidPieceChar {
        /// The invalid character.
        character: char,
    },
    /// The active color field is not "w" or "b".
    #[error("invalid active color: \"{found}\"")]
    InvalidColor {
        /// The invalid color string.
        found: String,
    },
    /// An unrecognized character appeared in the castling rights field.
    #[error("invalid castling character: '{character}'")]
    InvalidCastlingChar {
        /// The invalid character.
        character: char,
    },
    /// The en passant field is not "-" or a square on rank 3 or 6.
    #[error("invalid en passant square: \"{found}\"")]
    InvalidEnPassant {
        /// The invalid en passant string.
        found: String,
    },
    /// A move counter (halfmove clock or fullmove number) is not a non-negative integer.
    #[error("invalid {field}: \"{found}\"")]
    InvalidMoveCounter {
        /// The field name ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The invalid string.
        found: String,
    },
    /// The parsed board fails structural validation.
    #[error("invalid board: {source}")]
    InvalidBoard {
        /// The underlying board validation error.
        #[from]
        source: BoardError,
    },
}

/// Errors from applying a move to a [`GameState`](crate::GameState).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The move is not among the legal moves of the position.
    #[error("illegal move: {mv}")]
    IllegalMove {
        /// The rejected move.
        mv: Move,
    },
    /// A promotion was given on a non-promoting move, or omitted on a promoting one.
    #[error("invalid promotion for move {mv}")]
    InvalidPromotion {
        /// The rejected move.
        mv: Move,
    },
    /// A coordinate outside the board was supplied.
    #[error(transparent)]
    Board(#[from] BoardError),
}
