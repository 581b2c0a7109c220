//! Session and protocol errors.

use tabiya_core::{BoardError, FenError, MoveError};

/// Errors that can occur while driving a session through the line protocol.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The first token is not a known command.
    #[error("unknown command: {command}")]
    MalformedCommand {
        /// The unrecognized command word.
        command: String,
    },

    /// A command was given without a required argument.
    #[error("{command}: missing {argument}")]
    MissingArgument {
        /// The command that was incomplete.
        command: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// A square argument is not in algebraic notation.
    #[error("invalid square: {square}")]
    InvalidSquare {
        /// The square text that failed to parse.
        square: String,
    },

    /// A move argument is not in UCI notation.
    #[error("invalid move: {uci_move}")]
    InvalidMove {
        /// The UCI move string that failed to parse.
        uci_move: String,
    },

    /// The promotion suffix of a move names no promotion piece.
    #[error("invalid promotion piece: {piece}")]
    InvalidPromotion {
        /// The suffix that failed to parse.
        piece: String,
    },

    /// The perft depth could not be parsed or is too deep.
    #[error("invalid depth: {value}")]
    InvalidDepth {
        /// The depth string that was rejected.
        value: String,
    },

    /// A `set` command named an unknown option or value.
    #[error("invalid option: {option}")]
    InvalidOption {
        /// The option text that was rejected.
        option: String,
    },

    /// An input line is not valid UTF-8.
    #[error("input is not valid UTF-8: {source}")]
    InvalidEncoding {
        /// The underlying decoding error.
        #[from]
        source: std::str::Utf8Error,
    },

    /// Loading a position failed.
    #[error("invalid FEN: {0}")]
    Fen(#[from] FenError),

    /// The move was rejected by the rules.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// A coordinate fell outside the board.
    #[error(transparent)]
    Board(#[from] BoardError),

    /// A response could not be serialized.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// An I/O error occurred while reading input or writing output.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}
