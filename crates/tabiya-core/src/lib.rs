//! Core chess types and rules: board representation, move generation,
//! move application, FEN, and game status.

mod board;
mod castle_rights;
mod chess_move;
mod color;
mod error;
mod fen;
mod game_state;
mod make_move;
mod piece;
mod piece_kind;
mod square;
mod zobrist;

pub mod movegen;
pub mod perft;
pub mod rules;

pub use board::{Board, PrettyBoard};
pub use castle_rights::{CastleRights, CastleSide};
pub use chess_move::Move;
pub use color::Color;
pub use error::{BoardError, FenError, MoveError};
pub use fen::STARTING_FEN;
pub use game_state::GameState;
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use rules::GameStatus;
pub use square::Square;
