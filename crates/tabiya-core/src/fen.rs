//! FEN parsing and serialization for [`GameState`].

use std::fmt;
use std::str::FromStr;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::error::{BoardError, FenError};
use crate::game_state::GameState;
use crate::movegen::is_square_attacked;
use crate::piece::Piece;
use crate::square::Square;

/// The FEN string for the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl GameState {
    /// Decode a FEN record.
    pub fn from_fen(fen: &str) -> Result<GameState, FenError> {
        fen.parse()
    }

    /// Encode this state as a FEN record.
    pub fn to_fen(&self) -> String {
        self.to_string()
    }
}

impl Board {
    /// Encode the piece placement field, rank 8 first.
    pub fn placement_fen(&self) -> String {
        let ranks: Vec<String> = self
            .rows()
            .iter()
            .map(|row| {
                let mut out = String::new();
                let mut empty = 0;
                for square in row {
                    match square {
                        Some(piece) => {
                            if empty > 0 {
                                out.push_str(&empty.to_string());
                                empty = 0;
                            }
                            out.push(piece.fen_char());
                        }
                        None => empty += 1,
                    }
                }
                if empty > 0 {
                    out.push_str(&empty.to_string());
                }
                out
            })
            .collect();
        ranks.join("/")
    }
}

fn parse_placement(field: &str) -> Result<Board, FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::WrongRankCount { found: ranks.len() });
    }

    let mut board = Board::empty();
    for (rank_index, rank_str) in ranks.iter().enumerate() {
        // FEN lists rank 8 first, which is row 0.
        let mut col = 0usize;
        for c in rank_str.chars() {
            if let Some(digit) = c.to_digit(10) {
                if !(1..=8).contains(&digit) {
                    return Err(FenError::InvalidPieceChar { character: c });
                }
                col += digit as usize;
            } else {
                let piece =
                    Piece::from_fen_char(c).ok_or(FenError::InvalidPieceChar { character: c })?;
                if col >= 8 {
                    return Err(FenError::BadRankLength {
                        rank_index,
                        length: col + 1,
                    });
                }
                board.set_at(rank_index, col, Some(piece))?;
                col += 1;
            }
        }

        if col != 8 {
            return Err(FenError::BadRankLength {
                rank_index,
                length: col,
            });
        }
    }

    board.validate()?;
    Ok(board)
}

fn parse_counter(field: &'static str, value: &str) -> Result<u32, FenError> {
    let invalid = || FenError::InvalidMoveCounter {
        field,
        found: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse().map_err(|_| invalid())
}

impl FromStr for GameState {
    type Err = FenError;

    fn from_str(fen: &str) -> Result<GameState, FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount {
                found: fields.len(),
            });
        }

        let board = parse_placement(fields[0])?;

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidColor {
                    found: other.to_string(),
                });
            }
        };

        // The mover could otherwise capture the enemy king.
        let them = side_to_move.flip();
        if board
            .king_square(them)
            .is_some_and(|king| is_square_attacked(&board, king, side_to_move))
        {
            return Err(BoardError::OppositeCheck.into());
        }

        let castling = CastleRights::from_fen(fields[2])?;

        // The target lies behind a pawn the opponent just pushed two squares.
        let en_passant = if fields[3] == "-" {
            None
        } else {
            let expected_row = side_to_move.flip().pawn_row() as i8 + side_to_move.flip().forward();
            let sq = Square::from_algebraic(fields[3])
                .filter(|sq| sq.row() as i8 == expected_row)
                .ok_or_else(|| FenError::InvalidEnPassant {
                    found: fields[3].to_string(),
                })?;
            Some(sq)
        };

        let halfmove_clock = parse_counter("halfmove clock", fields[4])?;
        let fullmove_number = parse_counter("fullmove number", fields[5])?;

        Ok(GameState::from_parts(
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
        ))
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board().placement_fen())?;
        write!(f, " {}", self.side_to_move())?;
        write!(f, " {}", self.castling())?;
        match self.en_passant() {
            Some(sq) => write!(f, " {sq}")?,
            None => write!(f, " -")?,
        }
        write!(f, " {} {}", self.halfmove_clock(), self.fullmove_number())
    }
}
