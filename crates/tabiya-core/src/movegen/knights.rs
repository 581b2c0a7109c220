//! Knight move generation.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

use super::{KNIGHT_OFFSETS, push_unless_own};

/// Generate the eight knight jumps that stay on the board and avoid own pieces.
pub(super) fn gen_knight(board: &Board, from: Square, color: Color, moves: &mut Vec<Move>) {
    for (dr, dc) in KNIGHT_OFFSETS {
        if let Some(to) = from.offset(dr, dc) {
            push_unless_own(board, from, to, color, moves);
        }
    }
}
