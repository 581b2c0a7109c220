//! Bishop, rook and queen move generation by ray walking.

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::square::Square;

use super::push_unless_own;

/// Walk each direction until the edge or the first occupied square.
///
/// The blocking square is included when it holds an enemy piece.
pub(super) fn gen_slider(
    board: &Board,
    from: Square,
    color: Color,
    directions: &[(i8, i8)],
    moves: &mut Vec<Move>,
) {
    for &(dr, dc) in directions {
        let mut cur = from.offset(dr, dc);
        while let Some(to) = cur {
            if !push_unless_own(board, from, to, color, moves) {
                break;
            }
            cur = to.offset(dr, dc);
        }
    }
}
