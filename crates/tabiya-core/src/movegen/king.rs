//! King steps and castling.

use crate::castle_rights::CastleSide;
use crate::chess_move::Move;
use crate::color::Color;
use crate::game_state::GameState;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use super::{KING_OFFSETS, is_square_attacked, push_unless_own};

/// Generate king steps plus castling candidates.
///
/// Castling requires the right to be held, the king and rook on their home
/// squares, an empty path between them, the king not in check, and no
/// attacked square on the king's path.
pub(super) fn gen_king(state: &GameState, from: Square, color: Color, moves: &mut Vec<Move>) {
    let board = state.board();
    for (dr, dc) in KING_OFFSETS {
        if let Some(to) = from.offset(dr, dc) {
            push_unless_own(board, from, to, color, moves);
        }
    }

    let home = Square::at(color.back_row(), 4);
    if from != home {
        return;
    }

    let them = color.flip();
    let rook = Piece::new(PieceKind::Rook, color);
    let mut in_check = None;

    for side in CastleSide::ALL {
        if !state.castling().has(color, side) {
            continue;
        }
        let (rook_from, _) = side.rook_squares(color);
        if board.get(rook_from) != Some(rook) {
            continue;
        }
        if side.empty_path(color).iter().any(|&sq| board.is_occupied(sq)) {
            continue;
        }
        if *in_check.get_or_insert_with(|| is_square_attacked(board, from, them)) {
            return;
        }
        if side
            .king_path(color)
            .iter()
            .any(|&sq| is_square_attacked(board, sq, them))
        {
            continue;
        }
        moves.push(Move::new(from, side.king_destination(color)));
    }
}
