//! Pawn move generation.

use crate::chess_move::Move;
use crate::color::Color;
use crate::game_state::GameState;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Generate pawn pushes, captures and en passant for the pawn on `from`.
pub(super) fn gen_pawn(state: &GameState, from: Square, color: Color, moves: &mut Vec<Move>) {
    let board = state.board();
    let dir = color.forward();

    // --- Pushes ---
    if let Some(one) = from.offset(dir, 0) {
        if !board.is_occupied(one) {
            push_pawn_move(from, one, color, moves);

            if from.row() == color.pawn_row() as usize {
                if let Some(two) = one.offset(dir, 0) {
                    if !board.is_occupied(two) {
                        moves.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    // --- Captures ---
    for dc in [-1, 1] {
        let Some(to) = from.offset(dir, dc) else {
            continue;
        };
        match board.get(to) {
            Some(target) if target.color != color => push_pawn_move(from, to, color, moves),
            None if state.en_passant() == Some(to) => {
                // The pawn being captured stands beside us, on the target's file.
                let victim = Square::at(from.row() as u8, to.col() as u8);
                if board.get(victim) == Some(Piece::new(PieceKind::Pawn, color.flip())) {
                    moves.push(Move::new(from, to));
                }
            }
            _ => {}
        }
    }
}

/// Push a pawn move, fanning out into the four promotions on the last row.
fn push_pawn_move(from: Square, to: Square, color: Color, moves: &mut Vec<Move>) {
    if to.row() == color.promotion_row() as usize {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::with_promotion(from, to, kind));
        }
    } else {
        moves.push(Move::new(from, to));
    }
}
