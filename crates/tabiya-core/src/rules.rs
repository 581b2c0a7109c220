//! Check, checkmate, stalemate, and draw-relevant state.

use serde::Serialize;

use crate::board::Board;
use crate::color::Color;
use crate::game_state::GameState;
use crate::movegen::{is_square_attacked, legal_moves};
use crate::piece_kind::PieceKind;

/// Half-move clock value at which the fifty-move rule may be claimed.
pub const FIFTY_MOVE_PLIES: u32 = 100;

/// Overall outcome of a position.
///
/// Only checkmate and stalemate end the game by rule. The draw variants are
/// informational; claiming them is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Color },
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    ThreefoldRepetition,
}

impl GameStatus {
    /// Return `true` for checkmate and stalemate.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Checkmate { .. } | GameStatus::Stalemate)
    }
}

/// Is the side to move's king attacked?
pub fn in_check(state: &GameState) -> bool {
    let us = state.side_to_move();
    state
        .board()
        .king_square(us)
        .is_some_and(|king| is_square_attacked(state.board(), king, us.flip()))
}

/// Does the side to move have at least one legal move?
pub fn has_legal_moves(state: &GameState) -> bool {
    state
        .board()
        .pieces_of(state.side_to_move())
        .any(|(sq, _)| !legal_moves(state, sq).is_empty())
}

pub fn is_checkmate(state: &GameState) -> bool {
    in_check(state) && !has_legal_moves(state)
}

pub fn is_stalemate(state: &GameState) -> bool {
    !in_check(state) && !has_legal_moves(state)
}

/// Neither side can possibly deliver mate: bare kings, a single minor piece,
/// or bishops that all stand on squares of one color.
pub fn is_insufficient_material(board: &Board) -> bool {
    let mut minors = Vec::new();
    for (sq, piece) in board.occupied() {
        match piece.kind {
            PieceKind::King => {}
            PieceKind::Knight | PieceKind::Bishop => minors.push((sq, piece.kind)),
            PieceKind::Pawn | PieceKind::Rook | PieceKind::Queen => return false,
        }
    }

    match minors.as_slice() {
        [] | [_] => true,
        [(first, _), ..] => minors
            .iter()
            .all(|&(sq, kind)| kind == PieceKind::Bishop && sq.is_light() == first.is_light()),
    }
}

/// Have a hundred half-moves passed without a capture or pawn move?
pub fn is_fifty_move_draw(state: &GameState) -> bool {
    state.halfmove_clock() >= FIFTY_MOVE_PLIES
}

/// Classify a position, ignoring repetition (which needs the game's history).
///
/// Uses the cached flags of `state`.
pub fn status(state: &GameState) -> GameStatus {
    if state.is_checkmate() {
        GameStatus::Checkmate {
            winner: state.side_to_move().flip(),
        }
    } else if state.is_stalemate() {
        GameStatus::Stalemate
    } else if is_insufficient_material(state.board()) {
        GameStatus::InsufficientMaterial
    } else if is_fifty_move_draw(state) {
        GameStatus::FiftyMoveRule
    } else {
        GameStatus::Ongoing
    }
}
