//! The complete game state: placement, turn, castling, en passant, counters,
//! and the cached check/mate/stalemate flags.

use std::fmt;

use crate::board::Board;
use crate::castle_rights::CastleRights;
use crate::color::Color;
use crate::rules;
use crate::square::Square;

/// Single source of truth for a game in progress.
///
/// The check, checkmate and stalemate flags are recomputed eagerly whenever a
/// state is built, so reading them never triggers move generation.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castling: CastleRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    in_check: bool,
    is_checkmate: bool,
    is_stalemate: bool,
}

impl GameState {
    /// Return the standard starting position.
    pub fn starting_position() -> GameState {
        GameState::from_parts(
            Board::starting_position(),
            Color::White,
            CastleRights::ALL,
            None,
            0,
            1,
        )
    }

    /// Assemble a state from its six FEN-level components and compute the derived flags.
    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        castling: CastleRights,
        en_passant: Option<Square>,
        halfmove_clock: u32,
        fullmove_number: u32,
    ) -> GameState {
        let mut state = GameState {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            in_check: false,
            is_checkmate: false,
            is_stalemate: false,
        };
        state.refresh_status();
        state
    }

    /// Recompute the check/mate/stalemate flags from the current position.
    pub(crate) fn refresh_status(&mut self) {
        let in_check = rules::in_check(self);
        let can_move = rules::has_legal_moves(self);
        self.in_check = in_check;
        self.is_checkmate = in_check && !can_move;
        self.is_stalemate = !in_check && !can_move;
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    /// Square a pawn may capture onto en passant this move, if any.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Half-moves since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Starts at 1 and increments after each Black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Is the side to move in check?
    #[inline]
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    #[inline]
    pub fn is_checkmate(&self) -> bool {
        self.is_checkmate
    }

    #[inline]
    pub fn is_stalemate(&self) -> bool {
        self.is_stalemate
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_castling(&mut self, rights: CastleRights) {
        self.castling = rights;
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, sq: Option<Square>) {
        self.en_passant = sq;
    }

    #[inline]
    pub(crate) fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    #[inline]
    pub(crate) fn set_fullmove_number(&mut self, number: u32) {
        self.fullmove_number = number;
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::starting_position()
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameState(\"{self}\")")
    }
}
