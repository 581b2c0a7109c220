//! Move application via copy-make.

use tracing::trace;

use crate::chess_move::Move;
use crate::color::Color;
use crate::error::MoveError;
use crate::game_state::GameState;
use crate::movegen::legal_moves;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::square::Square;

impl GameState {
    /// Apply a legal move and return the resulting state. `self` is not modified.
    ///
    /// # Errors
    ///
    /// - [`MoveError::InvalidPromotion`] if `mv` matches a legal move's squares
    ///   but its promotion is missing, superfluous, or not a promotion target.
    /// - [`MoveError::IllegalMove`] if no legal move goes from `mv.from` to `mv.to`.
    pub fn apply_move(&self, mv: Move) -> Result<GameState, MoveError> {
        let legal = legal_moves(self, mv.from);

        if !legal.contains(&mv) {
            let same_squares = legal.iter().any(|m| m.from == mv.from && m.to == mv.to);
            return Err(if same_squares {
                MoveError::InvalidPromotion { mv }
            } else {
                MoveError::IllegalMove { mv }
            });
        }

        let mut next = self.successor(mv);
        next.refresh_status();
        trace!(%mv, fen = %next, "applied move");
        Ok(next)
    }

    /// Play `mv` without any legality check and without refreshing the
    /// check/mate/stalemate flags.
    ///
    /// Used for the scratch copies of legality filtering. An empty source
    /// square leaves the state unchanged.
    pub(crate) fn successor(&self, mv: Move) -> GameState {
        let mut next = *self;
        let us = self.side_to_move();
        let them = us.flip();
        let (from, to) = (mv.from, mv.to);

        let Some(moving) = self.board().get(from) else {
            return next;
        };

        let board = next.board_mut();
        board.clear(from);
        let mut captured = board.set(to, moving);

        match moving.kind {
            PieceKind::Pawn => {
                // Diagonal step onto an empty en passant target: the victim sits beside `from`.
                if captured.is_none() && from.col() != to.col() && self.en_passant() == Some(to) {
                    captured = board.clear(Square::at(from.row() as u8, to.col() as u8));
                }
                if let Some(kind) = mv.promotion {
                    board.set(to, Piece::new(kind, us));
                }
            }
            PieceKind::King if from.col().abs_diff(to.col()) == 2 => {
                let rook_cols = if to.col() > from.col() { (7, 5) } else { (0, 3) };
                let row = from.row() as u8;
                if let Some(rook) = board.clear(Square::at(row, rook_cols.0)) {
                    board.set(Square::at(row, rook_cols.1), rook);
                }
            }
            _ => {}
        }

        // A double push leaves the skipped square as the en passant target.
        let en_passant = if moving.kind == PieceKind::Pawn && from.row().abs_diff(to.row()) == 2 {
            from.offset(us.forward(), 0)
        } else {
            None
        };
        next.set_en_passant(en_passant);

        let mut castling = self.castling().touched(from).touched(to);
        if moving.kind == PieceKind::King {
            castling = castling.without_color(us);
        }
        next.set_castling(castling);

        if moving.kind == PieceKind::Pawn || captured.is_some() {
            next.set_halfmove_clock(0);
        } else {
            next.set_halfmove_clock(self.halfmove_clock().saturating_add(1));
        }

        if us == Color::Black {
            next.set_fullmove_number(self.fullmove_number().saturating_add(1));
        }

        next.set_side_to_move(them);
        next
    }
}

#[cfg(test)]
mod tests {
    use crate::castle_rights::CastleSide;
    use crate::chess_move::Move;
    use crate::color::Color;
    use crate::error::MoveError;
    use crate::game_state::GameState;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::square::Square;

    fn state(fen: &str) -> GameState {
        fen.parse().unwrap()
    }

    fn play(state: &GameState, uci: &str) -> GameState {
        state.apply_move(Move::from_uci(uci).unwrap()).unwrap()
    }

    #[test]
    fn quiet_pawn_push() {
        let next = play(&GameState::starting_position(), "e2e3");
        assert_eq!(next.board().get(Square::E3), Some(Piece::WHITE_PAWN));
        assert_eq!(next.board().get(Square::E2), None);
        assert_eq!(next.side_to_move(), Color::Black);
        assert_eq!(next.en_passant(), None);
        assert_eq!(next.halfmove_clock(), 0);
        assert_eq!(next.fullmove_number(), 1);
    }

    #[test]
    fn double_push_sets_en_passant() {
        let next = play(&GameState::starting_position(), "e2e4");
        assert_eq!(next.en_passant(), Some(Square::E3));
        let next = play(&next, "g8f6");
        assert_eq!(next.en_passant(), None);
        assert_eq!(next.fullmove_number(), 2);
        assert_eq!(next.halfmove_clock(), 1);
    }

    #[test]
    fn capture_resets_halfmove_clock() {
        let s = state("4k3/8/8/3p4/8/8/8/3RK3 w - - 12 40");
        let next = play(&s, "d1d5");
        assert_eq!(next.halfmove_clock(), 0);
        assert_eq!(next.board().get(Square::D5), Some(Piece::WHITE_ROOK));
        assert_eq!(next.board().pieces_of(Color::Black).count(), 1);
    }

    #[test]
    fn quiet_piece_move_increments_clock() {
        let s = state("4k3/8/8/8/8/8/8/3RK3 b - - 12 40");
        let next = play(&s, "e8f7");
        assert_eq!(next.halfmove_clock(), 13);
        assert_eq!(next.fullmove_number(), 41);
    }

    #[test]
    fn counters_saturate_at_maximum() {
        let s = state("4k3/8/8/8/8/8/8/3RK3 b - - 4294967295 4294967295");
        let next = play(&s, "e8f7");
        assert_eq!(next.halfmove_clock(), u32::MAX);
        assert_eq!(next.fullmove_number(), u32::MAX);
    }

    #[test]
    fn en_passant_removes_victim() {
        let s = state("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let next = play(&s, "e5d6");
        assert_eq!(next.board().get(Square::D6), Some(Piece::WHITE_PAWN));
        assert_eq!(next.board().get(Square::D5), None);
        assert_eq!(next.board().get(Square::E5), None);
        assert_eq!(next.halfmove_clock(), 0);
    }

    #[test]
    fn black_en_passant() {
        let s = state("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1");
        let next = play(&s, "f4e3");
        assert_eq!(next.board().get(Square::E3), Some(Piece::BLACK_PAWN));
        assert_eq!(next.board().get(Square::E4), None);
    }

    #[test]
    fn kingside_castle_moves_rook() {
        let s = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = play(&s, "e1g1");
        assert_eq!(next.board().get(Square::G1), Some(Piece::WHITE_KING));
        assert_eq!(next.board().get(Square::F1), Some(Piece::WHITE_ROOK));
        assert_eq!(next.board().get(Square::H1), None);
        assert!(!next.castling().has(Color::White, CastleSide::KingSide));
        assert!(!next.castling().has(Color::White, CastleSide::QueenSide));
        assert!(next.castling().has(Color::Black, CastleSide::KingSide));
    }

    #[test]
    fn queenside_castle_moves_rook() {
        let s = state("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        let next = play(&s, "e8c8");
        assert_eq!(next.board().get(Square::C8), Some(Piece::BLACK_KING));
        assert_eq!(next.board().get(Square::D8), Some(Piece::BLACK_ROOK));
        assert_eq!(next.board().get(Square::A8), None);
        assert_eq!(next.castling().to_fen(), "KQ");
    }

    #[test]
    fn rook_move_clears_one_right() {
        let s = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = play(&s, "a1a2");
        assert_eq!(next.castling().to_fen(), "Kkq");
    }

    #[test]
    fn rook_capture_clears_victims_right() {
        let s = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = play(&s, "h1h8");
        assert_eq!(next.castling().to_fen(), "Qq");
    }

    #[test]
    fn king_step_clears_both_rights() {
        let s = state("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = play(&s, "e1e2");
        assert_eq!(next.castling().to_fen(), "kq");
        // Stepping back does not restore anything.
        let next = play(&play(&next, "a8b8"), "e2e1");
        assert_eq!(next.castling().to_fen(), "k");
    }

    #[test]
    fn promotion_substitutes_piece() {
        let s = state("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let next = play(&s, "a7a8n");
        assert_eq!(next.board().get(Square::A8), Some(Piece::WHITE_KNIGHT));
        assert_eq!(next.board().get(Square::A7), None);
    }

    #[test]
    fn missing_promotion_rejected() {
        let s = state("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let mv = Move::new(Square::A7, Square::A8);
        assert_eq!(s.apply_move(mv), Err(MoveError::InvalidPromotion { mv }));
    }

    #[test]
    fn superfluous_promotion_rejected() {
        let mv = Move::with_promotion(Square::E2, Square::E4, PieceKind::Queen);
        assert_eq!(
            GameState::starting_position().apply_move(mv),
            Err(MoveError::InvalidPromotion { mv })
        );
    }

    #[test]
    fn illegal_move_rejected() {
        let start = GameState::starting_position();
        let mv = Move::new(Square::E2, Square::E5);
        assert_eq!(start.apply_move(mv), Err(MoveError::IllegalMove { mv }));
        let mv = Move::new(Square::E7, Square::E5);
        assert_eq!(start.apply_move(mv), Err(MoveError::IllegalMove { mv }));
    }

    #[test]
    fn applied_move_refreshes_flags() {
        let s = state("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
        let next = play(&s, "a1a8");
        assert!(next.in_check());
        assert!(!next.is_checkmate());
    }
}
