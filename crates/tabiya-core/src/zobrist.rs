//! Zobrist keys identifying positions for repetition detection.

use crate::color::Color;
use crate::game_state::GameState;
use crate::piece_kind::PieceKind;

const SEED: u64 = 0x5a4f_4252_4953_5421;

const PIECE_SQUARE_BASE: usize = 0;
const SIDE_TO_MOVE: usize = 12 * 64;
const CASTLING_BASE: usize = SIDE_TO_MOVE + 1;
const EN_PASSANT_BASE: usize = CASTLING_BASE + 16;
const KEY_COUNT: usize = EN_PASSANT_BASE + 8;

/// All keys drawn from one xorshift64 stream, laid out as
/// 768 piece-square keys, the side key, 16 castling keys, 8 en passant file keys.
static KEYS: [u64; KEY_COUNT] = {
    let mut keys = [0u64; KEY_COUNT];
    let mut state = SEED;
    let mut i = 0;
    while i < KEY_COUNT {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        keys[i] = state;
        i += 1;
    }
    keys
};

impl GameState {
    /// Return a 64-bit key for the position.
    ///
    /// Two states share a key when placement, side to move, castling rights
    /// and the usable en passant file agree; the move counters are ignored.
    /// An en passant target only counts when a pawn of the side to move
    /// stands ready to capture onto it.
    pub fn position_key(&self) -> u64 {
        let board = self.board();
        let mut key = board.occupied().fold(0u64, |acc, (sq, piece)| {
            acc ^ KEYS[PIECE_SQUARE_BASE + piece.index() * 64 + sq.index()]
        });

        if self.side_to_move() == Color::Black {
            key ^= KEYS[SIDE_TO_MOVE];
        }

        key ^= KEYS[CASTLING_BASE + self.castling().bits() as usize];

        if let Some(ep) = self.en_passant() {
            let us = self.side_to_move();
            let capturable = [-1, 1].into_iter().any(|d_col| {
                ep.offset(-us.forward(), d_col)
                    .and_then(|sq| board.get(sq))
                    .is_some_and(|p| p.color == us && p.kind == PieceKind::Pawn)
            });
            if capturable {
                key ^= KEYS[EN_PASSANT_BASE + ep.col()];
            }
        }

        key
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::KEYS;
    use crate::game_state::GameState;

    #[test]
    fn keys_are_distinct() {
        let unique: HashSet<u64> = KEYS.iter().copied().collect();
        assert_eq!(unique.len(), KEYS.len());
    }

    #[test]
    fn counters_do_not_affect_key() {
        let a: GameState = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
        let b: GameState = "4k3/8/8/8/8/8/8/4K2R w K - 7 30".parse().unwrap();
        assert_eq!(a.position_key(), b.position_key());
    }

    #[test]
    fn side_and_castling_affect_key() {
        let base: GameState = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
        let black: GameState = "4k3/8/8/8/8/8/8/4K2R b K - 0 1".parse().unwrap();
        let no_castle: GameState = "4k3/8/8/8/8/8/8/4K2R w - - 0 1".parse().unwrap();
        assert_ne!(base.position_key(), black.position_key());
        assert_ne!(base.position_key(), no_castle.position_key());
    }

    #[test]
    fn unusable_en_passant_is_ignored() {
        let with_ep: GameState =
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse().unwrap();
        let without: GameState =
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".parse().unwrap();
        assert_eq!(with_ep.position_key(), without.position_key());
    }

    #[test]
    fn usable_en_passant_changes_key() {
        let with_ep: GameState = "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1".parse().unwrap();
        let without: GameState = "4k3/8/8/3pP3/8/8/8/4K3 w - - 0 1".parse().unwrap();
        assert_ne!(with_ep.position_key(), without.position_key());
    }
}
