//! Move generation: pseudo-legal shapes per piece kind, filtered to legal
//! moves by playing each candidate on a scratch copy of the state.

mod king;
mod knights;
mod pawns;
mod sliders;

use crate::board::Board;
use crate::chess_move::Move;
use crate::color::Color;
use crate::game_state::GameState;
use crate::piece_kind::PieceKind;
use crate::square::Square;

use self::king::gen_king;
use self::knights::gen_knight;
use self::pawns::gen_pawn;
use self::sliders::gen_slider;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub(crate) const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Return `true` if `sq` is attacked by any piece of `by_color`.
///
/// Attack patterns are cast outward from `sq` and matched against the
/// attacker's pieces. Pawns count only through their diagonal captures, and
/// castling never contributes, so this never recurses into king safety.
pub fn is_square_attacked(board: &Board, sq: Square, by_color: Color) -> bool {
    let holds = |target: Option<Square>, kinds: &[PieceKind]| {
        target
            .and_then(|t| board.get(t))
            .is_some_and(|p| p.color == by_color && kinds.contains(&p.kind))
    };

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(sq.offset(dr, dc), &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(sq.offset(dr, dc), &[PieceKind::King]))
    {
        return true;
    }

    // An attacking pawn stands one step "behind" sq from its own point of view.
    let pawn_row = -by_color.forward();
    if [-1, 1]
        .into_iter()
        .any(|dc| holds(sq.offset(pawn_row, dc), &[PieceKind::Pawn]))
    {
        return true;
    }

    let first_on_ray = |(dr, dc): (i8, i8)| {
        let mut cur = sq.offset(dr, dc);
        while let Some(s) = cur {
            if board.is_occupied(s) {
                return Some(s);
            }
            cur = s.offset(dr, dc);
        }
        None
    };

    if ORTHOGONAL
        .into_iter()
        .any(|dir| holds(first_on_ray(dir), &[PieceKind::Rook, PieceKind::Queen]))
    {
        return true;
    }

    DIAGONAL
        .into_iter()
        .any(|dir| holds(first_on_ray(dir), &[PieceKind::Bishop, PieceKind::Queen]))
}

/// Generate the pseudo-legal moves of the piece on `from`, whichever side owns it.
///
/// Returns an empty list for an empty square. King safety is ignored except
/// for the castling preconditions.
pub fn pseudo_legal_moves(state: &GameState, from: Square) -> Vec<Move> {
    let mut moves = Vec::new();
    let Some(piece) = state.board().get(from) else {
        return moves;
    };

    match piece.kind {
        PieceKind::Pawn => gen_pawn(state, from, piece.color, &mut moves),
        PieceKind::Knight => gen_knight(state.board(), from, piece.color, &mut moves),
        PieceKind::Bishop => gen_slider(state.board(), from, piece.color, &DIAGONAL, &mut moves),
        PieceKind::Rook => gen_slider(state.board(), from, piece.color, &ORTHOGONAL, &mut moves),
        PieceKind::Queen => {
            gen_slider(state.board(), from, piece.color, &ORTHOGONAL, &mut moves);
            gen_slider(state.board(), from, piece.color, &DIAGONAL, &mut moves);
        }
        PieceKind::King => gen_king(state, from, piece.color, &mut moves),
    }

    moves
}

/// Generate the legal moves of the piece on `from`.
///
/// Empty if `from` is empty or holds a piece of the side not to move.
pub fn legal_moves(state: &GameState, from: Square) -> Vec<Move> {
    match state.board().get(from) {
        Some(piece) if piece.color == state.side_to_move() => pseudo_legal_moves(state, from)
            .into_iter()
            .filter(|&mv| keeps_king_safe(state, mv))
            .collect(),
        _ => Vec::new(),
    }
}

/// Generate every legal move of the side to move, in board order.
pub fn all_legal_moves(state: &GameState) -> Vec<Move> {
    let us = state.side_to_move();
    state
        .board()
        .pieces_of(us)
        .flat_map(|(sq, _)| legal_moves(state, sq))
        .collect()
}

/// Play `mv` on a scratch copy and check the mover's king is not left attacked.
fn keeps_king_safe(state: &GameState, mv: Move) -> bool {
    let us = state.side_to_move();
    let scratch = state.successor(mv);
    match scratch.board().king_square(us) {
        Some(king) => !is_square_attacked(scratch.board(), king, us.flip()),
        None => true,
    }
}

/// Push `from -> to` unless `to` holds one of `color`'s own pieces.
///
/// Returns `true` if the square was empty, so ray walks can continue.
pub(super) fn push_unless_own(
    board: &Board,
    from: Square,
    to: Square,
    color: Color,
    moves: &mut Vec<Move>,
) -> bool {
    match board.color_on(to) {
        None => {
            moves.push(Move::new(from, to));
            true
        }
        Some(owner) => {
            if owner != color {
                moves.push(Move::new(from, to));
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(fen: &str) -> GameState {
        fen.parse().unwrap()
    }

    fn targets(moves: &[Move]) -> Vec<String> {
        let mut out: Vec<String> = moves.iter().map(|m| m.to_uci()).collect();
        out.sort();
        out
    }

    #[test]
    fn starting_position_20_moves() {
        let moves = all_legal_moves(&GameState::starting_position());
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn knight_from_start() {
        let moves = legal_moves(&GameState::starting_position(), Square::G1);
        assert_eq!(targets(&moves), ["g1f3", "g1h3"]);
    }

    #[test]
    fn empty_and_opponent_squares_yield_nothing() {
        let start = GameState::starting_position();
        assert!(legal_moves(&start, Square::E4).is_empty());
        assert!(legal_moves(&start, Square::E7).is_empty());
        assert_eq!(pseudo_legal_moves(&start, Square::E7).len(), 2);
    }

    #[test]
    fn rook_ray_stops_at_first_piece() {
        let s = state("4k3/8/8/8/R2p4/8/8/4K3 w - - 0 1");
        let moves = targets(&legal_moves(&s, Square::A4));
        assert!(moves.contains(&"a4d4".to_string()), "capture included");
        assert!(!moves.contains(&"a4e4".to_string()), "ray stops at capture");
        assert!(moves.contains(&"a4a8".to_string()));
        assert!(moves.contains(&"a4a1".to_string()));
        assert_eq!(moves.len(), 3 + 7);
    }

    #[test]
    fn pinned_knight_zero_moves() {
        let s = state("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
        assert!(legal_moves(&s, Square::E2).is_empty());
        assert_eq!(pseudo_legal_moves(&s, Square::E2).len(), 6);
    }

    #[test]
    fn double_check_king_only() {
        let s = state("4r1k1/8/8/8/8/5n2/8/4K3 w - - 0 1");
        for mv in all_legal_moves(&s) {
            assert_eq!(mv.from, Square::E1, "only king moves resolve double check, got {mv}");
        }
    }

    #[test]
    fn castling_not_through_check() {
        let s = state("4k3/8/b7/8/8/8/8/R3K2R w KQ - 0 1");
        let moves = legal_moves(&s, Square::E1);
        assert!(!moves.contains(&Move::new(Square::E1, Square::G1)));
        assert!(moves.contains(&Move::new(Square::E1, Square::C1)));
    }

    #[test]
    fn castling_needs_rook_on_corner() {
        let s = state("4k3/8/8/8/8/8/8/4K3 w KQ - 0 1");
        let moves = legal_moves(&s, Square::E1);
        assert!(!moves.contains(&Move::new(Square::E1, Square::G1)));
        assert!(!moves.contains(&Move::new(Square::E1, Square::C1)));
    }

    #[test]
    fn queenside_castling_allows_attacked_b_file() {
        // b1 is attacked but the king never crosses it.
        let s = state("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(legal_moves(&s, Square::E1).contains(&Move::new(Square::E1, Square::C1)));
    }

    #[test]
    fn en_passant_legal() {
        let s = state("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1");
        let moves = legal_moves(&s, Square::E5);
        assert!(moves.contains(&Move::new(Square::E5, Square::D6)));
    }

    #[test]
    fn en_passant_discovered_check_illegal() {
        let s = state("4k3/8/8/KPp4r/8/8/8/8 w - c6 0 1");
        let moves = legal_moves(&s, Square::B5);
        assert!(!moves.contains(&Move::new(Square::B5, Square::C6)));
    }

    #[test]
    fn promotion_generates_4_moves() {
        let s = state("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
        let moves = legal_moves(&s, Square::A7);
        assert_eq!(moves.len(), 4);
        assert!(moves.iter().all(|m| m.is_promotion()));
    }

    #[test]
    fn pawn_attacks_are_diagonal_only() {
        let board = state("4k3/8/8/8/4p3/8/8/4K3 w - - 0 1");
        assert!(is_square_attacked(board.board(), Square::D3, Color::Black));
        assert!(is_square_attacked(board.board(), Square::F3, Color::Black));
        assert!(!is_square_attacked(board.board(), Square::E3, Color::Black));
    }

    #[test]
    fn sliders_are_blocked() {
        let s = state("4k3/8/8/8/8/8/4P3/4R1K1 w - - 0 1");
        assert!(is_square_attacked(s.board(), Square::E2, Color::White));
        assert!(!is_square_attacked(s.board(), Square::E3, Color::White));
    }
}
