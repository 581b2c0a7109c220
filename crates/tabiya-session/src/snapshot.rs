//! Serializable views of a session: the state snapshot and legal-move listing.

use serde::Serialize;

use tabiya_core::{Color, GameState, GameStatus, Move, PieceKind, Square};

/// A read-only picture of the game, shaped for a UI collaborator.
///
/// `board[row][col]` holds a piece identifier such as `"WhitePawn"`, with
/// row 0 being rank 8 and column 0 being file a.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub board: [[Option<String>; 8]; 8],
    pub current_player: Color,
    pub in_check: bool,
    pub is_checkmate: bool,
    pub is_stalemate: bool,
    pub fen: String,
    pub status: GameStatus,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}

impl Snapshot {
    /// Capture `state` together with the session-level `status`.
    pub fn capture(state: &GameState, status: GameStatus) -> Snapshot {
        let board = state
            .board()
            .rows()
            .map(|row| row.map(|square| square.map(|piece| piece.identifier())));

        Snapshot {
            board,
            current_player: state.side_to_move(),
            in_check: state.in_check(),
            is_checkmate: state.is_checkmate(),
            is_stalemate: state.is_stalemate(),
            fen: state.to_fen(),
            status,
            halfmove_clock: state.halfmove_clock(),
            fullmove_number: state.fullmove_number(),
        }
    }
}

/// One reachable destination of a piece, with the promotion choices it offers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegalMove {
    pub from_row: usize,
    pub from_col: usize,
    pub to_row: usize,
    pub to_col: usize,
    /// Promotion pieces, strongest first; empty for non-promoting moves.
    pub promotions: Vec<PieceKind>,
}

impl LegalMove {
    fn new(from: Square, to: Square) -> LegalMove {
        LegalMove {
            from_row: from.row(),
            from_col: from.col(),
            to_row: to.row(),
            to_col: to.col(),
            promotions: Vec::new(),
        }
    }

    /// Collapse generated moves into one entry per destination square.
    ///
    /// Destinations keep the order in which they were first generated.
    pub fn group(moves: &[Move]) -> Vec<LegalMove> {
        let mut grouped: Vec<LegalMove> = Vec::new();
        for mv in moves {
            let found = grouped
                .iter()
                .position(|entry| entry.to_row == mv.to.row() && entry.to_col == mv.to.col());
            let index = match found {
                Some(index) => index,
                None => {
                    grouped.push(LegalMove::new(mv.from, mv.to));
                    grouped.len() - 1
                }
            };
            if let Some(kind) = mv.promotion {
                grouped[index].promotions.push(kind);
            }
        }
        grouped
    }

    /// The destination in algebraic notation.
    pub fn to_algebraic(&self) -> String {
        Square::new(self.to_row, self.to_col)
            .map(|sq| sq.to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabiya_core::movegen::legal_moves;

    #[test]
    fn start_snapshot_shape() {
        let state = GameState::starting_position();
        let snap = Snapshot::capture(&state, GameStatus::Ongoing);
        assert_eq!(snap.board[0][0].as_deref(), Some("BlackRook"));
        assert_eq!(snap.board[0][4].as_deref(), Some("BlackKing"));
        assert_eq!(snap.board[6][3].as_deref(), Some("WhitePawn"));
        assert_eq!(snap.board[7][3].as_deref(), Some("WhiteQueen"));
        assert_eq!(snap.board[4][4], None);
        assert_eq!(snap.current_player, Color::White);
        assert_eq!(snap.fen, tabiya_core::STARTING_FEN);
    }

    #[test]
    fn snapshot_json_fields() {
        let state = GameState::starting_position();
        let snap = Snapshot::capture(&state, GameStatus::Ongoing);
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["current_player"], "white");
        assert_eq!(json["in_check"], false);
        assert_eq!(json["board"][7][4], "WhiteKing");
        assert!(json["board"][3][3].is_null());
        assert_eq!(json["status"]["kind"], "ongoing");
        assert_eq!(json["fullmove_number"], 1);
    }

    #[test]
    fn checkmate_status_names_winner() {
        let json = serde_json::to_value(GameStatus::Checkmate {
            winner: Color::Black,
        })
        .unwrap();
        assert_eq!(json["kind"], "checkmate");
        assert_eq!(json["winner"], "black");
    }

    #[test]
    fn promotions_grouped_per_destination() {
        let state: GameState = "1r5k/P7/8/8/8/8/8/K7 w - - 0 1".parse().unwrap();
        let grouped = LegalMove::group(&legal_moves(&state, Square::A7));
        assert_eq!(grouped.len(), 2);
        for entry in &grouped {
            assert_eq!(
                entry.promotions,
                vec![
                    PieceKind::Queen,
                    PieceKind::Rook,
                    PieceKind::Bishop,
                    PieceKind::Knight
                ]
            );
        }
        let destinations: Vec<String> = grouped.iter().map(LegalMove::to_algebraic).collect();
        assert!(destinations.contains(&"a8".to_string()));
        assert!(destinations.contains(&"b8".to_string()));

        let json = serde_json::to_value(&grouped[0]).unwrap();
        assert_eq!(json["from_row"], 1);
        assert_eq!(json["from_col"], 0);
        assert_eq!(json["to_row"], 0);
        assert_eq!(json["promotions"][0], "queen");
    }

    #[test]
    fn ordinary_moves_have_no_promotions() {
        let state = GameState::starting_position();
        let grouped = LegalMove::group(&legal_moves(&state, Square::G1));
        assert_eq!(grouped.len(), 2);
        assert!(grouped.iter().all(|entry| entry.promotions.is_empty()));
    }
}
