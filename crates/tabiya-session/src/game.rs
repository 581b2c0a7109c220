//! The game session: one mutable game exposing the public contract.

use tracing::{debug, info, warn};

use tabiya_core::movegen::legal_moves;
use tabiya_core::rules;
use tabiya_core::{
    BoardError, FenError, GameState, GameStatus, Move, MoveError, PieceKind, Square,
};

use crate::snapshot::{LegalMove, Snapshot};

/// A game in progress, with its move history and the position keys needed
/// for repetition detection.
///
/// Every operation either succeeds completely or leaves the game untouched.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
    history: Vec<Move>,
    /// Keys of every position reached since the game began or was loaded,
    /// including the current one.
    positions: Vec<u64>,
}

impl Game {
    /// Start a game from the standard initial position.
    pub fn new() -> Game {
        Game::with_state(GameState::starting_position())
    }

    /// Start a game from a FEN record.
    pub fn from_fen(fen: &str) -> Result<Game, FenError> {
        Ok(Game::with_state(fen.parse()?))
    }

    fn with_state(state: GameState) -> Game {
        Game {
            state,
            history: Vec::new(),
            positions: vec![state.position_key()],
        }
    }

    /// Replace the current game with the position in `fen`.
    ///
    /// On failure the game in progress is kept as it was.
    pub fn load_fen(&mut self, fen: &str) -> Result<Snapshot, FenError> {
        match Game::from_fen(fen) {
            Ok(game) => {
                *self = game;
                info!(fen = %fen.trim(), "position loaded");
                Ok(self.state())
            }
            Err(e) => {
                warn!(error = %e, fen = %fen.trim(), "rejected FEN");
                Err(e)
            }
        }
    }

    /// Return to the standard initial position and forget the history.
    pub fn reset(&mut self) {
        *self = Game::new();
        info!("game reset");
    }

    /// Snapshot of the current position.
    pub fn state(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.status())
    }

    /// The underlying position.
    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    /// Encode the current position as FEN.
    pub fn to_fen(&self) -> String {
        self.state.to_fen()
    }

    /// Moves played since the game began or was loaded.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The move history as UCI strings.
    pub fn history_uci(&self) -> Vec<String> {
        self.history.iter().map(|mv| mv.to_uci()).collect()
    }

    /// Legal destinations of the piece on `from`.
    ///
    /// Empty when the square is empty or holds a piece of the side not to move.
    pub fn legal_moves(&self, from: Square) -> Vec<LegalMove> {
        LegalMove::group(&legal_moves(&self.state, from))
    }

    /// [`Game::legal_moves`] addressed by raw row and column.
    pub fn legal_moves_at(&self, row: usize, col: usize) -> Result<Vec<LegalMove>, BoardError> {
        Ok(self.legal_moves(Square::new(row, col)?))
    }

    /// Does moving from `from` to `to` need a promotion piece?
    ///
    /// True when `from` holds a pawn of the side to move and `to` lies on that
    /// pawn's last rank; legality is not checked.
    pub fn is_promotion_move(&self, from: Square, to: Square) -> bool {
        let us = self.state.side_to_move();
        self.state
            .board()
            .get(from)
            .is_some_and(|piece| piece.color == us && piece.kind == PieceKind::Pawn)
            && to.row() == us.promotion_row() as usize
    }

    /// Apply a move given by its squares and optional promotion.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Snapshot, MoveError> {
        let mv = Move {
            from,
            to,
            promotion,
        };
        self.play(mv)
    }

    /// [`Game::make_move`] addressed by raw rows and columns.
    pub fn make_move_at(
        &mut self,
        from_row: usize,
        from_col: usize,
        to_row: usize,
        to_col: usize,
        promotion: Option<PieceKind>,
    ) -> Result<Snapshot, MoveError> {
        let from = Square::new(from_row, from_col)?;
        let to = Square::new(to_row, to_col)?;
        self.make_move(from, to, promotion)
    }

    /// Apply `mv` if it is legal and return the new snapshot.
    pub fn play(&mut self, mv: Move) -> Result<Snapshot, MoveError> {
        let next = match self.state.apply_move(mv) {
            Ok(next) => next,
            Err(e) => {
                warn!(error = %e, fen = %self.state, "move rejected");
                return Err(e);
            }
        };

        self.state = next;
        self.history.push(mv);
        self.positions.push(next.position_key());

        let snapshot = self.state();
        debug!(%mv, fen = %snapshot.fen, status = ?snapshot.status, "move applied");
        Ok(snapshot)
    }

    /// Has the current position occurred at least three times?
    pub fn is_threefold_repetition(&self) -> bool {
        let current = self.state.position_key();
        self.positions.iter().filter(|&&key| key == current).count() >= 3
    }

    /// Classify the current position, including repetition.
    pub fn status(&self) -> GameStatus {
        match rules::status(&self.state) {
            GameStatus::Ongoing if self.is_threefold_repetition() => {
                GameStatus::ThreefoldRepetition
            }
            status => status,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabiya_core::{Color, STARTING_FEN};

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn play_all(game: &mut Game, moves: &[&str]) {
        for uci in moves {
            game.play(Move::from_uci(uci).unwrap()).unwrap();
        }
    }

    #[test]
    fn new_game_snapshot() {
        let game = Game::new();
        let snap = game.state();
        assert_eq!(snap.fen, STARTING_FEN);
        assert_eq!(snap.current_player, Color::White);
        assert_eq!(snap.status, GameStatus::Ongoing);
        assert!(game.history().is_empty());
    }

    #[test]
    fn legal_moves_for_pawn() {
        let game = Game::new();
        let moves = game.legal_moves(sq("e2"));
        let targets: Vec<String> = moves.iter().map(LegalMove::to_algebraic).collect();
        assert_eq!(targets, vec!["e3", "e4"]);
    }

    #[test]
    fn legal_moves_empty_for_empty_or_enemy_square() {
        let game = Game::new();
        assert!(game.legal_moves(sq("e4")).is_empty());
        assert!(game.legal_moves(sq("e7")).is_empty());
    }

    #[test]
    fn legal_moves_at_checks_bounds() {
        let game = Game::new();
        assert_eq!(game.legal_moves_at(6, 4).unwrap().len(), 2);
        assert_eq!(
            game.legal_moves_at(8, 0),
            Err(BoardError::OutOfBounds { row: 8, col: 0 })
        );
    }

    #[test]
    fn make_move_updates_state_and_history() {
        let mut game = Game::new();
        let snap = game.make_move(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(snap.current_player, Color::Black);
        assert_eq!(snap.board[4][4].as_deref(), Some("WhitePawn"));
        assert_eq!(game.history_uci(), vec!["e2e4"]);
        assert_eq!(
            game.to_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn rejected_move_leaves_game_unchanged() {
        let mut game = Game::new();
        let before = game.state();
        let err = game.make_move(sq("e2"), sq("e5"), None).unwrap_err();
        assert!(matches!(err, MoveError::IllegalMove { .. }));
        assert_eq!(game.state(), before);
        assert!(game.history().is_empty());
    }

    #[test]
    fn make_move_at_rejects_out_of_bounds() {
        let mut game = Game::new();
        let err = game.make_move_at(6, 4, 9, 4, None).unwrap_err();
        assert_eq!(err, MoveError::Board(BoardError::OutOfBounds { row: 9, col: 4 }));
        let snap = game.make_move_at(6, 4, 4, 4, None).unwrap();
        assert_eq!(snap.current_player, Color::Black);
    }

    #[test]
    fn failed_fen_load_keeps_game() {
        let mut game = Game::new();
        play_all(&mut game, &["e2e4", "e7e5"]);
        let before = game.to_fen();
        assert!(game.load_fen("not a fen").is_err());
        assert_eq!(game.to_fen(), before);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn fen_load_clears_history() {
        let mut game = Game::new();
        play_all(&mut game, &["d2d4"]);
        let snap = game.load_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(snap.fen, "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        assert!(game.history().is_empty());
    }

    #[test]
    fn reset_returns_to_start() {
        let mut game = Game::new();
        play_all(&mut game, &["g1f3", "g8f6"]);
        game.reset();
        assert_eq!(game.to_fen(), STARTING_FEN);
        assert!(game.history().is_empty());
    }

    #[test]
    fn promotion_probe() {
        let game = Game::from_fen("k7/4P3/8/8/8/8/1p6/4K3 w - - 0 1").unwrap();
        assert!(game.is_promotion_move(sq("e7"), sq("e8")));
        assert!(!game.is_promotion_move(sq("e1"), sq("e2")));
        // Black's pawn does not promote while White is to move.
        assert!(!game.is_promotion_move(sq("b2"), sq("b1")));
    }

    #[test]
    fn threefold_repetition_is_reported() {
        let mut game = Game::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        play_all(&mut game, &shuffle);
        assert_eq!(game.status(), GameStatus::Ongoing);
        play_all(&mut game, &shuffle);
        assert!(game.is_threefold_repetition());
        assert_eq!(game.status(), GameStatus::ThreefoldRepetition);
        // Draws never block play.
        game.make_move(sq("e2"), sq("e4"), None).unwrap();
        assert_eq!(game.status(), GameStatus::Ongoing);
    }

    #[test]
    fn checkmate_status() {
        let mut game = Game::new();
        play_all(&mut game, &["f2f3", "e7e5", "g2g4"]);
        let snap = game.make_move(sq("d8"), sq("h4"), None).unwrap();
        assert!(snap.is_checkmate);
        assert_eq!(
            snap.status,
            GameStatus::Checkmate {
                winner: Color::Black
            }
        );
    }
}
