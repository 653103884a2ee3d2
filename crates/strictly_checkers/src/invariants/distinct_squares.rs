//! Distinct squares invariant: no two live pieces share a square.

use super::Invariant;
use crate::game::Game;

/// Invariant: every live piece stands alone on an on-board square.
///
/// The board keeps a square index next to the piece map. The invariant
/// holds exactly when the two agree, which also rules out two pieces
/// sharing a square or a piece drifting off the board.
pub struct DistinctSquaresInvariant;

impl Invariant<Game> for DistinctSquaresInvariant {
    fn holds(game: &Game) -> bool {
        let board = game.board();
        if board.occupied.len() != board.pieces.len() {
            return false;
        }
        board.pieces.iter().all(|(id, piece)| {
            *id == piece.id()
                && piece.square().on_board()
                && board.occupied.get(&piece.square()) == Some(id)
        })
    }

    fn description() -> &'static str {
        "every live piece stands alone on an on-board square"
    }
}
