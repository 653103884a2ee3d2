//! Capture priority invariant: available captures suppress simple moves.

use super::Invariant;
use crate::game::Game;
use crate::phase::Phase;
use crate::rules;

/// Invariant: while the player to move can capture anywhere, every
/// destination offered to that player is a two-rank capturing hop.
///
/// The destination set cached in the phase must also equal a fresh
/// computation against the current board, so hosts never act on stale
/// moves.
pub struct CapturePriorityInvariant;

impl Invariant<Game> for CapturePriorityInvariant {
    fn holds(game: &Game) -> bool {
        if matches!(game.phase(), Phase::GameOver { .. }) {
            return true;
        }

        // Cached destinations must agree with a fresh computation
        if let Some(selected) = game.selected() {
            let Some(piece) = game.piece(selected) else {
                return false;
            };
            let gate = rules::side_can_capture(game.board(), game.current_player());
            let fresh = rules::legal_destinations(game.board(), piece, gate);
            if game.legal_destinations() != &fresh {
                return false;
            }
        }

        // Under the gate every offered destination lies two ranks away
        if rules::side_can_capture(game.board(), game.current_player()) {
            for piece in game.board().pieces_of(game.current_player()) {
                let hops = rules::legal_destinations(game.board(), piece, true);
                if hops
                    .iter()
                    .any(|target| (target.y - piece.square().y).abs() != 2)
                {
                    return false;
                }
            }
        }

        true
    }

    fn description() -> &'static str {
        "an available capture suppresses every simple move"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::{Color, Square};
    use std::collections::BTreeSet;

    fn capture_position() -> Game {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        board.place(Color::Black, Square::new(3, 4)).unwrap();
        board.place(Color::Black, Square::new(0, 1)).unwrap();
        Game::with_board(board, Color::White)
    }

    #[test]
    fn test_new_game_holds() {
        assert!(CapturePriorityInvariant::holds(&Game::new()));
    }

    #[test]
    fn test_capture_position_holds() {
        assert!(CapturePriorityInvariant::holds(&capture_position()));
    }

    #[test]
    fn test_stale_destination_cache_violates() {
        let mut game = capture_position();
        let Some(piece) = game.selected() else {
            panic!("capture position auto-selects its lone capturer");
        };

        // Swap the cached capturing hop for the suppressed simple step
        game.phase = Phase::PieceSelected {
            piece,
            destinations: BTreeSet::from([Square::new(1, 4)]),
        };
        assert!(!CapturePriorityInvariant::holds(&game));
    }

    #[test]
    fn test_dangling_selection_violates() {
        let mut game = capture_position();
        let Some(piece) = game.selected() else {
            panic!("capture position auto-selects its lone capturer");
        };
        game.board.remove(piece);
        assert!(!CapturePriorityInvariant::holds(&game));
    }
}
