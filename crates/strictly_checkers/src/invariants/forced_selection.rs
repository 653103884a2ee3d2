//! Forced selection invariant: mandatory capture steers every selection.

use super::Invariant;
use crate::game::Game;
use crate::phase::Phase;
use crate::rules;

/// Invariant: the forced-capture set is exactly the current player's
/// capturing pieces, and any selection is an own live piece that
/// respects it.
///
/// During a capture chain the board has moved on from the snapshot that
/// built the set, so only membership of the chaining piece is required;
/// in the terminal phase the set is empty.
pub struct ForcedSelectionInvariant;

impl Invariant<Game> for ForcedSelectionInvariant {
    fn holds(game: &Game) -> bool {
        // Whatever the phase, forced pieces are live and owned by the
        // player to move, and so is any selection.
        let owned = game.forced_pieces().iter().all(|id| {
            game.piece(*id)
                .is_some_and(|found| found.color() == game.current_player())
        });
        if !owned {
            return false;
        }
        if let Some(selected) = game.selected()
            && !game
                .piece(selected)
                .is_some_and(|found| found.color() == game.current_player())
        {
            return false;
        }

        match game.phase() {
            Phase::GameOver { .. } => game.forced_pieces().is_empty(),
            Phase::ChainCapturing { piece, .. } => game.is_forced(*piece),
            Phase::AwaitingSelection | Phase::PieceSelected { .. } => {
                let aligned = game.board().pieces_of(game.current_player()).all(|found| {
                    rules::piece_can_capture(game.board(), found) == game.is_forced(found.id())
                });
                if !aligned {
                    return false;
                }
                match game.selected() {
                    Some(selected) => {
                        game.forced_pieces().is_empty() || game.is_forced(selected)
                    }
                    None => true,
                }
            }
        }
    }

    fn description() -> &'static str {
        "the forced-capture set is exactly the capturing pieces of the player to move"
    }
}
