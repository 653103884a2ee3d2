//! Contract-based validation for checkers actions.
//!
//! Contracts define correctness through preconditions and postconditions.
//! They formalize the Hoare-style reasoning: {P} action {Q}

use crate::action::ActionError;
use crate::game::Game;
use crate::invariants::{CheckersInvariants, InvariantSet};
use crate::phase::Phase;
use crate::types::{PieceId, Square};
use tracing::instrument;

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// A contract defines preconditions and postconditions for state transitions.
///
/// Contracts formalize Hoare-style reasoning:
/// - Precondition: {P(state, action)} - must hold before applying action
/// - Postcondition: {Q(before, after)} - must hold after applying action
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), ActionError>;

    /// Checks postconditions after applying the action.
    ///
    /// This verifies that the transition maintained system invariants.
    fn post(before: &S, after: &S) -> Result<(), ActionError>;
}

// ─────────────────────────────────────────────────────────────
//  Selection Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: The game has not ended.
pub struct GameIsLive;

impl GameIsLive {
    /// Rejects every action once the terminal phase is reached.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), ActionError> {
        if game.is_game_over() {
            Err(ActionError::GameOver)
        } else {
            Ok(())
        }
    }
}

/// Precondition: No capture chain is running.
pub struct NoChainRunning;

impl NoChainRunning {
    /// A chain locks the turn to the chaining piece until it stops.
    #[instrument(skip(game))]
    pub fn check(game: &Game) -> Result<(), ActionError> {
        if matches!(game.phase(), Phase::ChainCapturing { .. }) {
            Err(ActionError::ChainInProgress)
        } else {
            Ok(())
        }
    }
}

/// Precondition: The piece is alive and belongs to the player to move.
pub struct OwnPiece;

impl OwnPiece {
    /// Distinguishes a dead identity from an opponent's piece.
    #[instrument(skip(game))]
    pub fn check(piece: &PieceId, game: &Game) -> Result<(), ActionError> {
        let found = game
            .piece(*piece)
            .ok_or(ActionError::UnknownPiece(*piece))?;
        if found.color() != game.current_player() {
            Err(ActionError::WrongColor(*piece))
        } else {
            Ok(())
        }
    }
}

/// Precondition: Mandatory capture admits the piece.
pub struct RespectsForcedSet;

impl RespectsForcedSet {
    /// An empty forced set admits every piece; otherwise only members.
    #[instrument(skip(game))]
    pub fn check(piece: &PieceId, game: &Game) -> Result<(), ActionError> {
        if game.forced_pieces().is_empty() || game.is_forced(*piece) {
            Ok(())
        } else {
            Err(ActionError::NotForced(*piece))
        }
    }
}

/// Composite precondition: A selection is legal if the game is live, no
/// chain is running, the piece is the mover's own, and the forced set
/// admits it.
pub struct LegalSelection;

impl LegalSelection {
    /// Validates all preconditions for a selection.
    #[instrument(skip(game))]
    pub fn check(piece: &PieceId, game: &Game) -> Result<(), ActionError> {
        GameIsLive::check(game)?;
        NoChainRunning::check(game)?;
        OwnPiece::check(piece, game)?;
        RespectsForcedSet::check(piece, game)?;
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────
//  Move Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: A piece is selected and offers the destination.
pub struct DestinationOffered;

impl DestinationOffered {
    /// Distinguishes a missing selection from an unreachable square.
    #[instrument(skip(game))]
    pub fn check(destination: &Square, game: &Game) -> Result<(), ActionError> {
        if game.selected().is_none() {
            return Err(ActionError::NoSelection);
        }
        if game.is_legal_destination(*destination) {
            Ok(())
        } else {
            Err(ActionError::IllegalDestination(*destination))
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Contracts (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for selection actions.
///
/// Preconditions:
/// - Game must be live
/// - No capture chain may be running
/// - Piece must be the mover's own
/// - The forced set must admit the piece
///
/// Postconditions:
/// - The full invariant family still holds
pub struct SelectContract;

impl Contract<Game, PieceId> for SelectContract {
    fn pre(game: &Game, action: &PieceId) -> Result<(), ActionError> {
        LegalSelection::check(action, game)
    }

    fn post(_before: &Game, after: &Game) -> Result<(), ActionError> {
        verify_invariants(after)
    }
}

/// Contract for move actions.
///
/// Preconditions:
/// - Game must be live
/// - A piece must be selected and offer the destination
///
/// Postconditions:
/// - The full invariant family still holds
pub struct MoveContract;

impl Contract<Game, Square> for MoveContract {
    fn pre(game: &Game, action: &Square) -> Result<(), ActionError> {
        GameIsLive::check(game)?;
        DestinationOffered::check(action, game)?;
        Ok(())
    }

    fn post(_before: &Game, after: &Game) -> Result<(), ActionError> {
        verify_invariants(after)
    }
}

/// Verifies the full invariant family, folding violations into an error.
#[instrument(skip(game))]
pub fn verify_invariants(game: &Game) -> Result<(), ActionError> {
    CheckersInvariants::check_all(game).map_err(|violations| {
        let descriptions = violations
            .iter()
            .map(|violation| violation.description.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        ActionError::InvariantViolation(descriptions)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::types::Color;

    fn capture_position() -> Game {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        board.place(Color::Black, Square::new(3, 4)).unwrap();
        board.place(Color::Black, Square::new(0, 1)).unwrap();
        Game::with_board(board, Color::White)
    }

    #[test]
    fn test_precondition_own_piece() {
        let game = Game::new();
        let white = game.piece_at(Square::new(2, 5)).unwrap().id();
        let black = game.piece_at(Square::new(1, 2)).unwrap().id();

        assert!(SelectContract::pre(&game, &white).is_ok());
        assert!(matches!(
            SelectContract::pre(&game, &black),
            Err(ActionError::WrongColor(_))
        ));
    }

    #[test]
    fn test_precondition_unknown_piece() {
        let game = Game::new();
        assert!(matches!(
            SelectContract::pre(&game, &PieceId(99)),
            Err(ActionError::UnknownPiece(_))
        ));
    }

    #[test]
    fn test_precondition_respects_forced_set() {
        let game = capture_position();
        let capturer = game.piece_at(Square::new(2, 5)).unwrap().id();
        assert!(RespectsForcedSet::check(&capturer, &game).is_ok());

        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        let idle = board.place(Color::White, Square::new(0, 5)).unwrap();
        board.place(Color::Black, Square::new(3, 4)).unwrap();
        board.place(Color::Black, Square::new(0, 1)).unwrap();
        let game = Game::with_board(board, Color::White);
        assert!(matches!(
            SelectContract::pre(&game, &idle),
            Err(ActionError::NotForced(_))
        ));
    }

    #[test]
    fn test_precondition_no_selection() {
        let game = Game::new();
        assert!(matches!(
            MoveContract::pre(&game, &Square::new(3, 4)),
            Err(ActionError::NoSelection)
        ));
    }

    #[test]
    fn test_precondition_destination_offered() {
        let mut game = Game::new();
        game.select_at(Square::new(2, 5)).unwrap();

        assert!(MoveContract::pre(&game, &Square::new(3, 4)).is_ok());
        assert!(matches!(
            MoveContract::pre(&game, &Square::new(7, 7)),
            Err(ActionError::IllegalDestination(_))
        ));
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let mut game = Game::new();
        let before = game.clone();
        game.select_at(Square::new(2, 5)).unwrap();
        game.move_to(Square::new(3, 4)).unwrap();

        assert!(MoveContract::post(&before, &game).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let mut game = Game::new();
        let before = game.clone();

        // Corrupt the forced set with an identity that is not in play
        game.forced.insert(PieceId(99));

        assert!(matches!(
            MoveContract::post(&before, &game),
            Err(ActionError::InvariantViolation(_))
        ));
    }
}
