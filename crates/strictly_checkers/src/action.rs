//! Host-facing action results.
//!
//! Every invalid action is a non-fatal no-op: the engine reports why the
//! action was ignored and guarantees that no state changed. Hosts surface
//! the reason or drop it silently; nothing here ends the process.

use crate::types::{Color, PieceId, Square};

/// Reason an action was ignored.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// The game has ended; no further actions are accepted.
    #[display("the game is over")]
    GameOver,
    /// No piece stands on the addressed square.
    #[display("no piece at {}", _0)]
    EmptySquare(Square),
    /// The piece identity is not on the board.
    #[display("piece {} is not on the board", _0)]
    UnknownPiece(PieceId),
    /// The addressed piece belongs to the opponent.
    #[display("piece {} does not belong to the player to move", _0)]
    WrongColor(PieceId),
    /// A capture is available elsewhere and this piece cannot capture.
    #[display("piece {} cannot capture while a capture is available", _0)]
    NotForced(PieceId),
    /// A capture chain is running; only the chaining piece may act.
    #[display("a capture chain is in progress")]
    ChainInProgress,
    /// No piece is selected to move.
    #[display("no piece is selected")]
    NoSelection,
    /// The destination is not among the selection's legal moves.
    #[display("{} is not a legal destination", _0)]
    IllegalDestination(Square),
    /// An invariant was violated (postcondition failure).
    #[display("invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for ActionError {}

/// What a completed move led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The mover captured and can capture again; the turn stays with the
    /// same player and the same piece.
    ChainContinues,
    /// The turn passed to the opponent.
    TurnEnded,
    /// The opponent has no legal reply; the mover wins.
    GameOver {
        /// The winning color.
        winner: Color,
    },
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveOutcome::ChainContinues => write!(f, "capture chain continues"),
            MoveOutcome::TurnEnded => write!(f, "turn passed"),
            MoveOutcome::GameOver { winner } => write!(f, "game over, {winner} wins"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ActionError::EmptySquare(Square::new(0, 7)).to_string(),
            "no piece at a1"
        );
        assert_eq!(
            ActionError::IllegalDestination(Square::new(3, 4)).to_string(),
            "d4 is not a legal destination"
        );
        assert_eq!(ActionError::GameOver.to_string(), "the game is over");
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(MoveOutcome::TurnEnded.to_string(), "turn passed");
        assert_eq!(
            MoveOutcome::GameOver {
                winner: Color::White
            }
            .to_string(),
            "game over, white wins"
        );
    }
}
