//! Turn-progression states.

use crate::types::{Color, PieceId, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Where the engine stands between host actions.
///
/// The selection-carrying states cache the legal destinations of the
/// selected piece; the cache is rebuilt whenever the selection or the board
/// changes, so it always matches a fresh computation. `GameOver` is terminal
/// and owns the winner, which makes "a winner exists exactly when the game
/// has ended" structural rather than a convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for the player to move to select a piece.
    AwaitingSelection,
    /// A piece is selected and may move to one of the cached destinations.
    PieceSelected {
        /// The selected piece.
        piece: PieceId,
        /// Legal destinations for the selection.
        destinations: BTreeSet<Square>,
    },
    /// A capture chain is running: the same piece must keep capturing.
    ChainCapturing {
        /// The chaining piece.
        piece: PieceId,
        /// The remaining capturing hops.
        destinations: BTreeSet<Square>,
    },
    /// The game has ended.
    GameOver {
        /// The player who made the last move.
        winner: Color,
    },
}

impl Phase {
    /// The selected piece, if any.
    pub fn selected(&self) -> Option<PieceId> {
        match self {
            Phase::PieceSelected { piece, .. } | Phase::ChainCapturing { piece, .. } => {
                Some(*piece)
            }
            Phase::AwaitingSelection | Phase::GameOver { .. } => None,
        }
    }

    /// The cached destination set, when a piece is selected.
    pub fn destinations(&self) -> Option<&BTreeSet<Square>> {
        match self {
            Phase::PieceSelected { destinations, .. }
            | Phase::ChainCapturing { destinations, .. } => Some(destinations),
            Phase::AwaitingSelection | Phase::GameOver { .. } => None,
        }
    }

    /// True once the game has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::GameOver { .. })
    }

    /// The winner, present exactly in the terminal phase.
    pub fn winner(&self) -> Option<Color> {
        match self {
            Phase::GameOver { winner } => Some(*winner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_accessors() {
        let piece = PieceId(4);
        let destinations: BTreeSet<Square> = [Square::new(3, 4)].into();
        let phase = Phase::PieceSelected {
            piece,
            destinations: destinations.clone(),
        };
        assert_eq!(phase.selected(), Some(piece));
        assert_eq!(phase.destinations(), Some(&destinations));
        assert!(!phase.is_terminal());
        assert_eq!(phase.winner(), None);
    }

    #[test]
    fn test_terminal_owns_the_winner() {
        let phase = Phase::GameOver {
            winner: Color::Black,
        };
        assert!(phase.is_terminal());
        assert_eq!(phase.winner(), Some(Color::Black));
        assert_eq!(phase.selected(), None);
        assert_eq!(phase.destinations(), None);
    }

    #[test]
    fn test_awaiting_selection_is_empty() {
        let phase = Phase::AwaitingSelection;
        assert_eq!(phase.selected(), None);
        assert_eq!(phase.destinations(), None);
        assert!(!phase.is_terminal());
    }
}
