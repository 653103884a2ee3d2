//! Legal destination computation.

use crate::board::Board;
use crate::types::{Piece, Square};
use std::collections::BTreeSet;
use tracing::instrument;

/// Computes the squares `piece` may move to.
///
/// Each scan direction yields at most one destination: the adjacent square
/// when it is empty, or the landing square behind an adjacent enemy when
/// that landing is on the board and empty. Squares held by either color are
/// never offered, and neither is anything off the board.
///
/// With `captures_only` set, adjacent-empty steps are suppressed and only
/// capturing hops remain. Callers raise the flag whenever any piece of the
/// moving side can capture, which makes capture mandatory across the whole
/// side rather than per piece.
#[instrument(skip(board))]
pub fn legal_destinations(board: &Board, piece: &Piece, captures_only: bool) -> BTreeSet<Square> {
    let mut destinations = BTreeSet::new();
    let from = piece.square();

    for &dy in piece.rank_steps() {
        for dx in [-1i8, 1] {
            let neighbor = from.offset(dx, dy);
            if !neighbor.on_board() {
                continue;
            }
            match board.piece_at(neighbor) {
                None => {
                    if !captures_only {
                        destinations.insert(neighbor);
                    }
                }
                Some(other) if other.color() != piece.color() => {
                    let landing = from.offset(2 * dx, 2 * dy);
                    if landing.on_board() && board.piece_at(landing).is_none() {
                        destinations.insert(landing);
                    }
                }
                Some(_) => {}
            }
        }
    }

    destinations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    fn destinations_of(board: &Board, square: Square, captures_only: bool) -> BTreeSet<Square> {
        let piece = board.piece_at(square).unwrap();
        legal_destinations(board, piece, captures_only)
    }

    #[test]
    fn test_regular_piece_steps_forward() {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        let expected: BTreeSet<Square> = [Square::new(1, 4), Square::new(3, 4)].into();
        assert_eq!(destinations_of(&board, Square::new(2, 5), false), expected);
    }

    #[test]
    fn test_captures_only_suppresses_steps() {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        board.place(Color::Black, Square::new(3, 4)).unwrap();

        let all = destinations_of(&board, Square::new(2, 5), false);
        let expected: BTreeSet<Square> = [Square::new(1, 4), Square::new(4, 3)].into();
        assert_eq!(all, expected);

        let captures = destinations_of(&board, Square::new(2, 5), true);
        let expected: BTreeSet<Square> = [Square::new(4, 3)].into();
        assert_eq!(captures, expected);
    }

    #[test]
    fn test_hop_offered_when_step_blocked() {
        // An enemy neighbor blocks the step onto its square but opens the
        // hop over it.
        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        board.place(Color::Black, Square::new(3, 4)).unwrap();
        board.place(Color::White, Square::new(1, 4)).unwrap();
        let expected: BTreeSet<Square> = [Square::new(4, 3)].into();
        assert_eq!(destinations_of(&board, Square::new(2, 5), false), expected);
    }

    #[test]
    fn test_king_scans_all_four_directions() {
        let mut board = Board::empty();
        let id = board.place(Color::White, Square::new(4, 3)).unwrap();
        board.crown(id);
        let expected: BTreeSet<Square> = [
            Square::new(3, 2),
            Square::new(5, 2),
            Square::new(3, 4),
            Square::new(5, 4),
        ]
        .into();
        assert_eq!(destinations_of(&board, Square::new(4, 3), false), expected);
    }

    #[test]
    fn test_king_never_jumps_own_piece() {
        let mut board = Board::empty();
        let id = board.place(Color::White, Square::new(4, 3)).unwrap();
        board.crown(id);
        board.place(Color::White, Square::new(3, 2)).unwrap();
        let destinations = destinations_of(&board, Square::new(4, 3), false);
        assert!(!destinations.contains(&Square::new(3, 2)));
        assert!(!destinations.contains(&Square::new(2, 1)));
    }

    #[test]
    fn test_edge_squares_stay_on_board() {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(0, 5)).unwrap();
        let expected: BTreeSet<Square> = [Square::new(1, 4)].into();
        assert_eq!(destinations_of(&board, Square::new(0, 5), false), expected);
    }

    #[test]
    fn test_hop_landing_off_board_is_discarded() {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(6, 1)).unwrap();
        board.place(Color::Black, Square::new(7, 0)).unwrap();
        let expected: BTreeSet<Square> = [Square::new(5, 0)].into();
        assert_eq!(destinations_of(&board, Square::new(6, 1), false), expected);
    }

    #[test]
    fn test_blocked_piece_has_no_destinations() {
        let mut board = Board::empty();
        board.place(Color::Black, Square::new(1, 6)).unwrap();
        board.place(Color::Black, Square::new(0, 7)).unwrap();
        board.place(Color::Black, Square::new(2, 7)).unwrap();
        assert!(destinations_of(&board, Square::new(1, 6), false).is_empty());
    }
}
