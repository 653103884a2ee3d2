//! Capture availability predicates.
//!
//! A capturing hop exists when a diagonal neighbor in one of the piece's
//! scan directions holds an enemy piece and the square immediately beyond
//! it is on the board and empty. These predicates drive mandatory capture:
//! while [`side_can_capture`] holds, no simple step is legal anywhere for
//! that side.

use crate::board::Board;
use crate::types::{Color, Piece};
use tracing::instrument;

/// Checks whether `piece` has at least one capturing hop available.
#[instrument(skip(board))]
pub fn piece_can_capture(board: &Board, piece: &Piece) -> bool {
    let from = piece.square();
    for &dy in piece.rank_steps() {
        for dx in [-1i8, 1] {
            let landing = from.offset(2 * dx, 2 * dy);
            if !landing.on_board() || board.piece_at(landing).is_some() {
                continue;
            }
            if let Some(other) = board.piece_at(from.offset(dx, dy))
                && other.color() != piece.color()
            {
                return true;
            }
        }
    }
    false
}

/// Checks whether any piece of `color` can capture.
#[instrument(skip(board))]
pub fn side_can_capture(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|piece| piece_can_capture(board, piece))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Square;

    fn lookup(board: &Board, square: Square) -> &Piece {
        board.piece_at(square).unwrap()
    }

    #[test]
    fn test_regular_piece_captures_forward() {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        board.place(Color::Black, Square::new(3, 4)).unwrap();
        assert!(piece_can_capture(&board, lookup(&board, Square::new(2, 5))));
        assert!(side_can_capture(&board, Color::White));
    }

    #[test]
    fn test_regular_piece_cannot_capture_backward() {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        board.place(Color::Black, Square::new(3, 6)).unwrap();
        // Each man stands behind the other's scan direction.
        assert!(!piece_can_capture(&board, lookup(&board, Square::new(2, 5))));
        assert!(!piece_can_capture(&board, lookup(&board, Square::new(3, 6))));
    }

    #[test]
    fn test_king_captures_backward() {
        let mut board = Board::empty();
        let id = board.place(Color::White, Square::new(2, 5)).unwrap();
        board.place(Color::Black, Square::new(3, 6)).unwrap();
        board.crown(id);
        assert!(piece_can_capture(&board, lookup(&board, Square::new(2, 5))));
    }

    #[test]
    fn test_blocked_landing_square() {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        board.place(Color::Black, Square::new(3, 4)).unwrap();
        board.place(Color::Black, Square::new(4, 3)).unwrap();
        assert!(!piece_can_capture(&board, lookup(&board, Square::new(2, 5))));
    }

    #[test]
    fn test_landing_off_board() {
        // The hop over h8 would land off the board entirely.
        let mut board = Board::empty();
        board.place(Color::White, Square::new(6, 1)).unwrap();
        board.place(Color::Black, Square::new(7, 0)).unwrap();
        assert!(!piece_can_capture(&board, lookup(&board, Square::new(6, 1))));
        assert!(!side_can_capture(&board, Color::White));
    }

    #[test]
    fn test_own_piece_is_not_a_target() {
        let mut board = Board::empty();
        board.place(Color::White, Square::new(2, 5)).unwrap();
        board.place(Color::White, Square::new(3, 4)).unwrap();
        assert!(!side_can_capture(&board, Color::White));
    }
}
