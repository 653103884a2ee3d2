//! Formal verification of invariants using Kani model checker.
//!
//! These proof harnesses mathematically verify that engine properties hold
//! for ALL possible values (bounded).

#[cfg(kani)]
mod proofs {
    use crate::invariants::{DistinctSquaresInvariant, Invariant};
    use crate::{BOARD_SIZE, Board, Color, Game, Square};

    /// Verify opposing colors flip back.
    #[kani::proof]
    fn verify_opponent_involution() {
        let color: Color = kani::any();
        assert_eq!(color.opponent().opponent(), color);
        assert_ne!(color.opponent(), color);
    }

    /// Verify a color's forward step points at its crowning rank.
    #[kani::proof]
    fn verify_forward_points_at_crown_row() {
        let color: Color = kani::any();
        let expected = if color.forward() < 0 { 0 } else { BOARD_SIZE - 1 };
        assert_eq!(color.crown_row(), expected);
    }

    /// Verify offsetting a square is reversible within scan range.
    #[kani::proof]
    fn verify_offset_round_trip() {
        let square: Square = kani::any();
        let dx: i8 = kani::any();
        let dy: i8 = kani::any();
        kani::assume(dx >= -2 && dx <= 2);
        kani::assume(dy >= -2 && dy <= 2);
        assert_eq!(square.offset(dx, dy).offset(-dx, -dy), square);
    }

    /// Verify DistinctSquaresInvariant survives arbitrary placements.
    ///
    /// Proves: the placement API cannot alias two pieces onto one square.
    #[kani::proof]
    #[kani::unwind(8)]
    fn verify_placement_keeps_squares_distinct() {
        let mut board = Board::empty();
        let first: Square = kani::any();
        let second: Square = kani::any();
        let _ = board.place(Color::White, first);
        let _ = board.place(Color::Black, second);

        let game = Game::with_board(board, Color::White);
        assert!(
            DistinctSquaresInvariant::holds(&game),
            "DistinctSquaresInvariant violated"
        );
    }
}
