//! Arbitrary-value support for the Kani model checker.
//!
//! Compiled only under `cfg(kani)`. Generated squares are always on the
//! board; proofs that need off-board coordinates build them directly.

#[cfg(kani)]
use crate::types::{BOARD_SIZE, Color, Piece, PieceId, Square};

#[cfg(kani)]
impl kani::Arbitrary for Color {
    fn any() -> Self {
        if kani::any() {
            Color::White
        } else {
            Color::Black
        }
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Square {
    fn any() -> Self {
        let x: i8 = kani::any();
        let y: i8 = kani::any();
        kani::assume(x >= 0 && x < BOARD_SIZE);
        kani::assume(y >= 0 && y < BOARD_SIZE);
        Square::new(x, y)
    }
}

#[cfg(kani)]
impl kani::Arbitrary for PieceId {
    fn any() -> Self {
        PieceId(kani::any())
    }
}

#[cfg(kani)]
impl kani::Arbitrary for Piece {
    fn any() -> Self {
        let mut piece = Piece::new(kani::any(), kani::any(), kani::any());
        if kani::any() {
            piece.crown();
        }
        piece
    }
}
