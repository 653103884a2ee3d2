//! Core domain types for checkers.

use serde::{Deserialize, Serialize};

/// Number of files and ranks on the board.
pub const BOARD_SIZE: i8 = 8;

/// Player color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter,
)]
pub enum Color {
    /// White (moves first, advances toward rank `0`).
    White,
    /// Black (advances toward rank `BOARD_SIZE - 1`).
    Black,
}

impl Color {
    /// Returns the opposing color.
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank step a regular piece of this color advances by.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Rank on which a piece of this color is crowned king.
    pub fn crown_row(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => BOARD_SIZE - 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}

/// A board coordinate.
///
/// `x` is the file counted from the left, `y` the rank counted from Black's
/// side, both zero-based. Values outside `[0, BOARD_SIZE)` are representable
/// so that scans can step off the board and be filtered with [`on_board`];
/// the board itself never stores an off-board square.
///
/// [`on_board`]: Square::on_board
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Square {
    /// File, `0` = leftmost.
    pub x: i8,
    /// Rank, `0` = Black's back row.
    pub y: i8,
}

impl Square {
    /// Creates a square from file and rank.
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// Checks that both coordinates lie in `[0, BOARD_SIZE)`.
    pub const fn on_board(self) -> bool {
        self.x >= 0 && self.x < BOARD_SIZE && self.y >= 0 && self.y < BOARD_SIZE
    }

    /// The square offset by `(dx, dy)`, possibly off the board.
    pub const fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl std::fmt::Display for Square {
    /// Algebraic style, rank `1` nearest White: `(0, 7)` prints as `a1`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !self.on_board() {
            return write!(f, "({},{})", self.x, self.y);
        }
        let file = (b'a' + self.x as u8) as char;
        write!(f, "{}{}", file, BOARD_SIZE - self.y)
    }
}

/// Stable identity of a piece.
///
/// Assigned at placement and never reused within one board, so captures and
/// moves can address a piece independently of where it stands.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct PieceId(pub(crate) u8);

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single checker.
///
/// The color is fixed at creation; the king flag only ever turns on; the
/// square changes as the piece moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    color: Color,
    king: bool,
    square: Square,
}

impl Piece {
    pub(crate) fn new(id: PieceId, color: Color, square: Square) -> Self {
        Self {
            id,
            color,
            king: false,
            square,
        }
    }

    /// The piece's identity.
    pub fn id(&self) -> PieceId {
        self.id
    }

    /// The piece's color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// True once the piece has been crowned.
    pub fn is_king(&self) -> bool {
        self.king
    }

    /// The square the piece stands on.
    pub fn square(&self) -> Square {
        self.square
    }

    /// Rank steps this piece scans: both directions for a king, the color's
    /// forward step otherwise.
    pub fn rank_steps(&self) -> &'static [i8] {
        match (self.king, self.color) {
            (true, _) => &[-1, 1],
            (false, Color::White) => &[-1],
            (false, Color::Black) => &[1],
        }
    }

    pub(crate) fn crown(&mut self) {
        self.king = true;
    }

    pub(crate) fn relocate(&mut self, to: Square) {
        self.square = to;
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rank = if self.king { "king" } else { "man" };
        write!(f, "{} {} at {}", self.color, rank, self.square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_opponent_involution() {
        for color in Color::iter() {
            assert_eq!(color.opponent().opponent(), color);
            assert_ne!(color.opponent(), color);
        }
    }

    #[test]
    fn test_forward_and_crown_row() {
        assert_eq!(Color::White.forward(), -1);
        assert_eq!(Color::Black.forward(), 1);
        assert_eq!(Color::White.crown_row(), 0);
        assert_eq!(Color::Black.crown_row(), BOARD_SIZE - 1);
    }

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(0, 0).on_board());
        assert!(Square::new(7, 7).on_board());
        assert!(!Square::new(-1, 0).on_board());
        assert!(!Square::new(0, 8).on_board());
        assert!(!Square::new(3, 4).offset(0, 4).on_board());
        assert!(Square::new(3, 4).offset(-1, -1).on_board());
    }

    #[test]
    fn test_square_display() {
        assert_eq!(Square::new(0, 7).to_string(), "a1");
        assert_eq!(Square::new(7, 0).to_string(), "h8");
        assert_eq!(Square::new(2, 5).to_string(), "c3");
        assert_eq!(Square::new(8, 0).to_string(), "(8,0)");
    }

    #[test]
    fn test_rank_steps() {
        let white = Piece::new(PieceId(0), Color::White, Square::new(2, 5));
        let black = Piece::new(PieceId(1), Color::Black, Square::new(1, 2));
        assert_eq!(white.rank_steps(), &[-1]);
        assert_eq!(black.rank_steps(), &[1]);

        let mut king = white;
        king.crown();
        assert_eq!(king.rank_steps(), &[-1, 1]);
        assert!(king.is_king());
    }

    #[test]
    fn test_piece_display() {
        let mut piece = Piece::new(PieceId(3), Color::Black, Square::new(1, 2));
        assert_eq!(piece.to_string(), "black man at b6");
        piece.crown();
        assert_eq!(piece.to_string(), "black king at b6");
    }
}
