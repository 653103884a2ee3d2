//! Board state: the live pieces and where they stand.
//!
//! Pieces are keyed by identity, with a second index keyed by square. All
//! mutation funnels through methods that keep the two maps in lock-step, so
//! one-piece-per-square holds by construction rather than by caller
//! discipline.

use crate::types::{BOARD_SIZE, Color, Piece, PieceId, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

/// Rejected piece placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum PlaceError {
    /// The square lies outside the board.
    #[display("square {} is off the board", _0)]
    OffBoard(Square),
    /// Another piece already occupies the square.
    #[display("square {} is occupied", _0)]
    Occupied(Square),
    /// A piece with this identity already exists.
    #[display("piece {} already exists", _0)]
    DuplicateId(PieceId),
}

impl std::error::Error for PlaceError {}

/// The set of live pieces on an `8 x 8` board.
///
/// Serializes as a flat list of pieces; deserialization rebuilds the square
/// index and rejects lists that break the occupancy rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "Vec<Piece>", try_from = "Vec<Piece>")]
pub struct Board {
    pub(crate) pieces: BTreeMap<PieceId, Piece>,
    pub(crate) occupied: BTreeMap<Square, PieceId>,
    next_id: u8,
}

impl Board {
    /// The standard starting position: twelve pieces per side on the dark
    /// squares of the three ranks nearest each player.
    pub fn new() -> Self {
        let mut board = Self::empty();
        for color in Color::iter() {
            let rows = match color {
                Color::Black => 0..3,
                Color::White => BOARD_SIZE - 3..BOARD_SIZE,
            };
            for y in rows {
                for x in 0..BOARD_SIZE {
                    if (x + y) % 2 == 1 {
                        let id = PieceId(board.next_id);
                        board.insert_piece(Piece::new(id, color, Square::new(x, y)));
                    }
                }
            }
        }
        board
    }

    /// A board with no pieces.
    pub fn empty() -> Self {
        Self {
            pieces: BTreeMap::new(),
            occupied: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Places a new regular piece and returns its identity.
    ///
    /// Identities increase monotonically. Once the watermark saturates on a
    /// live piece, placement fails rather than reissue its id.
    pub fn place(&mut self, color: Color, square: Square) -> Result<PieceId, PlaceError> {
        if !square.on_board() {
            return Err(PlaceError::OffBoard(square));
        }
        if self.occupied.contains_key(&square) {
            return Err(PlaceError::Occupied(square));
        }
        let id = PieceId(self.next_id);
        if self.pieces.contains_key(&id) {
            return Err(PlaceError::DuplicateId(id));
        }
        self.insert_piece(Piece::new(id, color, square));
        Ok(id)
    }

    /// Crowns the piece with identity `id`. No-op if the piece is gone.
    pub fn crown(&mut self, id: PieceId) {
        if let Some(piece) = self.pieces.get_mut(&id) {
            piece.crown();
        }
    }

    /// Removes the piece with identity `id` from play.
    ///
    /// Idempotent: removing an already-removed piece changes nothing.
    pub(crate) fn remove(&mut self, id: PieceId) {
        if let Some(piece) = self.pieces.remove(&id) {
            self.occupied.remove(&piece.square());
        }
    }

    /// Moves the piece with identity `id` to `to`, keeping the square index
    /// in step.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) -> Result<(), PlaceError> {
        if !to.on_board() {
            return Err(PlaceError::OffBoard(to));
        }
        if self.occupied.contains_key(&to) {
            return Err(PlaceError::Occupied(to));
        }
        if let Some(piece) = self.pieces.get_mut(&id) {
            self.occupied.remove(&piece.square());
            piece.relocate(to);
            self.occupied.insert(to, id);
        }
        Ok(())
    }

    /// Looks up a live piece by identity.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// The piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.occupied.get(&square).and_then(|id| self.pieces.get(id))
    }

    /// Iterates over every live piece.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.values()
    }

    /// Iterates over the live pieces of one color.
    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces.values().filter(move |piece| piece.color() == color)
    }

    /// Number of live pieces.
    pub fn count(&self) -> usize {
        self.pieces.len()
    }

    /// Number of live pieces of one color.
    pub fn count_of(&self, color: Color) -> usize {
        self.pieces_of(color).count()
    }

    /// Renders the position as an ASCII grid, rank `8` on top.
    ///
    /// White pieces print as `w` (`W` for kings), black as `b` (`B`),
    /// empty squares as `.`.
    pub fn display(&self) -> String {
        let mut out = String::new();
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let glyph = match self.piece_at(Square::new(x, y)) {
                    Some(piece) => match (piece.color(), piece.is_king()) {
                        (Color::White, false) => 'w',
                        (Color::White, true) => 'W',
                        (Color::Black, false) => 'b',
                        (Color::Black, true) => 'B',
                    },
                    None => '.',
                };
                out.push(glyph);
                if x < BOARD_SIZE - 1 {
                    out.push(' ');
                }
            }
            if y < BOARD_SIZE - 1 {
                out.push('\n');
            }
        }
        out
    }

    fn insert_piece(&mut self, piece: Piece) {
        self.occupied.insert(piece.square(), piece.id());
        self.next_id = self.next_id.max(piece.id().0.saturating_add(1));
        self.pieces.insert(piece.id(), piece);
    }
}

// Equality covers the pieces and the square index. The id watermark is
// dropped by serialization and rebuilt on restore, so it stays out.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces && self.occupied == other.occupied
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Board> for Vec<Piece> {
    fn from(board: Board) -> Self {
        board.pieces.into_values().collect()
    }
}

impl TryFrom<Vec<Piece>> for Board {
    type Error = PlaceError;

    fn try_from(pieces: Vec<Piece>) -> Result<Self, PlaceError> {
        let mut board = Board::empty();
        for piece in pieces {
            if !piece.square().on_board() {
                return Err(PlaceError::OffBoard(piece.square()));
            }
            if board.pieces.contains_key(&piece.id()) {
                return Err(PlaceError::DuplicateId(piece.id()));
            }
            if board.occupied.contains_key(&piece.square()) {
                return Err(PlaceError::Occupied(piece.square()));
            }
            board.insert_piece(piece);
        }
        Ok(board)
    }
}
