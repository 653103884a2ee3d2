//! Pure rules engine for two-player checkers on an `8 x 8` board, with
//! mandatory captures, multi-jump chains, and king promotion.
//!
//! The crate owns move legality and turn progression, nothing else. A host
//! translates pointer or key input into [`Game`] calls and renders the
//! result; every invalid action is a non-fatal no-op reported as an
//! [`ActionError`], so misclicks never end the process.
//!
//! # Example
//!
//! ```
//! use strictly_checkers::{Color, Game, MoveOutcome, Square};
//!
//! let mut game = Game::new();
//! assert_eq!(game.current_player(), Color::White);
//!
//! // White steps a man from c3 to d4.
//! game.select_at(Square::new(2, 5))?;
//! assert!(game.is_legal_destination(Square::new(3, 4)));
//! let outcome = game.move_to(Square::new(3, 4))?;
//! assert_eq!(outcome, MoveOutcome::TurnEnded);
//! assert_eq!(game.current_player(), Color::Black);
//! # Ok::<(), strictly_checkers::ActionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod game;
mod kani_support;
mod phase;
mod types;

pub mod contracts;
pub mod invariants;
pub mod rules;

pub use action::{ActionError, MoveOutcome};
pub use board::{Board, PlaceError};
pub use game::Game;
pub use phase::Phase;
pub use types::{BOARD_SIZE, Color, Piece, PieceId, Square};
