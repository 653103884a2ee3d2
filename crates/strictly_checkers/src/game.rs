//! The game engine: selection, move execution, and turn progression.

use crate::action::{ActionError, MoveOutcome};
use crate::board::Board;
use crate::contracts::{self, Contract, GameIsLive, MoveContract, SelectContract};
use crate::phase::Phase;
use crate::rules;
use crate::types::{Color, Piece, PieceId, Square};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, instrument};

/// A running game of checkers.
///
/// The engine is synchronous and single-caller: every operation runs to
/// completion before the next begins, and either applies fully or leaves
/// the state untouched, reporting the rejection as an [`ActionError`].
///
/// Hosts drive it with three calls: [`select`] or [`select_at`] to pick a
/// piece, [`move_to`] to move it, and the query methods to render.
///
/// [`select`]: Game::select
/// [`select_at`]: Game::select_at
/// [`move_to`]: Game::move_to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameSnapshot")]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) current: Color,
    pub(crate) forced: BTreeSet<PieceId>,
    pub(crate) phase: Phase,
}

impl Game {
    /// Starts a game from the standard starting position, White to move.
    #[instrument]
    pub fn new() -> Self {
        Self::with_board(Board::new(), Color::White)
    }

    /// Starts a game from an arbitrary position.
    ///
    /// The same begin-of-turn computation as turn advancement runs on the
    /// given position, so the forced-capture set, auto-selection, and
    /// game-over detection apply immediately.
    #[instrument(skip(board))]
    pub fn with_board(board: Board, to_move: Color) -> Self {
        let mut game = Self {
            board,
            current: to_move,
            forced: BTreeSet::new(),
            phase: Phase::AwaitingSelection,
        };
        game.begin_turn();
        debug_assert!(
            contracts::verify_invariants(&game).is_ok(),
            "initial position violates engine invariants"
        );
        game
    }

    // ─────────────────────────────────────────────────────────────
    //  Actions
    // ─────────────────────────────────────────────────────────────

    /// Selects the piece standing on `square`.
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn select_at(&mut self, square: Square) -> Result<(), ActionError> {
        GameIsLive::check(self)?;
        let piece = self
            .board
            .piece_at(square)
            .ok_or(ActionError::EmptySquare(square))?
            .id();
        self.select(piece)
    }

    /// Selects `piece`, deselects it if it is already selected, or replaces
    /// the current selection.
    ///
    /// Rejected without effect when the game is over, a capture chain is
    /// running, the piece belongs to the opponent, or a capture is
    /// available and the piece cannot make one.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always ([`LegalSelection`])
    /// - Postconditions checked in debug builds only
    ///
    /// [`LegalSelection`]: crate::contracts::LegalSelection
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn select(&mut self, piece: PieceId) -> Result<(), ActionError> {
        SelectContract::pre(self, &piece)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        if self.phase.selected() == Some(piece) {
            debug!(%piece, "deselected");
            self.phase = Phase::AwaitingSelection;
        } else {
            let destinations = self.destinations_for(piece);
            debug!(%piece, moves = destinations.len(), "selected");
            self.phase = Phase::PieceSelected {
                piece,
                destinations,
            };
        }

        #[cfg(debug_assertions)]
        SelectContract::post(&before, self)?;

        Ok(())
    }

    /// Moves the selected piece to `destination`.
    ///
    /// Removes every piece jumped on the way, relocates the mover, crowns
    /// it on reaching the far rank, and then either continues the capture
    /// chain or hands the turn over. The whole move applies or nothing
    /// does.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always ([`MoveContract`])
    /// - Postconditions checked in debug builds only
    ///
    /// [`MoveContract`]: crate::contracts::MoveContract
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn move_to(&mut self, destination: Square) -> Result<MoveOutcome, ActionError> {
        MoveContract::pre(self, &destination)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let piece = self.phase.selected().ok_or(ActionError::NoSelection)?;
        let origin = self
            .board
            .piece(piece)
            .ok_or(ActionError::UnknownPiece(piece))?
            .square();
        let captured = self.jumped_pieces(origin, destination);

        // Relocation is the only fallible mutation and runs before any
        // other, so a rejected move cannot leave partial state behind.
        self.board
            .relocate(piece, destination)
            .map_err(|_| ActionError::IllegalDestination(destination))?;
        for id in &captured {
            self.board.remove(*id);
        }

        let crowned = self
            .board
            .piece(piece)
            .is_some_and(|moved| !moved.is_king() && destination.y == moved.color().crown_row());
        if crowned {
            self.board.crown(piece);
            debug!(%piece, "crowned");
        }

        debug!(
            %piece,
            from = %origin,
            to = %destination,
            captures = captured.len(),
            "moved"
        );

        // Crowning lands before this check, so a freshly crowned piece may
        // continue its chain backward.
        let chains = !captured.is_empty()
            && self
                .board
                .piece(piece)
                .is_some_and(|moved| rules::piece_can_capture(&self.board, moved));

        let outcome = if chains {
            let destinations = self.destinations_for(piece);
            debug!(%piece, "capture chain continues");
            self.phase = Phase::ChainCapturing {
                piece,
                destinations,
            };
            MoveOutcome::ChainContinues
        } else {
            self.advance_turn()
        };

        #[cfg(debug_assertions)]
        MoveContract::post(&before, self)?;

        Ok(outcome)
    }

    // ─────────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────────

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The engine phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The color to move.
    pub fn current_player(&self) -> Color {
        self.current
    }

    /// The piece standing on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.board.piece_at(square)
    }

    /// Looks up a live piece by identity.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.board.piece(id)
    }

    /// The selected piece, if any.
    pub fn selected(&self) -> Option<PieceId> {
        self.phase.selected()
    }

    /// Legal destinations for the current selection, empty without one.
    pub fn legal_destinations(&self) -> &BTreeSet<Square> {
        static EMPTY: BTreeSet<Square> = BTreeSet::new();
        self.phase.destinations().unwrap_or(&EMPTY)
    }

    /// True when the selected piece may move to `square`.
    pub fn is_legal_destination(&self, square: Square) -> bool {
        self.phase
            .destinations()
            .is_some_and(|destinations| destinations.contains(&square))
    }

    /// The pieces that must be used this turn because they can capture.
    pub fn forced_pieces(&self) -> &BTreeSet<PieceId> {
        &self.forced
    }

    /// True when mandatory capture restricts this turn to `piece` and its
    /// peers in the forced set.
    pub fn is_forced(&self, piece: PieceId) -> bool {
        self.forced.contains(&piece)
    }

    /// True once the game has ended.
    pub fn is_game_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The winner, once the game has ended.
    pub fn winner(&self) -> Option<Color> {
        self.phase.winner()
    }

    // ─────────────────────────────────────────────────────────────
    //  Turn bookkeeping
    // ─────────────────────────────────────────────────────────────

    /// Hands the turn to the opponent and prepares their move.
    fn advance_turn(&mut self) -> MoveOutcome {
        self.current = self.current.opponent();
        self.begin_turn();
        match self.phase {
            Phase::GameOver { winner } => MoveOutcome::GameOver { winner },
            _ => MoveOutcome::TurnEnded,
        }
    }

    /// Recomputes the forced-capture set and mobility for the player to
    /// move.
    ///
    /// A player with no movable piece loses on the spot; a forced set with
    /// a single member is selected automatically.
    fn begin_turn(&mut self) {
        self.phase = Phase::AwaitingSelection;
        let gate = rules::side_can_capture(&self.board, self.current);
        let mut forced = BTreeSet::new();
        let mut mobile = false;
        for piece in self.board.pieces_of(self.current) {
            if rules::legal_destinations(&self.board, piece, gate).is_empty() {
                continue;
            }
            mobile = true;
            // Under the gate a movable piece is exactly a capturing piece.
            if gate {
                forced.insert(piece.id());
            }
        }
        self.forced = forced;

        if !mobile {
            let winner = self.current.opponent();
            debug!(%winner, "no legal move available, game over");
            self.phase = Phase::GameOver { winner };
            return;
        }

        if self.forced.len() == 1
            && let Some(&piece) = self.forced.first()
        {
            let destinations = self.destinations_for(piece);
            debug!(%piece, "auto-selected the only piece able to capture");
            self.phase = Phase::PieceSelected {
                piece,
                destinations,
            };
        }
    }

    /// Fresh legal destinations for `piece` under the current capture gate.
    fn destinations_for(&self, piece: PieceId) -> BTreeSet<Square> {
        match self.board.piece(piece) {
            Some(found) => {
                let gate = rules::side_can_capture(&self.board, self.current);
                rules::legal_destinations(&self.board, found, gate)
            }
            None => BTreeSet::new(),
        }
    }

    /// Identities of the pieces standing strictly between `from` and `to`
    /// on the move diagonal. Empty for a step, one entry for a hop.
    ///
    /// The walk ends at the board edge, so a target the cursor can never
    /// reach does not run it past the coordinate range.
    fn jumped_pieces(&self, from: Square, to: Square) -> Vec<PieceId> {
        let dx = (to.x - from.x).signum();
        let dy = (to.y - from.y).signum();
        let mut captured = Vec::new();
        let mut cursor = from.offset(dx, dy);
        while cursor != to && cursor.on_board() {
            if let Some(piece) = self.board.piece_at(cursor) {
                captured.push(piece.id());
            }
            cursor = cursor.offset(dx, dy);
        }
        captured
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw deserialization shape for [`Game`], checked before it becomes one.
#[derive(Deserialize)]
struct GameSnapshot {
    board: Board,
    current: Color,
    forced: BTreeSet<PieceId>,
    phase: Phase,
}

impl TryFrom<GameSnapshot> for Game {
    type Error = ActionError;

    /// Restores a game from a snapshot, re-verifying the invariant family.
    ///
    /// The board list already re-validates itself; this layer rejects
    /// snapshots whose turn state disagrees with the board, such as a
    /// cached destination the position does not offer.
    fn try_from(snapshot: GameSnapshot) -> Result<Self, Self::Error> {
        let game = Self {
            board: snapshot.board,
            current: snapshot.current,
            forced: snapshot.forced,
            phase: snapshot.phase,
        };
        contracts::verify_invariants(&game)?;
        Ok(game)
    }
}
