//! Pure move logic.
//!
//! Every function here is a pure read of a board snapshot, separated from
//! turn state so the rules can be tested and checked in isolation. The
//! engine wires them together; hosts may also call them directly, for
//! example to paint capture hints.

pub mod capture;
pub mod destinations;

pub use capture::{piece_can_capture, side_can_capture};
pub use destinations::legal_destinations;
