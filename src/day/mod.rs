//! Daytime operations.
//!
//! Everything here is an `impl GameState` block driven by the moderator
//! between nights: votes, morning ammunition, the device determination
//! mini-phase and alliance contamination. Each elimination path runs the
//! curse chain, the alliance bookkeeping and the win check.

pub mod alliance;
pub mod device;
pub mod morning;
pub mod vote;

pub use alliance::ContaminationResolution;
pub use morning::{MorningShotOutcome, NeutralizedBy};
pub use vote::EliminationOutcome;
