//! Phases: which affiliation may act, and how the rotation moves on.

mod state;
mod tracker;

pub use state::BattlePhaseState;
pub use tracker::{BattlePhaseTracker, PhaseAdvance};
