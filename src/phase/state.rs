//! Battle phase state.

use serde::{Deserialize, Serialize};

use crate::core::SquaddieAffiliation;

/// Whose phase it is and how many full rotations have started.
///
/// Only the [`BattlePhaseTracker`](super::BattlePhaseTracker) changes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlePhaseState {
    current_affiliation: SquaddieAffiliation,
    turn_count: u32,
}

impl BattlePhaseState {
    /// Start of battle: turn 1, `first` acts.
    #[must_use]
    pub fn new(first: SquaddieAffiliation) -> Self {
        Self {
            current_affiliation: first,
            turn_count: 1,
        }
    }

    #[must_use]
    pub fn current_affiliation(&self) -> SquaddieAffiliation {
        self.current_affiliation
    }

    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub(super) fn advance_to(&mut self, affiliation: SquaddieAffiliation, wraps: u32) {
        self.current_affiliation = affiliation;
        self.turn_count += wraps;
    }
}
