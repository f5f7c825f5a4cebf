//! Phase rotation.
//!
//! The rotation is the configured list of affiliations. When the active team
//! has nobody able to act, the tracker moves to the next affiliation that
//! still has living squaddies. Passing the end of the list wraps to the
//! start and begins a new turn.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::state::BattlePhaseState;
use crate::core::SquaddieAffiliation;
use crate::squaddie::ObjectRepository;

/// Result of a successful advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseAdvance {
    pub from: SquaddieAffiliation,
    pub to: SquaddieAffiliation,

    /// True if the rotation wrapped and the turn count went up.
    pub new_turn: bool,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BattlePhaseTracker;

impl BattlePhaseTracker {
    /// Check whether the active team is out of actions.
    #[must_use]
    pub fn should_advance(phase: &BattlePhaseState, repository: &ObjectRepository) -> bool {
        !repository.can_team_act(phase.current_affiliation())
    }

    /// Move to the next affiliation in `rotation` that has living squaddies.
    ///
    /// The active affiliation itself is the last candidate, one full
    /// rotation later. Returns `None` and leaves `phase` unchanged if no
    /// affiliation has anyone left.
    ///
    /// Panics if `rotation` is empty.
    pub fn advance(
        phase: &mut BattlePhaseState,
        rotation: &[SquaddieAffiliation],
        repository: &ObjectRepository,
    ) -> Option<PhaseAdvance> {
        assert!(!rotation.is_empty(), "Phase rotation needs at least one affiliation");

        let from = phase.current_affiliation();
        let start = rotation.iter().position(|affiliation| *affiliation == from);
        let mut wraps = 0;

        for step in 1..=rotation.len() {
            let index = match start {
                Some(start) => (start + step) % rotation.len(),
                None => step - 1,
            };
            if index == 0 && start.is_some() {
                wraps += 1;
            }

            let candidate = rotation[index];
            if !repository.has_living_squaddies(candidate) {
                debug!(affiliation = %candidate, "Skipping phase with no squaddies");
                continue;
            }

            phase.advance_to(candidate, wraps);
            info!(%from, to = %candidate, turn = phase.turn_count(), "Phase advanced");
            return Some(PhaseAdvance {
                from,
                to: candidate,
                new_turn: wraps > 0,
            });
        }

        None
    }
}
