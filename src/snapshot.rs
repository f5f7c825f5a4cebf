//! Serializable battle snapshots.
//!
//! A snapshot holds what this layer owns: the action history, the decision
//! in progress, the phase, and the dice position. Squaddies and the map are
//! saved by whoever owns them. The animation queues are not captured, so
//! take snapshots while nothing is animating.
//!
//! ```
//! use hex_tactics::snapshot::BattleSnapshot;
//! use hex_tactics::core::{GameRng, SquaddieAffiliation};
//! use hex_tactics::decision::BattleActionDecisionStep;
//! use hex_tactics::phase::BattlePhaseState;
//!
//! let snapshot = BattleSnapshot {
//!     history: im::Vector::new(),
//!     decision_step: BattleActionDecisionStep::new(),
//!     phase: BattlePhaseState::new(SquaddieAffiliation::Player),
//!     rng: GameRng::new(3).state(),
//! };
//! let bytes = snapshot.to_bytes().unwrap();
//! assert_eq!(BattleSnapshot::from_bytes(&bytes).unwrap(), snapshot);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{BattleContext, GameRng, GameRngState};
use crate::decision::BattleActionDecisionStep;
use crate::phase::BattlePhaseState;
use crate::recorder::BattleAction;

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to encode battle snapshot")]
    Encode(#[source] bincode::Error),

    #[error("failed to decode battle snapshot")]
    Decode(#[source] bincode::Error),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub history: im::Vector<BattleAction>,
    pub decision_step: BattleActionDecisionStep,
    pub phase: BattlePhaseState,
    pub rng: GameRngState,
}

impl BattleSnapshot {
    /// Capture the current state. The history clone is O(1).
    #[must_use]
    pub fn from_context(context: &BattleContext) -> Self {
        Self {
            history: context.recorder.history().clone(),
            decision_step: context.decision_step.clone(),
            phase: context.phase,
            rng: context.rng.state(),
        }
    }

    /// Put the snapshot back into `context`.
    pub fn restore(self, context: &mut BattleContext) {
        debug!(
            history = self.history.len(),
            affiliation = %self.phase.current_affiliation(),
            turn_count = self.phase.turn_count(),
            "Restoring battle snapshot"
        );
        context.recorder.restore_history(self.history);
        context.decision_step = self.decision_step;
        context.phase = self.phase;
        context.rng = GameRng::from_state(&self.rng);
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }
}
