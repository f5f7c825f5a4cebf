//! Crate-level error type.
//!
//! Each module keeps its own error enum; [`BattleError`] folds them together
//! so components and the orchestrator can propagate any of them with `?`.
//! Invalid player input is never an error: components answer it with a
//! `PlayerSelectionIsInvalid` message instead.

use crate::core::BattleSquaddieId;
use crate::decision::DecisionStepError;
use crate::map::MapError;
use crate::orchestrator::BattleOrchestratorMode;
use crate::snapshot::SnapshotError;
use crate::squaddie::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    #[error(transparent)]
    DecisionStep(#[from] DecisionStepError),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error("{0} cannot afford {1} action points")]
    NotEnoughActionPoints(BattleSquaddieId, u32),

    #[error("decision step is incomplete: {0}")]
    IncompleteDecision(&'static str),

    #[error("{0} completed without recommending a next mode")]
    NoNextMode(BattleOrchestratorMode),

    #[error("phase rotation needs at least one affiliation")]
    EmptyRotation,
}
