//! # hex-tactics
//!
//! Orchestration core for turn-based tactical battles on a hex grid.
//!
//! ## Design Principles
//!
//! 1. **Tick-Driven**: Nothing reads a clock. The host calls
//!    [`BattleOrchestrator::update`] with the elapsed time and forwards input
//!    events; every state change happens inside those calls.
//!
//! 2. **One Writer**: All shared state lives in [`BattleContext`], passed by
//!    `&mut` to the active component and from there to message listeners.
//!
//! 3. **Same Path for Everyone**: Player input and computer decisions both
//!    fill the [`BattleActionDecisionStep`] and publish the same messages;
//!    the [`BattleActionService`] listener commits them.
//!
//! ## Architecture
//!
//! - **Components**: One small state machine per orchestrator mode. A
//!   component that has not completed is waiting for input or time.
//!
//! - **Message Board**: Synchronous, depth-first pub/sub that decouples
//!   components from the HUD and from action resolution.
//!
//! - **Recorder**: Committed actions queue for animation one at a time and
//!   are kept in a persistent `im::Vector` history.
//!
//! ## Modules
//!
//! - `core`: IDs, affiliations, hex coordinates, RNG, configuration, context
//! - `squaddie`: Squaddie and action templates, battle squaddies, repository
//! - `map`: Mission map, terrain, and movement search
//! - `decision`: The staged decision step
//! - `recorder`: Battle actions and the animation ledger
//! - `message`: Messages and the message board
//! - `targeting`: Target validation rules
//! - `resolution`: Dice, damage, healing, and the battle action service
//! - `phase`: Phase state and rotation
//! - `orchestrator`: Input events, components, and the orchestrator
//! - `snapshot`: Serializable battle snapshots

pub mod core;
pub mod decision;
pub mod error;
pub mod map;
pub mod message;
pub mod orchestrator;
pub mod phase;
pub mod recorder;
pub mod resolution;
pub mod snapshot;
pub mod squaddie;
pub mod targeting;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use crate::core::{
    ActionTemplateId, BattleConfig, BattleContext, BattleSquaddieId, GameRng, GameRngState,
    HexCoordinate, SquaddieAffiliation, SquaddieTemplateId,
};

pub use crate::squaddie::{
    ActionTemplate, ActionTrait, BattleSquaddie, ObjectRepository, RepositoryError,
    SquaddieTemplate, TargetRelation,
};

pub use crate::map::{MapError, MissionMap, Terrain};

pub use crate::decision::{ActionKind, BattleActionDecisionStep, DecisionStepError, DecisionTarget};

pub use crate::recorder::{
    BattleAction, BattleActionRecorder, DegreeOfSuccess, SquaddieEffectResult,
};

pub use crate::message::{ListenerId, Message, MessageBoard, MessageListener, MessageType};

pub use crate::targeting::{
    RangeAndAffiliationValidator, TargetingIssue, TargetingQuery, TargetingValidator,
};

pub use crate::resolution::BattleActionService;

pub use crate::phase::{BattlePhaseState, BattlePhaseTracker, PhaseAdvance};

pub use crate::orchestrator::{
    BattleOrchestrator, BattleOrchestratorComponent, BattleOrchestratorMode, CompletionReason,
    HudButton, KeyEvent, MouseEvent, MouseTarget, PlayerInputAction,
};

pub use crate::snapshot::{BattleSnapshot, SnapshotError};

pub use crate::error::BattleError;
