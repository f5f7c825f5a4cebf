//! Mode-driven battle orchestration.
//!
//! The battle runs as a set of small state machines, one per
//! [`BattleOrchestratorMode`]. The [`BattleOrchestrator`] ticks the active
//! one, forwards input to it, and switches modes through the fixed table in
//! [`next_mode`] when it completes.

mod battle_orchestrator;
pub mod component;
pub mod components;
pub mod input;

pub use battle_orchestrator::BattleOrchestrator;
pub use component::{
    next_mode, BattleOrchestratorComponent, BattleOrchestratorMode, CompletionReason,
    RecommendedStateChanges,
};
pub use components::{
    ComputerPlan, ComputerSquaddieSelector, PhaseController, PhaseControllerState,
    PlayerActionConfirm, PlayerActionTargetSelect, PlayerSquaddieSelector, SquaddieMover,
    SquaddieUsesActionOnMap, TargetSelectState,
};
pub use input::{
    HudButton, KeyEvent, KeyEventType, MouseEvent, MouseEventType, MouseTarget, PlayerInputAction,
};
