//! Component contract and the mode transition table.
//!
//! Every orchestrator mode is backed by one component. A component runs its
//! own sub-state machine and, once finished, reports a [`CompletionReason`].
//! The orchestrator looks the pair (mode, reason) up in [`next_mode`] to
//! decide which component runs next. A component that never completes is
//! simply waiting for input.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::input::{KeyEvent, MouseEvent};
use crate::core::BattleContext;
use crate::error::BattleError;

/// Orchestrator modes, one per component.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum BattleOrchestratorMode {
    #[default]
    PhaseController,
    /// The player's HUD: pick a squaddie, then an action, a move, or end turn.
    PlayerSquaddieSelector,
    ComputerSquaddieSelector,
    PlayerActionTargetSelect,
    PlayerActionConfirm,
    SquaddieUsesActionOnMap,
    SquaddieMover,
}

/// Why a component finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompletionReason {
    SquaddieLockedActionNeedsTarget,
    SquaddieMoving,
    SquaddieEndedTurn,
    ComputerActionConfirmed,
    TeamCannotAct,
    PhaseStarted { player_controlled: bool },
    TargetConfirmed,
    TargetSelectionCancelled,
    NoTargetsFound,
    ActionConfirmed,
    ConfirmationCancelled,
    AnimationFinished { player_controlled: bool },
}

/// The mode graph. `None` means the reason cannot happen in that mode.
#[must_use]
pub fn next_mode(
    mode: BattleOrchestratorMode,
    reason: CompletionReason,
) -> Option<BattleOrchestratorMode> {
    use BattleOrchestratorMode as Mode;
    use CompletionReason as Reason;

    let selector = |player_controlled: bool| {
        if player_controlled {
            Mode::PlayerSquaddieSelector
        } else {
            Mode::ComputerSquaddieSelector
        }
    };

    match (mode, reason) {
        (Mode::PhaseController, Reason::PhaseStarted { player_controlled }) => {
            Some(selector(player_controlled))
        }

        (Mode::PlayerSquaddieSelector, Reason::SquaddieLockedActionNeedsTarget) => {
            Some(Mode::PlayerActionTargetSelect)
        }
        (Mode::PlayerSquaddieSelector | Mode::ComputerSquaddieSelector, Reason::SquaddieMoving) => {
            Some(Mode::SquaddieMover)
        }
        (
            Mode::PlayerSquaddieSelector | Mode::ComputerSquaddieSelector,
            Reason::SquaddieEndedTurn,
        ) => {
            Some(Mode::SquaddieUsesActionOnMap)
        }
        (Mode::PlayerSquaddieSelector | Mode::ComputerSquaddieSelector, Reason::TeamCannotAct) => {
            Some(Mode::PhaseController)
        }
        (Mode::ComputerSquaddieSelector, Reason::ComputerActionConfirmed) => {
            Some(Mode::SquaddieUsesActionOnMap)
        }

        (Mode::PlayerActionTargetSelect, Reason::TargetConfirmed) => {
            Some(Mode::PlayerActionConfirm)
        }
        (
            Mode::PlayerActionTargetSelect,
            Reason::TargetSelectionCancelled | Reason::NoTargetsFound,
        ) => {
            Some(Mode::PlayerSquaddieSelector)
        }

        (Mode::PlayerActionConfirm, Reason::ActionConfirmed) => Some(Mode::SquaddieUsesActionOnMap),
        (Mode::PlayerActionConfirm, Reason::ConfirmationCancelled) => {
            Some(Mode::PlayerActionTargetSelect)
        }

        (
            Mode::SquaddieUsesActionOnMap | Mode::SquaddieMover,
            Reason::AnimationFinished { player_controlled },
        ) => {
            Some(selector(player_controlled))
        }

        _ => None,
    }
}

/// What the orchestrator should do once a component completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedStateChanges {
    pub next_mode: Option<BattleOrchestratorMode>,
}

/// Lifecycle shared by every orchestrator component.
///
/// ## Implementation Notes
///
/// - `update` advances one tick and may send messages
/// - `completion_reason` must not change between updates unless input
///   arrives, so `has_completed` is idempotent
/// - `reset` returns the component to its initial state for reuse
pub trait BattleOrchestratorComponent {
    /// The mode this component backs.
    fn mode(&self) -> BattleOrchestratorMode;

    /// Advance one tick.
    fn update(&mut self, context: &mut BattleContext, delta: Duration) -> Result<(), BattleError>;

    /// Why the component finished, or `None` while it is still running.
    fn completion_reason(&self, context: &BattleContext) -> Option<CompletionReason>;

    fn has_completed(&self, context: &BattleContext) -> bool {
        self.completion_reason(context).is_some()
    }

    /// Only meaningful once [`has_completed`](Self::has_completed) is true.
    fn recommend_state_changes(&self, context: &BattleContext) -> RecommendedStateChanges {
        RecommendedStateChanges {
            next_mode: self
                .completion_reason(context)
                .and_then(|reason| next_mode(self.mode(), reason)),
        }
    }

    fn reset(&mut self, context: &mut BattleContext);

    fn mouse_event_happened(
        &mut self,
        _context: &mut BattleContext,
        _event: MouseEvent,
    ) -> Result<(), BattleError> {
        Ok(())
    }

    fn key_event_happened(
        &mut self,
        _context: &mut BattleContext,
        _event: KeyEvent,
    ) -> Result<(), BattleError> {
        Ok(())
    }
}
