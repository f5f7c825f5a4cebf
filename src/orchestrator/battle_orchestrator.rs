//! The root scheduler.
//!
//! ## Usage
//!
//! ```ignore
//! let mut orchestrator = BattleOrchestrator::new();
//! loop {
//!     for event in pending_mouse_events() {
//!         orchestrator.mouse_event_happened(&mut context, event)?;
//!     }
//!     orchestrator.update(&mut context, frame_time)?;
//! }
//! ```

use std::time::Duration;

use tracing::debug;

use super::component::{BattleOrchestratorComponent, BattleOrchestratorMode};
use super::components::{
    ComputerSquaddieSelector, PhaseController, PlayerActionConfirm, PlayerActionTargetSelect,
    PlayerSquaddieSelector, SquaddieMover, SquaddieUsesActionOnMap,
};
use super::input::{KeyEvent, MouseEvent};
use crate::core::BattleContext;
use crate::error::BattleError;

/// Holds one component per mode and runs whichever is active.
///
/// Input goes to the active component only. After each update the active
/// component is asked whether it has completed; if so it is reset and the
/// mode it recommends becomes active on the next tick.
#[derive(Debug, Default)]
pub struct BattleOrchestrator {
    mode: BattleOrchestratorMode,
    phase_controller: PhaseController,
    player_squaddie_selector: PlayerSquaddieSelector,
    computer_squaddie_selector: ComputerSquaddieSelector,
    player_action_target_select: PlayerActionTargetSelect,
    player_action_confirm: PlayerActionConfirm,
    squaddie_uses_action_on_map: SquaddieUsesActionOnMap,
    squaddie_mover: SquaddieMover,
}

impl BattleOrchestrator {
    /// Start in [`BattleOrchestratorMode::PhaseController`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> BattleOrchestratorMode {
        self.mode
    }

    #[must_use]
    pub fn component(&self) -> &dyn BattleOrchestratorComponent {
        match self.mode {
            BattleOrchestratorMode::PhaseController => &self.phase_controller,
            BattleOrchestratorMode::PlayerSquaddieSelector => &self.player_squaddie_selector,
            BattleOrchestratorMode::ComputerSquaddieSelector => &self.computer_squaddie_selector,
            BattleOrchestratorMode::PlayerActionTargetSelect => &self.player_action_target_select,
            BattleOrchestratorMode::PlayerActionConfirm => &self.player_action_confirm,
            BattleOrchestratorMode::SquaddieUsesActionOnMap => &self.squaddie_uses_action_on_map,
            BattleOrchestratorMode::SquaddieMover => &self.squaddie_mover,
        }
    }

    fn component_mut(&mut self) -> &mut dyn BattleOrchestratorComponent {
        match self.mode {
            BattleOrchestratorMode::PhaseController => &mut self.phase_controller,
            BattleOrchestratorMode::PlayerSquaddieSelector => &mut self.player_squaddie_selector,
            BattleOrchestratorMode::ComputerSquaddieSelector => {
                &mut self.computer_squaddie_selector
            }
            BattleOrchestratorMode::PlayerActionTargetSelect => {
                &mut self.player_action_target_select
            }
            BattleOrchestratorMode::PlayerActionConfirm => &mut self.player_action_confirm,
            BattleOrchestratorMode::SquaddieUsesActionOnMap => {
                &mut self.squaddie_uses_action_on_map
            }
            BattleOrchestratorMode::SquaddieMover => &mut self.squaddie_mover,
        }
    }

    /// The HUD state of the player selector.
    #[must_use]
    pub fn player_squaddie_selector(&self) -> &PlayerSquaddieSelector {
        &self.player_squaddie_selector
    }

    /// Highlighted targets and the last rejection explanation.
    #[must_use]
    pub fn player_action_target_select(&self) -> &PlayerActionTargetSelect {
        &self.player_action_target_select
    }

    #[must_use]
    pub fn phase_controller(&self) -> &PhaseController {
        &self.phase_controller
    }

    /// Run one tick of the active component and switch modes if it completed.
    pub fn update(
        &mut self,
        context: &mut BattleContext,
        delta: Duration,
    ) -> Result<(), BattleError> {
        let mode = self.mode;
        let component = self.component_mut();
        component.update(context, delta)?;
        if !component.has_completed(context) {
            return Ok(());
        }

        let next_mode = component
            .recommend_state_changes(context)
            .next_mode
            .ok_or(BattleError::NoNextMode(mode))?;
        component.reset(context);

        debug!(from = %mode, to = %next_mode, "Orchestrator mode changed");
        self.mode = next_mode;
        Ok(())
    }

    pub fn mouse_event_happened(
        &mut self,
        context: &mut BattleContext,
        event: MouseEvent,
    ) -> Result<(), BattleError> {
        self.component_mut().mouse_event_happened(context, event)
    }

    pub fn key_event_happened(
        &mut self,
        context: &mut BattleContext,
        event: KeyEvent,
    ) -> Result<(), BattleError> {
        self.component_mut().key_event_happened(context, event)
    }
}
