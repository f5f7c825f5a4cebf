//! Plays committed actions (attacks, heals, end turn) on the map.

use std::time::Duration;

use super::{is_player_phase, ActionAnimator};
use crate::core::BattleContext;
use crate::error::BattleError;
use crate::orchestrator::component::{
    BattleOrchestratorComponent, BattleOrchestratorMode, CompletionReason,
};

#[derive(Clone, Debug, Default)]
pub struct SquaddieUsesActionOnMap {
    animator: ActionAnimator,
}

impl SquaddieUsesActionOnMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BattleOrchestratorComponent for SquaddieUsesActionOnMap {
    fn mode(&self) -> BattleOrchestratorMode {
        BattleOrchestratorMode::SquaddieUsesActionOnMap
    }

    fn update(&mut self, context: &mut BattleContext, delta: Duration) -> Result<(), BattleError> {
        self.animator.update(context, delta)
    }

    fn completion_reason(&self, context: &BattleContext) -> Option<CompletionReason> {
        self.animator.is_finished().then(|| CompletionReason::AnimationFinished {
            player_controlled: is_player_phase(context),
        })
    }

    fn reset(&mut self, _context: &mut BattleContext) {
        self.animator.reset();
    }
}
