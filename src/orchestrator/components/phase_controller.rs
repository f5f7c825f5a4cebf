//! Phase changes and the phase banner.
//!
//! On its first update the controller hands the phase to the next team if
//! the active one is out of actions, refreshes that team's action points,
//! and announces the phase with `BattlePhaseStarts`. The banner then stays
//! up for the configured duration before control passes to the team's
//! selector.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::is_player_phase;
use crate::core::BattleContext;
use crate::error::BattleError;
use crate::message::Message;
use crate::orchestrator::component::{
    BattleOrchestratorComponent, BattleOrchestratorMode, CompletionReason,
};
use crate::phase::BattlePhaseTracker;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseControllerState {
    #[default]
    Starting,
    ShowingBanner {
        elapsed: Duration,
    },
    Started,
    /// Nobody is left standing on any team. The controller never completes.
    NoTeamsLeft,
}

#[derive(Clone, Debug, Default)]
pub struct PhaseController {
    state: PhaseControllerState,
}

impl PhaseController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> PhaseControllerState {
        self.state
    }

    fn start_phase(&mut self, context: &mut BattleContext) -> Result<(), BattleError> {
        if BattlePhaseTracker::should_advance(&context.phase, &context.repository) {
            let advance = BattlePhaseTracker::advance(
                &mut context.phase,
                &context.config.affiliation_rotation,
                &context.repository,
            );
            if advance.is_none() {
                warn!("No affiliation has squaddies left; the battle cannot continue");
                self.state = PhaseControllerState::NoTeamsLeft;
                return Ok(());
            }
        }

        let affiliation = context.phase.current_affiliation();
        let team: Vec<_> = context
            .repository
            .squaddies_with_affiliation(affiliation)
            .filter(|(_, squaddie)| squaddie.is_alive())
            .map(|(_, squaddie)| squaddie.battle_squaddie_id)
            .collect();
        let action_points = context.config.action_points_per_turn;
        for battle_squaddie_id in &team {
            context
                .repository
                .get_battle_squaddie_mut(*battle_squaddie_id)?
                .refresh_action_points(action_points);
        }
        context.recorder.squaddie_turn_ends();

        let turn_count = context.phase.turn_count();
        info!(%affiliation, turn_count, squaddies = team.len(), "Phase starts");
        context.send_message(Message::BattlePhaseStarts { affiliation, turn_count })?;
        self.state = PhaseControllerState::ShowingBanner {
            elapsed: Duration::ZERO,
        };
        Ok(())
    }
}

impl BattleOrchestratorComponent for PhaseController {
    fn mode(&self) -> BattleOrchestratorMode {
        BattleOrchestratorMode::PhaseController
    }

    fn update(&mut self, context: &mut BattleContext, delta: Duration) -> Result<(), BattleError> {
        match self.state {
            PhaseControllerState::Starting => self.start_phase(context)?,
            PhaseControllerState::ShowingBanner { elapsed } => {
                let elapsed = elapsed + delta;
                self.state = if elapsed >= context.config.phase_banner_duration() {
                    debug!("Phase banner finished");
                    PhaseControllerState::Started
                } else {
                    PhaseControllerState::ShowingBanner { elapsed }
                };
            }
            PhaseControllerState::Started | PhaseControllerState::NoTeamsLeft => {}
        }
        Ok(())
    }

    fn completion_reason(&self, context: &BattleContext) -> Option<CompletionReason> {
        (self.state == PhaseControllerState::Started).then(|| CompletionReason::PhaseStarted {
            player_controlled: is_player_phase(context),
        })
    }

    fn reset(&mut self, _context: &mut BattleContext) {
        self.state = PhaseControllerState::Starting;
    }
}
