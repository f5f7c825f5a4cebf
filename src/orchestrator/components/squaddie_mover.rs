//! Walks a squaddie along its committed move.
//!
//! The map already holds the destination once the move is committed; this
//! component only spends the animation time before handing control back.

use std::time::Duration;

use tracing::debug;

use super::{is_player_phase, ActionAnimator};
use crate::core::BattleContext;
use crate::error::BattleError;
use crate::orchestrator::component::{
    BattleOrchestratorComponent, BattleOrchestratorMode, CompletionReason,
};

#[derive(Clone, Debug, Default)]
pub struct SquaddieMover {
    animator: ActionAnimator,
}

impl SquaddieMover {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BattleOrchestratorComponent for SquaddieMover {
    fn mode(&self) -> BattleOrchestratorMode {
        BattleOrchestratorMode::SquaddieMover
    }

    fn update(&mut self, context: &mut BattleContext, delta: Duration) -> Result<(), BattleError> {
        let was_finished = self.animator.is_finished();
        self.animator.update(context, delta)?;
        if !was_finished && self.animator.is_finished() {
            let mover = context
                .recorder
                .peek_at_already_animated_queue()
                .map(|action| action.actor_id());
            debug!(?mover, "Squaddie finished moving");
        }
        Ok(())
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{HexCoordinate, SquaddieAffiliation};
    use crate::message::Message;
    use crate::testing::{skirmish, BANDIT, KNIGHT};

    fn move_knight(context: &mut BattleContext, to: HexCoordinate) {
        context
            .send_message(Message::MoveSquaddieToCoordinate {
                battle_squaddie_id: KNIGHT,
                target_coordinate: to,
            })
            .unwrap();
    }

    #[test]
    fn test_time_scales_with_distance() {
        let mut context = skirmish();
        move_knight(&mut context, HexCoordinate::new(0, 3));

        let mut mover = SquaddieMover::new();
        mover.update(&mut context, Duration::from_millis(20)).unwrap();
        assert!(!mover.has_completed(&context));

        mover.update(&mut context, Duration::from_millis(10)).unwrap();
        assert!(mover.has_completed(&context));
        assert_eq!(context.map.get_by_battle_squaddie_id(KNIGHT), Some(HexCoordinate::new(0, 3)));
    }

    #[test]
    fn test_computer_phase_returns_to_computer_selector() {
        let mut context = skirmish();
        context
            .send_message(Message::MoveSquaddieToCoordinate {
                battle_squaddie_id: BANDIT,
                target_coordinate: HexCoordinate::new(2, 0),
            })
            .unwrap();
        crate::phase::BattlePhaseTracker::advance(
            &mut context.phase,
            &[SquaddieAffiliation::Player, SquaddieAffiliation::Enemy],
            &context.repository,
        );

        let mut mover = SquaddieMover::new();
        mover.update(&mut context, Duration::from_secs(1)).unwrap();
        assert_eq!(
            mover.recommend_state_changes(&context).next_mode,
            Some(BattleOrchestratorMode::ComputerSquaddieSelector)
        );
    }

    #[test]
    fn test_reset() {
        let mut context = skirmish();
        let mut mover = SquaddieMover::new();
        mover.update(&mut context, Duration::ZERO).unwrap();
        assert!(mover.has_completed(&context));

        mover.reset(&mut context);
        assert!(!mover.has_completed(&context));
    }
}
