//! One component per orchestrator mode, plus the helpers they share.

mod computer_squaddie_selector;
mod phase_controller;
mod player_action_confirm;
mod player_action_target_select;
mod player_squaddie_selector;
mod squaddie_mover;
mod squaddie_uses_action_on_map;

pub use computer_squaddie_selector::{ComputerPlan, ComputerSquaddieSelector};
pub use phase_controller::{PhaseController, PhaseControllerState};
pub use player_action_confirm::PlayerActionConfirm;
pub use player_action_target_select::{PlayerActionTargetSelect, TargetSelectState};
pub use player_squaddie_selector::PlayerSquaddieSelector;
pub use squaddie_mover::SquaddieMover;
pub use squaddie_uses_action_on_map::SquaddieUsesActionOnMap;

use std::time::Duration;

use tracing::{trace, warn};

use crate::core::{BattleContext, BattleSquaddieId};
use crate::error::BattleError;
use crate::message::Message;

/// The squaddie whose turn is already under way, if it may keep acting.
///
/// Once a squaddie has committed an action this turn, no other squaddie of
/// its team may be selected until that squaddie's turn ends.
pub(crate) fn squaddie_mid_turn(context: &BattleContext) -> Option<BattleSquaddieId> {
    let candidate = context.recorder.squaddie_with_turn_in_progress()?;
    is_able_to_act_now(context, candidate).then_some(candidate)
}

/// Alive, holding action points, and on the team whose phase it is.
pub(crate) fn is_able_to_act_now(
    context: &BattleContext,
    battle_squaddie_id: BattleSquaddieId,
) -> bool {
    context
        .repository
        .get_squaddie_by_battle_id(battle_squaddie_id)
        .is_ok_and(|(template, squaddie)| {
            squaddie.can_act() && template.affiliation == context.phase.current_affiliation()
        })
}

pub(crate) fn is_player_phase(context: &BattleContext) -> bool {
    context.phase.current_affiliation().is_player_controlled()
}

/// Answer invalid input: log it and tell the HUD why.
pub(crate) fn reject_selection(
    context: &mut BattleContext,
    reason: impl Into<String>,
) -> Result<(), BattleError> {
    let reason = reason.into();
    warn!(%reason, "Player selection is invalid");
    context.send_message(Message::invalid_selection(reason))
}

/// Plays queued actions one after another on simulated time.
///
/// Each action animates for its own duration; when that elapses the
/// recorder is told via `BattleActionFinishesAnimation`. Leftover time is
/// not carried into the next action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ActionAnimator {
    elapsed: Duration,
    finished: bool,
}

impl ActionAnimator {
    pub(crate) fn update(
        &mut self,
        context: &mut BattleContext,
        delta: Duration,
    ) -> Result<(), BattleError> {
        if self.finished {
            return Ok(());
        }

        let Some(animating) = context.recorder.peek_at_animation_queue() else {
            self.finished = true;
            return Ok(());
        };
        let duration = animating.animation_duration(&context.config);

        self.elapsed += delta;
        if self.elapsed >= duration {
            trace!(elapsed = ?self.elapsed, ?duration, "Animation finished");
            self.elapsed = Duration::ZERO;
            context.send_message(Message::BattleActionFinishesAnimation)?;
        }

        if context.recorder.is_animation_queue_empty() {
            self.finished = true;
        }
        Ok(())
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::BattleAction;
    use crate::testing::{skirmish, BANDIT, KNIGHT};

    #[test]
    fn test_no_squaddie_mid_turn_at_start() {
        let context = skirmish();
        assert_eq!(squaddie_mid_turn(&context), None);
    }

    #[test]
    fn test_mid_turn_requires_action_points() {
        let mut context = skirmish();
        context
            .recorder
            .add_ready_to_animate_battle_action(BattleAction::end_turn(KNIGHT));
        assert_eq!(squaddie_mid_turn(&context), Some(KNIGHT));

        context.repository.get_battle_squaddie_mut(KNIGHT).unwrap().end_turn();
        assert_eq!(squaddie_mid_turn(&context), None);
    }

    #[test]
    fn test_mid_turn_ignores_other_team() {
        let mut context = skirmish();
        context
            .recorder
            .add_ready_to_animate_battle_action(BattleAction::end_turn(BANDIT));
        assert_eq!(squaddie_mid_turn(&context), None);
    }

    #[test]
    fn test_animator_waits_for_duration() {
        let mut context = skirmish();
        context.recorder.add_ready_to_animate_battle_action(BattleAction::movement(
            KNIGHT,
            crate::core::HexCoordinate::new(0, 0),
            crate::core::HexCoordinate::new(0, 2),
        ));
        let mut animator = ActionAnimator::default();

        // Two tiles at 10ms each.
        animator.update(&mut context, Duration::from_millis(15)).unwrap();
        assert!(!animator.is_finished());
        assert!(context.recorder.peek_at_animation_queue().is_some());

        animator.update(&mut context, Duration::from_millis(5)).unwrap();
        assert!(animator.is_finished());
        assert!(context.recorder.is_animation_queue_empty());
        assert_eq!(context.recorder.already_animated_this_turn().len(), 1);
    }

    #[test]
    fn test_animator_finishes_on_empty_queue() {
        let mut context = skirmish();
        let mut animator = ActionAnimator::default();
        animator.update(&mut context, Duration::ZERO).unwrap();
        assert!(animator.is_finished());

        animator.reset();
        assert!(!animator.is_finished());
    }
}
