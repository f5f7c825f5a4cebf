//! The player's HUD controller.
//!
//! The player clicks one of their squaddies, then either clicks an empty
//! reachable tile to move there, picks an action that needs a target, or
//! ends the squaddie's turn. Once a squaddie has acted this turn it stays
//! selected until its turn ends.
//!
//! | Input                    | Effect                                          |
//! |--------------------------|-------------------------------------------------|
//! | click own squaddie       | select it                                       |
//! | click empty tile         | move the selected squaddie there                |
//! | action button            | lock the squaddie and go pick a target          |
//! | end turn button or key   | end the selected squaddie's turn                |
//! | cancel button or key     | deselect (not allowed mid-turn)                 |

use std::time::Duration;

use tracing::debug;

use super::{is_able_to_act_now, reject_selection, squaddie_mid_turn};
use crate::core::{ActionTemplateId, BattleContext, BattleSquaddieId, HexCoordinate};
use crate::decision::ActionKind;
use crate::error::BattleError;
use crate::map::MapError;
use crate::message::Message;
use crate::orchestrator::component::{
    BattleOrchestratorComponent, BattleOrchestratorMode, CompletionReason,
};
use crate::orchestrator::input::{HudButton, KeyEvent, MouseEvent, MouseTarget, PlayerInputAction};

#[derive(Clone, Debug, Default)]
pub struct PlayerSquaddieSelector {
    selected: Option<BattleSquaddieId>,
    completion: Option<CompletionReason>,
}

impl PlayerSquaddieSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The squaddie the HUD is showing, if any.
    #[must_use]
    pub fn selected_squaddie(&self) -> Option<BattleSquaddieId> {
        self.selected
    }

    /// Keep the selection in line with the mid-turn rule.
    fn refresh_selection(&mut self, context: &BattleContext) {
        if let Some(mid_turn) = squaddie_mid_turn(context) {
            self.selected = Some(mid_turn);
        } else if let Some(selected) = self.selected {
            if !is_able_to_act_now(context, selected) {
                self.selected = None;
            }
        }
    }

    fn click_map(
        &mut self,
        context: &mut BattleContext,
        coordinate: HexCoordinate,
    ) -> Result<(), BattleError> {
        match context.map.get_squaddie_at(coordinate) {
            Some(occupant) => self.click_squaddie(context, occupant),
            None => self.move_to(context, coordinate),
        }
    }

    fn click_squaddie(
        &mut self,
        context: &mut BattleContext,
        clicked: BattleSquaddieId,
    ) -> Result<(), BattleError> {
        let (template, squaddie) = context.repository.get_squaddie_by_battle_id(clicked)?;
        if template.affiliation != context.phase.current_affiliation() {
            let reason = format!("{} is not under your control", template.name);
            return reject_selection(context, reason);
        }
        if !squaddie.can_act() {
            let reason = format!("{} has no action points left", template.name);
            return reject_selection(context, reason);
        }
        if let Some(mid_turn) = squaddie_mid_turn(context) {
            if mid_turn != clicked {
                return reject_selection(context, "another squaddie is in the middle of its turn");
            }
        }

        debug!(battle_squaddie_id = %clicked, "Player selected squaddie");
        self.selected = Some(clicked);
        Ok(())
    }

    fn move_to(
        &mut self,
        context: &mut BattleContext,
        destination: HexCoordinate,
    ) -> Result<(), BattleError> {
        let Some(actor) = self.selected else {
            return reject_selection(context, "select a squaddie first");
        };

        let (template, squaddie) = context.repository.get_squaddie_by_battle_id(actor)?;
        let budget = squaddie.action_points * template.movement_per_action_point;
        let start = context
            .map
            .get_by_battle_squaddie_id(actor)
            .ok_or(MapError::NotOnMap(actor))?;
        let reachable = context.map.reachable_coordinates(start, budget);
        if destination == start || !reachable.contains_key(&destination) {
            return reject_selection(context, format!("{destination} is out of reach"));
        }

        commit_decision(context, |context| {
            context.decision_step.set_actor(actor)?;
            context.decision_step.add_action(ActionKind::Movement)?;
            context.decision_step.set_confirmed_target(destination)?;
            context.send_message(Message::PlayerSelectsAndLocksSquaddie {
                battle_squaddie_id: actor,
            })?;
            context.send_message(Message::MoveSquaddieToCoordinate {
                battle_squaddie_id: actor,
                target_coordinate: destination,
            })
        })?;
        self.completion = Some(CompletionReason::SquaddieMoving);
        Ok(())
    }

    fn choose_action(
        &mut self,
        context: &mut BattleContext,
        action_template_id: ActionTemplateId,
    ) -> Result<(), BattleError> {
        let Some(actor) = self.selected else {
            return reject_selection(context, "select a squaddie first");
        };

        let (template, squaddie) = context.repository.get_squaddie_by_battle_id(actor)?;
        if !template.has_action(action_template_id) {
            let reason = format!("{} does not know that action", template.name);
            return reject_selection(context, reason);
        }
        let action = context.repository.get_action_template(action_template_id)?;
        if squaddie.action_points < action.action_point_cost {
            let reason = format!(
                "{} needs {} action points, only {} left",
                action.name, action.action_point_cost, squaddie.action_points
            );
            return reject_selection(context, reason);
        }

        commit_decision(context, |context| {
            context.decision_step.set_actor(actor)?;
            context
                .decision_step
                .add_action(ActionKind::ActionTemplate(action_template_id))?;
            context.send_message(Message::PlayerSelectsAndLocksSquaddie {
                battle_squaddie_id: actor,
            })?;
            context.send_message(Message::PlayerSelectsActionThatRequiresATarget {
                battle_squaddie_id: actor,
                action_template_id,
            })
        })?;
        self.completion = Some(CompletionReason::SquaddieLockedActionNeedsTarget);
        Ok(())
    }

    fn end_turn(&mut self, context: &mut BattleContext) -> Result<(), BattleError> {
        let Some(actor) = self.selected else {
            return reject_selection(context, "select a squaddie first");
        };

        commit_decision(context, |context| {
            context.decision_step.set_actor(actor)?;
            context.decision_step.add_action(ActionKind::EndTurn)?;
            context.send_message(Message::PlayerEndsTurn {
                battle_squaddie_id: actor,
            })
        })?;
        self.completion = Some(CompletionReason::SquaddieEndedTurn);
        Ok(())
    }

    fn cancel(&mut self, context: &mut BattleContext) -> Result<(), BattleError> {
        let Some(selected) = self.selected else {
            return Ok(());
        };
        if squaddie_mid_turn(context) == Some(selected) {
            return reject_selection(context, "a squaddie in the middle of its turn must end it");
        }

        self.selected = None;
        context.send_message(Message::PlayerCancelsSquaddieSelection {
            battle_squaddie_id: selected,
        })
    }
}

/// Fill the decision step and announce it. If any part fails the step is
/// cleared, so the next input starts over instead of tripping on a stale actor.
fn commit_decision(
    context: &mut BattleContext,
    commit: impl FnOnce(&mut BattleContext) -> Result<(), BattleError>,
) -> Result<(), BattleError> {
    let result = commit(context);
    if result.is_err() {
        context.decision_step.reset();
    }
    result
}

impl BattleOrchestratorComponent for PlayerSquaddieSelector {
    fn mode(&self) -> BattleOrchestratorMode {
        BattleOrchestratorMode::PlayerSquaddieSelector
    }

    fn update(&mut self, context: &mut BattleContext, _delta: Duration) -> Result<(), BattleError> {
        if self.completion.is_some() {
            return Ok(());
        }
        if !context.repository.can_team_act(context.phase.current_affiliation()) {
            debug!(affiliation = %context.phase.current_affiliation(), "Player team cannot act");
            self.completion = Some(CompletionReason::TeamCannotAct);
            return Ok(());
        }
        self.refresh_selection(context);
        Ok(())
    }

    fn completion_reason(&self, _context: &BattleContext) -> Option<CompletionReason> {
        self.completion
    }

    fn reset(&mut self, _context: &mut BattleContext) {
        *self = Self::default();
    }

    fn mouse_event_happened(
        &mut self,
        context: &mut BattleContext,
        event: MouseEvent,
    ) -> Result<(), BattleError> {
        if self.completion.is_some() || !event.is_press() {
            return Ok(());
        }
        self.refresh_selection(context);

        match event.target {
            MouseTarget::Map(coordinate) => self.click_map(context, coordinate),
            MouseTarget::Button(HudButton::Action(action_template_id)) => {
                self.choose_action(context, action_template_id)
            }
            MouseTarget::Button(HudButton::EndTurn) => self.end_turn(context),
            MouseTarget::Button(HudButton::Cancel) => self.cancel(context),
            MouseTarget::Button(HudButton::Confirm) => {
                reject_selection(context, "nothing to confirm")
            }
        }
    }

    fn key_event_happened(
        &mut self,
        context: &mut BattleContext,
        event: KeyEvent,
    ) -> Result<(), BattleError> {
        if self.completion.is_some() {
            return Ok(());
        }
        self.refresh_selection(context);

        match event.action {
            PlayerInputAction::Accept => Ok(()),
            PlayerInputAction::Cancel => self.cancel(context),
            PlayerInputAction::EndTurn => self.end_turn(context),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use crate::message::MessageType;
    use crate::testing::{skirmish, CLUB, KNIGHT, SLASH};

    fn capture(context: &BattleContext, message_type: MessageType) -> Rc<RefCell<Vec<Message>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        context.message_board.add_listener(
            Rc::new(RefCell::new(move |message: &Message, _: &mut BattleContext| {
                sink.borrow_mut().push(message.clone());
            })),
            message_type,
        );
        seen
    }

    fn selected_knight(context: &mut BattleContext) -> PlayerSquaddieSelector {
        let mut selector = PlayerSquaddieSelector::new();
        selector.update(context, Duration::ZERO).unwrap();
        selector
            .mouse_event_happened(context, MouseEvent::press_map(HexCoordinate::new(0, 0)))
            .unwrap();
        assert_eq!(selector.selected_squaddie(), Some(KNIGHT));
        selector
    }

    #[test]
    fn test_select_and_choose_action() {
        let mut context = skirmish();
        let locked = capture(&context, MessageType::PlayerSelectsAndLocksSquaddie);
        let mut selector = selected_knight(&mut context);

        selector
            .mouse_event_happened(&mut context, MouseEvent::press_button(HudButton::Action(SLASH)))
            .unwrap();

        assert_eq!(
            selector.completion_reason(&context),
            Some(CompletionReason::SquaddieLockedActionNeedsTarget)
        );
        assert_eq!(context.decision_step.actor(), Some(KNIGHT));
        assert_eq!(context.decision_step.action(), Some(ActionKind::ActionTemplate(SLASH)));
        assert_eq!(locked.borrow().len(), 1);
    }

    #[test]
    fn test_enemy_squaddie_is_rejected() {
        let mut context = skirmish();
        let invalid = capture(&context, MessageType::PlayerSelectionIsInvalid);
        let mut selector = PlayerSquaddieSelector::new();

        selector
            .mouse_event_happened(&mut context, MouseEvent::press_map(HexCoordinate::new(1, 0)))
            .unwrap();

        assert_eq!(selector.selected_squaddie(), None);
        assert_eq!(invalid.borrow().len(), 1);
        assert!(!selector.has_completed(&context));
    }

    #[test]
    fn test_unknown_action_is_rejected() {
        let mut context = skirmish();
        let invalid = capture(&context, MessageType::PlayerSelectionIsInvalid);
        let mut selector = selected_knight(&mut context);

        selector
            .mouse_event_happened(&mut context, MouseEvent::press_button(HudButton::Action(CLUB)))
            .unwrap();

        assert!(!selector.has_completed(&context));
        assert!(!context.decision_step.is_actor_set());
        assert_eq!(
            *invalid.borrow(),
            vec![Message::invalid_selection("Knight does not know that action")]
        );
    }

    #[test]
    fn test_unaffordable_action_is_rejected() {
        let mut context = skirmish();
        context.repository.get_battle_squaddie_mut(KNIGHT).unwrap().spend_action_points(2);
        let mut selector = selected_knight(&mut context);

        selector
            .mouse_event_happened(&mut context, MouseEvent::press_button(HudButton::Action(SLASH)))
            .unwrap();
        assert!(!selector.has_completed(&context));
    }

    #[test]
    fn test_move_to_empty_tile() {
        let mut context = skirmish();
        let mut selector = selected_knight(&mut context);

        selector
            .mouse_event_happened(&mut context, MouseEvent::press_map(HexCoordinate::new(0, 2)))
            .unwrap();

        assert_eq!(selector.completion_reason(&context), Some(CompletionReason::SquaddieMoving));
        assert_eq!(context.map.get_by_battle_squaddie_id(KNIGHT), Some(HexCoordinate::new(0, 2)));
        assert_eq!(context.recorder.history().len(), 1);
        assert!(!context.decision_step.is_actor_set());
    }

    #[test]
    fn test_move_out_of_reach() {
        let mut context = skirmish();
        context.repository.get_battle_squaddie_mut(KNIGHT).unwrap().spend_action_points(2);
        let invalid = capture(&context, MessageType::PlayerSelectionIsInvalid);
        let mut selector = selected_knight(&mut context);

        // One action point buys two tiles.
        selector
            .mouse_event_happened(&mut context, MouseEvent::press_map(HexCoordinate::new(0, 3)))
            .unwrap();

        assert!(!selector.has_completed(&context));
        assert_eq!(context.map.get_by_battle_squaddie_id(KNIGHT), Some(HexCoordinate::new(0, 0)));
        assert_eq!(
            *invalid.borrow(),
            vec![Message::invalid_selection("(0, 3) is out of reach")]
        );
    }

    #[test]
    fn test_end_turn_key() {
        let mut context = skirmish();
        let mut selector = selected_knight(&mut context);

        selector
            .key_event_happened(&mut context, KeyEvent::pressed(PlayerInputAction::EndTurn))
            .unwrap();

        assert_eq!(selector.completion_reason(&context), Some(CompletionReason::SquaddieEndedTurn));
        let (_, knight) = context.repository.get_squaddie_by_battle_id(KNIGHT).unwrap();
        assert_eq!(knight.action_points, 0);
    }

    #[test]
    fn test_cancel_deselects() {
        let mut context = skirmish();
        let cancelled = capture(&context, MessageType::PlayerCancelsSquaddieSelection);
        let mut selector = selected_knight(&mut context);

        selector
            .key_event_happened(&mut context, KeyEvent::pressed(PlayerInputAction::Cancel))
            .unwrap();

        assert_eq!(selector.selected_squaddie(), None);
        assert_eq!(
            *cancelled.borrow(),
            vec![Message::PlayerCancelsSquaddieSelection { battle_squaddie_id: KNIGHT }]
        );
    }

    #[test]
    fn test_mid_turn_squaddie_stays_selected() {
        let mut context = skirmish();
        let mut selector = selected_knight(&mut context);
        selector
            .mouse_event_happened(&mut context, MouseEvent::press_map(HexCoordinate::new(0, 1)))
            .unwrap();
        context.send_message(Message::BattleActionFinishesAnimation).unwrap();

        let mut selector = PlayerSquaddieSelector::new();
        selector.update(&mut context, Duration::ZERO).unwrap();
        assert_eq!(selector.selected_squaddie(), Some(KNIGHT));

        selector
            .key_event_happened(&mut context, KeyEvent::pressed(PlayerInputAction::Cancel))
            .unwrap();
        assert_eq!(selector.selected_squaddie(), Some(KNIGHT));
    }

    #[test]
    fn test_team_cannot_act() {
        let mut context = skirmish();
        context.repository.get_battle_squaddie_mut(KNIGHT).unwrap().end_turn();

        let mut selector = PlayerSquaddieSelector::new();
        selector.update(&mut context, Duration::ZERO).unwrap();

        assert_eq!(selector.completion_reason(&context), Some(CompletionReason::TeamCannotAct));
        assert_eq!(
            selector.recommend_state_changes(&context).next_mode,
            Some(BattleOrchestratorMode::PhaseController)
        );
    }

    #[test]
    fn test_failed_lock_clears_decision_step() {
        let mut context = skirmish();
        let failures = Rc::new(Cell::new(1));
        let remaining = Rc::clone(&failures);
        context.message_board.add_listener(
            Rc::new(RefCell::new(move |_: &Message, context: &mut BattleContext| {
                if remaining.get() > 0 {
                    remaining.set(remaining.get() - 1);
                    context.report_listener_error(BattleError::IncompleteDecision("lock refused"));
                }
            })),
            MessageType::PlayerSelectsAndLocksSquaddie,
        );
        let mut selector = selected_knight(&mut context);
        let slash = MouseEvent::press_button(HudButton::Action(SLASH));

        let error = selector.mouse_event_happened(&mut context, slash).unwrap_err();
        assert!(matches!(error, BattleError::IncompleteDecision("lock refused")));
        assert!(!context.decision_step.is_actor_set());
        assert!(!selector.has_completed(&context));

        selector.mouse_event_happened(&mut context, slash).unwrap();
        assert_eq!(
            selector.completion_reason(&context),
            Some(CompletionReason::SquaddieLockedActionNeedsTarget)
        );
        assert_eq!(failures.get(), 0);
    }

    #[test]
    fn test_reset_clears_selection() {
        let mut context = skirmish();
        let mut selector = selected_knight(&mut context);
        selector.reset(&mut context);
        assert_eq!(selector.selected_squaddie(), None);
        assert!(!selector.has_completed(&context));
    }
}
