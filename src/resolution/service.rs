//! The battle action service: commits decisions when messages arrive.
//!
//! | Message                          | Effect                                        |
//! |----------------------------------|-----------------------------------------------|
//! | `PlayerConfirmsAction`           | resolve the decision step's action template   |
//! | `MoveSquaddieToCoordinate`       | walk the squaddie to the coordinate           |
//! | `PlayerEndsTurn`                 | drop the squaddie's remaining action points   |
//! | `BattleActionFinishesAnimation`  | advance the recorder's animation slot         |
//!
//! Each commit is queued in the recorder and clears the decision step.
//! When the last queued action of a squaddie that cannot act any more
//! finishes animating, its turn ends and `SquaddieTurnEnds` is sent.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, warn};

use super::resolver::{resolve_end_turn, resolve_movement, resolve_squaddie_action};
use crate::core::{ActionTemplateId, BattleContext, BattleSquaddieId, HexCoordinate};
use crate::decision::ActionKind;
use crate::error::BattleError;
use crate::message::{
    ListenerHandle, ListenerId, Message, MessageBoard, MessageListener, MessageType,
};
use crate::recorder::BattleAction;

const HANDLED: [MessageType; 4] = [
    MessageType::PlayerConfirmsAction,
    MessageType::MoveSquaddieToCoordinate,
    MessageType::PlayerEndsTurn,
    MessageType::BattleActionFinishesAnimation,
];

#[derive(Debug, Default)]
pub struct BattleActionService;

impl BattleActionService {
    /// Register a new service on `board` for every message it handles.
    pub fn register(board: &MessageBoard<BattleContext>) -> ListenerId {
        let handle: ListenerHandle<BattleContext> = Rc::new(RefCell::new(BattleActionService));
        let id = board.add_listener(Rc::clone(&handle), HANDLED[0]);
        for message_type in &HANDLED[1..] {
            board.add_listener(Rc::clone(&handle), *message_type);
        }
        id
    }

    fn handle(
        &mut self,
        message: &Message,
        context: &mut BattleContext,
    ) -> Result<(), BattleError> {
        match message {
            Message::PlayerConfirmsAction { battle_squaddie_id } => {
                let (action_template_id, target) =
                    confirmed_decision(context, *battle_squaddie_id)?;
                let action = resolve_squaddie_action(
                    context,
                    *battle_squaddie_id,
                    action_template_id,
                    target,
                )?;
                commit(context, action);
            }
            Message::MoveSquaddieToCoordinate {
                battle_squaddie_id,
                target_coordinate,
            } => {
                let action = resolve_movement(context, *battle_squaddie_id, *target_coordinate)?;
                commit(context, action);
            }
            Message::PlayerEndsTurn { battle_squaddie_id } => {
                let action = resolve_end_turn(context, *battle_squaddie_id)?;
                commit(context, action);
            }
            Message::BattleActionFinishesAnimation => {
                let finished = context
                    .recorder
                    .battle_action_finishes_animation()
                    .map(BattleAction::actor_id);
                if let Some(actor) = finished {
                    end_turn_if_done(context, actor)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl MessageListener<BattleContext> for BattleActionService {
    fn receive_message(&mut self, message: &Message, context: &mut BattleContext) {
        if let Err(error) = self.handle(message, context) {
            warn!(%error, message_type = %message.message_type(), "Battle action failed");
            context.report_listener_error(error);
        }
    }
}

/// Action template and confirmed target of the decision step, checked
/// against the squaddie named in the message.
fn confirmed_decision(
    context: &BattleContext,
    battle_squaddie_id: BattleSquaddieId,
) -> Result<(ActionTemplateId, HexCoordinate), BattleError> {
    let step = &context.decision_step;
    if step.actor() != Some(battle_squaddie_id) {
        return Err(BattleError::IncompleteDecision("confirmed squaddie is not the decision actor"));
    }
    let Some(ActionKind::ActionTemplate(action_template_id)) = step.action() else {
        return Err(BattleError::IncompleteDecision("no action template chosen"));
    };
    let target = step
        .confirmed_target()
        .ok_or(BattleError::IncompleteDecision("no confirmed target"))?;
    Ok((action_template_id, target))
}

fn commit(context: &mut BattleContext, action: BattleAction) {
    debug!(actor = %action.actor_id(), action = ?action.action, "Decision committed");
    context.recorder.add_ready_to_animate_battle_action(action);
    context.decision_step.reset();
}

fn end_turn_if_done(
    context: &mut BattleContext,
    actor: BattleSquaddieId,
) -> Result<(), BattleError> {
    if !context.recorder.is_animation_queue_empty() {
        return Ok(());
    }
    let (_, squaddie) = context.repository.get_squaddie_by_battle_id(actor)?;
    if squaddie.can_act() {
        return Ok(());
    }

    context.recorder.squaddie_turn_ends();
    context.send_message(Message::SquaddieTurnEnds {
        battle_squaddie_id: actor,
    })
}
