//! Decisions for computer-controlled teams.
//!
//! The computer goes through the same decision step and messages as the
//! player. For the squaddie whose turn is under way (or else the first
//! squaddie of the team that can act) it tries, in order:
//!
//! 1. the first known action that has a valid target,
//! 2. a move that brings it strictly closer to the nearest foe,
//! 3. ending its turn.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::squaddie_mid_turn;
use crate::core::{ActionTemplateId, BattleContext, BattleSquaddieId, HexCoordinate};
use crate::decision::ActionKind;
use crate::error::BattleError;
use crate::message::Message;
use crate::orchestrator::component::{
    BattleOrchestratorComponent, BattleOrchestratorMode, CompletionReason,
};
use crate::targeting::TargetingQuery;

/// What a computer squaddie will do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComputerPlan {
    UseAction {
        actor: BattleSquaddieId,
        action_template_id: ActionTemplateId,
        target: HexCoordinate,
    },
    Move {
        actor: BattleSquaddieId,
        destination: HexCoordinate,
    },
    EndTurn {
        actor: BattleSquaddieId,
    },
}

#[derive(Clone, Debug, Default)]
pub struct ComputerSquaddieSelector {
    completion: Option<CompletionReason>,
}

impl ComputerSquaddieSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Squaddie that acts next: the one mid-turn, else the first able one.
    fn next_actor(context: &BattleContext) -> Option<BattleSquaddieId> {
        squaddie_mid_turn(context).or_else(|| {
            context
                .repository
                .squaddies_with_affiliation(context.phase.current_affiliation())
                .find(|(_, squaddie)| squaddie.can_act())
                .map(|(_, squaddie)| squaddie.battle_squaddie_id)
        })
    }

    /// Decide without touching any state.
    pub fn plan(
        context: &BattleContext,
        actor: BattleSquaddieId,
    ) -> Result<ComputerPlan, BattleError> {
        let (template, squaddie) = context.repository.get_squaddie_by_battle_id(actor)?;
        let Some(origin) = context.map.get_by_battle_squaddie_id(actor) else {
            return Ok(ComputerPlan::EndTurn { actor });
        };

        for &action_template_id in &template.actions {
            let action = context.repository.get_action_template(action_template_id)?;
            let query = TargetingQuery::new(&context.repository, &context.map, actor, action);
            if let Some(&target) = context.validator.valid_targets(&query).first() {
                return Ok(ComputerPlan::UseAction {
                    actor,
                    action_template_id,
                    target,
                });
            }
        }

        let foes: Vec<HexCoordinate> = context
            .repository
            .battle_squaddie_ids()
            .filter_map(|id| {
                let (foe_template, foe) = context.repository.get_squaddie_by_battle_id(id).ok()?;
                if !foe.is_alive()
                    || template.affiliation.is_friendly_to(foe_template.affiliation)
                {
                    return None;
                }
                context.map.get_by_battle_squaddie_id(id)
            })
            .collect();
        let distance_to_foes = |coordinate: HexCoordinate| {
            foes.iter()
                .map(|foe| coordinate.distance_to(*foe))
                .min()
                .unwrap_or(u32::MAX)
        };

        let budget = squaddie.action_points * template.movement_per_action_point;
        let current = distance_to_foes(origin);
        let best = context
            .map
            .reachable_coordinates(origin, budget)
            .into_iter()
            .filter(|(coordinate, _)| *coordinate != origin)
            .min_by_key(|(coordinate, steps)| (distance_to_foes(*coordinate), *steps, *coordinate));

        Ok(match best {
            Some((destination, _)) if distance_to_foes(destination) < current => {
                ComputerPlan::Move { actor, destination }
            }
            _ => ComputerPlan::EndTurn { actor },
        })
    }

    fn carry_out(
        &mut self,
        context: &mut BattleContext,
        plan: ComputerPlan,
    ) -> Result<(), BattleError> {
        debug!(?plan, "Computer squaddie decided");
        match plan {
            ComputerPlan::UseAction {
                actor,
                action_template_id,
                target,
            } => {
                context.decision_step.set_actor(actor)?;
                context.decision_step.add_action(ActionKind::ActionTemplate(action_template_id))?;
                context.decision_step.set_confirmed_target(target)?;
                context.send_message(Message::PlayerConfirmsAction {
                    battle_squaddie_id: actor,
                })?;
                self.completion = Some(CompletionReason::ComputerActionConfirmed);
            }
            ComputerPlan::Move { actor, destination } => {
                context.decision_step.set_actor(actor)?;
                context.decision_step.add_action(ActionKind::Movement)?;
                context.decision_step.set_confirmed_target(destination)?;
                context.send_message(Message::MoveSquaddieToCoordinate {
                    battle_squaddie_id: actor,
                    target_coordinate: destination,
                })?;
                self.completion = Some(CompletionReason::SquaddieMoving);
            }
            ComputerPlan::EndTurn { actor } => {
                context.decision_step.set_actor(actor)?;
                context.decision_step.add_action(ActionKind::EndTurn)?;
                context.send_message(Message::PlayerEndsTurn {
                    battle_squaddie_id: actor,
                })?;
                self.completion = Some(CompletionReason::SquaddieEndedTurn);
            }
        }
        Ok(())
    }
}

impl BattleOrchestratorComponent for ComputerSquaddieSelector {
    fn mode(&self) -> BattleOrchestratorMode {
        BattleOrchestratorMode::ComputerSquaddieSelector
    }

    fn update(&mut self, context: &mut BattleContext, _delta: Duration) -> Result<(), BattleError> {
        if self.completion.is_some() {
            return Ok(());
        }

        let Some(actor) = Self::next_actor(context) else {
            debug!(affiliation = %context.phase.current_affiliation(), "Computer team cannot act");
            self.completion = Some(CompletionReason::TeamCannotAct);
            return Ok(());
        };
        let plan = Self::plan(context, actor)?;
        self.carry_out(context, plan)
    }

    fn completion_reason(&self, _context: &BattleContext) -> Option<CompletionReason> {
        self.completion
    }

    fn reset(&mut self, _context: &mut BattleContext) {
        self.completion = None;
    }
}
