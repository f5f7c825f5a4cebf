//! Target selection for an action the player has locked in.
//!
//! The decision step already names the actor and the action template. The
//! valid targets are computed on the first update; if there are none the
//! decision is dropped and control returns to the selector.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::reject_selection;
use crate::core::{BattleContext, HexCoordinate};
use crate::decision::{ActionKind, DecisionStepError};
use crate::error::BattleError;
use crate::message::Message;
use crate::orchestrator::component::{
    BattleOrchestratorComponent, BattleOrchestratorMode, CompletionReason,
};
use crate::orchestrator::input::{
    HudButton, KeyEvent, MouseEvent, MouseEventType, MouseTarget, PlayerInputAction,
};
use crate::targeting::TargetingQuery;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetSelectState {
    #[default]
    AwaitingTarget,
    /// The last click was rejected. Becomes `AwaitingTarget` on the next update.
    TargetOutOfRange,
    TargetConfirmed,
    Cancelled,
    NoTargetsFound,
}

impl TargetSelectState {
    #[must_use]
    pub fn accepts_clicks(self) -> bool {
        matches!(self, TargetSelectState::AwaitingTarget | TargetSelectState::TargetOutOfRange)
    }
}

#[derive(Clone, Debug, Default)]
pub struct PlayerActionTargetSelect {
    state: TargetSelectState,
    explanation: Option<String>,
    valid_targets: Option<Vec<HexCoordinate>>,
}

impl PlayerActionTargetSelect {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> TargetSelectState {
        self.state
    }

    /// Why the last click was rejected, for the HUD.
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Coordinates to highlight. Empty until the first update.
    #[must_use]
    pub fn valid_targets(&self) -> &[HexCoordinate] {
        self.valid_targets.as_deref().unwrap_or_default()
    }

    /// Targeting query for the locked actor and action.
    fn query(context: &BattleContext) -> Result<TargetingQuery<'_>, BattleError> {
        let step = &context.decision_step;
        let actor = step.actor().ok_or(DecisionStepError::ActorNotSet)?;
        let Some(ActionKind::ActionTemplate(action_template_id)) = step.action() else {
            return Err(BattleError::IncompleteDecision(
                "target selection needs an action template",
            ));
        };
        let action = context.repository.get_action_template(action_template_id)?;
        Ok(TargetingQuery::new(&context.repository, &context.map, actor, action))
    }

    fn click_map(
        &mut self,
        context: &mut BattleContext,
        coordinate: HexCoordinate,
    ) -> Result<(), BattleError> {
        let verdict = context.validator.check(&Self::query(context)?, coordinate);
        match verdict {
            Ok(()) => {
                let actor = context.decision_step.actor().ok_or(DecisionStepError::ActorNotSet)?;
                context.decision_step.set_considered_target(coordinate)?;
                debug!(%actor, target = %coordinate, "Target selected");
                self.explanation = None;
                self.state = TargetSelectState::TargetConfirmed;
                context.send_message(Message::PlayerSelectsTargetCoordinate {
                    battle_squaddie_id: actor,
                    target_coordinate: coordinate,
                })
            }
            Err(issue) => {
                let reason = issue.to_string();
                self.explanation = Some(reason.clone());
                self.state = TargetSelectState::TargetOutOfRange;
                reject_selection(context, reason)
            }
        }
    }

    /// Consider a hovered tile if it is a valid target. Hovering anywhere
    /// else drops the considered target. Nothing is sent either way.
    fn hover_map(
        context: &mut BattleContext,
        coordinate: HexCoordinate,
    ) -> Result<(), BattleError> {
        let verdict = context.validator.check(&Self::query(context)?, coordinate);
        if verdict.is_ok() {
            context.decision_step.set_considered_target(coordinate)?;
        } else {
            context.decision_step.remove_target();
        }
        Ok(())
    }

    fn cancel(&mut self, context: &mut BattleContext) -> Result<(), BattleError> {
        let actor = context.decision_step.actor().ok_or(DecisionStepError::ActorNotSet)?;
        context.decision_step.reset();
        self.explanation = None;
        self.state = TargetSelectState::Cancelled;
        context.send_message(Message::PlayerCancelsTargetSelection {
            battle_squaddie_id: actor,
        })
    }
}

impl BattleOrchestratorComponent for PlayerActionTargetSelect {
    fn mode(&self) -> BattleOrchestratorMode {
        BattleOrchestratorMode::PlayerActionTargetSelect
    }

    fn update(&mut self, context: &mut BattleContext, _delta: Duration) -> Result<(), BattleError> {
        match self.state {
            TargetSelectState::AwaitingTarget => {}
            TargetSelectState::TargetOutOfRange => self.state = TargetSelectState::AwaitingTarget,
            _ => return Ok(()),
        }
        if self.valid_targets.is_some() {
            return Ok(());
        }

        let targets = context.validator.valid_targets(&Self::query(context)?);
        if targets.is_empty() {
            let reason = "no valid targets for that action";
            self.explanation = Some(reason.to_string());
            self.state = TargetSelectState::NoTargetsFound;
            context.decision_step.reset();
            return reject_selection(context, reason);
        }
        self.valid_targets = Some(targets);
        Ok(())
    }

    fn completion_reason(&self, _context: &BattleContext) -> Option<CompletionReason> {
        match self.state {
            TargetSelectState::TargetConfirmed => Some(CompletionReason::TargetConfirmed),
            TargetSelectState::Cancelled => Some(CompletionReason::TargetSelectionCancelled),
            TargetSelectState::NoTargetsFound => Some(CompletionReason::NoTargetsFound),
            TargetSelectState::AwaitingTarget | TargetSelectState::TargetOutOfRange => None,
        }
    }

    fn reset(&mut self, _context: &mut BattleContext) {
        *self = Self::default();
    }

    fn mouse_event_happened(
        &mut self,
        context: &mut BattleContext,
        event: MouseEvent,
    ) -> Result<(), BattleError> {
        if !self.state.accepts_clicks() {
            return Ok(());
        }
        match (event.event_type, event.target) {
            (MouseEventType::Press, MouseTarget::Map(coordinate)) => {
                self.click_map(context, coordinate)
            }
            (MouseEventType::Press, MouseTarget::Button(HudButton::Cancel)) => self.cancel(context),
            (MouseEventType::Press, MouseTarget::Button(_)) => {
                reject_selection(context, "pick a target or cancel")
            }
            (MouseEventType::Move | MouseEventType::Location, MouseTarget::Map(coordinate)) => {
                Self::hover_map(context, coordinate)
            }
            _ => Ok(()),
        }
    }

    fn key_event_happened(
        &mut self,
        context: &mut BattleContext,
        event: KeyEvent,
    ) -> Result<(), BattleError> {
        if !self.state.accepts_clicks() {
            return Ok(());
        }
        match event.action {
            PlayerInputAction::Cancel => self.cancel(context),
            PlayerInputAction::Accept | PlayerInputAction::EndTurn => Ok(()),
        }
    }
}
