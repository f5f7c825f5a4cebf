//! Last chance to back out before an action resolves.
//!
//! Confirming (the confirm button, the accept key, or clicking the chosen
//! target again) sends `PlayerConfirmsAction`; the battle action service
//! resolves it. Cancelling drops only the target and returns to target
//! selection, leaving the recorder untouched.

use std::time::Duration;

use tracing::debug;

use super::reject_selection;
use crate::core::BattleContext;
use crate::decision::DecisionStepError;
use crate::error::BattleError;
use crate::message::Message;
use crate::orchestrator::component::{
    BattleOrchestratorComponent, BattleOrchestratorMode, CompletionReason,
};
use crate::orchestrator::input::{HudButton, KeyEvent, MouseEvent, MouseTarget, PlayerInputAction};

#[derive(Clone, Debug, Default)]
pub struct PlayerActionConfirm {
    completion: Option<CompletionReason>,
}

impl PlayerActionConfirm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn confirm(&mut self, context: &mut BattleContext) -> Result<(), BattleError> {
        let actor = context.decision_step.actor().ok_or(DecisionStepError::ActorNotSet)?;
        let target = context
            .decision_step
            .considered_target()
            .ok_or(BattleError::IncompleteDecision("no target to confirm"))?;
        context.decision_step.set_confirmed_target(target)?;
        debug!(%actor, %target, "Player confirmed action");

        context.send_message(Message::PlayerConfirmsAction {
            battle_squaddie_id: actor,
        })?;
        self.completion = Some(CompletionReason::ActionConfirmed);
        Ok(())
    }

    fn cancel(&mut self, context: &mut BattleContext) -> Result<(), BattleError> {
        let actor = context.decision_step.actor().ok_or(DecisionStepError::ActorNotSet)?;
        context.decision_step.remove_target();

        context.send_message(Message::PlayerCancelsTargetConfirmation {
            battle_squaddie_id: actor,
        })?;
        self.completion = Some(CompletionReason::ConfirmationCancelled);
        Ok(())
    }
}

impl BattleOrchestratorComponent for PlayerActionConfirm {
    fn mode(&self) -> BattleOrchestratorMode {
        BattleOrchestratorMode::PlayerActionConfirm
    }

    fn update(&mut self, context: &mut BattleContext, _delta: Duration) -> Result<(), BattleError> {
        if self.completion.is_none() && !context.decision_step.is_target_considered() {
            return Err(BattleError::IncompleteDecision("no target to confirm"));
        }
        Ok(())
    }

    fn completion_reason(&self, _context: &BattleContext) -> Option<CompletionReason> {
        self.completion
    }

    fn reset(&mut self, _context: &mut BattleContext) {
        self.completion = None;
    }

    fn mouse_event_happened(
        &mut self,
        context: &mut BattleContext,
        event: MouseEvent,
    ) -> Result<(), BattleError> {
        if self.completion.is_some() || !event.is_press() {
            return Ok(());
        }
        match event.target {
            MouseTarget::Button(HudButton::Confirm) => self.confirm(context),
            MouseTarget::Button(HudButton::Cancel) => self.cancel(context),
            MouseTarget::Map(coordinate)
                if context.decision_step.considered_target() == Some(coordinate) =>
            {
                self.confirm(context)
            }
            MouseTarget::Map(_) | MouseTarget::Button(_) => {
                reject_selection(context, "confirm the action or cancel")
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
        match event.action {
            PlayerInputAction::Accept => self.confirm(context),
            PlayerInputAction::Cancel => self.cancel(context),
            PlayerInputAction::EndTurn => reject_selection(context, "confirm the action or cancel"),
        }
    }
}
