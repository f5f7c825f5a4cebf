//! Staged builder for the current decision.
//!
//! Stages must be filled in order: actor, then action, then target. Each
//! setter checks the ordering and returns [`DecisionStepError`] on a
//! violation. The step applies no game rules; range, affiliation and cost
//! are checked by the targeting validator before anything is set here.
//!
//! ```
//! use hex_tactics::core::{ActionTemplateId, BattleSquaddieId, HexCoordinate};
//! use hex_tactics::decision::{ActionKind, BattleActionDecisionStep};
//!
//! let mut step = BattleActionDecisionStep::new();
//! step.set_actor(BattleSquaddieId::new(1)).unwrap();
//! step.add_action(ActionKind::ActionTemplate(ActionTemplateId::new(3))).unwrap();
//! step.set_considered_target(HexCoordinate::new(2, 2)).unwrap();
//!
//! assert!(step.is_target_considered());
//! assert!(!step.is_target_confirmed());
//!
//! step.reset();
//! assert_eq!(step, BattleActionDecisionStep::new());
//! ```

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ActionTemplateId, BattleSquaddieId, HexCoordinate};

/// What a squaddie does: use an action template, move, or end its turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    ActionTemplate(ActionTemplateId),
    Movement,
    EndTurn,
}

impl ActionKind {
    /// The action template id, if this is a template action.
    #[must_use]
    pub fn action_template_id(self) -> Option<ActionTemplateId> {
        match self {
            ActionKind::ActionTemplate(id) => Some(id),
            ActionKind::Movement | ActionKind::EndTurn => None,
        }
    }
}

/// Ordering violations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecisionStepError {
    #[error("an actor is already set ({0}); reset the decision step first")]
    ActorAlreadySet(BattleSquaddieId),

    #[error("no actor is set")]
    ActorNotSet,

    #[error("an action is already set ({0:?})")]
    ActionAlreadySet(ActionKind),

    #[error("no action is set")]
    ActionNotSet,
}

/// Target coordinates of the decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionTarget {
    /// Where the player is currently pointing.
    pub considered_coordinate: HexCoordinate,

    /// Set once the player confirms; always equal to the considered coordinate.
    pub confirmed_coordinate: Option<HexCoordinate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleActionDecisionStep {
    actor: Option<BattleSquaddieId>,
    action: Option<ActionKind>,
    target: Option<DecisionTarget>,
}

impl BattleActionDecisionStep {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear every stage.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn set_actor(
        &mut self,
        battle_squaddie_id: BattleSquaddieId,
    ) -> Result<(), DecisionStepError> {
        if let Some(actor) = self.actor {
            return Err(DecisionStepError::ActorAlreadySet(actor));
        }
        trace!(actor = %battle_squaddie_id, "Decision actor set");
        self.actor = Some(battle_squaddie_id);
        Ok(())
    }

    pub fn add_action(&mut self, action: ActionKind) -> Result<(), DecisionStepError> {
        if self.actor.is_none() {
            return Err(DecisionStepError::ActorNotSet);
        }
        if let Some(existing) = self.action {
            return Err(DecisionStepError::ActionAlreadySet(existing));
        }
        trace!(?action, "Decision action set");
        self.action = Some(action);
        Ok(())
    }

    /// Point at a coordinate without committing to it.
    ///
    /// Replaces any earlier target, confirmed or not.
    pub fn set_considered_target(
        &mut self,
        coordinate: HexCoordinate,
    ) -> Result<(), DecisionStepError> {
        self.require_action()?;
        self.target = Some(DecisionTarget {
            considered_coordinate: coordinate,
            confirmed_coordinate: None,
        });
        Ok(())
    }

    /// Commit to a coordinate. The considered coordinate follows it.
    pub fn set_confirmed_target(
        &mut self,
        coordinate: HexCoordinate,
    ) -> Result<(), DecisionStepError> {
        self.require_action()?;
        trace!(%coordinate, "Decision target confirmed");
        self.target = Some(DecisionTarget {
            considered_coordinate: coordinate,
            confirmed_coordinate: Some(coordinate),
        });
        Ok(())
    }

    /// Drop the target, keeping actor and action.
    pub fn remove_target(&mut self) {
        self.target = None;
    }

    #[must_use]
    pub fn actor(&self) -> Option<BattleSquaddieId> {
        self.actor
    }

    #[must_use]
    pub fn action(&self) -> Option<ActionKind> {
        self.action
    }

    #[must_use]
    pub fn target(&self) -> Option<DecisionTarget> {
        self.target
    }

    #[must_use]
    pub fn considered_target(&self) -> Option<HexCoordinate> {
        self.target.map(|target| target.considered_coordinate)
    }

    #[must_use]
    pub fn confirmed_target(&self) -> Option<HexCoordinate> {
        self.target.and_then(|target| target.confirmed_coordinate)
    }

    #[must_use]
    pub fn is_actor_set(&self) -> bool {
        self.actor.is_some()
    }

    #[must_use]
    pub fn is_action_set(&self) -> bool {
        self.action.is_some()
    }

    #[must_use]
    pub fn is_target_considered(&self) -> bool {
        self.target.is_some()
    }

    #[must_use]
    pub fn is_target_confirmed(&self) -> bool {
        self.confirmed_target().is_some()
    }

    fn require_action(&self) -> Result<(), DecisionStepError> {
        if self.actor.is_none() {
            return Err(DecisionStepError::ActorNotSet);
        }
        if self.action.is_none() {
            return Err(DecisionStepError::ActionNotSet);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ACTOR: BattleSquaddieId = BattleSquaddieId::new(1);

    fn step_with_action() -> BattleActionDecisionStep {
        let mut step = BattleActionDecisionStep::new();
        step.set_actor(ACTOR).unwrap();
        step.add_action(ActionKind::ActionTemplate(ActionTemplateId::new(1))).unwrap();
        step
    }

    #[test]
    fn test_new_step_is_empty() {
        let step = BattleActionDecisionStep::new();
        assert!(!step.is_actor_set());
        assert!(!step.is_action_set());
        assert!(!step.is_target_considered());
        assert!(!step.is_target_confirmed());
    }

    #[test]
    fn test_actor_set_twice() {
        let mut step = BattleActionDecisionStep::new();
        step.set_actor(ACTOR).unwrap();
        assert_eq!(
            step.set_actor(BattleSquaddieId::new(2)),
            Err(DecisionStepError::ActorAlreadySet(ACTOR))
        );
        assert_eq!(step.actor(), Some(ACTOR));
    }

    #[test]
    fn test_action_requires_actor() {
        let mut step = BattleActionDecisionStep::new();
        assert_eq!(step.add_action(ActionKind::Movement), Err(DecisionStepError::ActorNotSet));
    }

    #[test]
    fn test_action_set_twice() {
        let mut step = step_with_action();
        assert!(matches!(
            step.add_action(ActionKind::EndTurn),
            Err(DecisionStepError::ActionAlreadySet(ActionKind::ActionTemplate(_)))
        ));
    }

    #[test]
    fn test_target_requires_action() {
        let mut step = BattleActionDecisionStep::new();
        step.set_actor(ACTOR).unwrap();
        assert_eq!(
            step.set_considered_target(HexCoordinate::new(0, 0)),
            Err(DecisionStepError::ActionNotSet)
        );
        assert_eq!(
            step.set_confirmed_target(HexCoordinate::new(0, 0)),
            Err(DecisionStepError::ActionNotSet)
        );
    }

    #[test]
    fn test_confirm_sets_considered() {
        let mut step = step_with_action();
        step.set_considered_target(HexCoordinate::new(1, 1)).unwrap();
        step.set_confirmed_target(HexCoordinate::new(2, 0)).unwrap();

        assert_eq!(step.considered_target(), Some(HexCoordinate::new(2, 0)));
        assert_eq!(step.confirmed_target(), Some(HexCoordinate::new(2, 0)));
    }

    #[test]
    fn test_considering_again_drops_confirmation() {
        let mut step = step_with_action();
        step.set_confirmed_target(HexCoordinate::new(2, 0)).unwrap();
        step.set_considered_target(HexCoordinate::new(1, 0)).unwrap();

        assert!(step.is_target_considered());
        assert!(!step.is_target_confirmed());
    }

    #[test]
    fn test_remove_target_keeps_action() {
        let mut step = step_with_action();
        step.set_confirmed_target(HexCoordinate::new(2, 0)).unwrap();
        step.remove_target();

        assert!(step.is_action_set());
        assert!(!step.is_target_considered());
        assert!(!step.is_target_confirmed());
    }

    #[test]
    fn test_action_template_id() {
        assert_eq!(
            ActionKind::ActionTemplate(ActionTemplateId::new(4)).action_template_id(),
            Some(ActionTemplateId::new(4))
        );
        assert_eq!(ActionKind::Movement.action_template_id(), None);
    }

    #[test]
    fn test_serialization() {
        let mut step = step_with_action();
        step.set_considered_target(HexCoordinate::new(3, 1)).unwrap();

        let json = serde_json::to_string(&step).unwrap();
        let restored: BattleActionDecisionStep = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, step);
    }
}
