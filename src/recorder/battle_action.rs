//! Battle action records: who acted, what they did, and what happened.
//!
//! A `BattleAction` is created once, when a decision is committed, and is
//! never modified afterwards. The effect always matches the action kind:
//!
//! - `ActionTemplate` actions carry per-target [`SquaddieEffectResult`]s
//! - `Movement` carries the start and end coordinates
//! - `EndTurn` carries nothing
//!
//! ## Example
//!
//! ```
//! use hex_tactics::core::{BattleSquaddieId, HexCoordinate};
//! use hex_tactics::decision::ActionKind;
//! use hex_tactics::recorder::BattleAction;
//!
//! let step = BattleAction::movement(
//!     BattleSquaddieId::new(1),
//!     HexCoordinate::new(0, 0),
//!     HexCoordinate::new(2, 0),
//! );
//! assert_eq!(step.action, ActionKind::Movement);
//! assert_eq!(step.actor_id(), BattleSquaddieId::new(1));
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ActionTemplateId, BattleConfig, BattleSquaddieId, HexCoordinate};
use crate::decision::ActionKind;

/// How well an action roll went.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DegreeOfSuccess {
    CriticalSuccess,
    Success,
    Failure,
    CriticalFailure,
}

impl DegreeOfSuccess {
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, DegreeOfSuccess::CriticalSuccess | DegreeOfSuccess::Success)
    }
}

/// What an action did to one squaddie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquaddieEffectResult {
    pub target_battle_squaddie_id: BattleSquaddieId,

    /// Hit points actually lost.
    pub damage: i32,

    /// Hit points actually restored.
    pub healing: i32,

    pub degree_of_success: DegreeOfSuccess,

    /// Target hit points after the effect applied.
    pub resulting_hit_points: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleActionActor {
    pub actor_battle_squaddie_id: BattleSquaddieId,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleActionEffect {
    Squaddie {
        target_coordinate: HexCoordinate,
        results: SmallVec<[SquaddieEffectResult; 2]>,
    },
    Movement {
        start_coordinate: HexCoordinate,
        end_coordinate: HexCoordinate,
    },
    EndTurn,
}

/// One committed action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleAction {
    pub actor: BattleActionActor,
    pub action: ActionKind,
    pub effect: BattleActionEffect,
}

impl BattleAction {
    #[must_use]
    pub fn squaddie_action(
        actor: BattleSquaddieId,
        action_template_id: ActionTemplateId,
        target_coordinate: HexCoordinate,
        results: impl IntoIterator<Item = SquaddieEffectResult>,
    ) -> Self {
        Self {
            actor: BattleActionActor {
                actor_battle_squaddie_id: actor,
            },
            action: ActionKind::ActionTemplate(action_template_id),
            effect: BattleActionEffect::Squaddie {
                target_coordinate,
                results: results.into_iter().collect(),
            },
        }
    }

    #[must_use]
    pub fn movement(
        actor: BattleSquaddieId,
        start_coordinate: HexCoordinate,
        end_coordinate: HexCoordinate,
    ) -> Self {
        Self {
            actor: BattleActionActor {
                actor_battle_squaddie_id: actor,
            },
            action: ActionKind::Movement,
            effect: BattleActionEffect::Movement {
                start_coordinate,
                end_coordinate,
            },
        }
    }

    #[must_use]
    pub fn end_turn(actor: BattleSquaddieId) -> Self {
        Self {
            actor: BattleActionActor {
                actor_battle_squaddie_id: actor,
            },
            action: ActionKind::EndTurn,
            effect: BattleActionEffect::EndTurn,
        }
    }

    #[must_use]
    pub fn actor_id(&self) -> BattleSquaddieId {
        self.actor.actor_battle_squaddie_id
    }

    /// Per-target results, empty unless this is a template action.
    #[must_use]
    pub fn squaddie_results(&self) -> &[SquaddieEffectResult] {
        match &self.effect {
            BattleActionEffect::Squaddie { results, .. } => results,
            BattleActionEffect::Movement { .. } | BattleActionEffect::EndTurn => &[],
        }
    }

    /// How long this action plays on the map.
    ///
    /// Movement is timed per tile crossed; ending a turn has nothing to show.
    #[must_use]
    pub fn animation_duration(&self, config: &BattleConfig) -> Duration {
        match &self.effect {
            BattleActionEffect::Squaddie { .. } => config.action_animation_duration(),
            BattleActionEffect::Movement {
                start_coordinate,
                end_coordinate,
            } => config.movement_animation_duration(start_coordinate.distance_to(*end_coordinate)),
            BattleActionEffect::EndTurn => Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(target: u32, damage: i32, remaining: i32) -> SquaddieEffectResult {
        SquaddieEffectResult {
            target_battle_squaddie_id: BattleSquaddieId::new(target),
            damage,
            healing: 0,
            degree_of_success: DegreeOfSuccess::Success,
            resulting_hit_points: remaining,
        }
    }

    #[test]
    fn test_squaddie_action() {
        let action = BattleAction::squaddie_action(
            BattleSquaddieId::new(1),
            ActionTemplateId::new(2),
            HexCoordinate::new(1, 0),
            [hit(5, 2, 3)],
        );

        assert_eq!(action.action, ActionKind::ActionTemplate(ActionTemplateId::new(2)));
        assert_eq!(action.squaddie_results().len(), 1);
        assert_eq!(action.squaddie_results()[0].resulting_hit_points, 3);
    }

    #[test]
    fn test_effect_matches_kind() {
        let end = BattleAction::end_turn(BattleSquaddieId::new(3));
        assert_eq!(end.effect, BattleActionEffect::EndTurn);
        assert!(end.squaddie_results().is_empty());
    }

    #[test]
    fn test_animation_duration() {
        let config = BattleConfig::default()
            .with_action_animation_ms(800)
            .with_movement_animation_ms_per_tile(100);

        let walk = BattleAction::movement(
            BattleSquaddieId::new(1),
            HexCoordinate::new(0, 0),
            HexCoordinate::new(3, 0),
        );
        assert_eq!(walk.animation_duration(&config), Duration::from_millis(300));

        let strike = BattleAction::squaddie_action(
            BattleSquaddieId::new(1),
            ActionTemplateId::new(1),
            HexCoordinate::new(1, 0),
            [hit(2, 1, 4)],
        );
        assert_eq!(strike.animation_duration(&config), Duration::from_millis(800));

        assert_eq!(
            BattleAction::end_turn(BattleSquaddieId::new(1)).animation_duration(&config),
            Duration::ZERO
        );
    }

    #[test]
    fn test_degree_of_success() {
        assert!(DegreeOfSuccess::CriticalSuccess.is_success());
        assert!(!DegreeOfSuccess::Failure.is_success());
        assert_eq!(DegreeOfSuccess::CriticalFailure.to_string(), "critical_failure");
    }
}
