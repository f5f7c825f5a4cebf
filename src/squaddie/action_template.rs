//! Action templates: reusable definitions of what a squaddie can do.
//!
//! A template declares its range, which squaddies it may be aimed at, what
//! it costs and what it does. Validation against a concrete target lives in
//! [`crate::targeting`]; the template only describes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ActionTemplateId, SquaddieAffiliation};

/// Which squaddies an action may target, relative to the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetRelation {
    /// Any squaddie not friendly to the actor.
    Foe,
    /// Any friendly squaddie, including the actor.
    Ally,
    /// Only the actor itself.
    Self_,
}

impl TargetRelation {
    /// Check whether a target satisfies this relation.
    ///
    /// `is_actor` is true when the target is the acting squaddie.
    #[must_use]
    pub fn accepts(
        self,
        actor: SquaddieAffiliation,
        target: SquaddieAffiliation,
        is_actor: bool,
    ) -> bool {
        match self {
            TargetRelation::Foe => !is_actor && !actor.is_friendly_to(target),
            TargetRelation::Ally => actor.is_friendly_to(target),
            TargetRelation::Self_ => is_actor,
        }
    }
}

/// Tags that change how an action resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionTrait {
    /// Rolls against the target's armor.
    Attack,
    /// Restores hit points.
    Heal,
    /// Skips the attack roll.
    AlwaysSucceeds,
}

/// A reusable action definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionTemplate {
    pub id: ActionTemplateId,

    /// Human-readable name (for HUD and logs).
    pub name: String,

    /// Closest hex distance that can be targeted.
    pub min_range: u32,

    /// Farthest hex distance that can be targeted.
    pub max_range: u32,

    pub target_relation: TargetRelation,

    /// Action points spent when the action is committed.
    pub action_point_cost: u32,

    /// Hit points removed from the target on success.
    pub damage: i32,

    /// Hit points restored to the target.
    pub healing: i32,

    /// Added to the attack roll.
    pub attack_bonus: i32,

    pub traits: SmallVec<[ActionTrait; 4]>,
}

impl ActionTemplate {
    /// Create a template that targets nothing and does nothing.
    ///
    /// Use the constructors below or the builder methods to give it meaning.
    pub fn new(id: ActionTemplateId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            min_range: 0,
            max_range: 0,
            target_relation: TargetRelation::Self_,
            action_point_cost: 1,
            damage: 0,
            healing: 0,
            attack_bonus: 0,
            traits: SmallVec::new(),
        }
    }

    /// Melee attack against an adjacent foe.
    pub fn attack(id: ActionTemplateId, name: impl Into<String>, damage: i32) -> Self {
        let mut template = Self::new(id, name)
            .with_range(1, 1)
            .with_target_relation(TargetRelation::Foe)
            .with_trait(ActionTrait::Attack);
        template.damage = damage;
        template
    }

    /// Heal an ally within one hex (or the actor itself).
    pub fn heal(id: ActionTemplateId, name: impl Into<String>, healing: i32) -> Self {
        let mut template = Self::new(id, name)
            .with_range(0, 1)
            .with_target_relation(TargetRelation::Ally)
            .with_trait(ActionTrait::Heal)
            .with_trait(ActionTrait::AlwaysSucceeds);
        template.healing = healing;
        template
    }

    /// Set the targetable distance band (inclusive).
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub fn with_range(mut self, min: u32, max: u32) -> Self {
        assert!(min <= max, "Minimum range must not exceed maximum range");
        self.min_range = min;
        self.max_range = max;
        self
    }

    #[must_use]
    pub fn with_target_relation(mut self, relation: TargetRelation) -> Self {
        self.target_relation = relation;
        self
    }

    #[must_use]
    pub fn with_cost(mut self, action_points: u32) -> Self {
        self.action_point_cost = action_points;
        self
    }

    #[must_use]
    pub fn with_attack_bonus(mut self, bonus: i32) -> Self {
        self.attack_bonus = bonus;
        self
    }

    /// Add a trait (builder pattern). Duplicate traits are ignored.
    #[must_use]
    pub fn with_trait(mut self, action_trait: ActionTrait) -> Self {
        if !self.traits.contains(&action_trait) {
            self.traits.push(action_trait);
        }
        self
    }

    #[must_use]
    pub fn has_trait(&self, action_trait: ActionTrait) -> bool {
        self.traits.contains(&action_trait)
    }

    /// Check whether `distance` falls within the template's range.
    #[must_use]
    pub fn is_in_range(&self, distance: u32) -> bool {
        (self.min_range..=self.max_range).contains(&distance)
    }
}
