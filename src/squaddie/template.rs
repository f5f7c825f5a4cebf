//! Squaddie templates: stats and actions shared by every instance.

use serde::{Deserialize, Serialize};

use crate::core::{ActionTemplateId, SquaddieAffiliation, SquaddieTemplateId};

/// Shared definition of a kind of squaddie.
///
/// ## Example
///
/// ```
/// use hex_tactics::core::{ActionTemplateId, SquaddieAffiliation, SquaddieTemplateId};
/// use hex_tactics::squaddie::SquaddieTemplate;
///
/// let knight = SquaddieTemplate::new(
///     SquaddieTemplateId::new(1),
///     "Knight",
///     SquaddieAffiliation::Player,
/// )
/// .with_max_hit_points(8)
/// .with_armor(7)
/// .with_action(ActionTemplateId::new(1));
///
/// assert_eq!(knight.actions, vec![ActionTemplateId::new(1)]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquaddieTemplate {
    pub id: SquaddieTemplateId,
    pub name: String,
    pub affiliation: SquaddieAffiliation,
    pub max_hit_points: i32,

    /// Attack rolls must meet or beat this to succeed.
    pub armor: i32,

    /// Tiles moved per action point spent on movement.
    pub movement_per_action_point: u32,

    /// Actions this squaddie may choose from, in HUD order.
    pub actions: Vec<ActionTemplateId>,
}

impl SquaddieTemplate {
    pub fn new(
        id: SquaddieTemplateId,
        name: impl Into<String>,
        affiliation: SquaddieAffiliation,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            affiliation,
            max_hit_points: 5,
            armor: 6,
            movement_per_action_point: 2,
            actions: Vec::new(),
        }
    }

    /// Panics if `hit_points` is not positive.
    #[must_use]
    pub fn with_max_hit_points(mut self, hit_points: i32) -> Self {
        assert!(hit_points > 0, "Squaddies need at least 1 max hit point");
        self.max_hit_points = hit_points;
        self
    }

    #[must_use]
    pub fn with_armor(mut self, armor: i32) -> Self {
        self.armor = armor;
        self
    }

    #[must_use]
    pub fn with_movement_per_action_point(mut self, tiles: u32) -> Self {
        self.movement_per_action_point = tiles;
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: ActionTemplateId) -> Self {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }

    #[must_use]
    pub fn has_action(&self, action: ActionTemplateId) -> bool {
        self.actions.contains(&action)
    }
}
