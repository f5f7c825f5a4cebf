//! Battle squaddies: per-battle mutable state of one squaddie.
//!
//! Position is not stored here; the [`MissionMap`](crate::map::MissionMap)
//! owns squaddie coordinates.

use serde::{Deserialize, Serialize};

use super::template::SquaddieTemplate;
use crate::core::{BattleSquaddieId, SquaddieTemplateId};

/// Action points a freshly created squaddie starts with.
pub const DEFAULT_ACTION_POINTS: u32 = 3;

/// A squaddie instance on the battlefield.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleSquaddie {
    pub battle_squaddie_id: BattleSquaddieId,
    pub template_id: SquaddieTemplateId,
    pub hit_points: i32,
    pub action_points: u32,
}

impl BattleSquaddie {
    /// Create an unhurt squaddie with [`DEFAULT_ACTION_POINTS`].
    #[must_use]
    pub fn new(battle_squaddie_id: BattleSquaddieId, template: &SquaddieTemplate) -> Self {
        Self {
            battle_squaddie_id,
            template_id: template.id,
            hit_points: template.max_hit_points,
            action_points: DEFAULT_ACTION_POINTS,
        }
    }

    #[must_use]
    pub fn with_action_points(mut self, action_points: u32) -> Self {
        self.action_points = action_points;
        self
    }

    #[must_use]
    pub fn with_hit_points(mut self, hit_points: i32) -> Self {
        self.hit_points = hit_points;
        self
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hit_points > 0
    }

    /// Alive and holding at least one action point.
    #[must_use]
    pub fn can_act(&self) -> bool {
        self.is_alive() && self.action_points > 0
    }

    /// Spend action points, never going below zero.
    pub fn spend_action_points(&mut self, points: u32) {
        self.action_points = self.action_points.saturating_sub(points);
    }

    /// Give up every remaining action point.
    pub fn end_turn(&mut self) {
        self.action_points = 0;
    }

    /// Restore action points at the start of the squaddie's phase.
    pub fn refresh_action_points(&mut self, points: u32) {
        if self.is_alive() {
            self.action_points = points;
        }
    }

    /// Remove hit points; returns the amount actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let lost = amount.clamp(0, self.hit_points.max(0));
        self.hit_points -= lost;
        if !self.is_alive() {
            self.action_points = 0;
        }
        lost
    }

    /// Restore hit points up to `max_hit_points`; returns the amount gained.
    pub fn receive_healing(&mut self, amount: i32, max_hit_points: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let gained = amount.clamp(0, (max_hit_points - self.hit_points).max(0));
        self.hit_points += gained;
        gained
    }
}
