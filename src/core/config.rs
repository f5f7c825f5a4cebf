//! Battle configuration.
//!
//! Timing values are in milliseconds of simulated time: the orchestrator is
//! driven by the `delta` passed to each tick, never by a wall clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::SquaddieAffiliation;

/// Battle-wide tuning knobs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleConfig {
    /// How long the phase banner stays up before the phase starts.
    pub phase_banner_duration_ms: u64,

    /// How long a non-movement action animates on the map.
    pub action_animation_ms: u64,

    /// How long a moving squaddie spends on each tile of its path.
    pub movement_animation_ms_per_tile: u64,

    /// Phase order. The turn counter increments each time the rotation
    /// wraps back to the first entry.
    pub affiliation_rotation: Vec<SquaddieAffiliation>,

    /// Action points every squaddie receives when its phase starts.
    pub action_points_per_turn: u32,

    /// Maximum number of actions kept in the recorder history.
    /// `None` keeps every action for the whole battle.
    pub history_limit: Option<usize>,

    /// Seed for attack rolls.
    pub seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            phase_banner_duration_ms: 2000,
            action_animation_ms: 1000,
            movement_animation_ms_per_tile: 250,
            affiliation_rotation: vec![
                SquaddieAffiliation::Player,
                SquaddieAffiliation::Enemy,
                SquaddieAffiliation::Ally,
                SquaddieAffiliation::None,
            ],
            action_points_per_turn: 3,
            history_limit: None,
            seed: 42,
        }
    }
}

impl BattleConfig {
    /// Set the banner duration.
    #[must_use]
    pub fn with_phase_banner_duration_ms(mut self, ms: u64) -> Self {
        self.phase_banner_duration_ms = ms;
        self
    }

    /// Set the per-action animation duration.
    #[must_use]
    pub fn with_action_animation_ms(mut self, ms: u64) -> Self {
        self.action_animation_ms = ms;
        self
    }

    /// Set the per-tile movement animation duration.
    #[must_use]
    pub fn with_movement_animation_ms_per_tile(mut self, ms: u64) -> Self {
        self.movement_animation_ms_per_tile = ms;
        self
    }

    /// Replace the phase rotation.
    ///
    /// Panics if the rotation is empty.
    #[must_use]
    pub fn with_affiliation_rotation(mut self, rotation: Vec<SquaddieAffiliation>) -> Self {
        assert!(!rotation.is_empty(), "Phase rotation needs at least one affiliation");
        self.affiliation_rotation = rotation;
        self
    }

    /// Set action points granted per turn.
    #[must_use]
    pub fn with_action_points_per_turn(mut self, points: u32) -> Self {
        self.action_points_per_turn = points;
        self
    }

    /// Cap the recorder history.
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Set the attack roll seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn phase_banner_duration(&self) -> Duration {
        Duration::from_millis(self.phase_banner_duration_ms)
    }

    #[must_use]
    pub fn action_animation_duration(&self) -> Duration {
        Duration::from_millis(self.action_animation_ms)
    }

    /// Total animation time for a path of `tiles` steps.
    #[must_use]
    pub fn movement_animation_duration(&self, tiles: u32) -> Duration {
        Duration::from_millis(self.movement_animation_ms_per_tile * u64::from(tiles.max(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BattleConfig::default();
        assert_eq!(config.action_points_per_turn, 3);
        assert_eq!(config.affiliation_rotation[0], SquaddieAffiliation::Player);
        assert_eq!(config.history_limit, None);
        assert_eq!(config.phase_banner_duration(), Duration::from_millis(2000));
    }

    #[test]
    fn test_builder() {
        let config = BattleConfig::default()
            .with_phase_banner_duration_ms(10)
            .with_action_animation_ms(20)
            .with_movement_animation_ms_per_tile(5)
            .with_affiliation_rotation(vec![SquaddieAffiliation::Enemy])
            .with_action_points_per_turn(4)
            .with_history_limit(100)
            .with_seed(9);

        assert_eq!(config.phase_banner_duration(), Duration::from_millis(10));
        assert_eq!(config.action_animation_duration(), Duration::from_millis(20));
        assert_eq!(config.movement_animation_duration(3), Duration::from_millis(15));
        assert_eq!(config.affiliation_rotation, vec![SquaddieAffiliation::Enemy]);
        assert_eq!(config.action_points_per_turn, 4);
        assert_eq!(config.history_limit, Some(100));
        assert_eq!(config.seed, 9);
    }

    #[test]
    fn test_zero_tile_movement_still_animates() {
        let config = BattleConfig::default().with_movement_animation_ms_per_tile(100);
        assert_eq!(config.movement_animation_duration(0), Duration::from_millis(100));
    }

    #[test]
    #[should_panic(expected = "Phase rotation needs at least one affiliation")]
    fn test_empty_rotation() {
        let _ = BattleConfig::default().with_affiliation_rotation(Vec::new());
    }

    #[test]
    fn test_config_serialization() {
        let config = BattleConfig::default().with_history_limit(5);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: BattleConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
