//! Shared fixtures for unit tests.

use crate::core::{
    ActionTemplateId, BattleConfig, BattleContext, BattleSquaddieId, HexCoordinate,
    SquaddieAffiliation, SquaddieTemplateId,
};
use crate::map::MissionMap;
use crate::squaddie::{ActionTemplate, BattleSquaddie, ObjectRepository, SquaddieTemplate};

pub const KNIGHT: BattleSquaddieId = BattleSquaddieId::new(1);
pub const BANDIT: BattleSquaddieId = BattleSquaddieId::new(2);

pub const SLASH: ActionTemplateId = ActionTemplateId::new(1);
pub const MEND: ActionTemplateId = ActionTemplateId::new(2);
pub const CLUB: ActionTemplateId = ActionTemplateId::new(3);

pub fn config() -> BattleConfig {
    BattleConfig::default()
        .with_phase_banner_duration_ms(100)
        .with_action_animation_ms(50)
        .with_movement_animation_ms_per_tile(10)
        .with_seed(7)
}

/// A 6x4 open map: the player's knight at (0, 0), an enemy bandit next to
/// it at (1, 0).
///
/// Slash costs 2 action points and has range 1. Mend heals allies within 1.
/// Club is the bandit's 1-point melee attack.
pub fn skirmish() -> BattleContext {
    let mut repository = ObjectRepository::new();
    repository.add_action_template(
        ActionTemplate::attack(SLASH, "Slash", 2)
            .with_cost(2)
            .with_attack_bonus(2),
    );
    repository.add_action_template(ActionTemplate::heal(MEND, "Mend", 2));
    repository.add_action_template(ActionTemplate::attack(CLUB, "Club", 1));

    let knight = SquaddieTemplate::new(
        SquaddieTemplateId::new(1),
        "Knight",
        SquaddieAffiliation::Player,
    )
    .with_action(SLASH)
    .with_action(MEND);
    let bandit = SquaddieTemplate::new(
        SquaddieTemplateId::new(2),
        "Bandit",
        SquaddieAffiliation::Enemy,
    )
    .with_action(CLUB);

    let squaddies = [BattleSquaddie::new(KNIGHT, &knight), BattleSquaddie::new(BANDIT, &bandit)];
    repository.add_squaddie_template(knight);
    repository.add_squaddie_template(bandit);
    for squaddie in squaddies {
        repository.add_battle_squaddie(squaddie);
    }

    let mut map = MissionMap::new(6, 4);
    map.add_squaddie(KNIGHT, HexCoordinate::new(0, 0)).unwrap();
    map.add_squaddie(BANDIT, HexCoordinate::new(1, 0)).unwrap();

    BattleContext::new(config(), repository, map).unwrap()
}
