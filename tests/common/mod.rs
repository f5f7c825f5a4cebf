//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use hex_tactics::core::{
    ActionTemplateId, BattleConfig, BattleContext, BattleSquaddieId, HexCoordinate,
    SquaddieAffiliation, SquaddieTemplateId,
};
use hex_tactics::map::MissionMap;
use hex_tactics::message::{Message, MessageType};
use hex_tactics::orchestrator::{BattleOrchestrator, BattleOrchestratorMode};
use hex_tactics::squaddie::{ActionTemplate, BattleSquaddie, ObjectRepository, SquaddieTemplate};

pub const KNIGHT: BattleSquaddieId = BattleSquaddieId::new(1);
pub const BANDIT: BattleSquaddieId = BattleSquaddieId::new(2);

pub const SLASH: ActionTemplateId = ActionTemplateId::new(1);
pub const MEND: ActionTemplateId = ActionTemplateId::new(2);
pub const CLUB: ActionTemplateId = ActionTemplateId::new(3);

pub const TICK: Duration = Duration::from_millis(10);

/// Log to the test writer. Set `RUST_LOG=hex_tactics=debug` to see output.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn config() -> BattleConfig {
    BattleConfig::default()
        .with_phase_banner_duration_ms(100)
        .with_action_animation_ms(50)
        .with_movement_animation_ms_per_tile(10)
        .with_affiliation_rotation(vec![SquaddieAffiliation::Player, SquaddieAffiliation::Enemy])
        .with_seed(7)
}

/// A 6x4 open map with the player's knight at (0, 0) and an enemy bandit
/// at (`bandit_q`, 0).
///
/// The knight has Slash (2 action points, range 1) and Mend. The bandit has
/// Club (1 action point, range 1). Both start with 3 action points. The
/// knight has enough hit points to survive a full enemy phase.
pub fn skirmish_with_bandit_at(bandit_q: i32) -> BattleContext {
    init_tracing();

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
    .with_max_hit_points(10)
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
    map.add_squaddie(BANDIT, HexCoordinate::new(bandit_q, 0)).unwrap();

    BattleContext::new(config(), repository, map).unwrap()
}

pub fn skirmish() -> BattleContext {
    skirmish_with_bandit_at(1)
}

/// Collect every message of `message_type` sent from now on.
pub fn capture(context: &BattleContext, message_type: MessageType) -> Rc<RefCell<Vec<Message>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    context.message_board.add_listener(
        Rc::new(RefCell::new(move |message: &Message, _: &mut BattleContext| {
            sink.borrow_mut().push(message.clone());
        })),
        message_type,
    );
    seen
}

/// Tick until `mode` is active. Panics after a generous number of ticks.
pub fn run_until(
    orchestrator: &mut BattleOrchestrator,
    context: &mut BattleContext,
    mode: BattleOrchestratorMode,
) {
    for _ in 0..500 {
        if orchestrator.mode() == mode {
            return;
        }
        orchestrator.update(context, TICK).unwrap();
    }
    panic!("never reached {mode}, stuck in {}", orchestrator.mode());
}
