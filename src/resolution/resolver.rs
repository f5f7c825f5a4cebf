//! Action resolution: rolls, damage, healing, movement and action points.
//!
//! Attacks roll 2d6 plus the action's attack bonus against the target's
//! armor. A natural 12 is a critical success and a natural 2 a critical
//! failure; beating armor by 6 or more is also critical. Critical hits deal
//! double damage. Actions without the `Attack` trait, or with
//! `AlwaysSucceeds`, skip the roll.

use tracing::debug;

use crate::core::{ActionTemplateId, BattleContext, BattleSquaddieId, GameRng, HexCoordinate};
use crate::error::BattleError;
use crate::map::MapError;
use crate::recorder::{BattleAction, DegreeOfSuccess, SquaddieEffectResult};
use crate::squaddie::{ActionTemplate, ActionTrait};

const CRITICAL_MARGIN: i32 = 6;

/// Grade a roll. `natural` is the sum of the dice before bonuses.
#[must_use]
pub fn degree_of_success(natural: i32, attack_bonus: i32, armor: i32) -> DegreeOfSuccess {
    if natural >= 12 {
        return DegreeOfSuccess::CriticalSuccess;
    }
    if natural <= 2 {
        return DegreeOfSuccess::CriticalFailure;
    }

    let total = natural + attack_bonus;
    if total >= armor + CRITICAL_MARGIN {
        DegreeOfSuccess::CriticalSuccess
    } else if total >= armor {
        DegreeOfSuccess::Success
    } else {
        DegreeOfSuccess::Failure
    }
}

/// Roll for `action` against a target with `target_armor`.
pub fn roll_degree_of_success(
    rng: &mut GameRng,
    action: &ActionTemplate,
    target_armor: i32,
) -> DegreeOfSuccess {
    if !action.has_trait(ActionTrait::Attack) || action.has_trait(ActionTrait::AlwaysSucceeds) {
        return DegreeOfSuccess::Success;
    }
    degree_of_success(rng.roll_dice(2, 6), action.attack_bonus, target_armor)
}

/// Action points needed to walk `path_length` tiles.
#[must_use]
pub fn movement_action_point_cost(path_length: u32, movement_per_action_point: u32) -> u32 {
    path_length.div_ceil(movement_per_action_point.max(1))
}

/// Apply an action template to whoever stands on `target_coordinate`.
///
/// Spends the action's cost, applies damage or healing, and takes defeated
/// squaddies off the map.
pub fn resolve_squaddie_action(
    context: &mut BattleContext,
    actor: BattleSquaddieId,
    action_template_id: ActionTemplateId,
    target_coordinate: HexCoordinate,
) -> Result<BattleAction, BattleError> {
    let action = context.repository.get_action_template(action_template_id)?.clone();
    spend(context, actor, action.action_point_cost)?;

    let mut results = Vec::new();
    if let Some(target) = context.map.get_squaddie_at(target_coordinate) {
        let (target_template, _) = context.repository.get_squaddie_by_battle_id(target)?;
        let armor = target_template.armor;
        let max_hit_points = target_template.max_hit_points;

        let degree_of_success = roll_degree_of_success(&mut context.rng, &action, armor);
        let squaddie = context.repository.get_battle_squaddie_mut(target)?;

        let mut damage = 0;
        let mut healing = 0;
        if degree_of_success.is_success() {
            let multiplier = if degree_of_success == DegreeOfSuccess::CriticalSuccess {
                2
            } else {
                1
            };
            damage = squaddie.take_damage(action.damage * multiplier);
            healing = squaddie.receive_healing(action.healing, max_hit_points);
        }
        let resulting_hit_points = squaddie.hit_points;
        let defeated = !squaddie.is_alive();

        debug!(
            %actor,
            %target,
            action = %action.name,
            %degree_of_success,
            damage,
            healing,
            "Action resolved"
        );

        if defeated {
            context.map.remove_squaddie(target);
            debug!(%target, "Squaddie defeated");
        }

        results.push(SquaddieEffectResult {
            target_battle_squaddie_id: target,
            damage,
            healing,
            degree_of_success,
            resulting_hit_points,
        });
    }

    Ok(BattleAction::squaddie_action(actor, action_template_id, target_coordinate, results))
}

/// Walk `actor` to `destination`, paying for the shortest path.
pub fn resolve_movement(
    context: &mut BattleContext,
    actor: BattleSquaddieId,
    destination: HexCoordinate,
) -> Result<BattleAction, BattleError> {
    let start = context
        .map
        .get_by_battle_squaddie_id(actor)
        .ok_or(MapError::NotOnMap(actor))?;
    let path_length = context.map.path_length(start, destination).ok_or(MapError::Unreachable {
        from: start,
        to: destination,
    })?;

    let (template, _) = context.repository.get_squaddie_by_battle_id(actor)?;
    let cost = movement_action_point_cost(path_length, template.movement_per_action_point);

    spend(context, actor, cost)?;
    context.map.update_battle_squaddie_coordinate(actor, destination)?;
    debug!(%actor, from = %start, to = %destination, cost, "Squaddie moved");

    Ok(BattleAction::movement(actor, start, destination))
}

/// Give up every remaining action point.
pub fn resolve_end_turn(
    context: &mut BattleContext,
    actor: BattleSquaddieId,
) -> Result<BattleAction, BattleError> {
    context.repository.get_battle_squaddie_mut(actor)?.end_turn();
    debug!(%actor, "Squaddie ended turn");
    Ok(BattleAction::end_turn(actor))
}

fn spend(
    context: &mut BattleContext,
    actor: BattleSquaddieId,
    cost: u32,
) -> Result<(), BattleError> {
    let squaddie = context.repository.get_battle_squaddie_mut(actor)?;
    if squaddie.action_points < cost {
        return Err(BattleError::NotEnoughActionPoints(actor, cost));
    }
    squaddie.spend_action_points(cost);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{skirmish, BANDIT, KNIGHT, MEND, SLASH};

    #[test]
    fn test_degree_of_success() {
        assert_eq!(degree_of_success(12, -10, 20), DegreeOfSuccess::CriticalSuccess);
        assert_eq!(degree_of_success(2, 10, 0), DegreeOfSuccess::CriticalFailure);
        assert_eq!(degree_of_success(7, 0, 7), DegreeOfSuccess::Success);
        assert_eq!(degree_of_success(6, 0, 7), DegreeOfSuccess::Failure);
        assert_eq!(degree_of_success(7, 6, 7), DegreeOfSuccess::CriticalSuccess);
    }

    #[test]
    fn test_healing_always_succeeds() {
        let mut rng = GameRng::new(1);
        let mend = ActionTemplate::heal(ActionTemplateId::new(9), "Mend", 2);
        for _ in 0..20 {
            assert_eq!(roll_degree_of_success(&mut rng, &mend, 100), DegreeOfSuccess::Success);
        }
    }

    #[test]
    fn test_movement_cost_rounds_up() {
        assert_eq!(movement_action_point_cost(0, 2), 0);
        assert_eq!(movement_action_point_cost(1, 2), 1);
        assert_eq!(movement_action_point_cost(3, 2), 2);
        assert_eq!(movement_action_point_cost(3, 0), 3);
    }

    #[test]
    fn test_attack_spends_action_points() {
        let mut context = skirmish();
        let action =
            resolve_squaddie_action(&mut context, KNIGHT, SLASH, HexCoordinate::new(1, 0)).unwrap();

        let (_, knight) = context.repository.get_squaddie_by_battle_id(KNIGHT).unwrap();
        assert_eq!(knight.action_points, 1);

        let results = action.squaddie_results();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].target_battle_squaddie_id, BANDIT);

        let (_, bandit) = context.repository.get_squaddie_by_battle_id(BANDIT).unwrap();
        assert_eq!(results[0].resulting_hit_points, bandit.hit_points);
        assert_eq!(bandit.hit_points, 5 - results[0].damage);
    }

    #[test]
    fn test_heal_caps_at_max() {
        let mut context = skirmish();
        context.repository.get_battle_squaddie_mut(KNIGHT).unwrap().take_damage(1);

        let action =
            resolve_squaddie_action(&mut context, KNIGHT, MEND, HexCoordinate::new(0, 0)).unwrap();
        let result = &action.squaddie_results()[0];
        assert_eq!(result.healing, 1);
        assert_eq!(result.resulting_hit_points, 5);
    }

    #[test]
    fn test_defeated_target_leaves_map() {
        let mut context = skirmish();
        context.repository.get_battle_squaddie_mut(BANDIT).unwrap().take_damage(4);

        // Keep attacking until a hit lands; the bandit has one hit point left.
        for _ in 0..20 {
            context.repository.get_battle_squaddie_mut(KNIGHT).unwrap().refresh_action_points(3);
            resolve_squaddie_action(&mut context, KNIGHT, SLASH, HexCoordinate::new(1, 0)).unwrap();
            if context.map.get_by_battle_squaddie_id(BANDIT).is_none() {
                break;
            }
        }

        assert_eq!(context.map.get_by_battle_squaddie_id(BANDIT), None);
        let (_, bandit) = context.repository.get_squaddie_by_battle_id(BANDIT).unwrap();
        assert_eq!(bandit.hit_points, 0);
    }

    #[test]
    fn test_not_enough_action_points() {
        let mut context = skirmish();
        context.repository.get_battle_squaddie_mut(KNIGHT).unwrap().spend_action_points(2);

        let error = resolve_squaddie_action(&mut context, KNIGHT, SLASH, HexCoordinate::new(1, 0))
            .unwrap_err();
        assert!(matches!(error, BattleError::NotEnoughActionPoints(id, 2) if id == KNIGHT));
    }

    #[test]
    fn test_movement() {
        let mut context = skirmish();
        let action = resolve_movement(&mut context, KNIGHT, HexCoordinate::new(0, 3)).unwrap();

        assert_eq!(
            action,
            BattleAction::movement(KNIGHT, HexCoordinate::new(0, 0), HexCoordinate::new(0, 3))
        );
        assert_eq!(context.map.get_by_battle_squaddie_id(KNIGHT), Some(HexCoordinate::new(0, 3)));

        let (_, knight) = context.repository.get_squaddie_by_battle_id(KNIGHT).unwrap();
        assert_eq!(knight.action_points, 1);
    }

    #[test]
    fn test_end_turn() {
        let mut context = skirmish();
        let action = resolve_end_turn(&mut context, KNIGHT).unwrap();

        assert_eq!(action, BattleAction::end_turn(KNIGHT));
        let (_, knight) = context.repository.get_squaddie_by_battle_id(KNIGHT).unwrap();
        assert_eq!(knight.action_points, 0);
    }
}
