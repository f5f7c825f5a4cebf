//! Targeting validator trait and the default rules.

use crate::core::{BattleSquaddieId, HexCoordinate};
use crate::map::MissionMap;
use crate::squaddie::{ActionTemplate, ObjectRepository, RepositoryError, TargetRelation};

/// Why a coordinate cannot be targeted.
///
/// The display text is shown to the player as the explanation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TargetingIssue {
    #[error("{0} is not on the map")]
    ActorNotOnMap(BattleSquaddieId),

    #[error("{0} is off the map")]
    OffMap(HexCoordinate),

    #[error("target is out of range ({distance} tiles away, range {min_range}-{max_range})")]
    OutOfRange {
        distance: u32,
        min_range: u32,
        max_range: u32,
    },

    #[error("no squaddie at {0}")]
    NoSquaddie(HexCoordinate),

    #[error("target is not a valid {}", relation_name(.0))]
    WrongRelation(TargetRelation),

    #[error("target is already defeated")]
    TargetDefeated,

    #[error("needs {cost} action points, only {available} left")]
    NotEnoughActionPoints { cost: u32, available: u32 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn relation_name(relation: &TargetRelation) -> &'static str {
    match relation {
        TargetRelation::Foe => "foe",
        TargetRelation::Ally => "ally",
        TargetRelation::Self_ => "self target",
    }
}

/// Everything a validator needs besides the candidate coordinate.
#[derive(Clone, Copy)]
pub struct TargetingQuery<'a> {
    pub repository: &'a ObjectRepository,
    pub map: &'a MissionMap,
    pub actor: BattleSquaddieId,
    pub action: &'a ActionTemplate,
}

impl<'a> TargetingQuery<'a> {
    pub fn new(
        repository: &'a ObjectRepository,
        map: &'a MissionMap,
        actor: BattleSquaddieId,
        action: &'a ActionTemplate,
    ) -> Self {
        Self {
            repository,
            map,
            actor,
            action,
        }
    }
}

/// Rule seam for target legality.
///
/// Implementations must be pure: the same query and coordinate always give
/// the same answer.
pub trait TargetingValidator {
    /// Check one coordinate.
    fn check(
        &self,
        query: &TargetingQuery<'_>,
        coordinate: HexCoordinate,
    ) -> Result<(), TargetingIssue>;

    /// Every coordinate on the map that passes [`check`](Self::check), row by row.
    fn valid_targets(&self, query: &TargetingQuery<'_>) -> Vec<HexCoordinate> {
        query
            .map
            .coordinates()
            .filter(|coordinate| self.check(query, *coordinate).is_ok())
            .collect()
    }
}

/// Default rules.
///
/// Checks, in order: the actor can pay, the actor is on the map, the
/// coordinate is on the map and within range, a squaddie stands there, it
/// has the right relation to the actor, and it is still alive.
#[derive(Clone, Copy, Debug, Default)]
pub struct RangeAndAffiliationValidator;

impl TargetingValidator for RangeAndAffiliationValidator {
    fn check(
        &self,
        query: &TargetingQuery<'_>,
        coordinate: HexCoordinate,
    ) -> Result<(), TargetingIssue> {
        let (actor_template, actor) = query.repository.get_squaddie_by_battle_id(query.actor)?;

        let cost = query.action.action_point_cost;
        if actor.action_points < cost {
            return Err(TargetingIssue::NotEnoughActionPoints {
                cost,
                available: actor.action_points,
            });
        }

        let origin = query
            .map
            .get_by_battle_squaddie_id(query.actor)
            .ok_or(TargetingIssue::ActorNotOnMap(query.actor))?;
        if !query.map.is_on_map(coordinate) {
            return Err(TargetingIssue::OffMap(coordinate));
        }

        let distance = origin.distance_to(coordinate);
        if !query.action.is_in_range(distance) {
            return Err(TargetingIssue::OutOfRange {
                distance,
                min_range: query.action.min_range,
                max_range: query.action.max_range,
            });
        }

        let target_id = query
            .map
            .get_squaddie_at(coordinate)
            .ok_or(TargetingIssue::NoSquaddie(coordinate))?;
        let (target_template, target) = query.repository.get_squaddie_by_battle_id(target_id)?;

        let relation = query.action.target_relation;
        if !relation.accepts(
            actor_template.affiliation,
            target_template.affiliation,
            target_id == query.actor,
        ) {
            return Err(TargetingIssue::WrongRelation(relation));
        }
        if !target.is_alive() {
            return Err(TargetingIssue::TargetDefeated);
        }
        Ok(())
    }
}
