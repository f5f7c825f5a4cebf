//! Object repository: lookup for squaddie templates, battle squaddies and
//! action templates.
//!
//! Registration happens while a battle is being set up and panics on
//! duplicates, the same way a content registry rejects two definitions under
//! one id. Lookups during play return [`RepositoryError`] so components can
//! propagate them.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::action_template::ActionTemplate;
use super::battle::BattleSquaddie;
use super::template::SquaddieTemplate;
use crate::core::{ActionTemplateId, BattleSquaddieId, SquaddieAffiliation, SquaddieTemplateId};

/// Lookup failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("unknown battle squaddie {0}")]
    UnknownBattleSquaddie(BattleSquaddieId),

    #[error("unknown squaddie template {0}")]
    UnknownSquaddieTemplate(SquaddieTemplateId),

    #[error("unknown action template {0}")]
    UnknownActionTemplate(ActionTemplateId),
}

/// Registry of everything a battle refers to by id.
///
/// ## Example
///
/// ```
/// use hex_tactics::core::{BattleSquaddieId, SquaddieAffiliation, SquaddieTemplateId};
/// use hex_tactics::squaddie::{BattleSquaddie, ObjectRepository, SquaddieTemplate};
///
/// let mut repository = ObjectRepository::new();
/// let template = SquaddieTemplate::new(
///     SquaddieTemplateId::new(1),
///     "Scout",
///     SquaddieAffiliation::Player,
/// );
/// let squaddie = BattleSquaddie::new(BattleSquaddieId::new(10), &template);
///
/// repository.add_squaddie_template(template);
/// repository.add_battle_squaddie(squaddie);
///
/// let (template, battle) = repository
///     .get_squaddie_by_battle_id(BattleSquaddieId::new(10))
///     .unwrap();
/// assert_eq!(template.name, "Scout");
/// assert!(battle.can_act());
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectRepository {
    squaddie_templates: FxHashMap<SquaddieTemplateId, SquaddieTemplate>,
    battle_squaddies: FxHashMap<BattleSquaddieId, BattleSquaddie>,
    action_templates: FxHashMap<ActionTemplateId, ActionTemplate>,

    /// Battle squaddies in the order they were added.
    battle_order: Vec<BattleSquaddieId>,
}

impl ObjectRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a squaddie template.
    ///
    /// Panics if a template with the same ID already exists.
    pub fn add_squaddie_template(&mut self, template: SquaddieTemplate) {
        if self.squaddie_templates.contains_key(&template.id) {
            panic!("Squaddie template {} already registered", template.id);
        }
        self.squaddie_templates.insert(template.id, template);
    }

    /// Register a battle squaddie.
    ///
    /// Panics if the ID is taken or its template was never registered.
    pub fn add_battle_squaddie(&mut self, squaddie: BattleSquaddie) {
        let id = squaddie.battle_squaddie_id;
        if self.battle_squaddies.contains_key(&id) {
            panic!("Battle squaddie {} already registered", id);
        }
        if !self.squaddie_templates.contains_key(&squaddie.template_id) {
            panic!("Battle squaddie {} uses unregistered {}", id, squaddie.template_id);
        }
        self.battle_squaddies.insert(id, squaddie);
        self.battle_order.push(id);
    }

    /// Register an action template.
    ///
    /// Panics if a template with the same ID already exists.
    pub fn add_action_template(&mut self, template: ActionTemplate) {
        if self.action_templates.contains_key(&template.id) {
            panic!("Action template {} already registered", template.id);
        }
        self.action_templates.insert(template.id, template);
    }

    /// Get a battle squaddie together with its template.
    pub fn get_squaddie_by_battle_id(
        &self,
        id: BattleSquaddieId,
    ) -> Result<(&SquaddieTemplate, &BattleSquaddie), RepositoryError> {
        let battle = self
            .battle_squaddies
            .get(&id)
            .ok_or(RepositoryError::UnknownBattleSquaddie(id))?;
        let template = self
            .squaddie_templates
            .get(&battle.template_id)
            .ok_or(RepositoryError::UnknownSquaddieTemplate(battle.template_id))?;
        Ok((template, battle))
    }

    /// Get a mutable battle squaddie.
    pub fn get_battle_squaddie_mut(
        &mut self,
        id: BattleSquaddieId,
    ) -> Result<&mut BattleSquaddie, RepositoryError> {
        self.battle_squaddies
            .get_mut(&id)
            .ok_or(RepositoryError::UnknownBattleSquaddie(id))
    }

    pub fn get_action_template(
        &self,
        id: ActionTemplateId,
    ) -> Result<&ActionTemplate, RepositoryError> {
        self.action_templates
            .get(&id)
            .ok_or(RepositoryError::UnknownActionTemplate(id))
    }

    /// Affiliation of a battle squaddie, via its template.
    pub fn affiliation_of(
        &self,
        id: BattleSquaddieId,
    ) -> Result<SquaddieAffiliation, RepositoryError> {
        self.get_squaddie_by_battle_id(id)
            .map(|(template, _)| template.affiliation)
    }

    /// Iterate battle squaddie IDs in the order they were added.
    pub fn battle_squaddie_ids(&self) -> impl Iterator<Item = BattleSquaddieId> + '_ {
        self.battle_order.iter().copied()
    }

    /// Battle squaddies of one affiliation, in the order they were added.
    pub fn squaddies_with_affiliation(
        &self,
        affiliation: SquaddieAffiliation,
    ) -> impl Iterator<Item = (&SquaddieTemplate, &BattleSquaddie)> + '_ {
        self.battle_order.iter().filter_map(move |id| {
            self.get_squaddie_by_battle_id(*id)
                .ok()
                .filter(|(template, _)| template.affiliation == affiliation)
        })
    }

    /// Check whether any squaddie of `affiliation` can still act.
    #[must_use]
    pub fn can_team_act(&self, affiliation: SquaddieAffiliation) -> bool {
        self.squaddies_with_affiliation(affiliation)
            .any(|(_, battle)| battle.can_act())
    }

    /// Check whether any living squaddie of `affiliation` exists.
    #[must_use]
    pub fn has_living_squaddies(&self, affiliation: SquaddieAffiliation) -> bool {
        self.squaddies_with_affiliation(affiliation)
            .any(|(_, battle)| battle.is_alive())
    }

    /// Get the number of battle squaddies.
    #[must_use]
    pub fn battle_squaddie_count(&self) -> usize {
        self.battle_squaddies.len()
    }
}
