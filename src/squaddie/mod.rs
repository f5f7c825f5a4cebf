//! Squaddies and the actions they can take.
//!
//! A squaddie is split into a [`SquaddieTemplate`] (stats shared by every
//! copy) and a [`BattleSquaddie`] (hit points and action points for one
//! battle). [`ObjectRepository`] owns both plus the [`ActionTemplate`]s.

mod action_template;
mod battle;
mod repository;
mod template;

pub use action_template::{ActionTemplate, ActionTrait, TargetRelation};
pub use battle::{BattleSquaddie, DEFAULT_ACTION_POINTS};
pub use repository::{ObjectRepository, RepositoryError};
pub use template::SquaddieTemplate;
