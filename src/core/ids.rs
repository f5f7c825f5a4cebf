//! Identifier newtypes for battle objects.
//!
//! Squaddies are split into a shared template and a per-battle instance, so
//! two id spaces exist: `SquaddieTemplateId` for the template and
//! `BattleSquaddieId` for the instance on the map. Action templates have
//! their own id space.
//!
//! ## Usage
//!
//! ```
//! use hex_tactics::core::{BattleSquaddieId, SquaddieTemplateId};
//!
//! let template = SquaddieTemplateId::new(1);
//! let first = BattleSquaddieId::new(10);
//! let second = BattleSquaddieId::new(11);
//!
//! assert_ne!(first, second);
//! assert_eq!(template.raw(), 1);
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a squaddie instance taking part in a battle.
///
/// Several battle squaddies may share one [`SquaddieTemplateId`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BattleSquaddieId(pub u32);

impl BattleSquaddieId {
    /// Create a new battle squaddie ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for BattleSquaddieId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for BattleSquaddieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BattleSquaddie({})", self.0)
    }
}

/// Identifier of a squaddie template (shared stats and action list).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SquaddieTemplateId(pub u32);

impl SquaddieTemplateId {
    /// Create a new squaddie template ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SquaddieTemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SquaddieTemplate({})", self.0)
    }
}

/// Identifier of an action template.
///
/// The engine only compares these; meaning comes from the
/// [`ActionTemplate`](crate::squaddie::ActionTemplate) registered under the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActionTemplateId(pub u16);

impl ActionTemplateId {
    /// Create a new action template ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ActionTemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActionTemplate({})", self.0)
    }
}
