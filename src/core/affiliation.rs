//! Squaddie affiliation (which team a squaddie fights for).
//!
//! Affiliations double as phase names: during the `Enemy` phase every
//! enemy squaddie may act before the rotation moves on.

use serde::{Deserialize, Serialize};

/// Team a squaddie belongs to.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum SquaddieAffiliation {
    /// Controlled by the human player.
    Player,
    /// Hostile to the player.
    Enemy,
    /// Friendly to the player, computer controlled.
    Ally,
    /// Unaffiliated; hostile to every other team.
    None,
}

impl SquaddieAffiliation {
    /// Check whether two affiliations fight on the same side.
    ///
    /// ```
    /// use hex_tactics::core::SquaddieAffiliation;
    ///
    /// assert!(SquaddieAffiliation::Player.is_friendly_to(SquaddieAffiliation::Ally));
    /// assert!(!SquaddieAffiliation::Player.is_friendly_to(SquaddieAffiliation::Enemy));
    /// assert!(SquaddieAffiliation::Enemy.is_friendly_to(SquaddieAffiliation::Enemy));
    /// ```
    #[must_use]
    pub fn is_friendly_to(self, other: SquaddieAffiliation) -> bool {
        use SquaddieAffiliation::{Ally, Player};

        self == other || matches!((self, other), (Player, Ally) | (Ally, Player))
    }

    /// Only the player team takes input from the mouse and keyboard.
    #[must_use]
    pub fn is_player_controlled(self) -> bool {
        self == SquaddieAffiliation::Player
    }
}
